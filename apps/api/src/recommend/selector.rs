//! Risk-Tier Selector — picks at most two vendors for a district and risk tier.
//!
//! Policy, in order, for the effective tier:
//! 1. Both preferred vendors approved in the district → recommend the pair.
//! 2. Exactly one approved → recommend it plus the first district carrier on
//!    the tier's secondary list, or else a filler from the placeholder pool.
//! 3. Neither approved → up to two district carriers matching the pair or the
//!    secondary list; if none, the IRA fallback vendors instead.
//!
//! An unrecognized tier label yields an empty selection with an explanatory
//! message. No branch ever returns more than two vendors in either list.

use std::str::FromStr;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::models::district::Carrier;
use crate::vendors::catalog::{EnrichedVendor, VendorCatalog};
use crate::vendors::risk::RiskTier;

const MAX_RECOMMENDATIONS: usize = 2;

const IRA_FALLBACK_MESSAGE: &str = "No recommended 403(b) carriers in your district match your risk profile. \
     Below is the full list of approved carriers in your district. \
     For a Traditional or Roth IRA option, here are two fallback choices.";

const NO_DISTRICT_FALLBACK_MESSAGE: &str = "We could not identify your school district, so we cannot check its approved 403(b) carriers. \
     For a Traditional or Roth IRA option, here are two fallback choices.";

/// How the second vendor is chosen when only one preferred vendor is approved
/// and no secondary vendor is either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillerStrategy {
    /// First placeholder in pool order. Deterministic.
    #[default]
    Ordered,
    /// Uniform pick from the placeholder pool.
    Random,
}

impl FromStr for FillerStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(FillerStrategy::Ordered),
            "random" => Ok(FillerStrategy::Random),
            other => Err(format!("unknown filler strategy '{other}'")),
        }
    }
}

/// Which terminal branch of the policy produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    PreferredPair,
    PreferredWithSecondary,
    PreferredWithFiller,
    DistrictMatches,
    IraFallback,
    UnrecognizedTier,
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub top_403b: Vec<EnrichedVendor>,
    pub fallback_ira: Vec<EnrichedVendor>,
    pub message: String,
    pub outcome: SelectionOutcome,
    /// Tier the policy ran with; `None` only for an unrecognized label.
    pub tier: Option<RiskTier>,
}

/// Resolves the tier the policy should use. Absent or blank → Conservative;
/// an unknown label → `Err(label)`.
pub fn effective_tier(user_risk: Option<&str>) -> Result<RiskTier, String> {
    match user_risk.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(RiskTier::DEFAULT),
        Some(label) => RiskTier::parse(label).ok_or_else(|| label.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct RiskTierSelector {
    catalog: Arc<VendorCatalog>,
    filler: FillerStrategy,
}

impl RiskTierSelector {
    pub fn new(catalog: Arc<VendorCatalog>, filler: FillerStrategy) -> Self {
        Self { catalog, filler }
    }

    /// Runs the policy against a resolved district's carriers.
    pub fn select(&self, carriers: &[Carrier], user_risk: Option<&str>) -> Selection {
        self.run(Some(carriers), user_risk)
    }

    /// Runs the policy when no district was resolved; only the IRA fallback can apply.
    pub fn select_without_district(&self, user_risk: Option<&str>) -> Selection {
        self.run(None, user_risk)
    }

    fn run(&self, carriers: Option<&[Carrier]>, user_risk: Option<&str>) -> Selection {
        let tier = match effective_tier(user_risk) {
            Ok(tier) => tier,
            Err(label) => {
                debug!(label = %label, "Unrecognized risk tier");
                return Selection {
                    top_403b: Vec::new(),
                    fallback_ira: Vec::new(),
                    message: format!(
                        "Unrecognized risk tier '{label}'. No vendor recommendations could be made."
                    ),
                    outcome: SelectionOutcome::UnrecognizedTier,
                    tier: None,
                };
            }
        };

        let assumed = user_risk.map_or(true, |r| r.trim().is_empty());
        let mut selection = self.select_for_tier(carriers.unwrap_or_default(), tier);
        if carriers.is_none() && selection.outcome == SelectionOutcome::IraFallback {
            selection.message = NO_DISTRICT_FALLBACK_MESSAGE.to_string();
        }
        if assumed {
            selection.message = format!(
                "No risk tier supplied; assuming {}. {}",
                RiskTier::DEFAULT,
                selection.message
            );
        }

        debug!(
            tier = %tier,
            outcome = ?selection.outcome,
            top = ?selection.top_403b.iter().map(EnrichedVendor::name).collect::<Vec<_>>(),
            fallback = ?selection.fallback_ira.iter().map(EnrichedVendor::name).collect::<Vec<_>>(),
            "Vendor selection complete"
        );
        selection
    }

    fn select_for_tier(&self, carriers: &[Carrier], tier: RiskTier) -> Selection {
        let policy = self.catalog.policy(tier);
        let [first, second] = policy.preferred;

        match (
            self.district_offers(carriers, first),
            self.district_offers(carriers, second),
        ) {
            (true, true) => self.selection(
                tier,
                &[first, second],
                format!(
                    "Both of our preferred {tier} vendors, {first} and {second}, are approved in your district."
                ),
                SelectionOutcome::PreferredPair,
            ),
            (true, false) | (false, true) => {
                let chosen = if self.district_offers(carriers, first) {
                    first
                } else {
                    second
                };

                if let Some(other) = self.first_secondary_match(carriers, &policy.secondary, chosen)
                {
                    return self.selection(
                        tier,
                        &[chosen, other],
                        format!(
                            "{chosen} is approved in your district. {other} is also approved and suits a {tier} profile."
                        ),
                        SelectionOutcome::PreferredWithSecondary,
                    );
                }

                match self.filler(chosen) {
                    Some(filler) => self.selection(
                        tier,
                        &[chosen, filler],
                        format!(
                            "{chosen} is approved in your district. We also suggest {filler} as a second {tier} option; \
                             confirm with your district that it is available before enrolling."
                        ),
                        SelectionOutcome::PreferredWithFiller,
                    ),
                    None => self.selection(
                        tier,
                        &[chosen],
                        format!("{chosen} is approved in your district."),
                        SelectionOutcome::PreferredWithFiller,
                    ),
                }
            }
            (false, false) => {
                let candidates: Vec<&str> = policy
                    .preferred
                    .iter()
                    .chain(policy.secondary.iter())
                    .copied()
                    .collect();
                let matched = self.district_matches(carriers, &candidates);

                if !matched.is_empty() {
                    return self.selection(
                        tier,
                        &matched,
                        format!(
                            "Your district does not offer our preferred {tier} vendors, \
                             but these approved carriers suit your profile."
                        ),
                        SelectionOutcome::DistrictMatches,
                    );
                }

                Selection {
                    top_403b: Vec::new(),
                    fallback_ira: self
                        .catalog
                        .ira_fallback()
                        .take(MAX_RECOMMENDATIONS)
                        .map(|v| self.catalog.enrich(v, tier))
                        .collect(),
                    message: IRA_FALLBACK_MESSAGE.to_string(),
                    outcome: SelectionOutcome::IraFallback,
                    tier: Some(tier),
                }
            }
        }
    }

    fn district_offers(&self, carriers: &[Carrier], vendor: &str) -> bool {
        carriers
            .iter()
            .any(|c| self.catalog.carrier_matches(&c.name, vendor))
    }

    /// First district carrier (in carrier order) that is on the secondary list.
    fn first_secondary_match(
        &self,
        carriers: &[Carrier],
        secondary: &[&'static str],
        chosen: &str,
    ) -> Option<&'static str> {
        carriers.iter().find_map(|carrier| {
            secondary
                .iter()
                .copied()
                .find(|v| *v != chosen && self.catalog.carrier_matches(&carrier.name, v))
        })
    }

    /// Up to two distinct candidate vendors, in district carrier order.
    fn district_matches(&self, carriers: &[Carrier], candidates: &[&'static str]) -> Vec<&'static str> {
        let mut picked: Vec<&'static str> = Vec::new();
        for carrier in carriers {
            if picked.len() == MAX_RECOMMENDATIONS {
                break;
            }
            if let Some(vendor) = candidates
                .iter()
                .copied()
                .find(|v| !picked.contains(v) && self.catalog.carrier_matches(&carrier.name, v))
            {
                picked.push(vendor);
            }
        }
        picked
    }

    fn filler(&self, chosen: &str) -> Option<&'static str> {
        let pool: Vec<&'static str> = self
            .catalog
            .placeholder_pool()
            .iter()
            .copied()
            .filter(|v| *v != chosen)
            .collect();

        match self.filler {
            FillerStrategy::Ordered => pool.first().copied(),
            FillerStrategy::Random => pool.choose(&mut rand::thread_rng()).copied(),
        }
    }

    fn selection(
        &self,
        tier: RiskTier,
        vendors: &[&str],
        message: String,
        outcome: SelectionOutcome,
    ) -> Selection {
        Selection {
            top_403b: vendors
                .iter()
                .take(MAX_RECOMMENDATIONS)
                .filter_map(|name| self.catalog.get(name))
                .map(|v| self.catalog.enrich(v, tier))
                .collect(),
            fallback_ira: Vec::new(),
            message,
            outcome,
            tier: Some(tier),
        }
    }
}
