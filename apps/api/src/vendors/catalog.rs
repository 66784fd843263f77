//! Static base-vendor catalog and per-tier recommendation policy.
//!
//! Built once at startup, shared read-only behind an `Arc`.

use std::collections::HashMap;

use serde::Serialize;

use crate::vendors::extras::{ExtrasTable, VendorExtras};
use crate::vendors::risk::RiskTier;

/// A catalog vendor, independent of any district.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseVendor {
    pub vendor: String,
    pub risk_score_category: Vec<RiskTier>,
    pub business_type: String,
    pub notes: Option<String>,
    /// Offered as a Traditional/Roth IRA when no district vendor fits.
    #[serde(skip)]
    pub ira_fallback: bool,
    /// Lower-case fragments that identify this vendor inside free-text carrier names.
    #[serde(skip)]
    pub aliases: Vec<String>,
}

impl BaseVendor {
    pub fn suits(&self, tier: RiskTier) -> bool {
        self.risk_score_category.contains(&tier)
    }
}

/// A base vendor enriched with tier-specific metadata at selection time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedVendor {
    #[serde(flatten)]
    pub base: BaseVendor,
    pub recommended_growth_rate: String,
    pub recommended_product_type: String,
    pub risk_tier: RiskTier,
}

impl EnrichedVendor {
    pub fn name(&self) -> &str {
        &self.base.vendor
    }
}

/// Which vendors a tier prefers, and where to look next.
#[derive(Debug, Clone, PartialEq)]
pub struct TierPolicy {
    pub preferred: [&'static str; 2],
    pub secondary: Vec<&'static str>,
}

struct VendorSeed {
    name: &'static str,
    tiers: &'static [RiskTier],
    business_type: &'static str,
    notes: &'static str,
    ira_fallback: bool,
    aliases: &'static [&'static str],
}

const VENDORS: &[VendorSeed] = &[
    VendorSeed {
        name: "American Equity",
        tiers: &[RiskTier::AggressiveGrowth, RiskTier::MostAggressive],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["american equity"],
    },
    VendorSeed {
        name: "Athene",
        tiers: &[RiskTier::Growth],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["athene"],
    },
    VendorSeed {
        name: "AuguStar",
        tiers: &[RiskTier::Conservative],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["augustar", "ohio national"],
    },
    VendorSeed {
        name: "AX Corebridge",
        tiers: &[RiskTier::Balanced],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["corebridge"],
    },
    VendorSeed {
        name: "AX North American",
        tiers: &[RiskTier::Conservative],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["north american"],
    },
    VendorSeed {
        name: "F&G",
        tiers: &[RiskTier::Balanced],
        business_type: "Annuity",
        notes: "",
        ira_fallback: false,
        aliases: &["f&g", "fidelity & guaranty", "fidelity and guaranty"],
    },
    VendorSeed {
        name: "Global Atlantic",
        tiers: &[RiskTier::Conservative],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["global atlantic"],
    },
    VendorSeed {
        name: "Midland",
        tiers: &[RiskTier::Conservative],
        business_type: "Annuity",
        notes: "",
        ira_fallback: true,
        aliases: &["midland"],
    },
    VendorSeed {
        name: "National Life Group",
        tiers: &[RiskTier::Conservative],
        business_type: "Annuity, Life",
        notes: "",
        ira_fallback: true,
        aliases: &["national life group", "nlg"],
    },
    VendorSeed {
        name: "Nationwide",
        tiers: &[RiskTier::Conservative, RiskTier::Growth],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["nationwide"],
    },
    VendorSeed {
        name: "Security Benefit",
        tiers: &[RiskTier::Balanced],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["security benefit"],
    },
    VendorSeed {
        name: "Symetra",
        tiers: &[RiskTier::Conservative],
        business_type: "Annuity",
        notes: "Single Premium",
        ira_fallback: false,
        aliases: &["symetra"],
    },
];

/// Filler candidates for the "one preferred vendor found" branch, in order.
const PLACEHOLDER_POOL: &[&str] = &["Nationwide", "Symetra", "Global Atlantic", "Athene"];

fn standard_policy(tier: RiskTier) -> TierPolicy {
    match tier {
        RiskTier::ShortTerm => TierPolicy {
            preferred: ["Midland", "Global Atlantic"],
            secondary: vec!["AuguStar", "National Life Group", "Symetra"],
        },
        RiskTier::Conservative => TierPolicy {
            preferred: ["National Life Group", "Midland"],
            secondary: vec![
                "AuguStar",
                "AX North American",
                "Global Atlantic",
                "Nationwide",
                "Symetra",
            ],
        },
        RiskTier::Balanced => TierPolicy {
            preferred: ["Security Benefit", "F&G"],
            secondary: vec!["AX Corebridge", "Nationwide"],
        },
        RiskTier::Growth => TierPolicy {
            preferred: ["Athene", "Nationwide"],
            secondary: vec!["Security Benefit", "AX Corebridge"],
        },
        RiskTier::AggressiveGrowth => TierPolicy {
            preferred: ["American Equity", "Athene"],
            secondary: vec!["Security Benefit", "Nationwide"],
        },
        RiskTier::MostAggressive => TierPolicy {
            preferred: ["American Equity", "Security Benefit"],
            secondary: vec!["Athene"],
        },
    }
}

#[derive(Debug, Clone)]
pub struct VendorCatalog {
    vendors: Vec<BaseVendor>,
    policies: HashMap<RiskTier, TierPolicy>,
    placeholder_pool: Vec<&'static str>,
    extras: ExtrasTable,
}

impl VendorCatalog {
    pub fn standard() -> Self {
        let vendors = VENDORS
            .iter()
            .map(|seed| BaseVendor {
                vendor: seed.name.to_string(),
                risk_score_category: seed.tiers.to_vec(),
                business_type: seed.business_type.to_string(),
                notes: (!seed.notes.is_empty()).then(|| seed.notes.to_string()),
                ira_fallback: seed.ira_fallback,
                aliases: seed.aliases.iter().map(|a| a.to_string()).collect(),
            })
            .collect();

        Self {
            vendors,
            policies: RiskTier::ALL
                .iter()
                .map(|tier| (*tier, standard_policy(*tier)))
                .collect(),
            placeholder_pool: PLACEHOLDER_POOL.to_vec(),
            extras: ExtrasTable::standard(),
        }
    }

    pub fn vendors(&self) -> &[BaseVendor] {
        &self.vendors
    }

    /// Case-insensitive lookup by catalog name.
    pub fn get(&self, name: &str) -> Option<&BaseVendor> {
        self.vendors
            .iter()
            .find(|v| v.vendor.eq_ignore_ascii_case(name.trim()))
    }

    pub fn policy(&self, tier: RiskTier) -> &TierPolicy {
        // Every tier is populated in `standard()`.
        &self.policies[&tier]
    }

    pub fn placeholder_pool(&self) -> &[&'static str] {
        &self.placeholder_pool
    }

    /// Vendors tagged as IRA fallbacks, in catalog order.
    pub fn ira_fallback(&self) -> impl Iterator<Item = &BaseVendor> {
        self.vendors.iter().filter(|v| v.ira_fallback)
    }

    /// Whether a free-text district carrier name refers to `vendor`.
    ///
    /// Case-insensitive substring containment of any of the vendor's aliases
    /// (or its catalog name) in the carrier name.
    pub fn carrier_matches(&self, carrier_name: &str, vendor: &str) -> bool {
        let haystack = carrier_name.to_lowercase();
        if haystack.trim().is_empty() {
            return false;
        }
        let vendor_lower = vendor.to_lowercase();
        if haystack.contains(&vendor_lower) {
            return true;
        }
        self.get(vendor)
            .map(|v| v.aliases.iter().any(|alias| haystack.contains(alias.as_str())))
            .unwrap_or(false)
    }

    pub fn lookup_extras(&self, vendor: &str, risk_label: &str) -> VendorExtras {
        self.extras.lookup(vendor, risk_label)
    }

    /// Copies a catalog vendor and attaches the metadata for `tier`.
    pub fn enrich(&self, vendor: &BaseVendor, tier: RiskTier) -> EnrichedVendor {
        let extras = self.lookup_extras(&vendor.vendor, tier.label());
        EnrichedVendor {
            base: vendor.clone(),
            recommended_growth_rate: extras.growth_rate.to_string(),
            recommended_product_type: extras.product_type.to_string(),
            risk_tier: tier,
        }
    }
}

impl Default for VendorCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
