//! Growth-rate / product-type metadata attached to recommended vendors.
//!
//! Lookup order is fixed: the curated (vendor, tier) table, then the
//! tier-only default table, then a constant catch-all.

use std::collections::HashMap;

use crate::vendors::risk::RiskTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorExtras {
    pub growth_rate: &'static str,
    pub product_type: &'static str,
}

impl VendorExtras {
    const fn new(growth_rate: &'static str, product_type: &'static str) -> Self {
        Self {
            growth_rate,
            product_type,
        }
    }
}

/// Returned when the risk label is not a known tier.
pub const CATCH_ALL: VendorExtras = VendorExtras::new("N/A", "General Investments");

const CURATED: &[(&str, RiskTier, VendorExtras)] = &[
    (
        "National Life Group",
        RiskTier::ShortTerm,
        VendorExtras::new("2-3%", "Fixed Annuity"),
    ),
    (
        "National Life Group",
        RiskTier::Conservative,
        VendorExtras::new("4-5%", "Fixed Indexed Annuity"),
    ),
    (
        "Midland",
        RiskTier::Conservative,
        VendorExtras::new("3-5%", "Fixed Annuity"),
    ),
    (
        "Global Atlantic",
        RiskTier::ShortTerm,
        VendorExtras::new("2-3%", "Multi-Year Guaranteed Annuity"),
    ),
    (
        "Security Benefit",
        RiskTier::Balanced,
        VendorExtras::new("5-6%", "Fixed Indexed Annuity"),
    ),
    (
        "F&G",
        RiskTier::Balanced,
        VendorExtras::new("4-6%", "Fixed Indexed Annuity"),
    ),
    (
        "Athene",
        RiskTier::Growth,
        VendorExtras::new("6-7%", "Fixed Indexed Annuity (Growth Cap)"),
    ),
    (
        "Nationwide",
        RiskTier::Growth,
        VendorExtras::new("6-8%", "Variable Annuity"),
    ),
    (
        "American Equity",
        RiskTier::AggressiveGrowth,
        VendorExtras::new("7-9%", "Registered Index-Linked Annuity"),
    ),
    (
        "American Equity",
        RiskTier::MostAggressive,
        VendorExtras::new("9-11%", "Registered Index-Linked Annuity"),
    ),
];

const TIER_DEFAULTS: &[(RiskTier, VendorExtras)] = &[
    (
        RiskTier::ShortTerm,
        VendorExtras::new("1-2%", "Money Market / Stable Value"),
    ),
    (
        RiskTier::Conservative,
        VendorExtras::new("3-4%", "Fixed Annuity"),
    ),
    (
        RiskTier::Balanced,
        VendorExtras::new("4-6%", "Fixed Indexed Annuity"),
    ),
    (
        RiskTier::Growth,
        VendorExtras::new("6-8%", "Variable Annuity"),
    ),
    (
        RiskTier::AggressiveGrowth,
        VendorExtras::new("8-10%", "Equity-Heavy Variable Annuity"),
    ),
    (
        RiskTier::MostAggressive,
        VendorExtras::new("10%+", "Equity Mutual Funds"),
    ),
];

/// Two-level lookup: exact (vendor, tier) first, then tier alone.
#[derive(Debug, Clone)]
pub struct ExtrasTable {
    curated: HashMap<RiskTier, HashMap<&'static str, VendorExtras>>,
    by_tier: HashMap<RiskTier, VendorExtras>,
}

impl ExtrasTable {
    pub fn standard() -> Self {
        let mut curated: HashMap<RiskTier, HashMap<&'static str, VendorExtras>> = HashMap::new();
        for (vendor, tier, extras) in CURATED {
            curated.entry(*tier).or_default().insert(*vendor, *extras);
        }
        Self {
            curated,
            by_tier: TIER_DEFAULTS.iter().copied().collect(),
        }
    }

    /// Total lookup keyed by a raw tier label; unknown labels get [`CATCH_ALL`].
    pub fn lookup(&self, vendor: &str, risk_label: &str) -> VendorExtras {
        match RiskTier::parse(risk_label) {
            Some(tier) => self.lookup_tier(vendor, tier),
            None => CATCH_ALL,
        }
    }

    pub fn lookup_tier(&self, vendor: &str, tier: RiskTier) -> VendorExtras {
        if let Some(extras) = self.curated.get(&tier).and_then(|m| m.get(vendor)) {
            return *extras;
        }
        if let Some(extras) = self.by_tier.get(&tier) {
            return *extras;
        }
        CATCH_ALL
    }
}

impl Default for ExtrasTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_entry_wins() {
        let table = ExtrasTable::standard();
        let extras = table.lookup("National Life Group", "Conservative");
        assert_eq!(extras.growth_rate, "4-5%");
        assert_eq!(extras.product_type, "Fixed Indexed Annuity");
    }

    #[test]
    fn test_uncurated_vendor_falls_back_to_tier_default() {
        let table = ExtrasTable::standard();
        assert_eq!(
            table.lookup("Symetra", "Conservative"),
            VendorExtras::new("3-4%", "Fixed Annuity")
        );
    }

    #[test]
    fn test_curated_entry_is_tier_specific() {
        let table = ExtrasTable::standard();
        // Curated for Conservative only; Growth uses the Growth default.
        assert_eq!(
            table.lookup("Midland", "Growth"),
            VendorExtras::new("6-8%", "Variable Annuity")
        );
    }

    #[test]
    fn test_vendor_key_is_exact() {
        let table = ExtrasTable::standard();
        assert_eq!(
            table.lookup("national life group", "Conservative"),
            VendorExtras::new("3-4%", "Fixed Annuity")
        );
    }

    #[test]
    fn test_unknown_tier_gets_catch_all() {
        let table = ExtrasTable::standard();
        assert_eq!(table.lookup("Athene", "Reckless"), CATCH_ALL);
        assert_eq!(CATCH_ALL.growth_rate, "N/A");
        assert_eq!(CATCH_ALL.product_type, "General Investments");
    }

    #[test]
    fn test_lookup_never_returns_empty_fields() {
        let table = ExtrasTable::standard();
        let vendors = ["National Life Group", "Midland", "Athene", "Nobody", ""];
        let labels = [
            "ShortTerm",
            "Conservative",
            "Balanced",
            "Growth",
            "AggressiveGrowth",
            "MostAggressive",
            "most aggressive",
            "unknown",
            "",
        ];
        for vendor in vendors {
            for label in labels {
                let extras = table.lookup(vendor, label);
                assert!(!extras.growth_rate.is_empty(), "{vendor}/{label}");
                assert!(!extras.product_type.is_empty(), "{vendor}/{label}");
            }
        }
    }

    #[test]
    fn test_every_tier_has_a_default() {
        let table = ExtrasTable::standard();
        for tier in RiskTier::ALL {
            assert!(table.by_tier.contains_key(&tier), "{tier} missing default");
        }
    }
}
