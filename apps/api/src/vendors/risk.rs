use std::fmt;

use serde::{Deserialize, Serialize};

/// Investment risk tolerance, lowest to highest. Derived from the quiz score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    ShortTerm,
    Conservative,
    Balanced,
    Growth,
    AggressiveGrowth,
    MostAggressive,
}

impl RiskTier {
    pub const ALL: [RiskTier; 6] = [
        RiskTier::ShortTerm,
        RiskTier::Conservative,
        RiskTier::Balanced,
        RiskTier::Growth,
        RiskTier::AggressiveGrowth,
        RiskTier::MostAggressive,
    ];

    /// Tier assumed when the user has not taken the quiz.
    pub const DEFAULT: RiskTier = RiskTier::Conservative;

    /// Case-insensitive parse that ignores spaces, hyphens and underscores,
    /// so "Most Aggressive", "most-aggressive" and "MostAggressive" agree.
    /// The legacy label "Aggressive" maps to `AggressiveGrowth`.
    pub fn parse(label: &str) -> Option<RiskTier> {
        let key: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "shortterm" => Some(RiskTier::ShortTerm),
            "conservative" => Some(RiskTier::Conservative),
            "balanced" => Some(RiskTier::Balanced),
            "growth" => Some(RiskTier::Growth),
            "aggressivegrowth" | "aggressive" => Some(RiskTier::AggressiveGrowth),
            "mostaggressive" => Some(RiskTier::MostAggressive),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::ShortTerm => "ShortTerm",
            RiskTier::Conservative => "Conservative",
            RiskTier::Balanced => "Balanced",
            RiskTier::Growth => "Growth",
            RiskTier::AggressiveGrowth => "AggressiveGrowth",
            RiskTier::MostAggressive => "MostAggressive",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_and_separator_insensitive() {
        assert_eq!(RiskTier::parse("conservative"), Some(RiskTier::Conservative));
        assert_eq!(RiskTier::parse("Most Aggressive"), Some(RiskTier::MostAggressive));
        assert_eq!(RiskTier::parse("short-term"), Some(RiskTier::ShortTerm));
        assert_eq!(RiskTier::parse("AGGRESSIVE_GROWTH"), Some(RiskTier::AggressiveGrowth));
    }

    #[test]
    fn test_legacy_aggressive_label() {
        assert_eq!(RiskTier::parse("Aggressive"), Some(RiskTier::AggressiveGrowth));
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(RiskTier::parse("Reckless"), None);
        assert_eq!(RiskTier::parse(""), None);
    }

    #[test]
    fn test_labels_parse_back() {
        for tier in RiskTier::ALL {
            assert_eq!(RiskTier::parse(tier.label()), Some(tier));
        }
    }

    #[test]
    fn test_ordering_low_to_high() {
        assert!(RiskTier::ShortTerm < RiskTier::Conservative);
        assert!(RiskTier::Growth < RiskTier::AggressiveGrowth);
        assert!(RiskTier::AggressiveGrowth < RiskTier::MostAggressive);
        let mut sorted = RiskTier::ALL;
        sorted.sort();
        assert_eq!(sorted, RiskTier::ALL);
    }
}
