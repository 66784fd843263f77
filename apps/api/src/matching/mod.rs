//! District name matching: canonical normalization plus a bounded fuzzy resolver.

pub mod normalize;
pub mod resolver;
