//! Deterministic glue around the recommendation core: pension arithmetic,
//! the risk-quiz scorer and the outbound registration proxy.

pub mod handlers;
pub mod pension;
pub mod registration;
pub mod risk_quiz;
