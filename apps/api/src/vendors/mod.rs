//! Vendor Catalog — static base vendors, carrier-name aliases, and the
//! growth-rate / product-type metadata used to enrich recommendations.

pub mod catalog;
pub mod extras;
pub mod risk;
