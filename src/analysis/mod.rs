//! Display-only computations over broker records.
//!
//! Comparison outcomes (winner badges, per-category leaders) and the
//! trust score shown on review pages.

pub mod compare;
pub mod trust;

pub use compare::{advantages, Badge, Comparison};
pub use trust::{trust_color, trust_score};
