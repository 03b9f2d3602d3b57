//! Domain definitions.

pub mod chip;
pub mod criteria;
pub mod listing;

pub use self::{chip::Chip, criteria::Criteria, listing::Listing};
