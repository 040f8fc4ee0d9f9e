//! Commute aggregation.
//!
//! This module groups a record set by day, mode, weather and route,
//! reduces each group to counts, means and spreads, and derives the
//! scalar statistics printed in the summary report.

pub mod aggregate;
pub mod summary;
pub mod types;
pub mod utility;

pub use aggregate::aggregate;
pub use summary::summarize;
