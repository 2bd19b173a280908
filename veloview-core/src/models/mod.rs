//! Domain models for VeloView.
//!
//! These types mirror the shapes the Velog GraphQL API returns, plus the
//! ledger and aggregate types produced by one stats collection run.
//!
//! ## Submodules
//!
//! - [`post`] - Listing types (`Post`, `VelogUser`)
//! - [`stats`] - Ledger types (`StatOutcome`, `PostStatEntry`, `AggregateReport`)

mod post;
mod stats;

// Re-export everything at the models level
pub use post::{Post, UserProfile, VelogUser};
pub use stats::{AggregateReport, PostStatEntry, StatOutcome};
