// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `VeloView` Core
//!
//! Core types and credential handling for the `VeloView` application.
//!
//! This crate provides the foundational abstractions used across the other
//! `VeloView` crates, including:
//!
//! - Domain models (posts, per-post stat outcomes, aggregate reports)
//! - Credential handling (cookie sanitization, header derivation)
//! - Error types
//!
//! ## Key Types
//!
//! - [`Post`] - One published post as returned by the listing query
//! - [`StatOutcome`] - Per-post classification (views, no permission, failed)
//! - [`PostStatEntry`] - Ledger record pairing a post with its outcome
//! - [`AggregateReport`] - Totals folded from a finished ledger
//! - [`Credential`] - Opaque bearer material (raw cookie or token pair)

pub mod credential;
pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{AggregateReport, Post, PostStatEntry, StatOutcome, UserProfile, VelogUser};

// Re-export credential types
pub use credential::{cookie_value, sanitize_cookie, CookieHints, Credential, MIN_COOKIE_LEN};
