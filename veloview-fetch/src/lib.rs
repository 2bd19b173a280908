// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `VeloView` Fetch
//!
//! GraphQL transport and the two fetch phases of a `VeloView` session:
//!
//! 1. The pagination walker ([`walker::list_all_posts`]) drives the
//!    cursor-based `Posts` query until the server signals end-of-data and
//!    returns the complete ordered post list. Any failure here aborts the
//!    session; a partial listing would silently under-report totals.
//! 2. The stats collector ([`aggregator::collect_stats`]) issues one
//!    `GetStats` request per post, strictly sequentially, classifies each
//!    result, and returns a full-length ledger. Per-post failures are
//!    recorded and never abort the run.
//!
//! The [`transport::Transport`] trait is the seam between the phases and the
//! network; [`transport::HttpTransport`] is the reqwest-backed
//! implementation, configured once via [`config::TransportConfig`].
//!
//! ## Example
//!
//! ```ignore
//! use veloview_core::{AggregateReport, Credential};
//! use veloview_fetch::{collect_stats, list_all_posts, HttpTransport, ListOptions, TransportConfig};
//!
//! let credential = Credential::from_cookie_input(&pasted)?;
//! let transport = HttpTransport::new(TransportConfig::default(), &credential)?;
//!
//! let posts = list_all_posts(&transport, "username", &ListOptions::default()).await?;
//! let ledger = collect_stats(&transport, &posts, |done, total| {
//!     eprintln!("{done}/{total}");
//! })
//! .await;
//! let report = AggregateReport::from_ledger(&ledger);
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod queries;
pub mod transport;
pub mod user;
pub mod walker;

// Re-export key types at crate root
pub use aggregator::collect_stats;
pub use config::{CredentialHeader, TransportConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
pub use error::FetchError;
pub use transport::{GqlReply, GraphqlError, HttpTransport, Transport};
pub use user::fetch_user;
pub use walker::{list_all_posts, ListOptions, DEFAULT_PAGE_SIZE};
