//! Business logic between `zonebind-api` and the CLI.
//!
//! - **Zone resolution** ([`zone`]): picks the security zone whose name
//!   best matches a free-form query, using the weighted fuzzy ratio from
//!   [`fuzzy`] and a strict score threshold.
//!
//! - **Bind decision** ([`bind`]): given an element's existing zone
//!   mappings, decides whether an interface gets a new mapping, is already
//!   bound, or must be left alone because the zone is in use.
//!
//! - **Pipeline** ([`ZoneBinder`]): walks spoke sites, their elements and
//!   matching interfaces, applies the decision per interface, and collects a
//!   [`BindReport`]. Per-interface failures are recorded, never fatal.
//!
//! - **Session** ([`session`]): token or interactive login, ending with a
//!   profile fetch that pins the tenant.

pub mod bind;
pub mod binder;
pub mod config;
pub mod error;
pub mod filter;
pub mod fuzzy;
pub mod session;
pub mod zone;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bind::{BindDecision, decide, new_mapping};
pub use binder::{BindOptions, BindOutcome, BindRecord, BindReport, ZoneBinder};
pub use config::{AuthCredentials, ControllerConfig, TlsVerification, TokenSource};
pub use error::CoreError;
pub use session::{CredentialPrompt, connect};
pub use zone::{DEFAULT_MATCH_THRESHOLD, ZoneMatch, match_zone, resolve_zone};
pub use zonebind_api::{CgxClient, DEFAULT_CONTROLLER};
