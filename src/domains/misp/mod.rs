//! MISP platform domain.
//!
//! Everything that talks to the remote MISP instance lives here:
//!
//! - `connection`: the single process-wide connection and its readiness guard
//! - `client`: typed REST calls and response shaping
//! - `version`: capability probing across API version skew
//! - `types`: event/attribute drafts and MISP's numeric enum vocabularies
//! - `error`: the closed failure taxonomy

pub mod client;
pub mod connection;
pub mod error;
pub mod types;
pub mod version;

pub use client::{CreatedEvent, MispClient};
pub use connection::MispConnection;
pub use error::MispError;
pub use types::{Analysis, AttributeDraft, Distribution, EventDraft, ThreatLevel};
pub use version::{UNKNOWN_VERSION, VersionSupport};
