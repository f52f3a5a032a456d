//! MISP tools module.
//!
//! One file per tool, mirroring the platform operations this server
//! exposes:
//! - `ping`: connectivity check with version capability fallback
//! - `search_events`: event search by observable value
//! - `add_event`: event creation
//! - `add_attribute`: IOC creation against an existing event

pub mod add_attribute;
pub mod add_event;
pub mod common;
pub mod ping;
pub mod search_events;

pub use add_attribute::{MispAddAttributeParams, MispAddAttributeTool};
pub use add_event::{MispAddEventParams, MispAddEventTool};
pub use ping::{MispPingParams, MispPingTool};
pub use search_events::{MispSearchEventsParams, MispSearchEventsTool};
