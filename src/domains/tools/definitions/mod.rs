//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod misp;

pub use misp::{
    MispAddAttributeParams, MispAddAttributeTool, MispAddEventParams, MispAddEventTool,
    MispPingParams, MispPingTool, MispSearchEventsParams, MispSearchEventsTool,
};
