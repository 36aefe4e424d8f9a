//! Domain layer
//!
//! Contains the post model and the ports the feed needs from its host.
//! - `entities`: typed post records
//! - `ports`: Trait definitions for external collaborators

pub mod entities;
pub mod ports;
