//! External process integration.
//!
//! Preset archives are only ever read and written through the `hidx` tool;
//! this crate never parses the `.idx` format itself.

pub mod hidx;
