//! Preset bookkeeping: node identity, archive locations, the section-list
//! manifest and the scratch workspace.
//!
//! Nothing here talks to the terminal or spawns processes.

pub mod error;
pub mod fs;
pub mod node;
pub mod paths;
pub mod sections;
pub mod workspace;
