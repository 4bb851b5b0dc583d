//! Application layer: the publish workflow and the prompts it drives.

pub mod manager;
pub mod prompt;
