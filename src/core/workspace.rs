//! Per-run scratch directory.
//!
//! Archives are extracted into `<scratch>/<user>_<timestamp>/{local,remote}`,
//! edited there, and the remote side is re-archived from it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use super::error::{PresetError, PresetResult};

const STAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    keep: bool,
}

impl Workspace {
    /// Create a fresh workspace under `scratch_root`.
    pub fn create(scratch_root: &Path, keep: bool) -> PresetResult<Self> {
        let stamp = Local::now().format(STAMP_FORMAT).to_string();
        let base = format!("{}_{}", current_user(), stamp);

        fs::create_dir_all(scratch_root).map_err(PresetError::io("creating", scratch_root))?;

        // Two runs inside the same second would share a name.
        let mut attempt = 0u32;
        let root = loop {
            let name = if attempt == 0 {
                base.clone()
            } else {
                format!("{base}_{attempt}")
            };
            let candidate = scratch_root.join(name);
            match fs::create_dir(&candidate) {
                Ok(()) => break candidate,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(PresetError::io("creating", &candidate)(e)),
            }
        };

        let ws = Self { root, keep };
        for dir in [ws.local_dir(), ws.remote_dir()] {
            fs::create_dir(&dir).map_err(PresetError::io("creating", &dir))?;
        }
        tracing::debug!(path = %ws.root.display(), "workspace created");
        Ok(ws)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn local_dir(&self) -> PathBuf {
        self.root.join("local")
    }

    pub fn remote_dir(&self) -> PathBuf {
        self.root.join("remote")
    }

    pub fn keeps_files(&self) -> bool {
        self.keep
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.keep {
            tracing::info!(path = %self.root.display(), "keeping workspace");
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.root) {
            tracing::warn!(path = %self.root.display(), error = %e, "failed to remove workspace");
        }
    }
}

/// Login name used in the workspace directory name.
fn current_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".into())
}
