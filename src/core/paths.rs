//! Where preset archives live on disk.
//!
//! Local archives follow the application's own preference layout,
//! `$HOUDINI_USER_PREF_DIR/presets/<category>/<type>.idx`.  The shared
//! repository drops the `presets` segment: `$PRESET_REPO/<category>/<type>.idx`
//! (optionally with an extra sub-directory before `<category>`).

use std::path::PathBuf;

use super::error::{PresetError, PresetResult};
use super::node::NodeType;

pub const LOCAL_ROOT_VAR: &str = "HOUDINI_USER_PREF_DIR";
pub const REMOTE_ROOT_VAR: &str = "PRESET_REPO";

/// The two preset roots, resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct PresetRoots {
    pub local: Option<PathBuf>,
    pub remote: Option<PathBuf>,
    /// Extra segment between the remote root and the category directory.
    pub remote_subdir: Option<String>,
}

impl PresetRoots {
    /// Read both roots from the process environment.  Empty values count as
    /// unset.
    pub fn from_env() -> Self {
        Self {
            local: env_path(LOCAL_ROOT_VAR),
            remote: env_path(REMOTE_ROOT_VAR),
            remote_subdir: None,
        }
    }

    /// `<local>/presets/<category>/<type>.idx`, regardless of existence.
    pub fn local_target(&self, node: &NodeType) -> Option<PathBuf> {
        self.local.as_ref().map(|root| {
            root.join("presets")
                .join(node.category())
                .join(node.archive_file_name())
        })
    }

    /// The remote category directory the archive is written into.
    pub fn remote_category_dir(&self, node: &NodeType) -> PresetResult<PathBuf> {
        let root = self
            .remote
            .as_ref()
            .ok_or(PresetError::MissingRoot(REMOTE_ROOT_VAR))?;
        let mut dir = root.clone();
        if let Some(sub) = self.remote_subdir.as_deref().filter(|s| !s.is_empty()) {
            dir.push(sub);
        }
        dir.push(node.category());
        Ok(dir)
    }

    /// Publish target: `<remote>/<category>/<type>.idx`, regardless of existence.
    pub fn remote_target(&self, node: &NodeType) -> PresetResult<PathBuf> {
        Ok(self
            .remote_category_dir(node)?
            .join(node.archive_file_name()))
    }

    /// The local archive, only if it exists.
    pub fn local_preset_path(&self, node: &NodeType) -> Option<PathBuf> {
        self.local_target(node).filter(|p| p.is_file())
    }

    /// The remote archive, only if it exists.
    pub fn remote_preset_path(&self, node: &NodeType) -> Option<PathBuf> {
        self.remote_target(node).ok().filter(|p| p.is_file())
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
