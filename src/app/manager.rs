//! The publish workflow for one node type.
//!
//! Opening a manager extracts both archives into a fresh workspace and lists
//! what they contain.  Publishing copies one local preset into the extracted
//! remote directory, rewrites its `Sections.list` and packs it back into the
//! shared repository.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::prompt::Prompter;
use crate::core::error::PresetError;
use crate::core::fs::{list_presets, validate_preset_name};
use crate::core::node::NodeType;
use crate::core::paths::PresetRoots;
use crate::core::sections;
use crate::core::workspace::Workspace;
use crate::shell::hidx::Archiver;

const COLLISION_MESSAGE: &str = "A preset with this name has already been published for this \
node type. Either select a new name or leave it unchanged to overwrite.";

/// Answers supplied up front instead of asking.
#[derive(Debug, Clone, Default)]
pub struct PublishRequest {
    /// Publish this local preset without showing the selection list.
    pub preset: Option<String>,
    /// Name to use if the preset is already published.
    pub rename: Option<String>,
    /// Replace a published preset on collision (or under `rename`) without asking.
    pub overwrite: bool,
    /// Stop before writing the shared archive.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub preset: String,
    pub published_as: String,
    /// The shared archive written (or that would be written).
    pub archive: PathBuf,
    /// An existing published preset was replaced.
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    NothingToPublish,
    Cancelled,
    DryRun(Publication),
    Published(Publication),
}

/// One local preset and whether a preset of the same name is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetStatus {
    pub name: String,
    pub published: bool,
}

pub struct PresetManager<A: Archiver> {
    node: NodeType,
    roots: PresetRoots,
    archiver: A,
    workspace: Workspace,
    local_presets: Vec<String>,
    remote_presets: Vec<String>,
}

impl<A: Archiver> PresetManager<A> {
    /// Extract the local and remote archives for `node` into `workspace` and
    /// analyse their contents.
    pub fn open(
        node: NodeType,
        roots: PresetRoots,
        archiver: A,
        workspace: Workspace,
    ) -> Result<Self> {
        let mut manager = Self {
            node,
            roots,
            archiver,
            workspace,
            local_presets: Vec::new(),
            remote_presets: Vec::new(),
        };
        manager.extract_all_presets()?;
        manager.analyse_presets()?;
        Ok(manager)
    }

    pub fn node(&self) -> &NodeType {
        &self.node
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn local_presets(&self) -> &[String] {
        &self.local_presets
    }

    pub fn remote_presets(&self) -> &[String] {
        &self.remote_presets
    }

    /// Is a preset with this name already published?
    pub fn remote_exists(&self, preset: &str) -> bool {
        self.remote_presets.iter().any(|p| p == preset)
    }

    /// Are there any local presets to publish?
    pub fn can_publish(&self) -> bool {
        !self.local_presets.is_empty()
    }

    pub fn status(&self) -> Vec<PresetStatus> {
        self.local_presets
            .iter()
            .map(|name| PresetStatus {
                name: name.clone(),
                published: self.remote_exists(name),
            })
            .collect()
    }

    // ── extraction ──────────────────────────────────────────────

    fn extract_all_presets(&mut self) -> Result<()> {
        let local = self.roots.local_preset_path(&self.node);
        if local.is_none() && self.roots.local.is_none() {
            tracing::warn!(
                var = crate::core::paths::LOCAL_ROOT_VAR,
                "local preset root is not set"
            );
        }
        self.extract_side("Local", local, &self.workspace.local_dir())?;

        let remote = self.roots.remote_preset_path(&self.node);
        if remote.is_none() && self.roots.remote.is_none() {
            tracing::warn!(
                var = crate::core::paths::REMOTE_ROOT_VAR,
                "shared preset root is not set"
            );
        }
        self.extract_side("Remote", remote, &self.workspace.remote_dir())?;
        Ok(())
    }

    fn extract_side(&self, side: &str, archive: Option<PathBuf>, dest: &Path) -> Result<()> {
        match archive {
            Some(archive) => {
                self.archiver
                    .extract(dest, &archive)
                    .with_context(|| format!("extracting {}", archive.display()))?;
                tracing::info!(archive = %archive.display(), dest = %dest.display(), "extracted");
                println!(
                    "{side} presets for {} extracted to {}",
                    self.node,
                    dest.display()
                );
            }
            None => {
                println!("No {} presets for {} found", side.to_lowercase(), self.node);
            }
        }
        Ok(())
    }

    /// Refresh both preset lists from the workspace.
    fn analyse_presets(&mut self) -> Result<()> {
        self.local_presets = list_side(&self.workspace.local_dir())?;
        self.remote_presets = list_side(&self.workspace.remote_dir())?;
        Ok(())
    }

    // ── publishing ──────────────────────────────────────────────

    /// Let the user pick a local preset and publish it into the shared
    /// repository.
    pub fn publish_preset(
        &mut self,
        prompter: &mut dyn Prompter,
        request: &PublishRequest,
    ) -> Result<PublishOutcome> {
        if !self.can_publish() {
            return Ok(PublishOutcome::NothingToPublish);
        }
        // Fail before asking anything if there is nowhere to publish to.
        let archive = self.roots.remote_target(&self.node)?;

        let preset = match &request.preset {
            Some(name) => {
                if !self.local_presets.contains(name) {
                    return Err(PresetError::UnknownPreset {
                        node: self.node.to_string(),
                        name: name.clone(),
                    }
                    .into());
                }
                name.clone()
            }
            None => {
                let message = format!(
                    "Please pick from the following local presets for {} that are available to publish.",
                    self.node
                );
                match prompter.select_preset(&message, &self.local_presets, 0)? {
                    Some(idx) => self
                        .local_presets
                        .get(idx)
                        .cloned()
                        .ok_or(PresetError::SelectionOutOfRange {
                            index: idx,
                            count: self.local_presets.len(),
                        })?,
                    None => return Ok(PublishOutcome::Cancelled),
                }
            }
        };

        let published_as = if self.remote_exists(&preset) {
            match &request.rename {
                Some(name) => {
                    let name = validate_preset_name(name)?;
                    if name != preset && self.remote_exists(name) && !request.overwrite {
                        return Err(PresetError::NameTaken(name.to_string()).into());
                    }
                    name.to_string()
                }
                None if request.overwrite => preset.clone(),
                None => self.ask_for_name(prompter, &preset)?,
            }
        } else {
            preset.clone()
        };
        let replaced = self.remote_exists(&published_as);

        // Copy preset into the extracted remote directory.
        let src = self.workspace.local_dir().join(&preset);
        let dst = self.workspace.remote_dir().join(&published_as);
        fs::copy(&src, &dst)
            .map_err(PresetError::io("copying", &src))
            .with_context(|| format!("publishing {preset} as {published_as}"))?;

        self.remote_presets = sections::regenerate(&self.workspace.remote_dir())?;

        let publication = Publication {
            preset,
            published_as,
            archive,
            replaced,
        };

        if request.dry_run {
            return Ok(PublishOutcome::DryRun(publication));
        }

        // Create any missing directories, then write the archive.
        let category_dir = self.roots.remote_category_dir(&self.node)?;
        fs::create_dir_all(&category_dir).map_err(PresetError::io("creating", &category_dir))?;
        self.archiver
            .create(&self.workspace.remote_dir(), &publication.archive)
            .with_context(|| format!("writing {}", publication.archive.display()))?;

        tracing::info!(
            node = %self.node,
            preset = %publication.preset,
            published_as = %publication.published_as,
            archive = %publication.archive.display(),
            "preset published"
        );
        Ok(PublishOutcome::Published(publication))
    }

    /// Ask for a publish name until the answer is either free or the name
    /// that was offered (which confirms overwriting it).
    fn ask_for_name(&self, prompter: &mut dyn Prompter, preset: &str) -> Result<String> {
        let mut offered = preset.to_string();
        let mut message = COLLISION_MESSAGE.to_string();
        loop {
            let name = match prompter.read_name(&message, &offered)? {
                Some(answer) => validate_preset_name(&answer)?.to_string(),
                None => return Ok(offered),
            };
            if name == offered || !self.remote_exists(&name) {
                return Ok(name);
            }
            message = format!(
                "A preset named {name} is also published. Choose another name or leave it unchanged to overwrite it."
            );
            offered = name;
        }
    }
}

/// List one extracted side and warn if its manifest disagrees with the files.
fn list_side(dir: &Path) -> Result<Vec<String>> {
    let names = list_presets(dir)?;
    if let Some(listed) = sections::read(dir)? {
        let on_disk: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        let in_manifest: BTreeSet<&str> = listed.iter().map(String::as_str).collect();
        if on_disk != in_manifest {
            tracing::warn!(
                dir = %dir.display(),
                files = on_disk.len(),
                manifest = in_manifest.len(),
                "section list does not match extracted presets"
            );
        }
    }
    Ok(names)
}
