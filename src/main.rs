//! Publish node presets into a shared preset repository.
//!
//! `list` shows the presets saved locally for a node type and which of them
//! are already published.  `publish` picks one and writes it into the shared
//! archive, asking for a new name when the name is taken.

mod app;
mod config;
mod core;
mod shell;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::app::manager::{PresetManager, PublishOutcome, PublishRequest};
use crate::app::prompt::TerminalPrompter;
use crate::config::AppConfig;
use crate::core::node::NodeType;
use crate::core::paths::PresetRoots;
use crate::core::workspace::Workspace;
use crate::shell::hidx::Hidx;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Inspect and publish node presets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show local presets for a node type and whether they are published.
    List(NodeArgs),

    /// Publish one local preset into the shared repository.
    Publish {
        #[command(flatten)]
        node: NodeArgs,

        /// Local preset to publish (skips the selection list).
        #[arg(long)]
        preset: Option<String>,

        /// Name to publish under if the preset name is already taken.
        #[arg(long)]
        rename: Option<String>,

        /// Replace a published preset of the same (or renamed) name without asking.
        #[arg(long)]
        overwrite: bool,

        /// Prepare everything but do not write the shared archive.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the effective configuration.
    Config {
        /// Write the configuration file with the current values.
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Debug)]
struct NodeArgs {
    /// Node type category (e.g. `Sop`), or `category/type`.
    category: String,

    /// Node type name (e.g. `attribwrangle`).
    node_type: Option<String>,

    /// Local preference root (defaults to $HOUDINI_USER_PREF_DIR).
    #[arg(long)]
    local_root: Option<PathBuf>,

    /// Shared repository root (defaults to $PRESET_REPO).
    #[arg(long)]
    remote_root: Option<PathBuf>,

    /// Archive tool binary.
    #[arg(long)]
    hidx: Option<String>,

    /// Keep the scratch workspace after the run.
    #[arg(long)]
    keep_workspace: bool,
}

impl NodeArgs {
    fn node(&self) -> Result<NodeType> {
        let node = match &self.node_type {
            Some(name) => NodeType::new(self.category.as_str(), name.as_str())?,
            None => NodeType::parse(&self.category)?,
        };
        Ok(node)
    }

    /// Resolve the node, roots and tool, and extract both archives.
    fn open(&self, config: &AppConfig) -> Result<PresetManager<Hidx>> {
        let node = self.node()?;

        let mut roots = PresetRoots::from_env();
        if let Some(local) = &self.local_root {
            roots.local = Some(local.clone());
        }
        if let Some(remote) = &self.remote_root {
            roots.remote = Some(remote.clone());
        }
        roots.remote_subdir = Some(config.remote_presets_subdir.clone());

        let hidx = Hidx::new(self.hidx.as_deref().unwrap_or(&config.hidx_binary));
        hidx.check_available()?;

        let workspace = Workspace::create(
            &config.scratch_root,
            self.keep_workspace || config.keep_workspace,
        )
        .context("setting up workspace")?;

        PresetManager::open(node, roots, hidx, workspace)
    }
}

// ───────────────────────────────────────── commands ─────────

fn run_list(args: &NodeArgs, config: &AppConfig) -> Result<()> {
    let manager = args.open(config)?;

    if !manager.can_publish() {
        println!("Nothing to publish for {}", manager.node());
    }
    for entry in manager.status() {
        let mark = if entry.published { "published" } else { "local only" };
        println!("  {:<32} {mark}", entry.name);
    }
    let remote_only = manager
        .remote_presets()
        .iter()
        .filter(|name| !manager.local_presets().contains(*name))
        .count();
    if remote_only > 0 {
        println!("{remote_only} published preset(s) have no local copy");
    }
    if manager.workspace().keeps_files() {
        println!("Workspace: {}", manager.workspace().root().display());
    }
    Ok(())
}

fn run_publish(args: &NodeArgs, request: PublishRequest, config: &AppConfig) -> Result<()> {
    let mut manager = args.open(config)?;
    let mut prompter = TerminalPrompter::new();

    match manager.publish_preset(&mut prompter, &request)? {
        PublishOutcome::NothingToPublish => {
            println!("No local presets for {} to publish", manager.node());
        }
        PublishOutcome::Cancelled => println!("Publishing cancelled"),
        PublishOutcome::DryRun(p) => {
            println!(
                "Dry run: would publish {} as {} into {}",
                p.preset,
                p.published_as,
                p.archive.display()
            );
        }
        PublishOutcome::Published(p) => {
            let verb = if p.replaced { "Replaced" } else { "Published" };
            println!(
                "{verb} {} as {} in {}",
                p.preset,
                p.published_as,
                p.archive.display()
            );
        }
    }
    Ok(())
}

fn run_config(init: bool, config: &AppConfig) -> Result<()> {
    if init {
        let path = config.save().context("writing config file")?;
        println!("Wrote {}", path.display());
    } else {
        println!("# {}", crate::config::config_path().display());
        print!("{}", config.serialise());
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

/// Warnings are shown unless `RUST_LOG` asks for something else.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries results.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&std::env::var("RUST_LOG").unwrap_or_default()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load();

    match cli.command {
        Command::List(args) => run_list(&args, &config),
        Command::Publish {
            node,
            preset,
            rename,
            overwrite,
            dry_run,
        } => {
            let request = PublishRequest {
                preset,
                rename,
                overwrite,
                dry_run,
            };
            run_publish(&node, request, &config)
        }
        Command::Config { init } => run_config(init, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_from_two_arguments_or_one() {
        let cli = Cli::try_parse_from(["preset-publisher", "list", "Sop", "scatter"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.node().unwrap().to_string(), "Sop/scatter");

        let cli = Cli::try_parse_from(["preset-publisher", "list", "Dop/pyrosolver"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.node().unwrap().to_string(), "Dop/pyrosolver");
    }

    #[test]
    fn publish_flags() {
        let cli = Cli::try_parse_from([
            "preset-publisher",
            "publish",
            "Sop/scatter",
            "--preset",
            "Dense",
            "--rename",
            "Dense v2",
            "--dry-run",
        ])
        .unwrap();
        let Command::Publish {
            preset,
            rename,
            overwrite,
            dry_run,
            ..
        } = cli.command
        else {
            panic!("expected publish");
        };
        assert_eq!(preset.as_deref(), Some("Dense"));
        assert_eq!(rename.as_deref(), Some("Dense v2"));
        assert!(!overwrite);
        assert!(dry_run);
    }

    #[test]
    fn rename_combines_with_overwrite() {
        let cli = Cli::try_parse_from([
            "preset-publisher",
            "publish",
            "Sop/scatter",
            "--rename",
            "x",
            "--overwrite",
        ])
        .unwrap();
        let Command::Publish {
            rename, overwrite, ..
        } = cli.command
        else {
            panic!("expected publish");
        };
        assert_eq!(rename.as_deref(), Some("x"));
        assert!(overwrite);
    }

    #[test]
    fn warnings_shown_by_default() {
        assert_eq!(log_filter("").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
