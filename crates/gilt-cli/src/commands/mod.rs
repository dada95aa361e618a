//! Subcommand implementations

pub mod check;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::Context;
use gilt_engine::EngineConfig;

/// Resolve the engine configuration for a manifest: an explicit `--config`
/// path wins, then a `gilt.toml` found next to the manifest or in one of
/// its ancestors, then the defaults.
pub fn load_config(manifest: &Path, explicit: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let path: Option<PathBuf> = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => manifest.parent().and_then(|dir| EngineConfig::discover(dir)),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading engine config");
            EngineConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}
