use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::estimate::Weighting;

/// Tracker defaults loaded from `~/.config/pace/config.toml`.
///
/// CLI flags override these per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaceConfig {
    /// Fraction of progress between printed status lines, in [0, 1].
    /// 0 disables periodic printing.
    pub print_interval: f64,
    /// Append the remaining-time estimate to status lines.
    pub print_remaining: bool,
    /// Weighting for the remaining-time estimate: "none" or "linear".
    #[serde(default)]
    pub weighting: Weighting,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            print_interval: 0.1,
            print_remaining: true,
            weighting: Weighting::None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pace")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PaceConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PaceConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: PaceConfig = toml::from_str(&data)?;
    Ok(cfg)
}
