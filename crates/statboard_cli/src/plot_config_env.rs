use anyhow::{Context, Result};
use statboard_render::PlotConfig;
use std::{env, fs};

pub(crate) const PLOT_CONFIG_PATH_ENV: &str = "STATBOARD_PLOT_CONFIG";

/// Plot config from the JSON file named by `STATBOARD_PLOT_CONFIG`, or defaults.
pub(crate) fn plot_config_from_env() -> Result<PlotConfig> {
    let path = env::var(PLOT_CONFIG_PATH_ENV).ok();
    plot_config_from_path(path.as_deref())
}

pub(crate) fn plot_config_from_path(path: Option<&str>) -> Result<PlotConfig> {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(PlotConfig::default());
    };

    let content = fs::read_to_string(path).with_context(|| {
        format!("Failed to read plot config from {PLOT_CONFIG_PATH_ENV}='{path}'")
    })?;

    PlotConfig::from_json(&content)
        .with_context(|| format!("Invalid plot config from {PLOT_CONFIG_PATH_ENV}='{path}'"))
}
