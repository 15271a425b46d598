//! Command line arguments shared by the simulator binaries

use crate::catalog::{FilterId, LensId, MirrorId};
use crate::controller::zoom::{MAX_ZOOM, MIN_ZOOM};
use crate::controller::Configuration;
use clap::Parser;
use shared::config_storage::ConfigStorage;
use std::path::PathBuf;

/// Parse a zoom factor, rejecting values outside 0.5..=3.0
fn parse_zoom(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid zoom value: {s}"))?;

    if !(MIN_ZOOM..=MAX_ZOOM).contains(&value) {
        return Err(format!(
            "Zoom must be between {MIN_ZOOM} and {MAX_ZOOM}, got {value}"
        ));
    }
    Ok(value)
}

/// Optical train selection
#[derive(Parser, Debug, Clone)]
pub struct MaterialArgs {
    /// Primary mirror coating
    #[arg(long, value_enum, default_value_t = MirrorId::Aluminum)]
    pub mirror: MirrorId,

    /// Lens material
    #[arg(long, value_enum, default_value_t = LensId::Plastic)]
    pub lens: LensId,

    /// Filter
    #[arg(long, value_enum, default_value_t = FilterId::Clear)]
    pub filter: FilterId,
}

impl MaterialArgs {
    pub fn configuration(&self) -> Configuration {
        Configuration::new(self.mirror, self.lens, self.filter)
    }
}

/// Zoom arguments; without either flag the saved level is kept
#[derive(Parser, Debug, Clone)]
pub struct ZoomArgs {
    /// Set the zoom factor (0.5 to 3.0)
    #[arg(long, value_parser = parse_zoom, conflicts_with = "reset_zoom")]
    pub zoom: Option<f64>,

    /// Reset the zoom factor to 100%
    #[arg(long, default_value_t = false)]
    pub reset_zoom: bool,
}

/// Settings directory override
#[derive(Parser, Debug, Clone)]
pub struct StorageArgs {
    /// Directory for persisted settings (defaults to ~/.telescope_sim)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}

impl StorageArgs {
    pub fn storage(&self) -> ConfigStorage {
        match &self.config_dir {
            Some(path) => ConfigStorage::with_path(path.clone()),
            None => ConfigStorage::default(),
        }
    }
}
