//! Material catalog for the telescope optical train.
//!
//! The catalog is a fixed, read-only set of mirror coatings, lens glasses and
//! filters. Each category is keyed by a closed enum of identifiers whose
//! string forms (`"silver"`, `"fluorite"`, `"nd"`, ...) are the keys exposed
//! to selection controls and the command line.
//!
//! # Examples
//!
//! ```rust
//! use simulator::catalog::{self, MaterialCategory, MirrorId};
//!
//! let silver = catalog::mirror(MirrorId::Silver);
//! assert_eq!(silver.reflectivity, 0.95);
//!
//! let record = catalog::lookup(MaterialCategory::Lens, "fluorite").unwrap();
//! assert_eq!(record.quality(), 0.95);
//!
//! assert!(catalog::lookup(MaterialCategory::Filter, "sepia").is_err());
//! ```

pub mod models;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use models::{filter, lens, mirror, FILTERS, LENSES, MIRRORS};

/// Errors raised when resolving material identifiers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("No {category} material with id '{id}'")]
    NotFound {
        category: MaterialCategory,
        id: String,
    },

    #[error("Unknown material category '{0}'")]
    UnknownCategory(String),
}

/// The three slots of the optical train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Mirror,
    Lens,
    Filter,
}

impl MaterialCategory {
    pub const ALL: [MaterialCategory; 3] = [
        MaterialCategory::Mirror,
        MaterialCategory::Lens,
        MaterialCategory::Filter,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MaterialCategory::Mirror => "mirror",
            MaterialCategory::Lens => "lens",
            MaterialCategory::Filter => "filter",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MaterialCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaterialCategory::ALL
            .into_iter()
            .find(|category| category.key() == s)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Per-channel color multiplier applied by a material.
///
/// Components are positive but not bounded to [0, 1]; gold amplifies red at 1.3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorShift {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorShift {
    /// Shift that leaves every channel untouched
    pub const NEUTRAL: ColorShift = ColorShift::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise product of two shifts
    pub fn combine(&self, other: &ColorShift) -> ColorShift {
        ColorShift::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

/// Mirror coating identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MirrorId {
    Aluminum,
    Silver,
    Glass,
    Gold,
    /// Multi-layer enhanced coating; gets the enhanced diffraction cross
    Dielectric,
    /// Scattering surface; always rendered as scattered blobs
    Rough,
}

impl MirrorId {
    pub const ALL: [MirrorId; 6] = [
        MirrorId::Aluminum,
        MirrorId::Silver,
        MirrorId::Glass,
        MirrorId::Gold,
        MirrorId::Dielectric,
        MirrorId::Rough,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MirrorId::Aluminum => "aluminum",
            MirrorId::Silver => "silver",
            MirrorId::Glass => "glass",
            MirrorId::Gold => "gold",
            MirrorId::Dielectric => "dielectric",
            MirrorId::Rough => "rough",
        }
    }
}

/// Lens material identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LensId {
    Plastic,
    Glass,
    Fluorite,
    Quartz,
    Astro,
    /// Radial-distortion glass; rendered with rings and edge ticks
    Fisheye,
}

impl LensId {
    pub const ALL: [LensId; 6] = [
        LensId::Plastic,
        LensId::Glass,
        LensId::Fluorite,
        LensId::Quartz,
        LensId::Astro,
        LensId::Fisheye,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LensId::Plastic => "plastic",
            LensId::Glass => "glass",
            LensId::Fluorite => "fluorite",
            LensId::Quartz => "quartz",
            LensId::Astro => "astro",
            LensId::Fisheye => "fisheye",
        }
    }
}

/// Filter identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterId {
    Clear,
    Uv,
    Ir,
    Blue,
    Red,
    Nd,
    Polarizing,
}

impl FilterId {
    pub const ALL: [FilterId; 7] = [
        FilterId::Clear,
        FilterId::Uv,
        FilterId::Ir,
        FilterId::Blue,
        FilterId::Red,
        FilterId::Nd,
        FilterId::Polarizing,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FilterId::Clear => "clear",
            FilterId::Uv => "uv",
            FilterId::Ir => "ir",
            FilterId::Blue => "blue",
            FilterId::Red => "red",
            FilterId::Nd => "nd",
            FilterId::Polarizing => "polarizing",
        }
    }
}

impl fmt::Display for MirrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for LensId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MirrorId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MirrorId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| CatalogError::NotFound {
                category: MaterialCategory::Mirror,
                id: s.to_string(),
            })
    }
}

impl FromStr for LensId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LensId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| CatalogError::NotFound {
                category: MaterialCategory::Lens,
                id: s.to_string(),
            })
    }
}

impl FromStr for FilterId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| CatalogError::NotFound {
                category: MaterialCategory::Filter,
                id: s.to_string(),
            })
    }
}

/// Reflective primary mirror coating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirrorMaterial {
    pub id: MirrorId,
    /// Display name
    pub name: &'static str,
    /// Human-readable explanation of the material's effect
    pub description: &'static str,
    /// Reflectivity in the visible band (0.0 to 1.0)
    pub reflectivity: f64,
    /// Effective throughput below 400nm (0.0 to 1.0)
    pub uv_transmission: f64,
    /// Effective throughput above 700nm (0.0 to 1.0)
    pub ir_transmission: f64,
    /// Optical quality score (0.0 to 1.0)
    pub quality: f64,
    /// Brightness multiplier, may exceed 1.0 for enhanced coatings
    pub brightness: f64,
    pub color_shift: ColorShift,
}

/// Refracting lens material
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LensMaterial {
    pub id: LensId,
    pub name: &'static str,
    pub description: &'static str,
    /// Visible-light transmission (0.0 to 1.0)
    pub transmission: f64,
    /// Chromatic aberration severity (0.0 to 1.0)
    pub aberration: f64,
    pub quality: f64,
    /// Field of view in degrees
    pub fov_degrees: f64,
    /// Short label describing focus sharpness
    pub focus: &'static str,
    pub color_shift: ColorShift,
}

/// Band-limiting filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterMaterial {
    pub id: FilterId,
    pub name: &'static str,
    pub description: &'static str,
    pub uv_transmission: f64,
    pub visible_transmission: f64,
    pub ir_transmission: f64,
    pub quality: f64,
    pub color_shift: ColorShift,
}

/// A catalog entry of any category
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialRecord {
    Mirror(&'static MirrorMaterial),
    Lens(&'static LensMaterial),
    Filter(&'static FilterMaterial),
}

impl MaterialRecord {
    pub fn category(&self) -> MaterialCategory {
        match self {
            MaterialRecord::Mirror(_) => MaterialCategory::Mirror,
            MaterialRecord::Lens(_) => MaterialCategory::Lens,
            MaterialRecord::Filter(_) => MaterialCategory::Filter,
        }
    }

    /// String key of the record within its category
    pub fn key(&self) -> &'static str {
        match self {
            MaterialRecord::Mirror(m) => m.id.key(),
            MaterialRecord::Lens(l) => l.id.key(),
            MaterialRecord::Filter(f) => f.id.key(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MaterialRecord::Mirror(m) => m.name,
            MaterialRecord::Lens(l) => l.name,
            MaterialRecord::Filter(f) => f.name,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MaterialRecord::Mirror(m) => m.description,
            MaterialRecord::Lens(l) => l.description,
            MaterialRecord::Filter(f) => f.description,
        }
    }

    pub fn quality(&self) -> f64 {
        match self {
            MaterialRecord::Mirror(m) => m.quality,
            MaterialRecord::Lens(l) => l.quality,
            MaterialRecord::Filter(f) => f.quality,
        }
    }

    pub fn color_shift(&self) -> ColorShift {
        match self {
            MaterialRecord::Mirror(m) => m.color_shift,
            MaterialRecord::Lens(l) => l.color_shift,
            MaterialRecord::Filter(f) => f.color_shift,
        }
    }
}

/// Resolve a string identifier within a category.
///
/// # Errors
/// Returns [`CatalogError::NotFound`] if `id` is not a key of the category's
/// table. No default is ever substituted.
pub fn lookup(category: MaterialCategory, id: &str) -> Result<MaterialRecord, CatalogError> {
    let record = match category {
        MaterialCategory::Mirror => MaterialRecord::Mirror(mirror(id.parse()?)),
        MaterialCategory::Lens => MaterialRecord::Lens(lens(id.parse()?)),
        MaterialCategory::Filter => MaterialRecord::Filter(filter(id.parse()?)),
    };
    Ok(record)
}

/// Every record of a category, in table order
pub fn records(category: MaterialCategory) -> Vec<MaterialRecord> {
    match category {
        MaterialCategory::Mirror => MIRRORS.iter().map(MaterialRecord::Mirror).collect(),
        MaterialCategory::Lens => LENSES.iter().map(MaterialRecord::Lens).collect(),
        MaterialCategory::Filter => FILTERS.iter().map(MaterialRecord::Filter).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_every_key() {
        for category in MaterialCategory::ALL {
            for record in records(category) {
                let found = lookup(category, record.key()).unwrap();
                assert_eq!(found, record);
                assert_eq!(found.category(), category);
            }
        }
    }

    #[test]
    fn test_lookup_not_found() {
        let err = lookup(MaterialCategory::Mirror, "obsidian").unwrap_err();
        assert_eq!(
            err,
            CatalogError::NotFound {
                category: MaterialCategory::Mirror,
                id: "obsidian".to_string()
            }
        );
        assert_eq!(err.to_string(), "No mirror material with id 'obsidian'");
    }

    #[test]
    fn test_lookup_is_category_scoped() {
        // "glass" exists as both a mirror and a lens, "clear" only as a filter
        assert!(lookup(MaterialCategory::Mirror, "glass").is_ok());
        assert!(lookup(MaterialCategory::Lens, "glass").is_ok());
        assert!(lookup(MaterialCategory::Lens, "clear").is_err());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup(MaterialCategory::Mirror, "Silver").is_err());
    }

    #[test]
    fn test_id_string_round_trip() {
        for id in MirrorId::ALL {
            assert_eq!(id.to_string().parse::<MirrorId>().unwrap(), id);
        }
        for id in LensId::ALL {
            assert_eq!(id.to_string().parse::<LensId>().unwrap(), id);
        }
        for id in FilterId::ALL {
            assert_eq!(id.to_string().parse::<FilterId>().unwrap(), id);
        }
    }

    #[test]
    fn test_clap_names_match_keys() {
        for id in MirrorId::ALL {
            let value = id.to_possible_value().unwrap();
            assert_eq!(value.get_name(), id.key());
        }
        for id in FilterId::ALL {
            let value = id.to_possible_value().unwrap();
            assert_eq!(value.get_name(), id.key());
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "lens".parse::<MaterialCategory>().unwrap(),
            MaterialCategory::Lens
        );
        assert!(matches!(
            "eyepiece".parse::<MaterialCategory>(),
            Err(CatalogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_color_shift_combine() {
        let gold = mirror(MirrorId::Gold).color_shift;
        let red = filter(FilterId::Red).color_shift;
        let combined = gold.combine(&red);
        assert!((combined.r - 1.3 * 1.8).abs() < 1e-12);
        assert!((combined.b - 0.7 * 0.2).abs() < 1e-12);
    }
}
