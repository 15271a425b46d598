//! Persisted zoom level of the star view

use std::io;

use log::{debug, warn};
use serde::Serialize;
use shared::config_storage::ConfigStorage;

/// Smallest allowed zoom factor
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed zoom factor
pub const MAX_ZOOM: f64 = 3.0;

/// Change applied by one wheel notch
pub const ZOOM_STEP: f64 = 0.1;

pub const DEFAULT_ZOOM: f64 = 1.0;

/// Settings key the zoom level is stored under
pub const ZOOM_KEY: &str = "telescopeZoom";

/// Zoom above which the viewport scrolls instead of clipping
pub const SCROLL_THRESHOLD: f64 = 1.5;

/// How the viewport treats a zoomed star surface that no longer fits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    Hidden,
    Scroll,
}

/// Clamp a requested zoom into the allowed range; NaN falls back to the default
pub fn clamp_zoom(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_ZOOM
    } else {
        value.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

/// Zoom factor backed by a settings store
pub struct ZoomControl {
    level: f64,
    storage: ConfigStorage,
}

impl ZoomControl {
    /// Restore the zoom level saved in `storage`.
    ///
    /// A missing value gives the default. An unreadable or unparsable value
    /// is logged and replaced by the default; an out-of-range one is clamped.
    pub fn load(storage: ConfigStorage) -> Self {
        let level = match storage.get_value(ZOOM_KEY) {
            None => DEFAULT_ZOOM,
            Some(Err(e)) => {
                warn!("Could not read saved zoom level: {e}");
                DEFAULT_ZOOM
            }
            Some(Ok(raw)) => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => clamp_zoom(value),
                _ => {
                    warn!("Ignoring invalid saved zoom level '{raw}'");
                    DEFAULT_ZOOM
                }
            },
        };
        debug!("Zoom level restored to {level}");

        Self { level, storage }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Zoom as a whole percentage, e.g. `150`
    pub fn percent(&self) -> u32 {
        (self.level * 100.0).round() as u32
    }

    pub fn overflow(&self) -> Overflow {
        if self.level > SCROLL_THRESHOLD {
            Overflow::Scroll
        } else {
            Overflow::Hidden
        }
    }

    pub fn storage(&self) -> &ConfigStorage {
        &self.storage
    }

    fn persist(&self) -> io::Result<()> {
        self.storage.set_value(ZOOM_KEY, &self.level.to_string())?;
        Ok(())
    }

    /// Set an absolute zoom level, clamped to the allowed range
    pub fn set(&mut self, value: f64) -> io::Result<f64> {
        self.level = clamp_zoom(value);
        self.persist()?;
        debug!("Zoom set to {}%", self.percent());
        Ok(self.level)
    }

    /// Apply one wheel notch: scrolling down zooms out, anything else zooms in.
    ///
    /// The level is only persisted when it actually changes.
    ///
    /// # Returns
    /// True if the zoom level changed
    pub fn wheel(&mut self, delta_y: f64) -> io::Result<bool> {
        let delta = if delta_y > 0.0 { -ZOOM_STEP } else { ZOOM_STEP };
        let next = clamp_zoom(self.level + delta);

        if next == self.level {
            return Ok(false);
        }
        self.level = next;
        self.persist()?;
        debug!("Wheel zoom: {}%", self.percent());
        Ok(true)
    }

    /// Return to exactly 1.0 and persist it
    pub fn reset(&mut self) -> io::Result<()> {
        self.level = DEFAULT_ZOOM;
        self.persist()?;
        debug!("Zoom reset to 100%");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    fn control(dir: &TempDir) -> ZoomControl {
        ZoomControl::load(ConfigStorage::with_path(dir.path().to_path_buf()))
    }

    #[test]
    fn test_defaults_without_saved_value() {
        let dir = TempDir::new().unwrap();
        let zoom = control(&dir);
        assert_eq!(zoom.level(), 1.0);
        assert_eq!(zoom.percent(), 100);
        assert_eq!(zoom.overflow(), Overflow::Hidden);
    }

    #[test]
    fn test_set_clamps_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut zoom = control(&dir);

        assert_eq!(zoom.set(10.0).unwrap(), MAX_ZOOM);
        assert_eq!(zoom.set(-4.0).unwrap(), MIN_ZOOM);
        assert_eq!(zoom.set(1.7).unwrap(), 1.7);
        assert_eq!(zoom.overflow(), Overflow::Scroll);

        let reloaded = control(&dir);
        assert_eq!(reloaded.level(), 1.7);
        assert_eq!(reloaded.percent(), 170);
    }

    #[test]
    fn test_wheel_steps_and_clamps() {
        let dir = TempDir::new().unwrap();
        let mut zoom = control(&dir);

        assert!(zoom.wheel(-120.0).unwrap());
        assert!(zoom.wheel(-120.0).unwrap());
        assert_relative_eq!(zoom.level(), 1.2, epsilon = 1e-9);
        assert_eq!(zoom.percent(), 120);

        assert!(zoom.wheel(120.0).unwrap());
        assert_relative_eq!(zoom.level(), 1.1, epsilon = 1e-9);

        // A zero delta counts as zooming in
        assert!(zoom.wheel(0.0).unwrap());
        assert_relative_eq!(zoom.level(), 1.2, epsilon = 1e-9);

        for _ in 0..100 {
            zoom.wheel(1.0).unwrap();
        }
        assert_eq!(zoom.level(), MIN_ZOOM);
        assert!(!zoom.wheel(1.0).unwrap());

        for _ in 0..100 {
            zoom.wheel(-1.0).unwrap();
        }
        assert_eq!(zoom.level(), MAX_ZOOM);
        assert!(!zoom.wheel(-1.0).unwrap());
    }

    #[test]
    fn test_wheel_steps_from_arbitrary_level() {
        let dir = TempDir::new().unwrap();
        let mut zoom = control(&dir);

        zoom.set(1.75).unwrap();
        assert!(zoom.wheel(-1.0).unwrap());
        assert_relative_eq!(zoom.level(), 1.85, epsilon = 1e-9);

        zoom.set(1.75).unwrap();
        assert!(zoom.wheel(1.0).unwrap());
        assert_relative_eq!(zoom.level(), 1.65, epsilon = 1e-9);

        // Close to a limit the step is cut short by the clamp
        zoom.set(2.95).unwrap();
        assert!(zoom.wheel(-1.0).unwrap());
        assert_eq!(zoom.level(), MAX_ZOOM);
    }

    #[test]
    fn test_wheel_at_limit_does_not_write() {
        let dir = TempDir::new().unwrap();
        let mut zoom = control(&dir);
        zoom.set(MAX_ZOOM).unwrap();
        zoom.storage().set_value(ZOOM_KEY, "untouched").unwrap();

        assert!(!zoom.wheel(-1.0).unwrap());
        let stored = zoom.storage().get_value(ZOOM_KEY).unwrap().unwrap();
        assert_eq!(stored, "untouched");
    }

    #[test]
    fn test_reset_persists_exactly_one() {
        let dir = TempDir::new().unwrap();
        let mut zoom = control(&dir);
        zoom.set(2.5).unwrap();
        zoom.reset().unwrap();

        assert_eq!(zoom.level(), 1.0);
        let stored = zoom.storage().get_value(ZOOM_KEY).unwrap().unwrap();
        assert_eq!(stored.parse::<f64>().unwrap(), 1.0);
    }

    #[test]
    fn test_bad_saved_values() {
        let dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(dir.path().to_path_buf());

        storage.set_value(ZOOM_KEY, "not a number").unwrap();
        assert_eq!(control(&dir).level(), DEFAULT_ZOOM);

        storage.set_value(ZOOM_KEY, "NaN").unwrap();
        assert_eq!(control(&dir).level(), DEFAULT_ZOOM);

        storage.set_value(ZOOM_KEY, "7.5").unwrap();
        assert_eq!(control(&dir).level(), MAX_ZOOM);

        storage.set_value(ZOOM_KEY, "0.1").unwrap();
        assert_eq!(control(&dir).level(), MIN_ZOOM);
    }

    #[test]
    fn test_overflow_threshold() {
        let dir = TempDir::new().unwrap();
        let mut zoom = control(&dir);
        zoom.set(1.5).unwrap();
        assert_eq!(zoom.overflow(), Overflow::Hidden);
        zoom.set(1.6).unwrap();
        assert_eq!(zoom.overflow(), Overflow::Scroll);
    }
}
