//! Selection handling and view updates
//!
//! [`Simulator`] owns the current [`Configuration`] and both view surfaces.
//! Every selection event swaps in a new configuration and synchronously
//! recomputes the composite state, repaints both views and rebuilds the text
//! report. The two views are independent: if one fails to paint the other is
//! still updated.

pub mod report;
pub mod zoom;

use log::{error, info};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::config_storage::ConfigStorage;

use crate::catalog::{self, CatalogError, FilterId, LensId, MaterialCategory, MirrorId};
use crate::compositor::compose;
use crate::render::display_list::DisplayList;
use crate::render::star::{StarRenderer, STAR_SURFACE};
use crate::render::{chart, status, Canvas, RenderError, CHART_SURFACE};

pub use report::{Explanations, RenderFailure, SurfaceKind, UpdateReport};
pub use zoom::{Overflow, ZoomControl};

/// Message shown on the star view when it cannot be drawn
pub const STAR_ERROR_MESSAGE: &str = "Star rendering failed";

/// Errors raised by the simulator controller
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error(transparent)]
    Lookup(#[from] CatalogError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// The selected mirror, lens and filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    pub mirror: MirrorId,
    pub lens: LensId,
    pub filter: FilterId,
}

impl Configuration {
    pub const fn new(mirror: MirrorId, lens: LensId, filter: FilterId) -> Self {
        Self {
            mirror,
            lens,
            filter,
        }
    }

    pub fn with_mirror(self, mirror: MirrorId) -> Self {
        Self { mirror, ..self }
    }

    pub fn with_lens(self, lens: LensId) -> Self {
        Self { lens, ..self }
    }

    pub fn with_filter(self, filter: FilterId) -> Self {
        Self { filter, ..self }
    }

    /// Copy with one slot replaced by a string identifier
    pub fn with_selection(
        self,
        category: MaterialCategory,
        id: &str,
    ) -> Result<Self, CatalogError> {
        Ok(match category {
            MaterialCategory::Mirror => self.with_mirror(id.parse()?),
            MaterialCategory::Lens => self.with_lens(id.parse()?),
            MaterialCategory::Filter => self.with_filter(id.parse()?),
        })
    }
}

/// First entry of each table
impl Default for Configuration {
    fn default() -> Self {
        Self::new(MirrorId::Aluminum, LensId::Plastic, FilterId::Clear)
    }
}

/// Interactive telescope simulator
pub struct Simulator<C: Canvas = DisplayList, R: Rng = StdRng> {
    configuration: Configuration,
    star_surface: C,
    chart_surface: C,
    star_renderer: StarRenderer<R>,
    zoom: ZoomControl,
    report: UpdateReport,
}

impl Simulator<DisplayList, StdRng> {
    /// Simulator on recording surfaces with OS-seeded scatter
    pub fn with_storage(storage: ConfigStorage) -> Result<Self, SimulatorError> {
        Self::new(
            DisplayList::new(STAR_SURFACE),
            DisplayList::new(CHART_SURFACE),
            StarRenderer::from_os_rng(),
            storage,
        )
    }

    /// Simulator on recording surfaces with a reproducible scatter pattern
    pub fn seeded(storage: ConfigStorage, seed: u64) -> Result<Self, SimulatorError> {
        Self::new(
            DisplayList::new(STAR_SURFACE),
            DisplayList::new(CHART_SURFACE),
            StarRenderer::seeded(seed),
            storage,
        )
    }
}

impl<C: Canvas, R: Rng> Simulator<C, R> {
    /// Show the loading screen, restore the zoom level and draw the default
    /// configuration.
    ///
    /// # Errors
    /// Returns [`SimulatorError::Initialization`] if the star surface cannot
    /// even show the loading screen.
    pub fn new(
        mut star_surface: C,
        chart_surface: C,
        star_renderer: StarRenderer<R>,
        storage: ConfigStorage,
    ) -> Result<Self, SimulatorError> {
        info!(
            "Initializing telescope simulator ({} mirrors, {} lenses, {} filters)",
            catalog::MIRRORS.len(),
            catalog::LENSES.len(),
            catalog::FILTERS.len()
        );

        status::show_loading(&mut star_surface).map_err(|e| {
            SimulatorError::Initialization(format!("star surface unavailable: {e}"))
        })?;

        let zoom = ZoomControl::load(storage);
        let configuration = Configuration::default();
        let report = Self::build_report(configuration, &zoom);

        let mut simulator = Self {
            configuration,
            star_surface,
            chart_surface,
            star_renderer,
            zoom,
            report,
        };
        simulator.update();
        Ok(simulator)
    }

    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn star_surface(&self) -> &C {
        &self.star_surface
    }

    pub fn chart_surface(&self) -> &C {
        &self.chart_surface
    }

    pub fn zoom(&self) -> &ZoomControl {
        &self.zoom
    }

    /// Report from the most recent update
    pub fn report(&self) -> &UpdateReport {
        &self.report
    }

    /// Replace the whole configuration and redraw
    pub fn apply(&mut self, configuration: Configuration) -> &UpdateReport {
        self.configuration = configuration;
        self.update()
    }

    /// Select a material by its string identifier.
    ///
    /// # Errors
    /// Returns [`SimulatorError::Lookup`] for an unknown identifier; the
    /// current configuration is left untouched.
    pub fn select(
        &mut self,
        category: MaterialCategory,
        id: &str,
    ) -> Result<&UpdateReport, SimulatorError> {
        let next = self.configuration.with_selection(category, id)?;
        info!("{category} changed to {id}");
        Ok(self.apply(next))
    }

    pub fn select_mirror(&mut self, mirror: MirrorId) -> &UpdateReport {
        info!("mirror changed to {mirror}");
        self.apply(self.configuration.with_mirror(mirror))
    }

    pub fn select_lens(&mut self, lens: LensId) -> &UpdateReport {
        info!("lens changed to {lens}");
        self.apply(self.configuration.with_lens(lens))
    }

    pub fn select_filter(&mut self, filter: FilterId) -> &UpdateReport {
        info!("filter changed to {filter}");
        self.apply(self.configuration.with_filter(filter))
    }

    /// Set an absolute zoom level; it is clamped and persisted
    pub fn set_zoom(&mut self, value: f64) -> Result<f64, SimulatorError> {
        let level = self.zoom.set(value)?;
        self.sync_zoom();
        Ok(level)
    }

    /// Apply one mouse-wheel notch
    pub fn wheel(&mut self, delta_y: f64) -> Result<bool, SimulatorError> {
        let changed = self.zoom.wheel(delta_y)?;
        self.sync_zoom();
        Ok(changed)
    }

    pub fn reset_zoom(&mut self) -> Result<(), SimulatorError> {
        self.zoom.reset()?;
        self.sync_zoom();
        Ok(())
    }

    fn sync_zoom(&mut self) {
        self.report.zoom_percent = self.zoom.percent();
        self.report.viewport = self.zoom.overflow();
    }

    /// Text fields for a configuration, before any surface is painted
    fn build_report(configuration: Configuration, zoom: &ZoomControl) -> UpdateReport {
        let mirror = catalog::mirror(configuration.mirror);
        let lens = catalog::lens(configuration.lens);
        let filter = catalog::filter(configuration.filter);
        let composite = compose(mirror, lens, filter);
        let bucket = composite.bucket();

        UpdateReport {
            configuration,
            mirror_name: mirror.name,
            lens_name: lens.name,
            filter_name: filter.name,
            composite,
            quality_bucket: bucket,
            quality_label: format!("Image quality: {bucket}"),
            fov_label: format!("Field of view: {}°", lens.fov_degrees),
            focus_label: format!("Focus: {}", lens.focus),
            fov_degrees: lens.fov_degrees,
            explanations: Explanations {
                mirror: mirror.description,
                lens: lens.description,
                filter: filter.description,
            },
            zoom_percent: zoom.percent(),
            viewport: zoom.overflow(),
            star_variant: None,
            transmittance: None,
            verdict: composite.verdict(),
            failures: Vec::new(),
        }
    }

    /// Recompute and repaint everything for the current configuration
    pub fn update(&mut self) -> &UpdateReport {
        let configuration = self.configuration;
        let mirror = catalog::mirror(configuration.mirror);
        let lens = catalog::lens(configuration.lens);
        let filter = catalog::filter(configuration.filter);

        let mut report = Self::build_report(configuration, &self.zoom);

        match self
            .star_renderer
            .render(&mut self.star_surface, &report.composite, mirror, lens)
        {
            Ok(variant) => report.star_variant = Some(variant),
            Err(e) => {
                error!("Star rendering failed: {e}");
                report.failures.push(RenderFailure {
                    surface: SurfaceKind::Star,
                    message: e.to_string(),
                });
                if let Err(e) = status::show_error(&mut self.star_surface, STAR_ERROR_MESSAGE) {
                    error!("Could not show error screen: {e}");
                }
            }
        }

        // Paint off-screen so a failure leaves the previous chart in place
        let mut frame = C::blank(self.chart_surface.shape());
        match chart::render(&mut frame, mirror, lens, filter) {
            Ok(curve) => {
                self.chart_surface = frame;
                report.transmittance = Some(curve);
            }
            Err(e) => {
                error!("Chart rendering failed: {e}");
                report.failures.push(RenderFailure {
                    surface: SurfaceKind::Chart,
                    message: e.to_string(),
                });
            }
        }

        info!(
            "Simulation updated: {}/{}/{} quality {:.1}% ({})",
            configuration.mirror,
            configuration.lens,
            configuration.filter,
            report.composite.quality * 100.0,
            report.quality_bucket
        );

        self.report = report;
        &self.report
    }
}
