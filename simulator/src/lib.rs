//! Telescope material simulator
//!
//! Pick a mirror coating, a lens material and a filter; the simulator derives
//! the combined optical quality, brightness and tint, draws a stylized image
//! of a star as seen through that optical train and plots its transmittance
//! against wavelength.
//!
//! # Example
//!
//! ```no_run
//! use shared::config_storage::ConfigStorage;
//! use simulator::catalog::MirrorId;
//! use simulator::controller::Simulator;
//!
//! let mut sim = Simulator::with_storage(ConfigStorage::default())?;
//! let report = sim.select_mirror(MirrorId::Silver);
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod compositor;
pub mod controller;
pub mod photometry;
pub mod render;
pub mod shared_args;

pub use catalog::{CatalogError, FilterId, LensId, MaterialCategory, MirrorId};
pub use compositor::{compose, CompositeOpticalState, QualityBucket};
pub use controller::{Configuration, Simulator, SimulatorError, UpdateReport};
pub use render::{Canvas, DisplayList, RenderError};
