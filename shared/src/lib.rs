//! Shared components and utilities for the telescope material simulator
//!
//! Holds the pieces used by more than one crate in the workspace: the
//! on-disk settings store and raster surface geometry.

pub mod config_storage;
pub mod image_size;

pub use config_storage::ConfigStorage;
pub use image_size::PixelShape;
