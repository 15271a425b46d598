//! Test infrastructure shared across the telescope simulator crates.
//!
//! Locates the workspace root from any test working directory and provides a
//! `test_output/` directory there for rendered images and other artifacts
//! that are kept for manual inspection.
//!
//! ```text
//! test_output/
//! ├── star_silver_fluorite_clear.png
//! └── chart_silver_fluorite_clear.png
//! ```
//!
//! # Examples
//! ```rust
//! use test_helpers::{find_project_root, output_path};
//!
//! let root = find_project_root().expect("Project root not found");
//! assert!(root.join("Cargo.toml").exists());
//!
//! let png = output_path("star.png");
//! assert!(png.starts_with(root.join("test_output")));
//! ```

use once_cell::sync::Lazy;
use std::env;
use std::path::{Path, PathBuf};

/// Errors raised while setting up the test environment
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    /// No Cargo.toml with a `[workspace]` section above the working directory
    #[error("Failed to find project root: {0}")]
    ProjectRootNotFound(String),
}

/// Find the workspace root by walking up from the current directory until a
/// Cargo.toml containing `[workspace]` is found.
pub fn find_project_root() -> Result<PathBuf, TestHelperError> {
    let mut current_dir = env::current_dir().map_err(|e| {
        TestHelperError::ProjectRootNotFound(format!("Failed to get current directory: {}", e))
    })?;

    loop {
        let cargo_toml = current_dir.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml).map_err(|e| {
                TestHelperError::ProjectRootNotFound(format!("Failed to read Cargo.toml: {}", e))
            })?;

            if content.contains("[workspace]") {
                return Ok(current_dir);
            }
        }

        if !current_dir.pop() {
            break;
        }
    }

    Err(TestHelperError::ProjectRootNotFound(
        "Workspace root not found".to_string(),
    ))
}

// Computed once per test binary
static PROJECT_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_project_root().expect("Failed to find project root directory"));

/// `<project_root>/test_output/`, created on first use
pub fn get_output_dir() -> PathBuf {
    let output_dir = PROJECT_ROOT.join("test_output");

    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    }

    output_dir
}

/// Path of an artifact inside the test output directory
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    get_output_dir().join(path)
}
