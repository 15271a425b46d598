//! Telescope material viewer
//!
//! Renders the star view and transmittance chart for a mirror/lens/filter
//! combination and prints the configuration summary.
//!
//! # Usage
//!
//! ```bash
//! # Render the default configuration into the current directory
//! cargo run --release --bin telescope_view -- render
//!
//! # Pick materials, fix the scatter pattern and also write SVG files
//! cargo run --release --bin telescope_view -- render \
//!     --mirror dielectric --lens astro --filter polarizing --seed 7 --svg -o out/
//!
//! # Print the report as JSON
//! cargo run --release --bin telescope_view -- render --mirror rough --json
//!
//! # Zoom is persisted in ~/.telescope_sim/settings.json
//! cargo run --release --bin telescope_view -- render --zoom 1.8
//! cargo run --release --bin telescope_view -- render --reset-zoom
//!
//! # List every material
//! cargo run --release --bin telescope_view -- catalog
//! ```
//!
//! Set `RUST_LOG=debug` for per-render details.

use clap::{Parser, Subcommand};
use log::info;
use simulator::catalog::{FILTERS, LENSES, MIRRORS};
use simulator::controller::{Overflow, Simulator};
use simulator::render::raster;
use simulator::shared_args::{MaterialArgs, StorageArgs, ZoomArgs};
use simulator::SimulatorError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "telescope_view")]
#[command(about = "Simulate how telescope materials change the image of a star")]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the star view and chart for a configuration
    Render {
        #[command(flatten)]
        materials: MaterialArgs,

        #[command(flatten)]
        zoom: ZoomArgs,

        /// Seed for the light-scatter pattern (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write star.png and chart.png into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Also write star.svg and chart.svg
        #[arg(long, default_value_t = false)]
        svg: bool,

        /// Print the full report as JSON instead of the summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List every mirror, lens and filter with its parameters
    Catalog,
}

fn print_catalog() {
    println!("Mirrors:");
    for m in MIRRORS.iter() {
        println!(
            "  {:<11} {:<19} reflectivity {:>3.0}%  UV {:>3.0}%  IR {:>3.0}%  quality {:.2}  brightness {:.2}",
            m.id.to_string(),
            m.name,
            m.reflectivity * 100.0,
            m.uv_transmission * 100.0,
            m.ir_transmission * 100.0,
            m.quality,
            m.brightness
        );
    }

    println!("\nLenses:");
    for l in LENSES.iter() {
        println!(
            "  {:<11} {:<19} transmission {:>3.0}%  aberration {:.2}  quality {:.2}  FOV {}°  focus {}",
            l.id.to_string(),
            l.name,
            l.transmission * 100.0,
            l.aberration,
            l.quality,
            l.fov_degrees,
            l.focus
        );
    }

    println!("\nFilters:");
    for f in FILTERS.iter() {
        println!(
            "  {:<11} {:<19} UV {:>3.0}%  visible {:>3.0}%  IR {:>3.0}%  quality {:.2}",
            f.id.to_string(),
            f.name,
            f.uv_transmission * 100.0,
            f.visible_transmission * 100.0,
            f.ir_transmission * 100.0,
            f.quality
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog => print_catalog(),
        Commands::Render {
            materials,
            zoom,
            seed,
            output_dir,
            svg,
            json,
        } => {
            std::fs::create_dir_all(&output_dir).map_err(|e| {
                SimulatorError::Initialization(format!(
                    "cannot create output directory {}: {e}",
                    output_dir.display()
                ))
            })?;

            let storage = cli.storage.storage();
            let mut sim = match seed {
                Some(seed) => Simulator::seeded(storage, seed)?,
                None => Simulator::with_storage(storage)?,
            };

            if zoom.reset_zoom {
                sim.reset_zoom()?;
            } else if let Some(level) = zoom.zoom {
                sim.set_zoom(level)?;
            }

            sim.apply(materials.configuration());

            let star_path = output_dir.join("star.png");
            let chart_path = output_dir.join("chart.png");
            raster::save_png(sim.star_surface(), &star_path)?;
            raster::save_png(sim.chart_surface(), &chart_path)?;
            info!(
                "Wrote {} and {}",
                star_path.display(),
                chart_path.display()
            );

            if svg {
                raster::save_svg(sim.star_surface(), &output_dir.join("star.svg"))?;
                raster::save_svg(sim.chart_surface(), &output_dir.join("chart.svg"))?;
            }

            let report = sim.report();
            if json {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                println!("{}", report.quality_label);
                println!("{}", report.fov_label);
                println!("{}", report.focus_label);
                println!();
                println!("Mirror: {}", report.explanations.mirror);
                println!("Lens: {}", report.explanations.lens);
                println!("Filter: {}", report.explanations.filter);
                println!();
                println!("{report}");
                if report.viewport == Overflow::Scroll {
                    println!("  Star view exceeds the viewport at this zoom and scrolls");
                }
                if let Some(curve) = &report.transmittance {
                    if let Some(peak) = curve.peak() {
                        println!(
                            "\nTransmittance: peak {:.1}% at {}nm, mean {:.1}%",
                            peak.percent(),
                            peak.wavelength_nm,
                            curve.mean() * 100.0
                        );
                    }
                }
                for failure in &report.failures {
                    eprintln!("Warning: {} view failed: {}", failure.surface, failure.message);
                }
            }
        }
    }

    Ok(())
}
