//! Still-life viewer
//!
//! Renders a textured still-life scene with a fly-through camera.
//!
//! Controls: W/S/A/D move, Q/E rise and sink, mouse looks around, scroll
//! changes speed, P/O switch perspective and orthographic, Escape quits.
//!
//! Usage: `still_life [config.toml|config.ron]`

mod app;
mod gl;
mod window;

use std::path::PathBuf;

use still_life_engine::config::{Config, StillLifeConfig};
use still_life_engine::foundation::logging;

use app::StillLifeApp;

const DEFAULT_CONFIG_PATH: &str = "still_life.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting Still Life viewer");

    let config_path = std::env::args().nth(1).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = StillLifeConfig::load_or_default(&config_path)?;
    config.validate()?;

    StillLifeApp::new(&config)?.run()?;

    log::info!("Still Life viewer exited cleanly");
    Ok(())
}
