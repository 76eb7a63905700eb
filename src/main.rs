use clap::Parser;
use faceview::app::{run_cli, run_gui};
use faceview::io::config::Config;
use log::info;

/// Software-rasterized viewer for a hand-modeled face mesh.
#[derive(Parser, Debug)]
#[command(name = "faceview")]
#[command(about = "Orbit a Phong-shaded face mesh, or render it headless to PNG")]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Render a single frame to PNG instead of opening a window
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let config = if let Some(path) = &cli.config {
        info!("Loading config file: {path}");
        Config::load(path)?
    } else {
        info!("Using default settings");
        Config::default()
    };

    if cli.headless {
        run_cli(config)
    } else {
        run_gui(config)
    }
}
