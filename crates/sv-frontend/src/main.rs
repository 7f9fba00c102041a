//! Shapeview main entry point

use std::path::PathBuf;

use sv_core::ViewerConfig;

/// Config file read at startup when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "viewer.ron";

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sv_frontend=debug,sv_interact=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Shapeview");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = ViewerConfig::load_or_default(&config_path);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Shapeview"),
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "shapeview",
        native_options,
        Box::new(move |cc| Ok(Box::new(sv_frontend::ShapeviewApp::new(cc, config)?))),
    )
}
