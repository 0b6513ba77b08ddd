use eframe::egui;
use std::env;
use std::path::PathBuf;
use tracing::info;
use vifman::app::App;
use vifman::config::Config;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

/// First argument if given, else home, else the working directory
fn start_path() -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| directories::UserDirs::new().map(|ud| ud.home_dir().to_path_buf()))
        .unwrap_or_else(|| env::current_dir().unwrap_or_default())
}

fn main() -> eframe::Result<()> {
    init_logging();

    let config = Config::load();
    let start = start_path();
    info!("Starting in {}", start.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_title("vifman"),
        ..Default::default()
    };

    eframe::run_native(
        "vifman",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(&config, start)?))),
    )
}
