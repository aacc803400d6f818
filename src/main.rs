#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Replay a recorded viewer session and print what the browser host would
/// have been told, one JSON object per line.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "dualview-native", version)]
struct Args {
    /// Session file: a JSON list of layout and message steps
    session: PathBuf,

    /// Viewer config file; defaults apply when omitted
    config: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn run(args: &Args) -> dualview::Result<()> {
    use dualview::replay::{replay, Session};
    use dualview::ViewerConfig;

    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::new(),
    };

    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let session = Session::load(&args.session)?;
    let report = replay(&session, &config);

    for notification in &report.notifications {
        println!("{}", serde_json::to_string(notification)?);
    }
    log::info!(
        "Replay finished: {} frames, {:?} view, annotations {:?}",
        report.frames,
        report.view_mode,
        report.annotation_counts
    );
    println!(
        "{}",
        serde_json::json!({
            "view_mode": report.view_mode,
            "active_slot": report.active_slot,
            "annotation_counts": report.annotation_counts,
            "transform": report.transform,
        })
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Replay error: {}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
