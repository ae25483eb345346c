//! Main application entry point.
//!
//! Usage: `arrowboard <scene.json> [output.svg]`

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let Some(scene_path) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: arrowboard <scene.json> [output.svg]");
        return ExitCode::FAILURE;
    };
    let output_path = args.next().map(PathBuf::from);

    log::info!("Loading scene {}", scene_path.display());
    let result = arrowboard_app::load_scene(&scene_path).and_then(|config| {
        let output = arrowboard_app::run_scene(&config)?;
        log::info!("Rendered {} arrows", output.arrows.len());
        match &output_path {
            Some(path) => std::fs::write(path, &output.svg).map_err(|e| {
                arrowboard_app::AppError::Io(format!("Failed to write {}: {}", path.display(), e))
            }),
            None => {
                println!("{}", output.svg);
                Ok(())
            }
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
