//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mindnote_core` linkage.
//! - Optionally import one exported map file and report its size.
//! - Optionally start core file logging in a given directory.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `mindnote_cli [map.json] [log_dir]`.

use mindnote_core::{default_log_level, init_logging, MapEditor};
use std::path::Path;
use std::process::ExitCode;

/// Node and edge counts of an imported map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MapSummary {
    nodes: usize,
    edges: usize,
}

fn main() -> ExitCode {
    println!("mindnote_core ping={}", mindnote_core::ping());
    println!("mindnote_core version={}", mindnote_core::core_version());

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(Some(summary)) => {
            println!("map nodes={} edges={}", summary.nodes, summary.edges);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<Option<MapSummary>, String> {
    if let Some(log_dir) = args.get(2) {
        start_logging(log_dir)?;
    }
    let Some(path) = args.get(1) else {
        return Ok(None);
    };

    let mut editor = MapEditor::default();
    editor
        .import_file(path)
        .map_err(|err| format!("map path={path} error={err}"))?;
    Ok(Some(MapSummary {
        nodes: editor.store().nodes().len(),
        edges: editor.store().edges().len(),
    }))
}

fn start_logging(log_dir: &str) -> Result<(), String> {
    let absolute = std::path::absolute(Path::new(log_dir))
        .map_err(|err| format!("log_dir `{log_dir}` cannot be resolved: {err}"))?;
    let absolute = absolute
        .to_str()
        .ok_or_else(|| format!("log_dir `{log_dir}` is not valid UTF-8"))?;
    init_logging(default_log_level(), absolute)
}
