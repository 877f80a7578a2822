use anyhow::{Context, Result};
use confline_config::Settings;
use confline_engine::{ConfigDocument, parse_path};
use std::{env, path::PathBuf, process};

/// One `|key|\t:\t|value|` line per entry, sorted by key, with every space
/// in a value shown as `space_marker`.
fn render_entries(doc: &ConfigDocument, space_marker: &str) -> Vec<String> {
    doc.iter()
        .map(|(key, value)| format!("|{key}|\t:\t|{}|", value.replace(' ', space_marker)))
        .collect()
}

/// Warn by default; directives from `spec` (the `RUST_LOG` value) override it.
fn logger_builder(spec: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn);
    if let Some(spec) = spec {
        builder.parse_filters(spec);
    }
    builder
}

fn main() -> Result<()> {
    let log_spec = env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    logger_builder(log_spec.as_deref()).init();

    let args: Vec<String> = env::args().collect();
    let config_path = Settings::config_path();

    let settings = match Settings::load() {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(e) => {
            log::warn!("Ignoring settings file: {e}");
            Settings::default()
        }
    };

    let input: PathBuf = if args.len() == 2 {
        PathBuf::from(&args[1])
    } else if args.len() == 1 {
        match settings.default_input.clone() {
            Some(path) => {
                log::info!("Using default_input from {}", config_path.display());
                path
            }
            None => {
                eprintln!("Error: No input file provided and no default_input configured");
                eprintln!("Usage: {} <config-file>", args[0]);
                eprintln!(
                    "Or set default_input in a settings file at {} (or ${})",
                    config_path.display(),
                    confline_config::CONFIG_ENV_VAR
                );
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [config-file]", args[0]);
        process::exit(1);
    };

    let doc = match parse_path(&input).with_context(|| format!("parsing {}", input.display())) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    for line in render_entries(&doc, &settings.space_marker) {
        println!("{line}");
    }

    Ok(())
}
