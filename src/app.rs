//! Application orchestrator.
//! Loads and merges config, validates it before touching the filesystem,
//! initializes logging, installs the interrupt handler, and runs the pipeline.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, error, info};

use file_organizer::cli::Args;
use file_organizer::config::paths::config_path_from_env;
use file_organizer::config::xml::{LoadResult, load_or_init};
use file_organizer::output as out;
use file_organizer::{AuditTrail, Config, ConfigFile, OrganizerError, default_config_path, organize, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location(&args);
        return Ok(());
    }

    // A template is only useful when nothing on the command line says what to scan.
    let want_template = args.source_folder.is_none();
    let (mut file, cfg_path): (ConfigFile, Option<PathBuf>) =
        match load_or_init(args.config.as_deref(), want_template).map_err(report)? {
            LoadResult::Loaded { file, path } => (file, Some(path)),
            LoadResult::CreatedTemplate(path) => {
                out::print_success(&format!("A template config was written to: {}", path.display()));
                out::print_info("Set <source_folder> (and optionally the other fields), then re-run.");
                return Ok(());
            }
            LoadResult::Missing => (ConfigFile::default(), None),
        };
    args.apply_overrides(&mut file);

    // Configuration and source checks happen before any mutation.
    let cfg = Config::from_file(file).map_err(report)?;
    cfg.validate().map_err(report)?;
    cfg.prepare_directories()?;

    let guard = init_tracing(&cfg, args.json).inspect_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
    })?;

    ctrlc::set_handler(|| {
        shutdown::request();
        out::print_warn("Received interrupt; finishing the current file and stopping...");
    })
    .context("install interrupt handler")?;

    info!("START OF RUN");
    debug!(
        config = %cfg_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<none>".into()),
        source = %cfg.source_folder.display(),
        destination = %cfg.destination_folder.display(),
        log_location = %cfg.log_location.display(),
        extensions = ?cfg.extensions.iter().collect::<Vec<_>>(),
        recursive = cfg.recursive,
        generate_csv = cfg.generate_csv,
        "effective configuration"
    );

    let mut audit = if cfg.generate_csv {
        AuditTrail::open_csv(&cfg.csv_report_path())
    } else {
        AuditTrail::disabled()
    };

    let result = match organize(&cfg, &mut audit) {
        Ok(summary) => {
            out::print_summary(&summary);
            info!(elapsed_ms = summary.elapsed.as_millis() as u64, "END OF RUN");
            if summary.interrupted {
                Err(OrganizerError::Interrupted.into())
            } else {
                Ok(())
            }
        }
        Err(e) => {
            error!(code = e.code(), kind = e.kind(), error = %e, "run aborted");
            Err(report(e).into())
        }
    };

    drop(audit);
    // Flush the file writer before exit.
    drop(guard);
    result
}

fn report(e: OrganizerError) -> OrganizerError {
    out::print_error(&e.to_string());
    e
}

fn print_config_location(args: &Args) {
    if let Some(p) = &args.config {
        out::print_info(&format!("Using --config:\n  {}", p.display()));
    } else if let Some(p) = config_path_from_env() {
        out::print_info(&format!("Using FILE_ORGANIZER_CONFIG:\n  {}", p.display()));
    } else {
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("Default config path:\n  {}", p.display()));
                if !p.exists() {
                    out::print_info("No config file exists there yet. Run without --print-config to create a template.");
                }
            }
            None => out::print_error("Could not determine a default config path"),
        }
    }
}
