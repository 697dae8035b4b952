//! cftop - quota-aware space table for Cloud Foundry metrics snapshots.
//!
//! Reads one collector snapshot (JSON file or stdin) and prints the space
//! table, the raw column values as JSON, or the column schema.

mod cli;
mod load;
mod render;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::env;
use std::io::{self, IsTerminal, Write};
use std::process;

use chrono::DateTime;
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

use cftop_core::api::{ExportError, export_json, space_schema};
use cftop_core::attention::ConfigError;
use cftop_core::table::SchemaError;
use cftop_core::view::{build_space_view, select_space_rows, space_registry};

use cli::{Args, OutputFormat};
use load::{LoadError, load_snapshot};

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Schema(SchemaError),
    Load(LoadError),
    Export(ExportError),
    Io(io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Schema(e) => write!(f, "{}", e),
            CliError::Load(e) => write!(f, "{}", e),
            CliError::Export(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "output failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        CliError::Schema(e)
    }
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        CliError::Load(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Export(ExportError::Json(e))
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Initializes the tracing subscriber on stderr with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["cftop", "cftop_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Everything after argument parsing; output goes to `out`.
fn run<W: Write>(args: &Args, out: &mut W, color: bool) -> Result<(), CliError> {
    let thresholds = args.thresholds()?;
    debug!(
        warm = thresholds.warm(),
        hot = thresholds.hot(),
        "attention thresholds"
    );

    if args.format == OutputFormat::Schema {
        let schema = space_schema(&thresholds)?;
        serde_json::to_writer_pretty(&mut *out, &schema)?;
        writeln!(out)?;
        return Ok(());
    }

    let registry = space_registry(&thresholds)?;
    let options = args.view_options();
    // Fail on bad column or sort keys before reading any input.
    options.sort.resolve(&registry)?;
    let keys: Vec<String> = match &options.columns {
        Some(keys) => keys.clone(),
        None => registry
            .default_visible()
            .iter()
            .map(|c| c.key().to_string())
            .collect(),
    };
    registry.select(keys.as_slice())?;

    let snapshot = load_snapshot(&args.input)?;
    info!(
        spaces = snapshot.spaces.len(),
        input = %args.input,
        "snapshot read"
    );

    match args.format {
        OutputFormat::Json => {
            let rows = select_space_rows(&registry, &snapshot.spaces, &options)?;
            let json = export_json(&registry, keys.as_slice(), rows)?;
            writeln!(out, "{}", json)?;
        }
        _ => {
            let vm = build_space_view(&registry, &snapshot.spaces, &options)?;
            // 0 = collector did not stamp the snapshot
            let collected_at = match snapshot.timestamp {
                0 => None,
                ts => DateTime::from_timestamp(ts, 0),
            };
            render::write_table(out, &vm, collected_at, color)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let stdout = io::stdout();
    let color = !args.color_disabled(env::var_os("NO_COLOR")) && stdout.is_terminal();
    let mut out = stdout.lock();

    if let Err(e) = run(&args, &mut out, color) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"timestamp": 1700000000, "spaces": [
                {{"name": "dev", "quota_name": "small", "number_of_apps": 2,
                  "total_reporting_containers": 2, "total_cpu_percentage": 12.5,
                  "memory_limit_in_bytes": 1073741824, "total_reserved_memory": 966367641,
                  "total_reserved_memory_percent_of_space_quota": 90.0,
                  "total_reserved_memory_percent_of_org_quota": 45.0}},
                {{"name": "prod", "quota_name": "large", "number_of_apps": 7,
                  "total_reporting_containers": 9, "total_cpu_percentage": 150.0}}
            ]}}"#
        )
        .unwrap();
        file
    }

    fn run_with(argv: &[&str]) -> Result<String, CliError> {
        let args = Args::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(&args, &mut out, false)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_table() {
        let file = snapshot_file();
        let path = file.path().to_str().unwrap();
        let text = run_with(&["cftop", path, "-c", "spaceName,CPU"]).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Spaces [2 rows] at 2023-11-14 22:13:20 UTC");
        // CPU descending by default
        assert!(lines[2].starts_with("prod"));
        assert!(lines[2].ends_with("   150"));
        assert!(lines[3].starts_with("dev"));
    }

    #[test]
    fn test_run_json_export() {
        let file = snapshot_file();
        let path = file.path().to_str().unwrap();
        let text = run_with(&[
            "cftop",
            path,
            "--format",
            "json",
            "-c",
            "spaceName,S_MEM_PER",
            "-s",
            "spaceName:asc",
            "-f",
            "d",
        ])
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["spaceName"], "dev");
        assert_eq!(value[0]["S_MEM_PER"], "90");
        assert_eq!(value[1]["spaceName"], "prod");
    }

    #[test]
    fn test_run_schema_needs_no_input() {
        let text =
            run_with(&["cftop", "/nonexistent/snapshot.json", "--format", "schema"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["columns"].as_array().unwrap().len(), 15);
    }

    #[test]
    fn test_run_rejects_unknown_column_before_reading() {
        let err = run_with(&["cftop", "/nonexistent/snapshot.json", "-c", "MEM"]).unwrap_err();
        assert!(matches!(err, CliError::Schema(SchemaError::UnknownColumn(_))));
    }

    #[test]
    fn test_run_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = run_with(&["cftop", path.to_str().unwrap()]).unwrap_err();
        assert!(matches!(err, CliError::Load(LoadError::Io { .. })));
    }

    #[test]
    fn test_run_rejects_bad_thresholds() {
        let err = run_with(&["cftop", "--warm=-5"]).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
