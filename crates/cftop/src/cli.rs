//! Command-line arguments.

use std::ffi::OsString;

use clap::{Parser, ValueEnum};

use cftop_core::VERSION;
use cftop_core::attention::{
    ATTENTION_HOT_PERCENT, ATTENTION_WARM_PERCENT, AttentionThresholds, ConfigError,
};
use cftop_core::table::{SortColumn, SortSpec};
use cftop_core::view::{SpaceViewOptions, default_space_sort};

/// Quota-aware space table for Cloud Foundry metrics snapshots.
#[derive(Parser, Debug)]
#[command(name = "cftop", about = "Quota-aware Cloud Foundry space table", version = VERSION)]
pub struct Args {
    /// Snapshot JSON file ("-" reads stdin).
    #[arg(default_value = "-")]
    pub input: String,

    /// Reserved-memory percent of quota at which a cell turns hot.
    #[arg(long, env = "CFTOP_HOT_PERCENT", default_value_t = ATTENTION_HOT_PERCENT)]
    pub hot: f64,

    /// Reserved-memory percent of quota at which a cell turns warm.
    #[arg(long, env = "CFTOP_WARM_PERCENT", default_value_t = ATTENTION_WARM_PERCENT)]
    pub warm: f64,

    /// Sort column as KEY[:asc|desc]. Repeat to break ties.
    /// Defaults to CPU descending, then space name.
    #[arg(short, long = "sort", value_name = "KEY[:DIR]", value_parser = parse_sort_column)]
    pub sort: Vec<SortColumn>,

    /// Comma-separated list of visible column keys.
    #[arg(short, long, value_delimiter = ',', value_name = "KEYS")]
    pub columns: Option<Vec<String>>,

    /// Only show spaces whose name or quota contains this text.
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Disable ANSI colors. A non-empty NO_COLOR does the same.
    #[arg(long)]
    pub no_color: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table.
    Table,
    /// Raw column values as a JSON array.
    Json,
    /// Column metadata as JSON.
    Schema,
}

fn parse_sort_column(s: &str) -> Result<SortColumn, String> {
    s.parse::<SortColumn>().map_err(|e| e.to_string())
}

impl Args {
    /// True for `--no-color` or when `no_color_env` (the NO_COLOR variable)
    /// holds any non-empty value, `0` and `false` included.
    pub fn color_disabled(&self, no_color_env: Option<OsString>) -> bool {
        self.no_color || no_color_env.is_some_and(|v| !v.is_empty())
    }

    pub fn thresholds(&self) -> Result<AttentionThresholds, ConfigError> {
        AttentionThresholds::new(self.warm, self.hot)
    }

    pub fn view_options(&self) -> SpaceViewOptions {
        let sort = if self.sort.is_empty() {
            default_space_sort()
        } else {
            SortSpec::new(self.sort.clone())
        };
        SpaceViewOptions {
            columns: self.columns.clone(),
            sort,
            filter: self.filter.clone().filter(|f| !f.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cftop_core::table::SortDirection;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["cftop"]).unwrap();
        assert_eq!(args.input, "-");
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.thresholds().unwrap(), AttentionThresholds::default());

        let options = args.view_options();
        assert_eq!(options.sort, default_space_sort());
        assert!(options.columns.is_none());
        assert!(options.filter.is_none());
    }

    #[test]
    fn test_sort_chain_and_columns() {
        let args = Args::try_parse_from([
            "cftop",
            "snapshot.json",
            "-s",
            "RSVD_MEM:desc",
            "--sort",
            "spaceName",
            "-c",
            "spaceName,RSVD_MEM,S_MEM_PER",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.input, "snapshot.json");
        assert_eq!(args.format, OutputFormat::Json);
        let options = args.view_options();
        assert_eq!(
            options.sort.columns(),
            &[
                SortColumn::new("RSVD_MEM", SortDirection::Descending),
                SortColumn::by_default("spaceName"),
            ]
        );
        assert_eq!(
            options.columns,
            Some(vec!["spaceName".into(), "RSVD_MEM".into(), "S_MEM_PER".into()])
        );
    }

    #[test]
    fn test_bad_sort_direction_rejected() {
        assert!(Args::try_parse_from(["cftop", "-s", "CPU:sideways"]).is_err());
    }

    #[test]
    fn test_thresholds_validated() {
        let args = Args::try_parse_from(["cftop", "--warm", "95", "--hot", "90"]).unwrap();
        assert!(matches!(
            args.thresholds(),
            Err(ConfigError::WarmAboveHot { .. })
        ));
    }

    #[test]
    fn test_no_color_env_any_value_disables() {
        let args = Args::try_parse_from(["cftop"]).unwrap();
        assert!(!args.color_disabled(None));
        assert!(!args.color_disabled(Some(OsString::new())));
        assert!(args.color_disabled(Some("1".into())));
        assert!(args.color_disabled(Some("0".into())));
        assert!(args.color_disabled(Some("false".into())));

        let args = Args::try_parse_from(["cftop", "--no-color"]).unwrap();
        assert!(args.color_disabled(None));
    }
}
