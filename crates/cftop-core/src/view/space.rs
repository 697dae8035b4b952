//! Space table: the fifteen quota-aware columns over [`SpaceRow`].

use tracing::debug;

use crate::attention::{AttentionThresholds, QuotaLens};
use crate::fmt::{format_counter, format_cpu_percent, format_opt_bytes, format_opt_f64, format_u64};
use crate::models::SpaceRow;
use crate::table::{
    Column, ColumnBuilder, ColumnKind, ColumnRegistry, SchemaError, SortColumn, SortDirection,
    SortSpec,
};
use crate::view::common::{TableViewModel, build_table_view};

pub const COL_SPACE_NAME: &str = "spaceName";
pub const COL_QUOTA_NAME: &str = "QUOTA_NAME";
pub const COL_APPS: &str = "APPS";
pub const COL_REPORTING_CONTAINERS: &str = "reportingContainers";
pub const COL_CPU: &str = "CPU";
pub const COL_MAX_MEM: &str = "MAX_MEM";
pub const COL_RSVD_MEM: &str = "RSVD_MEM";
pub const COL_SPACE_MEM_PER: &str = "S_MEM_PER";
pub const COL_ORG_MEM_PER: &str = "O_MEM_PER";
pub const COL_USED_MEM: &str = "USED_MEM";
pub const COL_RSVD_DSK: &str = "RSVD_DSK";
pub const COL_USED_DSK: &str = "USED_DSK";
pub const COL_LOG_STDOUT: &str = "TotalLogStdout";
pub const COL_LOG_STDERR: &str = "TotalLogStderr";
pub const COL_TOTAL_REQ: &str = "TOTREQ";

const COUNT_WIDTH: usize = 7;
const CPU_WIDTH: usize = 6;
const BYTES_WIDTH: usize = 9;
const RATIO_WIDTH: usize = 7;
const COUNTER_WIDTH: usize = 11;

type U64Field = fn(&SpaceRow) -> u64;
type Gate = fn(&SpaceRow) -> bool;

/// Presentation options for one render of the space table.
#[derive(Debug, Clone)]
pub struct SpaceViewOptions {
    /// Explicit visible columns; `None` = registry defaults.
    pub columns: Option<Vec<String>>,
    pub sort: SortSpec,
    /// Case-insensitive substring matched against space and quota name.
    pub filter: Option<String>,
}

impl Default for SpaceViewOptions {
    fn default() -> Self {
        Self {
            columns: None,
            sort: default_space_sort(),
            filter: None,
        }
    }
}

/// Busiest spaces first, ties broken by name.
pub fn default_space_sort() -> SortSpec {
    SortSpec::new(vec![
        SortColumn::new(COL_CPU, SortDirection::Descending),
        SortColumn::new(COL_SPACE_NAME, SortDirection::Ascending),
    ])
}

fn count_column(
    key: &'static str,
    header: &'static str,
    field: U64Field,
) -> ColumnBuilder<SpaceRow> {
    Column::<SpaceRow>::builder(key, header, COUNT_WIDTH, ColumnKind::Numeric)
        .compare_u64(field)
        .display(move |r| format_u64(field(r), COUNT_WIDTH))
        .raw_value(move |r| field(r).to_string())
}

/// Byte quantity shown only while `gate` holds.
fn bytes_column(
    key: &'static str,
    header: &'static str,
    field: U64Field,
    gate: Gate,
) -> ColumnBuilder<SpaceRow> {
    Column::<SpaceRow>::builder(key, header, BYTES_WIDTH, ColumnKind::Numeric)
        .compare_u64(field)
        .display(move |r| format_opt_bytes(gate(r).then(|| field(r)), BYTES_WIDTH))
        .raw_value(move |r| field(r).to_string())
}

/// Reserved memory as percent of a quota, classified through `lens`.
fn ratio_column(
    key: &'static str,
    header: &'static str,
    lens: QuotaLens,
    thresholds: AttentionThresholds,
) -> ColumnBuilder<SpaceRow> {
    Column::<SpaceRow>::builder(key, header, RATIO_WIDTH, ColumnKind::Numeric)
        .compare_f64(move |r| lens.percent(r))
        .display(move |r| {
            let pct = lens.is_active(r).then(|| lens.percent(r));
            format_opt_f64(pct, RATIO_WIDTH, 1)
        })
        .raw_value(move |r| lens.percent(r).to_string())
        .attention(move |r| lens.classify(r, &thresholds))
}

fn counter_column(
    key: &'static str,
    header: &'static str,
    field: U64Field,
) -> ColumnBuilder<SpaceRow> {
    Column::<SpaceRow>::builder(key, header, COUNTER_WIDTH, ColumnKind::Numeric)
        .compare_u64(field)
        .display(move |r| format_counter(field(r), COUNTER_WIDTH))
        .raw_value(move |r| field(r).to_string())
}

/// All space columns in display order.
pub fn space_columns(
    thresholds: &AttentionThresholds,
) -> Result<Vec<Column<SpaceRow>>, SchemaError> {
    let t = *thresholds;
    let containers: Gate = SpaceRow::has_reporting_containers;
    let limit: Gate = SpaceRow::has_memory_limit;

    Ok(vec![
        Column::<SpaceRow>::builder(COL_SPACE_NAME, "SPACE", 25, ColumnKind::Alphanumeric)
            .compare_str(|r| r.name.as_str())
            .display(|r| r.name.clone())
            .raw_value(|r| r.name.clone())
            .build()?,
        Column::<SpaceRow>::builder(COL_QUOTA_NAME, "QUOTA_NAME", 11, ColumnKind::Alphanumeric)
            .compare_str(|r| r.quota_name.as_str())
            .display(|r| r.quota_name.clone())
            .raw_value(|r| r.quota_name.clone())
            .build()?,
        count_column(COL_APPS, "APPS", |r| r.number_of_apps).build()?,
        count_column(COL_REPORTING_CONTAINERS, "RCR", |r| r.total_reporting_containers).build()?,
        Column::<SpaceRow>::builder(COL_CPU, "CPU%", CPU_WIDTH, ColumnKind::Numeric)
            .compare_f64(|r| r.total_cpu_percentage)
            .display(|r| {
                let cpu = r.has_reporting_containers().then_some(r.total_cpu_percentage);
                format_cpu_percent(cpu, CPU_WIDTH)
            })
            .raw_value(|r| r.total_cpu_percentage.to_string())
            .build()?,
        bytes_column(COL_MAX_MEM, "MAX_MEM", |r| r.memory_limit_in_bytes, limit).build()?,
        bytes_column(COL_RSVD_MEM, "RSVD_MEM", |r| r.total_reserved_memory, containers)
            .attention(move |r| QuotaLens::Either.classify(r, &t))
            .build()?,
        ratio_column(COL_SPACE_MEM_PER, "S_MEM%", QuotaLens::Space, t).build()?,
        ratio_column(COL_ORG_MEM_PER, "O_MEM%", QuotaLens::Org, t).build()?,
        bytes_column(COL_USED_MEM, "USED_MEM", |r| r.total_used_memory, containers).build()?,
        bytes_column(COL_RSVD_DSK, "RSVD_DSK", |r| r.total_reserved_disk, containers).build()?,
        bytes_column(COL_USED_DSK, "USED_DSK", |r| r.total_used_disk, containers).build()?,
        counter_column(COL_LOG_STDOUT, "LOG_OUT", |r| r.total_log_stdout).build()?,
        counter_column(COL_LOG_STDERR, "LOG_ERR", |r| r.total_log_stderr).build()?,
        counter_column(COL_TOTAL_REQ, "TOT_REQ", |r| r.http_all_count).build()?,
    ])
}

pub fn space_registry(
    thresholds: &AttentionThresholds,
) -> Result<ColumnRegistry<SpaceRow>, SchemaError> {
    ColumnRegistry::from_columns(space_columns(thresholds)?)
}

/// Rows matching the options' filter, in the options' sort order.
pub fn select_space_rows<'a>(
    registry: &ColumnRegistry<SpaceRow>,
    rows: &'a [SpaceRow],
    options: &SpaceViewOptions,
) -> Result<Vec<&'a SpaceRow>, SchemaError> {
    let mut rows_data: Vec<&SpaceRow> = rows.iter().collect();

    // Filter
    if let Some(filter) = &options.filter {
        let f = filter.to_lowercase();
        rows_data.retain(|r| {
            r.name.to_lowercase().contains(&f) || r.quota_name.to_lowercase().contains(&f)
        });
    }

    // Sort
    registry.sort(&mut rows_data, &options.sort)?;
    Ok(rows_data)
}

/// Builds a UI-agnostic view model for the space table.
pub fn build_space_view(
    registry: &ColumnRegistry<SpaceRow>,
    rows: &[SpaceRow],
    options: &SpaceViewOptions,
) -> Result<TableViewModel<String>, SchemaError> {
    // Resolve everything that can fail before touching rows.
    let columns = match &options.columns {
        Some(keys) => registry.select(keys.as_slice())?,
        None => registry.default_visible(),
    };
    let active_sort = options.sort.resolve(registry)?.into_iter().next();
    let rows_data = select_space_rows(registry, rows, options)?;

    let title = match &options.filter {
        Some(filter) => format!(" Spaces (filter: {filter}) [{} rows] ", rows_data.len()),
        None => format!(" Spaces [{} rows] ", rows_data.len()),
    };

    debug!(rows = rows_data.len(), columns = columns.len(), "space view built");

    Ok(build_table_view(
        title,
        &columns,
        &rows_data,
        active_sort,
        |r| r.name.clone(),
    ))
}
