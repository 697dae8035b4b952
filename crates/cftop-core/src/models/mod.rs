//! Row records handed over by the collector, one batch per refresh cycle.

use serde::{Deserialize, Serialize};

/// Metrics snapshot for a single space.
///
/// Produced by the collector and never mutated once published, so it can be
/// shared freely between renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceRow {
    // Identity
    pub name: String,
    pub quota_name: String,

    // Counts
    pub number_of_apps: u64,
    /// Live instances that reported metrics this cycle.
    pub total_reporting_containers: u64,

    // Gauges
    /// Sum over containers, so it may exceed 100.
    pub total_cpu_percentage: f64,
    /// Space memory quota in bytes; 0 = no limit configured.
    pub memory_limit_in_bytes: u64,
    pub total_reserved_memory: u64,
    pub total_used_memory: u64,
    pub total_reserved_disk: u64,
    pub total_used_disk: u64,

    // Ratios (percent)
    pub total_reserved_memory_percent_of_space_quota: f64,
    pub total_reserved_memory_percent_of_org_quota: f64,

    // Cumulative counters
    pub total_log_stdout: u64,
    pub total_log_stderr: u64,
    pub http_all_count: u64,
}

impl SpaceRow {
    /// Whether any container reported this cycle.
    pub fn has_reporting_containers(&self) -> bool {
        self.total_reporting_containers > 0
    }

    /// Whether the space has a memory quota of its own.
    pub fn has_memory_limit(&self) -> bool {
        self.memory_limit_in_bytes > 0
    }

    /// Fills both quota ratio fields from reserved memory.
    ///
    /// A ratio whose denominator is zero is set to `0.0`; the display and
    /// attention rules never look at it in that case.
    pub fn with_quota_ratios(mut self, org_memory_limit_in_bytes: u64) -> Self {
        self.total_reserved_memory_percent_of_space_quota =
            percent_of(self.total_reserved_memory, self.memory_limit_in_bytes);
        self.total_reserved_memory_percent_of_org_quota =
            percent_of(self.total_reserved_memory, org_memory_limit_in_bytes);
        self
    }
}

fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// One refresh cycle worth of space rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceSnapshot {
    /// Collection time, epoch seconds.
    pub timestamp: i64,
    pub spaces: Vec<SpaceRow>,
}
