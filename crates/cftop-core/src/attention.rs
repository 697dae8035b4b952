//! Quota-pressure classification for table cells.
//!
//! Severity is recomputed from the ratio fields of a [`SpaceRow`] every time
//! it is asked for; nothing is cached on the row. Three lenses look at the
//! same data: the space quota only, the org quota only, or the worse of both.

use serde::Serialize;

use crate::models::SpaceRow;

/// Reserved memory at or above this percent of a quota is hot.
pub const ATTENTION_HOT_PERCENT: f64 = 90.0;
/// Reserved memory at or above this percent of a quota is warm.
pub const ATTENTION_WARM_PERCENT: f64 = 80.0;

/// Severity of a cell, ordered `Normal < Warm < Hot`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attention {
    #[default]
    Normal,
    Warm,
    Hot,
}

/// Invalid attention threshold configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Threshold is negative, NaN or infinite.
    InvalidThreshold { name: &'static str, value: f64 },
    /// Warm threshold is above the hot one.
    WarmAboveHot { warm: f64, hot: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "invalid {} threshold: {}", name, value)
            }
            ConfigError::WarmAboveHot { warm, hot } => {
                write!(f, "warm threshold {} is above hot threshold {}", warm, hot)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Warm/hot percent thresholds, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttentionThresholds {
    warm: f64,
    hot: f64,
}

impl Default for AttentionThresholds {
    fn default() -> Self {
        Self {
            warm: ATTENTION_WARM_PERCENT,
            hot: ATTENTION_HOT_PERCENT,
        }
    }
}

impl AttentionThresholds {
    pub fn new(warm: f64, hot: f64) -> Result<Self, ConfigError> {
        if !warm.is_finite() || warm < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "warm",
                value: warm,
            });
        }
        if !hot.is_finite() || hot < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "hot",
                value: hot,
            });
        }
        if warm > hot {
            return Err(ConfigError::WarmAboveHot { warm, hot });
        }
        Ok(Self { warm, hot })
    }

    pub fn warm(&self) -> f64 {
        self.warm
    }

    pub fn hot(&self) -> f64 {
        self.hot
    }

    /// Classifies a percentage. NaN never crosses a threshold.
    pub fn classify(&self, percent: f64) -> Attention {
        if percent >= self.hot {
            Attention::Hot
        } else if percent >= self.warm {
            Attention::Warm
        } else {
            Attention::Normal
        }
    }
}

/// Which quota a classifier measures reserved memory against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuotaLens {
    /// The space's own memory quota.
    Space,
    /// The parent org's memory quota.
    Org,
    /// Whichever of the two is closer to its limit.
    Either,
}

impl QuotaLens {
    /// Whether the ratio this lens reads is defined for `row`.
    ///
    /// The org ratio only needs reporting containers; anything involving the
    /// space ratio also needs a configured space limit.
    pub fn is_active(self, row: &SpaceRow) -> bool {
        match self {
            QuotaLens::Org => row.has_reporting_containers(),
            QuotaLens::Space | QuotaLens::Either => {
                row.has_reporting_containers() && row.has_memory_limit()
            }
        }
    }

    /// Percent of quota this lens reads, regardless of whether it is active.
    pub fn percent(self, row: &SpaceRow) -> f64 {
        let space = row.total_reserved_memory_percent_of_space_quota;
        let org = row.total_reserved_memory_percent_of_org_quota;
        match self {
            QuotaLens::Space => space,
            QuotaLens::Org => org,
            QuotaLens::Either => space.max(org),
        }
    }

    /// Severity of `row` through this lens; `Normal` when inactive.
    pub fn classify(self, row: &SpaceRow, thresholds: &AttentionThresholds) -> Attention {
        if !self.is_active(row) {
            return Attention::Normal;
        }
        thresholds.classify(self.percent(row))
    }
}
