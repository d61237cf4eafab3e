use crate::error::AppError;

/// Whether higher or lower values of a metric mean better team performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Metrics where the lower value is the better performance. Everything else
/// in the stats table is higher-is-better.
pub const LOWER_IS_BETTER: [&str; 10] = [
    "avg_points_against_per_play",
    "avg_epa_pass_against",
    "avg_epa_run_against",
    "avg_success_rate_against",
    "avg_yards_against_per_play",
    "points_per_play_variance",
    "epa_pass_variance",
    "epa_run_variance",
    "success_rate_variance",
    "yards_per_play_variance",
];

impl Direction {
    #[must_use]
    pub fn for_metric(name: &str) -> Self {
        if LOWER_IS_BETTER.contains(&name) {
            Self::LowerIsBetter
        } else {
            Self::HigherIsBetter
        }
    }

    /// Lower-is-better axes are drawn reversed so that better performance
    /// always points up and to the right.
    #[must_use]
    pub fn inverts_axis(self) -> bool {
        matches!(self, Self::LowerIsBetter)
    }
}

/// Check the direction table against a freshly loaded schema. A configured
/// name that no longer matches a column is a typo or an upstream rename;
/// either way the metric would silently stop inverting, so refuse the load.
///
/// # Errors
/// Returns `AppError::Schema` naming every configured metric absent from the
/// schema.
pub fn validate_against_schema(schema: &[String]) -> Result<(), AppError> {
    let missing: Vec<&str> = LOWER_IS_BETTER
        .iter()
        .filter(|name| !schema.iter().any(|column| column == *name))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Schema(format!(
            "direction table names columns absent from the stats table: {}",
            missing.join(", ")
        )))
    }
}
