use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::error::AppError;
use crate::model::table::StatsTable;

/// One render request: which two schema columns to plot and whether to
/// overlay a trendline. Built per request, never persisted.
#[derive(Debug, Clone)]
pub struct PlotSpec {
    pub x_metric: String,
    pub y_metric: String,
    pub add_trendline: bool,
}

/// Parse `/graph` query parameters against the loaded schema.
///
/// # Errors
/// Returns `InvalidColumnSelection` when an axis parameter is missing, not
/// an integer, out of range, or addresses a non-metric column.
pub fn parse_plot_request<S: BuildHasher>(
    query: &HashMap<String, String, S>,
    table: &StatsTable,
) -> Result<PlotSpec, AppError> {
    let x_index = parse_axis_index(query, "x_axis")?;
    let y_index = parse_axis_index(query, "y_axis")?;
    let x_metric = table.selectable_column_name(x_index)?.to_string();
    let y_metric = table.selectable_column_name(y_index)?.to_string();
    let add_trendline = match query.get("trendline").map(String::as_str) {
        Some("1") => true,
        Some("0") | None => false,
        Some(other) => other.parse().unwrap_or(false),
    };
    Ok(PlotSpec {
        x_metric,
        y_metric,
        add_trendline,
    })
}

fn parse_axis_index<S: BuildHasher>(
    query: &HashMap<String, String, S>,
    key: &str,
) -> Result<usize, AppError> {
    query
        .get(key)
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| AppError::InvalidColumnSelection(format!("{key} must be a column number")))
}
