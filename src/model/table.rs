use ahash::{AHashMap, AHashSet};
use std::io::Read;
use std::path::Path;

use crate::error::AppError;
use crate::model::direction;

pub const TEAM_CODE_COLUMN: &str = "team";
pub const TEAM_NAME_COLUMN: &str = "team_name";

/// One team's statistics for the reporting period. An absent key in
/// `metrics` is a missing value.
#[derive(Debug, Clone)]
pub struct StatRow {
    pub team_code: String,
    pub team_name: String,
    metrics: AHashMap<String, f64>,
}

impl StatRow {
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// The stats table snapshot: ordered metric schema plus one row per team.
/// Columns are addressed by positional index in the web layer; the two
/// non-metric columns (team code and display name) are excluded from the
/// selectable set.
#[derive(Debug, Clone)]
pub struct StatsTable {
    schema: Vec<String>,
    rows: Vec<StatRow>,
    excluded: [usize; 2],
}

impl StatsTable {
    /// # Errors
    /// Returns `FetchFailure` when the file cannot be opened and `Parse` or
    /// `Schema` when its contents are unusable.
    pub fn from_csv_path(path: &Path) -> Result<Self, AppError> {
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::FetchFailure(format!("cannot open stats table {}: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }

    /// Parse a CSV stats table. Empty, `NA`, and non-numeric cells are all
    /// treated as missing values.
    ///
    /// # Errors
    /// Returns `Parse` for malformed CSV, a missing team column, or a
    /// duplicate team code, and `Schema` when the direction table names a
    /// column the header does not carry.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let schema: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let team_col = column_position(&schema, TEAM_CODE_COLUMN)?;
        let name_col = column_position(&schema, TEAM_NAME_COLUMN)?;
        direction::validate_against_schema(&schema)?;

        let mut rows = Vec::new();
        let mut seen_codes = AHashSet::new();
        for record in csv_reader.records() {
            let record = record?;
            let team_code = record.get(team_col).unwrap_or("").to_string();
            if team_code.is_empty() {
                return Err(AppError::Parse("row with an empty team code".to_string()));
            }
            if !seen_codes.insert(team_code.clone()) {
                return Err(AppError::Parse(format!(
                    "duplicate team code {team_code} in stats table"
                )));
            }
            let team_name = record.get(name_col).unwrap_or("").to_string();
            let mut metrics = AHashMap::new();
            for (index, cell) in record.iter().enumerate() {
                if index == team_col || index == name_col {
                    continue;
                }
                if let Ok(value) = cell.parse::<f64>() {
                    if value.is_finite() {
                        metrics.insert(schema[index].clone(), value);
                    }
                }
            }
            rows.push(StatRow {
                team_code,
                team_name,
                metrics,
            });
        }

        Ok(Self {
            schema,
            rows,
            excluded: [team_col, name_col],
        })
    }

    #[must_use]
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    #[must_use]
    pub fn rows(&self) -> &[StatRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns offered to the user, as `(positional index, name)` pairs.
    #[must_use]
    pub fn selectable_columns(&self) -> Vec<(usize, &str)> {
        self.schema
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.excluded.contains(index))
            .map(|(index, name)| (index, name.as_str()))
            .collect()
    }

    #[must_use]
    pub fn is_selectable_metric(&self, name: &str) -> bool {
        self.schema
            .iter()
            .position(|column| column == name)
            .is_some_and(|index| !self.excluded.contains(&index))
    }

    /// Resolve a user-supplied column index to its metric name.
    ///
    /// # Errors
    /// Returns `InvalidColumnSelection` for an out-of-range index or one of
    /// the two excluded non-metric columns.
    pub fn selectable_column_name(&self, index: usize) -> Result<&str, AppError> {
        let name = self.schema.get(index).ok_or_else(|| {
            AppError::InvalidColumnSelection(format!(
                "column {index} is out of range (table has {} columns)",
                self.schema.len()
            ))
        })?;
        if self.excluded.contains(&index) {
            return Err(AppError::InvalidColumnSelection(format!(
                "column {index} ({name}) is not a plottable metric"
            )));
        }
        Ok(name)
    }
}

fn column_position(schema: &[String], column: &str) -> Result<usize, AppError> {
    schema
        .iter()
        .position(|c| c == column)
        .ok_or_else(|| AppError::Parse(format!("stats table is missing the {column} column")))
}

/// Human-readable form of a metric name: underscores to spaces, each word
/// title-cased.
#[must_use]
pub fn display_metric_name(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
