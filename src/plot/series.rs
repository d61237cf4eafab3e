use crate::model::table::StatsTable;

/// One plotted team.
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    pub team_code: String,
    pub team_name: String,
    pub x: f64,
    pub y: f64,
}

/// Projection of the stats table onto two metric columns. Rows with a
/// missing value in either column are dropped; the remaining rows feed both
/// the rendered points and the correlation.
#[derive(Debug, Clone)]
pub struct ScatterSeries {
    pub x_metric: String,
    pub y_metric: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterSeries {
    #[must_use]
    pub fn project(table: &StatsTable, x_metric: &str, y_metric: &str) -> Self {
        let points = table
            .rows()
            .iter()
            .filter_map(|row| {
                let x = row.metric(x_metric)?;
                let y = row.metric(y_metric)?;
                Some(ScatterPoint {
                    team_code: row.team_code.clone(),
                    team_name: row.team_name.clone(),
                    x,
                    y,
                })
            })
            .collect();
        Self {
            x_metric: x_metric.to_string(),
            y_metric: y_metric.to_string(),
            points,
        }
    }

    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.x).collect()
    }

    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.y).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
