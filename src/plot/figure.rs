use plotly::Scatter;
use plotly::color::NamedColor;
use plotly::common::{DashType, HoverInfo, Line, Marker, Mode, Title};
use plotly::layout::{Axis, Layout};
use serde_json::{Value, json};

use crate::controller::logos::LogoStore;
use crate::error::AppError;
use crate::model::direction::Direction;
use crate::model::table::{StatsTable, display_metric_name};
use crate::plot::math::{AxisWindow, OlsLine, pearson};
use crate::plot::series::{ScatterPoint, ScatterSeries};

/// Logo edge length as a fraction of the axis span.
const LOGO_SIZE_FRACTION: f64 = 0.08;
const LOGO_OPACITY: f64 = 0.8;
const FIGURE_SIZE: usize = 800;

/// Self-contained interactive chart plus the numbers its title reports.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    /// Plotly figure as `{ "data": [...], "layout": {...} }`.
    pub figure: Value,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub correlation: Option<f64>,
    pub point_count: usize,
}

/// Render the scatter comparison of two metric columns: points for every
/// team with both values, logo overlays where an asset exists, the mean
/// crosshair, and an optional OLS trendline.
///
/// # Errors
/// Returns `InvalidColumnSelection` if either metric is not a plottable
/// column of `table`.
pub fn render(
    table: &StatsTable,
    x_metric: &str,
    y_metric: &str,
    add_trendline: bool,
    logos: &dyn LogoStore,
) -> Result<RenderedPlot, AppError> {
    for metric in [x_metric, y_metric] {
        if !table.is_selectable_metric(metric) {
            return Err(AppError::InvalidColumnSelection(format!(
                "{metric} is not a plottable metric"
            )));
        }
    }

    let series = ScatterSeries::project(table, x_metric, y_metric);
    let xs = series.xs();
    let ys = series.ys();
    let correlation = pearson(&xs, &ys);
    let x_label = display_metric_name(x_metric);
    let y_label = display_metric_name(y_metric);
    let title = format!(
        "{x_label} vs {y_label}<br>Correlation: {}",
        format_correlation(correlation)
    );

    let x_window = AxisWindow::from_values(&xs);
    let y_window = AxisWindow::from_values(&ys);

    let mut traces: Vec<Value> = Vec::new();
    traces.push(serde_json::to_value(points_trace(
        &series, &x_label, &y_label,
    ))?);
    if add_trendline {
        if let (Some(line), Some(window)) = (OlsLine::fit(&xs, &ys), x_window) {
            traces.push(serde_json::to_value(trendline_trace(&line, &window))?);
        }
    }

    let mut x_axis = Axis::new().title(Title::with_text(&x_label));
    if let Some(window) = x_window {
        let inverted = Direction::for_metric(x_metric).inverts_axis();
        x_axis = x_axis.range(window.range(inverted).to_vec());
    }
    let mut y_axis = Axis::new().title(Title::with_text(&y_label));
    if let Some(window) = y_window {
        let inverted = Direction::for_metric(y_metric).inverts_axis();
        y_axis = y_axis.range(window.range(inverted).to_vec());
    }
    let layout = Layout::new()
        .title(Title::with_text(&title))
        .width(FIGURE_SIZE)
        .height(FIGURE_SIZE)
        .show_legend(false)
        .x_axis(x_axis)
        .y_axis(y_axis);

    // The typed layout API stops short of image overlays, so the logo layer
    // and its companion crosshair shapes are spliced into the serialized
    // layout instead.
    let mut layout_value = serde_json::to_value(&layout)?;
    if let (Some(x_window), Some(y_window)) = (x_window, y_window) {
        layout_value["shapes"] = crosshair_shapes(&x_window, &y_window);
        layout_value["images"] = logo_images(&series.points, logos, &x_window, &y_window);
    } else {
        layout_value["annotations"] = empty_plot_annotation();
    }

    Ok(RenderedPlot {
        figure: json!({ "data": Value::Array(traces), "layout": layout_value }),
        title,
        x_label,
        y_label,
        correlation,
        point_count: series.points.len(),
    })
}

fn format_correlation(correlation: Option<f64>) -> String {
    match correlation {
        Some(r) => format!("{r:.2}"),
        None => "n/a".to_string(),
    }
}

fn points_trace(series: &ScatterSeries, x_label: &str, y_label: &str) -> Box<Scatter<f64, f64>> {
    let hover_text: Vec<String> = series
        .points
        .iter()
        .map(|point| {
            format!(
                "{}<br>{x_label}: {:.2}<br>{y_label}: {:.2}",
                point.team_name, point.x, point.y
            )
        })
        .collect();
    Scatter::new(series.xs(), series.ys())
        .mode(Mode::Markers)
        .name("Teams")
        .marker(Marker::new().size(10).color(NamedColor::White).opacity(0.9))
        .hover_info(HoverInfo::Text)
        .hover_text_array(hover_text)
        .show_legend(false)
}

fn trendline_trace(line: &OlsLine, x_window: &AxisWindow) -> Box<Scatter<f64, f64>> {
    let x0 = x_window.min();
    let x1 = x_window.max();
    Scatter::new(vec![x0, x1], vec![line.at(x0), line.at(x1)])
        .mode(Mode::Lines)
        .name("OLS trend")
        .line(Line::new().color(NamedColor::Blue).width(2.0).dash(DashType::Dash))
        .hover_info(HoverInfo::Skip)
        .show_legend(false)
}

/// Dashed reference lines through the mean of each axis, spanning the full
/// padded range so they always cross at the geometric center of the plot.
fn crosshair_shapes(x_window: &AxisWindow, y_window: &AxisWindow) -> Value {
    json!([
        {
            "type": "line",
            "xref": "x",
            "yref": "y",
            "x0": x_window.center,
            "x1": x_window.center,
            "y0": y_window.min(),
            "y1": y_window.max(),
            "line": { "color": "red", "width": 2, "dash": "dash" }
        },
        {
            "type": "line",
            "xref": "x",
            "yref": "y",
            "x0": x_window.min(),
            "x1": x_window.max(),
            "y0": y_window.center,
            "y1": y_window.center,
            "line": { "color": "red", "width": 2, "dash": "dash" }
        }
    ])
}

fn logo_images(
    points: &[ScatterPoint],
    logos: &dyn LogoStore,
    x_window: &AxisWindow,
    y_window: &AxisWindow,
) -> Value {
    let size_x = x_window.span() * LOGO_SIZE_FRACTION;
    let size_y = y_window.span() * LOGO_SIZE_FRACTION;
    let images: Vec<Value> = points
        .iter()
        .filter_map(|point| {
            // Teams without an asset keep their plain marker.
            let asset = logos.get(&point.team_code)?;
            Some(json!({
                "source": asset.data_uri(),
                "xref": "x",
                "yref": "y",
                "x": point.x,
                "y": point.y,
                "sizex": size_x,
                "sizey": size_y,
                "xanchor": "center",
                "yanchor": "middle",
                "sizing": "contain",
                "opacity": LOGO_OPACITY,
                "layer": "above"
            }))
        })
        .collect();
    Value::Array(images)
}

fn empty_plot_annotation() -> Value {
    json!([
        {
            "text": "No rows with values for both metrics",
            "xref": "paper",
            "yref": "paper",
            "x": 0.5,
            "y": 0.5,
            "showarrow": false
        }
    ])
}
