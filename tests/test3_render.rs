mod common;

use std::fs;

use gridiron_stats::AppError;
use gridiron_stats::controller::logos::{DirLogoStore, LogoAsset, LogoStore};
use gridiron_stats::model::table::StatsTable;
use gridiron_stats::plot::figure::render;

struct NoLogos;

impl LogoStore for NoLogos {
    fn get(&self, _team_code: &str) -> Option<LogoAsset> {
        None
    }
}

// Two perfectly collinear teams; combined_variance_score is empty in both
// rows to exercise the empty-filtered-set path.
const SCENARIO_CSV: &str = "\
team,team_name,avg_points_per_play,avg_points_against_per_play,avg_epa_pass,avg_epa_pass_against,avg_epa_run,avg_epa_run_against,avg_success_rate,avg_success_rate_against,avg_yards_per_play,avg_yards_against_per_play,points_per_play_variance,epa_pass_variance,epa_run_variance,success_rate_variance,yards_per_play_variance,win_percentage,combined_variance_score
KC,Kansas City,1.0,2.0,0.1,0.0,0.1,0.0,0.45,0.40,5.0,5.0,0.02,0.03,0.02,0.002,0.3,2.0,
BUF,Buffalo,3.0,4.0,0.2,0.1,0.2,0.1,0.50,0.42,5.5,5.2,0.03,0.04,0.03,0.003,0.4,4.0,
";

fn scenario_table() -> StatsTable {
    StatsTable::from_reader(SCENARIO_CSV.as_bytes()).expect("scenario table parses")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn scenario_centers_crosshair_on_the_mean() {
    let table = scenario_table();
    let plot = render(&table, "avg_points_per_play", "win_percentage", false, &NoLogos)
        .expect("render succeeds");

    assert_eq!(plot.point_count, 2);
    assert!(approx(plot.correlation.unwrap(), 1.0));
    assert!(plot.title.contains("Correlation: 1.00"));
    assert!(plot.title.contains("Avg Points Per Play vs Win Percentage"));

    // x in {1, 3} and y in {2, 4}: centers (2, 3), half-ranges 1.1.
    let layout = &plot.figure["layout"];
    assert!(approx(layout["xaxis"]["range"][0].as_f64().unwrap(), 0.9));
    assert!(approx(layout["xaxis"]["range"][1].as_f64().unwrap(), 3.1));
    assert!(approx(layout["yaxis"]["range"][0].as_f64().unwrap(), 1.9));
    assert!(approx(layout["yaxis"]["range"][1].as_f64().unwrap(), 4.1));

    let shapes = layout["shapes"].as_array().expect("crosshair shapes");
    assert_eq!(shapes.len(), 2);
    assert!(approx(shapes[0]["x0"].as_f64().unwrap(), 2.0));
    assert!(approx(shapes[0]["x1"].as_f64().unwrap(), 2.0));
    assert!(approx(shapes[0]["y0"].as_f64().unwrap(), 1.9));
    assert!(approx(shapes[0]["y1"].as_f64().unwrap(), 4.1));
    assert!(approx(shapes[1]["y0"].as_f64().unwrap(), 3.0));
    assert!(approx(shapes[1]["x0"].as_f64().unwrap(), 0.9));
}

#[test]
fn lower_is_better_metric_flips_its_axis() {
    let table = scenario_table();
    let plot = render(
        &table,
        "avg_points_per_play",
        "avg_points_against_per_play",
        false,
        &NoLogos,
    )
    .expect("render succeeds");

    let range = &plot.figure["layout"]["yaxis"]["range"];
    let lo = range[0].as_f64().unwrap();
    let hi = range[1].as_f64().unwrap();
    assert!(lo > hi, "inverted axis should have a reversed range");
    assert!(approx(lo, 4.1));
    assert!(approx(hi, 1.9));
}

#[test]
fn missing_logos_degrade_to_plain_markers() {
    let table = scenario_table();
    let plot = render(&table, "avg_points_per_play", "win_percentage", false, &NoLogos)
        .expect("render succeeds");

    assert_eq!(plot.figure["layout"]["images"].as_array().unwrap().len(), 0);
    let xs = plot.figure["data"][0]["x"].as_array().unwrap();
    assert_eq!(xs.len(), 2);
}

#[test]
fn present_logos_become_image_overlays() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("KC.png"), b"not a real png").expect("write logo");
    let logos = DirLogoStore::new(dir.path());

    let table = scenario_table();
    let plot = render(&table, "avg_points_per_play", "win_percentage", false, &logos)
        .expect("render succeeds");

    let images = plot.figure["layout"]["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    let source = images[0]["source"].as_str().unwrap();
    assert!(source.starts_with("data:image/png;base64,"));
    assert!(approx(images[0]["x"].as_f64().unwrap(), 1.0));
    // 0.08 of the 2.2-wide padded span.
    assert!(approx(images[0]["sizex"].as_f64().unwrap(), 2.2 * 0.08));
}

#[test]
fn empty_filtered_set_renders_an_annotated_plot() {
    let table = scenario_table();
    let plot = render(
        &table,
        "avg_epa_pass",
        "combined_variance_score",
        false,
        &NoLogos,
    )
    .expect("render succeeds");

    assert_eq!(plot.point_count, 0);
    assert_eq!(plot.correlation, None);
    assert!(plot.title.contains("Correlation: n/a"));
    let layout = &plot.figure["layout"];
    assert!(layout["annotations"].as_array().is_some());
    assert!(layout["shapes"].as_array().is_none());
}

#[test]
fn trendline_adds_a_second_trace() {
    let table = common::fixture_table();
    let plot = render(&table, "avg_points_per_play", "win_percentage", true, &NoLogos)
        .expect("render succeeds");

    let traces = plot.figure["data"].as_array().unwrap();
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[1]["mode"].as_str().unwrap(), "lines");

    let without = render(&table, "avg_points_per_play", "win_percentage", false, &NoLogos)
        .expect("render succeeds");
    assert_eq!(without.figure["data"].as_array().unwrap().len(), 1);
}

#[test]
fn rows_missing_either_metric_are_dropped() {
    let table = common::fixture_table();
    // NYJ has no avg_epa_run value.
    let plot = render(&table, "avg_epa_run", "win_percentage", false, &NoLogos)
        .expect("render succeeds");
    assert_eq!(plot.point_count, table.len() - 1);
}

#[test]
fn non_metric_columns_are_rejected() {
    let table = scenario_table();
    for metric in ["team", "team_name", "no_such_metric"] {
        let err = render(&table, metric, "win_percentage", false, &NoLogos).unwrap_err();
        assert!(
            matches!(err, AppError::InvalidColumnSelection(_)),
            "got {err:?}"
        );
    }
}
