mod common;

use gridiron_stats::AppError;
use gridiron_stats::model::table::{StatsTable, display_metric_name};

#[test]
fn parses_fixture_schema_and_rows() {
    let table = common::fixture_table();
    assert_eq!(table.schema().len(), 19);
    assert_eq!(table.len(), 8);
    assert_eq!(table.rows()[0].team_code, "KC");
    assert_eq!(table.rows()[0].team_name, "Kansas City Chiefs");
    assert_eq!(table.rows()[0].metric("win_percentage"), Some(0.688));
}

#[test]
fn excludes_team_columns_from_selectable_set() {
    let table = common::fixture_table();
    let selectable = table.selectable_columns();
    assert_eq!(selectable.len(), 17);
    assert!(
        selectable
            .iter()
            .all(|(_, name)| *name != "team" && *name != "team_name")
    );
    assert!(matches!(
        table.selectable_column_name(0),
        Err(AppError::InvalidColumnSelection(_))
    ));
    assert!(matches!(
        table.selectable_column_name(1),
        Err(AppError::InvalidColumnSelection(_))
    ));
    assert!(matches!(
        table.selectable_column_name(99),
        Err(AppError::InvalidColumnSelection(_))
    ));
    assert_eq!(
        table.selectable_column_name(2).unwrap(),
        "avg_points_per_play"
    );
}

#[test]
fn na_cells_are_missing_values() {
    let table = common::fixture_table();
    let jets = table
        .rows()
        .iter()
        .find(|row| row.team_code == "NYJ")
        .expect("NYJ row present");
    assert_eq!(jets.metric("avg_epa_run"), None);
    assert!(jets.metric("avg_epa_pass").is_some());
}

#[test]
fn duplicate_team_codes_are_rejected() {
    let duplicated = common::FULL_FIXTURE.replace("BUF,", "KC,");
    let err = StatsTable::from_reader(duplicated.as_bytes()).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)), "got {err:?}");
}

#[test]
fn schema_missing_a_direction_metric_is_rejected() {
    // A renamed variance column must fail the load, not silently stop
    // inverting that axis.
    let renamed = common::FULL_FIXTURE.replace("epa_run_variance", "epa_run_var");
    let err = StatsTable::from_reader(renamed.as_bytes()).unwrap_err();
    assert!(matches!(err, AppError::Schema(_)), "got {err:?}");
}

#[test]
fn missing_team_column_is_rejected() {
    let headerless = common::FULL_FIXTURE.replacen("team,team_name", "club,club_name", 1);
    let err = StatsTable::from_reader(headerless.as_bytes()).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)), "got {err:?}");
}

#[test]
fn metric_names_render_title_cased() {
    assert_eq!(
        display_metric_name("avg_points_per_play"),
        "Avg Points Per Play"
    );
    assert_eq!(display_metric_name("win_percentage"), "Win Percentage");
}
