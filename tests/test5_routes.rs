mod common;

use std::fs;
use std::path::Path;
use std::time::Duration;

use actix_web::web::Data;
use actix_web::{App, test, web};

use gridiron_stats::context::{AppConfig, AppContext};
use gridiron_stats::controller::graph;

fn test_context(dir: &Path, fetch_command: Vec<String>) -> Data<AppContext> {
    let table_path = dir.join("statstable.csv");
    fs::write(&table_path, common::FULL_FIXTURE).expect("write fixture table");
    Data::new(AppContext::new(AppConfig {
        table_path,
        logos_dir: dir.join("logos"),
        fetch_command,
        fetch_timeout: Duration::from_secs(5),
        fetch_retries: 0,
    }))
}

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.clone())
                .route("/", web::get().to(graph::index))
                .route("/metrics", web::get().to(graph::metrics))
                .route("/graph", web::get().to(graph::graph))
                .route("/run-script", web::post().to(graph::run_script)),
        )
        .await
    };
}

#[actix_web::test]
async fn index_route_renders_landing_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = test_context(dir.path(), vec!["true".to_string()]);
    let app = test_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert!(resp.status().is_success());
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body");
    assert!(body.contains("NFL Stat Explorer"));
}

#[actix_web::test]
async fn metrics_route_lists_selectable_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = test_context(dir.path(), vec!["true".to_string()]);
    let app = test_app!(ctx);

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
    assert!(resp.status().is_success());
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body");
    assert!(body.contains("name=\"x_axis\""));
    assert!(body.contains("Avg Points Per Play"));
    assert!(body.contains("(lower is better)"));
    // The join keys are not offered as metrics.
    assert!(!body.contains("Team Name"));
}

#[actix_web::test]
async fn graph_route_renders_a_valid_selection() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = test_context(dir.path(), vec!["true".to_string()]);
    let app = test_app!(ctx);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/graph?x_axis=2&y_axis=17&trendline=1")
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body");
    assert!(body.contains("nfl-scatter"));
    assert!(body.contains("Plotly.newPlot"));
}

#[actix_web::test]
async fn graph_route_rejects_excluded_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = test_context(dir.path(), vec!["true".to_string()]);
    let app = test_app!(ctx);

    for uri in ["/graph?x_axis=0&y_axis=2", "/graph?x_axis=2", "/graph"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status().as_u16(), 400, "uri {uri}");
    }
}

#[actix_web::test]
async fn run_script_route_refreshes_the_cache() {
    let dir = tempfile::tempdir().expect("tempdir");
    // "true" succeeds without touching the already-written fixture file.
    let ctx = test_context(dir.path(), vec!["true".to_string()]);
    let app = test_app!(ctx);

    let resp =
        test::call_service(&app, test::TestRequest::post().uri("/run-script").to_request()).await;
    assert!(resp.status().is_success());
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body");
    assert!(body.contains("8 teams"));
}

#[actix_web::test]
async fn run_script_route_surfaces_fetch_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = test_context(dir.path(), vec!["false".to_string()]);
    let app = test_app!(ctx);

    let resp =
        test::call_service(&app, test::TestRequest::post().uri("/run-script").to_request()).await;
    assert_eq!(resp.status().as_u16(), 503);
}
