use std::collections::HashMap;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::web::{Data, Query};
use maud::Markup;

use crate::context::AppContext;
use crate::error::AppError;
use crate::plot::figure;
use crate::plot::request::parse_plot_request;
use crate::view;

pub async fn index(ctx: Data<AppContext>) -> HttpResponse {
    let last_refreshed = ctx.cache.last_refreshed().await;
    html_ok(view::index::render_index_template(last_refreshed))
}

pub async fn metrics(ctx: Data<AppContext>) -> HttpResponse {
    match ctx
        .cache
        .get_or_load(&ctx.source, &ctx.config.table_path)
        .await
    {
        Ok(table) => html_ok(view::metrics::render_metrics_template(&table)),
        Err(err) => error_response(&err),
    }
}

pub async fn graph(query: Query<HashMap<String, String>>, ctx: Data<AppContext>) -> HttpResponse {
    let table = match ctx
        .cache
        .get_or_load(&ctx.source, &ctx.config.table_path)
        .await
    {
        Ok(table) => table,
        Err(err) => return error_response(&err),
    };
    let spec = match parse_plot_request(&query, &table) {
        Ok(spec) => spec,
        Err(err) => return error_response(&err),
    };
    match figure::render(
        &table,
        &spec.x_metric,
        &spec.y_metric,
        spec.add_trendline,
        &ctx.logos,
    ) {
        Ok(plot) => html_ok(view::graph::render_graph_page(&plot)),
        Err(err) => error_response(&err),
    }
}

pub async fn run_script(ctx: Data<AppContext>) -> HttpResponse {
    match ctx.cache.refresh(&ctx.source).await {
        Ok(table) => html_ok(view::refresh::render_refresh_template(table.len())),
        Err(err) => error_response(&err),
    }
}

fn html_ok(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

fn error_response(err: &AppError) -> HttpResponse {
    let (status, title, hint) = match err {
        AppError::InvalidColumnSelection(_) => (
            StatusCode::BAD_REQUEST,
            "Bad column selection",
            "Pick both axes from the metrics page.",
        ),
        AppError::FetchFailure(_) | AppError::FetchTimeout(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Stats are unavailable",
            "The stats fetch did not complete. Try again in a minute.",
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something went wrong",
            "Check the server log for details.",
        ),
    };
    log::error!("{err}");
    HttpResponse::build(status)
        .content_type("text/html")
        .body(view::error::render_error_template(title, &err.to_string(), hint).into_string())
}
