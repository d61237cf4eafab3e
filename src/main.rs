use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, web};

use gridiron_stats::args;
use gridiron_stats::context::{AppConfig, AppContext};
use gridiron_stats::controller::{graph, logos};
use gridiron_stats::plot::figure;
use gridiron_stats::view;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = args::args_checks();
    let ctx = Data::new(AppContext::new(AppConfig::from_args(&args)));

    if !args.skip_logo_download {
        logos::ensure_logos(&ctx.config.logos_dir).await;
    }

    if let (Some(x_col), Some(y_col)) = (args.x_col_num, args.y_col_num) {
        return render_one_shot(&ctx, x_col, y_col, args.add_trendline, &args.output).await;
    }

    log::info!("listening on {}", args.bind);
    HttpServer::new(move || {
        App::new()
            .app_data(ctx.clone())
            .route("/", web::get().to(graph::index))
            .route("/index", web::get().to(graph::index))
            .route("/metrics", web::get().to(graph::metrics))
            .route("/graph", web::get().to(graph::graph))
            .route("/run-script", web::post().to(graph::run_script))
            .route("/health", web::get().to(HttpResponse::Ok))
            .service(Files::new("/static", "./static").show_files_listing())
    })
    .bind(args.bind.as_str())?
    .run()
    .await?;
    Ok(())
}

/// Debugging entry point: render one chart straight to an HTML file.
async fn render_one_shot(
    ctx: &AppContext,
    x_col: usize,
    y_col: usize,
    add_trendline: bool,
    output: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = ctx
        .cache
        .get_or_load(&ctx.source, &ctx.config.table_path)
        .await?;
    let x_metric = table.selectable_column_name(x_col)?.to_string();
    let y_metric = table.selectable_column_name(y_col)?.to_string();
    let plot = figure::render(&table, &x_metric, &y_metric, add_trendline, &ctx.logos)?;
    std::fs::write(output, view::graph::render_graph_page(&plot).into_string())?;
    println!("wrote {}", output.display());
    Ok(())
}
