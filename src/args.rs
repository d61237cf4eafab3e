use clap::Parser;
use std::path::PathBuf;

#[must_use]
pub fn args_checks() -> Args {
    Args::parse()
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Column number for the x-axis; with a y column, renders one chart to
    /// --output and exits instead of serving
    #[arg(value_name = "X_COL_NUM")]
    pub x_col_num: Option<usize>,

    /// Column number for the y-axis
    #[arg(value_name = "Y_COL_NUM")]
    pub y_col_num: Option<usize>,

    /// Overlay an ordinary-least-squares trendline
    #[arg(long)]
    pub add_trendline: bool,

    /// Output file for one-shot rendering
    #[arg(long, default_value = "plot.html")]
    pub output: PathBuf,

    /// Address to bind the web server
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub bind: String,

    /// Path of the cached stats table the fetch script writes
    #[arg(long, default_value = "./statstable.csv")]
    pub stats_file: PathBuf,

    /// Directory holding per-team logo images
    #[arg(long, default_value = "./static/images/logos")]
    pub logos_dir: PathBuf,

    /// Command that refreshes the stats table
    #[arg(long, default_value = "Rscript ./fetchstats.R")]
    pub fetch_command: String,

    /// Seconds to wait for the fetch command before giving up
    #[arg(long, default_value_t = 120)]
    pub fetch_timeout_secs: u64,

    /// Extra attempts after a failed or timed-out fetch
    #[arg(long, default_value_t = 2)]
    pub fetch_retries: u32,

    /// Skip downloading missing team logos at startup
    #[arg(long)]
    pub skip_logo_download: bool,
}
