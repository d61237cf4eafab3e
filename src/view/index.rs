use chrono::{DateTime, Utc};
use maud::{Markup, html};

pub const DEFAULT_INDEX_TITLE: &str = "NFL Stat Explorer";

#[must_use]
pub fn render_index_template(last_refreshed: Option<DateTime<Utc>>) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (DEFAULT_INDEX_TITLE) }
        }
        body {
            h1 { (DEFAULT_INDEX_TITLE) }
            p {
                "Compare any two team statistics as a scatter plot with team "
                "logos, mean crosshairs, and an optional trendline."
            }
            p {
                @match last_refreshed {
                    Some(at) => { "Stats loaded " (format_time_since(at)) " ago." },
                    None => { "Stats have not been loaded yet; the first chart request fetches them." },
                }
            }
            nav {
                a href="metrics" { "Pick metrics" }
            }
            form method="post" action="run-script" {
                button type="submit" { "Refresh stats" }
            }
        }
    }
}

fn format_time_since(at: DateTime<Utc>) -> String {
    let elapsed = (Utc::now() - at).num_seconds().max(0);
    format!("{}m, {}s", elapsed / 60, elapsed % 60)
}
