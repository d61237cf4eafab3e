use maud::{Markup, html};

#[must_use]
pub fn render_refresh_template(team_count: usize) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { "Stats refreshed" }
        }
        body {
            h1 { "Stats refreshed" }
            p { "Fetched statistics for " (team_count) " teams." }
            nav {
                a href="metrics" { "Pick metrics" }
                " | "
                a href="." { "Home" }
            }
        }
    }
}
