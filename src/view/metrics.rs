use maud::{Markup, html};

use crate::model::direction::Direction;
use crate::model::table::{StatsTable, display_metric_name};

#[must_use]
pub fn render_metrics_template(table: &StatsTable) -> Markup {
    let columns = table.selectable_columns();
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { "Pick metrics" }
        }
        body {
            h1 { "Pick two metrics to compare" }
            form action="graph" method="get" {
                label for="x_axis" { "X axis" }
                select id="x_axis" name="x_axis" {
                    @for (index, name) in &columns {
                        option value=(index) { (option_label(name)) }
                    }
                }
                label for="y_axis" { "Y axis" }
                select id="y_axis" name="y_axis" {
                    @for (index, name) in &columns {
                        option value=(index) { (option_label(name)) }
                    }
                }
                label {
                    input type="checkbox" name="trendline" value="1";
                    " Overlay OLS trendline"
                }
                button type="submit" { "Render" }
            }
            nav { a href="." { "Home" } }
        }
    }
}

fn option_label(name: &str) -> String {
    match Direction::for_metric(name) {
        Direction::LowerIsBetter => format!("{} (lower is better)", display_metric_name(name)),
        Direction::HigherIsBetter => display_metric_name(name),
    }
}
