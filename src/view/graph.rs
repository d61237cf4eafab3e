use maud::{Markup, PreEscaped, html};

use crate::PLOTLY_JS_PATH;
use crate::plot::figure::RenderedPlot;

#[must_use]
pub fn render_graph_page(plot: &RenderedPlot) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (plot.x_label) " vs " (plot.y_label) }
            script src=(PLOTLY_JS_PATH) {}
        }
        body {
            nav {
                a href="metrics" { "Pick different metrics" }
                " | "
                a href="." { "Home" }
            }
            (render_figure(plot))
        }
    }
}

/// Embeddable fragment: the figure div plus the script that mounts it.
#[must_use]
pub fn render_figure(plot: &RenderedPlot) -> Markup {
    // Keep the figure JSON from closing the surrounding script element.
    let figure_json = plot.figure.to_string().replace("</", "<\\/");
    html! {
        div id="nfl-scatter" {}
        script {
            (PreEscaped(format!(
                "const figure = {figure_json};\nPlotly.newPlot(\"nfl-scatter\", figure.data, figure.layout, {{responsive: true, displaylogo: false}});"
            )))
        }
    }
}
