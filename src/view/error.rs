use maud::{Markup, html};

#[must_use]
pub fn render_error_template(title: &str, message: &str, hint: &str) -> Markup {
    html! {
        (maud::DOCTYPE)
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (title) }
        }
        body {
            h1 { (title) }
            p { (message) }
            p { (hint) }
            nav { a href="." { "Home" } }
        }
    }
}
