//! Landing page
//!
//! Server-renders the account filter buttons; the page script loads
//! posts from `/tweets`.

use axum::{Router, extract::State, response::Html, routing::get};

use crate::AppState;
use crate::metrics::HTTP_REQUESTS_TOTAL;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Create page router
pub fn page_router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// GET /
async fn index(State(state): State<AppState>) -> Html<String> {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&["GET", "/", "200"])
        .inc();

    Html(render_index(state.aggregator.accounts()))
}

/// Render the landing page with one filter button per account
pub fn render_index(accounts: &[String]) -> String {
    let buttons: String = accounts
        .iter()
        .map(|account| {
            format!(
                "            <button class=\"btn account-btn\" data-account=\"{}\">@{}</button>\n",
                html_escape::encode_double_quoted_attribute(account),
                html_escape::encode_text(account),
            )
        })
        .collect();

    INDEX_TEMPLATE.replace("{{ account_buttons }}\n", &buttons)
}
