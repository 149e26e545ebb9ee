//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Get the loaded dataset (JSON)
//! - htmx_transactions_table: Sortable table (HTML fragment)
//!
//! The table fragment carries the whole sort interaction: every header
//! cell links to this endpoint with the query parameters of the *next*
//! sort state in the cycle, so clicking a header swaps in the re-sorted
//! fragment.

use crate::AppState;
use axum::extract::Query;
use std::collections::HashMap;
use txweb_core::{RenderedTable, SortDirection, SortState, TableSpec};
use txweb_utils::escape_html;

/// Get the dataset as loaded (JSON API)
pub async fn api_transactions(state: axum::extract::State<AppState>) -> String {
    let store = state.store.read().await;
    serde_json::to_string(store.dataset()).unwrap_or_default()
}

/// HTMX: Sortable transaction table - Partial page update
///
/// Query parameters: `sort` (column key) and `dir` (`asc` or `desc`).
/// No parameters means provider order.
pub async fn htmx_transactions_table(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let store = state.store.read().await;
    let sort = SortState::from_params(
        params.get("sort").map(|s| s.as_str()),
        params.get("dir").map(|s| s.as_str()),
    );

    let spec = match TableSpec::transactions() {
        Ok(spec) => spec,
        Err(e) => {
            log::error!("Table configuration error: {}", e.to_details());
            return format!(
                r#"<div class='text-center py-12 text-red-500'><p>{}</p></div>"#,
                escape_html(&e.to_string())
            );
        }
    };

    let rendered = spec.render(store.rows(), &sort);
    render_table_html(&rendered, &sort)
}

/// Query string for a sort state, empty when unsorted
fn sort_query(state: &SortState) -> String {
    match state {
        SortState::Unsorted => String::new(),
        SortState::Ascending(key) => format!("?sort={}&dir=asc", urlencoding::encode(key)),
        SortState::Descending(key) => format!("?sort={}&dir=desc", urlencoding::encode(key)),
    }
}

/// Indicator suffix for a header cell, matching its current sort
fn indicator_suffix(indicator: Option<SortDirection>) -> &'static str {
    match indicator {
        Some(SortDirection::Asc) => " 🔼",
        Some(SortDirection::Desc) => " 🔽",
        None => "",
    }
}

/// Build the table fragment from rendered content
fn render_table_html(rendered: &RenderedTable, sort: &SortState) -> String {
    let mut html = String::from(
        "<div class='overflow-x-auto'><table class='w-full text-sm border-collapse'><thead>",
    );

    html.push_str("<tr>");
    for group in &rendered.groups {
        html.push_str(&format!(
            r#"<th colspan='{}' class='px-3 py-2 text-center font-semibold bg-indigo-50 text-indigo-700 border-b'>{}</th>"#,
            group.span,
            escape_html(&group.label)
        ));
    }
    html.push_str("</tr><tr>");

    for header in &rendered.headers {
        let next = sort.toggle(&header.key);
        html.push_str(&format!(
            r#"<th class='px-3 py-2 text-left border-b'><a hx-get='/transactions/table{}' hx-target='#transactions-content' hx-swap='innerHTML' class='cursor-pointer text-gray-700 hover:text-indigo-600'>{}{}</a></th>"#,
            sort_query(&next),
            escape_html(&header.label),
            indicator_suffix(header.indicator)
        ));
    }
    html.push_str("</tr></thead><tbody>");

    for row in &rendered.body {
        html.push_str("<tr class='hover:bg-gray-50'>");
        for cell in row {
            html.push_str(&format!(
                r#"<td class='px-3 py-2 border-b border-gray-100'>{}</td>"#,
                escape_html(cell)
            ));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");

    html.push_str(&format!(
        r#"<p class='mt-4 text-sm text-gray-500'>{}</p>"#,
        rendered.footer
    ));

    html
}

// ==================== Tests ====================
