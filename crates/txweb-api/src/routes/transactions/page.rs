//! Transactions page rendering - Full page endpoints
//!
//! Endpoints:
//! - page_transactions: Main transactions page

use crate::AppState;
use txweb_utils::format_number;

/// Transactions page - headline with the provider count, summary cards,
/// and the table container that lazy-loads the sortable fragment
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let store = state.store.read().await;
    let summary = store.summary();

    let loaded_at = summary
        .loaded_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string());

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transaction count: {}</h2>
            <button onclick='reloadDataset()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200 flex items-center gap-2' title='Reload dataset'>
                <svg xmlns='http://www.w3.org/2000/svg' class='h-5 w-5' fill='none' viewBox='0 0 24 24' stroke='currentColor'>
                    <path stroke-linecap='round' stroke-linejoin='round' stroke-width='2' d='M4 4v5h.582m15.356 2A8.001 8.001 0 004.582 9m0 0H9m11 11v-5h-.581m0 0a8.003 8.003 0 01-15.357-2m15.357 2H15'/>
                </svg>
                Reload
            </button>
        </div>
        <div class='grid grid-cols-2 md:grid-cols-3 gap-3 mb-4'>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Rows loaded</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-purple-50 p-3 rounded-lg border border-purple-100'><p class='text-xs text-purple-600'>Rows shown</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Loaded at</p><p class='text-sm font-medium truncate'>{}</p></div>
        </div>
        <div id='transactions-content' hx-get='/transactions/table' hx-trigger='load' class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-gray-500 text-center'>Loading...</p>
        </div>
        <script>
        function reloadDataset() {{
            fetch('/api/reload', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (data.success) {{
                        window.location.reload();
                    }} else {{
                        alert('Reload failed: ' + data.message);
                    }}
                }})
                .catch(e => alert('Reload failed: ' + e));
        }}
        </script>"#,
        summary.count,
        format_number(summary.rows),
        summary.window,
        loaded_at
    );

    axum::response::Html(crate::page_response(
        &headers,
        "Transactions",
        "/transactions",
        &inner_content,
    ))
}
