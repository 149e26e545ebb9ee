//! Sortable bounded table rendering
//!
//! The transactions page shows a single table: a grouped header, up to
//! [`DISPLAY_WINDOW`] body rows, and a footer line reporting how many of
//! the total rows are visible. Sorting is a single global state that
//! cycles per column: unsorted -> ascending -> descending -> unsorted.
//! Clicking a different column starts a fresh ascending sort on it.
//!
//! Sorting is stable in both directions: descending reverses the
//! comparator, not the sorted sequence, so equal rows keep their input
//! order either way.

use crate::error::{CoreError, CoreResult};
use crate::models::{FieldValue, Transaction};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Maximum number of body rows rendered, always the first of the sorted
/// sequence. A deliberate fixed cap, not a configuration knob.
pub const DISPLAY_WINDOW: usize = 20;

/// Typed field accessor bound to a column at configuration time
pub type Accessor = fn(&Transaction) -> Option<FieldValue>;

// ==================== Sort State ====================

/// Sort direction for an active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

/// The single global sort state of the table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortState {
    /// No sort active, rows keep provider order
    #[default]
    Unsorted,
    /// Ascending sort on the column with this key
    Ascending(String),
    /// Descending sort on the column with this key
    Descending(String),
}

impl SortState {
    /// Build a sort state from query parameters, tolerating absent or
    /// malformed values (both fall back to unsorted / ascending).
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        let key = match sort {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => return SortState::Unsorted,
        };
        match dir.and_then(|d| d.parse::<SortDirection>().ok()) {
            Some(SortDirection::Desc) => SortState::Descending(key),
            _ => SortState::Ascending(key),
        }
    }

    /// The state that activating the column `key` transitions to.
    ///
    /// Cycle on the active column: ascending -> descending -> unsorted.
    /// Any other column starts ascending.
    pub fn toggle(&self, key: &str) -> SortState {
        match self {
            SortState::Ascending(k) if k == key => SortState::Descending(key.to_string()),
            SortState::Descending(k) if k == key => SortState::Unsorted,
            _ => SortState::Ascending(key.to_string()),
        }
    }

    /// The sorted column key, if a sort is active
    pub fn key(&self) -> Option<&str> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending(k) | SortState::Descending(k) => Some(k),
        }
    }

    /// The active direction for the column `key`, if it is the sorted one
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        match self {
            SortState::Ascending(k) if k == key => Some(SortDirection::Asc),
            SortState::Descending(k) if k == key => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

// ==================== Table Specification ====================

/// A single column: display label, stable key, and typed accessor
#[derive(Clone)]
pub struct ColumnDef {
    /// Header label shown to the user
    pub label: String,
    /// Stable key used in sort parameters
    pub key: String,
    /// Field accessor bound at configuration time
    pub accessor: Accessor,
}

impl ColumnDef {
    pub fn new(label: &str, key: &str, accessor: Accessor) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
            accessor,
        }
    }
}

/// A named group of columns sharing one spanning header cell
#[derive(Clone)]
pub struct ColumnGroup {
    /// Group header label
    pub label: String,
    /// Columns under this group
    pub columns: Vec<ColumnDef>,
}

impl ColumnGroup {
    pub fn new(label: &str, columns: Vec<ColumnDef>) -> Self {
        Self {
            label: label.to_string(),
            columns,
        }
    }
}

/// Validated table configuration
///
/// Construction fails fast on duplicate column keys; everything after
/// that can assume keys are unique.
#[derive(Clone)]
pub struct TableSpec {
    groups: Vec<ColumnGroup>,
}

impl TableSpec {
    /// Validate and build a table specification
    pub fn new(groups: Vec<ColumnGroup>) -> CoreResult<Self> {
        let mut seen: Vec<&str> = Vec::new();
        for group in &groups {
            for column in &group.columns {
                if seen.contains(&column.key.as_str()) {
                    return Err(CoreError::DuplicateColumn {
                        key: column.key.clone(),
                    });
                }
                seen.push(&column.key);
            }
        }
        Ok(Self { groups })
    }

    /// The standard transaction table: one "Transactions" group over the
    /// seven record fields.
    pub fn transactions() -> CoreResult<Self> {
        Self::new(vec![ColumnGroup::new(
            "Transactions",
            vec![
                ColumnDef::new("Date Time", "datetime", |t| {
                    t.datetime.clone().map(FieldValue::Text)
                }),
                ColumnDef::new("Epoch", "epoch", |t| {
                    t.epoch.map(|e| FieldValue::Number(e as f64))
                }),
                ColumnDef::new("Tx ID", "txid", |t| t.txid.clone().map(FieldValue::Text)),
                ColumnDef::new("From", "txFrom", |t| {
                    t.tx_from.clone().map(FieldValue::Text)
                }),
                ColumnDef::new("To", "txTo", |t| t.tx_to.clone().map(FieldValue::Text)),
                ColumnDef::new("Amount", "txAmount", |t| t.tx_amount.clone()),
                ColumnDef::new("Currency", "currency", |t| {
                    t.currency.clone().map(FieldValue::Text)
                }),
            ],
        )])
    }

    /// All columns in declaration order, flattened across groups
    pub fn columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.groups.iter().flat_map(|g| g.columns.iter())
    }

    fn column_by_key(&self, key: &str) -> Option<&ColumnDef> {
        self.columns().find(|c| c.key == key)
    }

    /// Render the table: sort (if active), truncate to the display
    /// window, and produce header, body and footer content.
    pub fn render(&self, rows: &[Transaction], sort: &SortState) -> RenderedTable {
        let total = rows.len();

        let mut ordered: Vec<&Transaction> = rows.iter().collect();
        // A sort key naming no configured column behaves as unsorted.
        let active = sort
            .key()
            .and_then(|k| self.column_by_key(k))
            .map(|col| (col, matches!(sort, SortState::Descending(_))));
        if let Some((col, descending)) = active {
            ordered.sort_by(|a, b| {
                let ord = compare_values(
                    (col.accessor)(a).as_ref(),
                    (col.accessor)(b).as_ref(),
                );
                if descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
        ordered.truncate(DISPLAY_WINDOW);

        let groups = self
            .groups
            .iter()
            .map(|g| HeaderGroup {
                label: g.label.clone(),
                span: g.columns.len(),
            })
            .collect();

        let headers = self
            .columns()
            .map(|c| HeaderCell {
                label: c.label.clone(),
                key: c.key.clone(),
                indicator: sort.direction_for(&c.key),
            })
            .collect();

        let body = ordered
            .iter()
            .map(|tx| {
                self.columns()
                    .map(|c| (c.accessor)(tx).map(|v| v.to_string()).unwrap_or_default())
                    .collect()
            })
            .collect();

        let footer = format!(
            "showing the first {} of {} rows",
            total.min(DISPLAY_WINDOW),
            total
        );

        RenderedTable {
            total,
            groups,
            headers,
            body,
            footer,
        }
    }
}

/// Field comparison: numeric when both sides are numeric, otherwise
/// case-sensitive lexicographic on the textual form. A missing value
/// compares as empty text.
fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    if let (Some(a), Some(b)) = (a, b) {
        if let (Some(na), Some(nb)) = (a.as_number(), b.as_number()) {
            return na.partial_cmp(&nb).unwrap_or(Ordering::Equal);
        }
    }
    let ta = a.map(|v| v.to_string()).unwrap_or_default();
    let tb = b.map(|v| v.to_string()).unwrap_or_default();
    ta.cmp(&tb)
}

// ==================== Rendered Output ====================

/// A spanning group header cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderGroup {
    pub label: String,
    /// Number of columns the group spans
    pub span: usize,
}

/// A column header cell with its current sort indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderCell {
    pub label: String,
    pub key: String,
    /// Present when this column is the sorted one
    pub indicator: Option<SortDirection>,
}

/// Fully rendered table content, ready for the HTML layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    /// Row count before truncation
    pub total: usize,
    pub groups: Vec<HeaderGroup>,
    pub headers: Vec<HeaderCell>,
    /// At most [`DISPLAY_WINDOW`] rows of rendered cell text
    pub body: Vec<Vec<String>>,
    /// The "showing the first N of M rows" line
    pub footer: String,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(txid: &str, amount: &str, currency: &str) -> Transaction {
        Transaction {
            txid: Some(txid.to_string()),
            tx_amount: Some(FieldValue::Text(amount.to_string())),
            currency: Some(currency.to_string()),
            ..Transaction::default()
        }
    }

    fn spec() -> TableSpec {
        TableSpec::transactions().unwrap()
    }

    fn column_of(rendered: &RenderedTable, key: &str) -> Vec<String> {
        let idx = rendered
            .headers
            .iter()
            .position(|h| h.key == key)
            .unwrap();
        rendered.body.iter().map(|row| row[idx].clone()).collect()
    }

    #[test]
    fn test_unsorted_preserves_provider_order() {
        let rows = vec![tx("c", "3", "BTC"), tx("a", "1", "BTC"), tx("b", "2", "BTC")];
        let rendered = spec().render(&rows, &SortState::Unsorted);
        assert_eq!(column_of(&rendered, "txid"), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_ascending_numeric_sort_on_amount() {
        // Numeric strings must sort numerically: 9 before 10.
        let rows = vec![tx("a", "10", "BTC"), tx("b", "9", "BTC"), tx("c", "100", "BTC")];
        let sort = SortState::Ascending("txAmount".to_string());
        let rendered = spec().render(&rows, &sort);
        assert_eq!(column_of(&rendered, "txAmount"), vec!["9", "10", "100"]);
    }

    #[test]
    fn test_descending_reverses_unequal_pairs() {
        let rows = vec![tx("a", "10", "BTC"), tx("b", "9", "BTC"), tx("c", "100", "BTC")];
        let sort = SortState::Descending("txAmount".to_string());
        let rendered = spec().render(&rows, &sort);
        assert_eq!(column_of(&rendered, "txAmount"), vec!["100", "10", "9"]);
    }

    #[test]
    fn test_lexicographic_sort_when_not_numeric() {
        // "a10" vs "a2" is a string comparison, so "a10" comes first.
        let rows = vec![tx("x", "a2", "BTC"), tx("y", "a10", "BTC")];
        let sort = SortState::Ascending("txAmount".to_string());
        let rendered = spec().render(&rows, &sort);
        assert_eq!(column_of(&rendered, "txAmount"), vec!["a10", "a2"]);
    }

    #[test]
    fn test_mixed_values_fall_back_to_string_compare() {
        let rows = vec![tx("x", "beta", "BTC"), tx("y", "100", "BTC")];
        let sort = SortState::Ascending("txAmount".to_string());
        let rendered = spec().render(&rows, &sort);
        // "100" < "beta" lexicographically.
        assert_eq!(column_of(&rendered, "txAmount"), vec!["100", "beta"]);
    }

    #[test]
    fn test_case_sensitive_string_compare() {
        let rows = vec![tx("x", "apple", "BTC"), tx("y", "Banana", "BTC")];
        let sort = SortState::Ascending("txAmount".to_string());
        let rendered = spec().render(&rows, &sort);
        // Uppercase sorts before lowercase in a byte-wise comparison.
        assert_eq!(column_of(&rendered, "txAmount"), vec!["Banana", "apple"]);
    }

    #[test]
    fn test_stable_sort_keeps_input_order_for_ties_both_directions() {
        let rows = vec![
            tx("first", "5", "BTC"),
            tx("second", "5", "BTC"),
            tx("third", "1", "BTC"),
        ];
        let asc = spec().render(&rows, &SortState::Ascending("txAmount".to_string()));
        assert_eq!(column_of(&asc, "txid"), vec!["third", "first", "second"]);

        // Descending reverses the comparator, not the sequence, so the
        // tied pair keeps its input order.
        let desc = spec().render(&rows, &SortState::Descending("txAmount".to_string()));
        assert_eq!(column_of(&desc, "txid"), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_field_renders_empty_and_sorts_first() {
        let mut no_amount = tx("empty", "0", "BTC");
        no_amount.tx_amount = None;
        let rows = vec![tx("a", "3", "BTC"), no_amount];
        let sort = SortState::Ascending("txAmount".to_string());
        let rendered = spec().render(&rows, &sort);
        // Missing compares as empty text, ahead of any non-empty value.
        assert_eq!(column_of(&rendered, "txid"), vec!["empty", "a"]);
        assert_eq!(column_of(&rendered, "txAmount"), vec!["", "3"]);
    }

    #[test]
    fn test_window_truncates_to_first_twenty() {
        let rows: Vec<Transaction> = (0..25).map(|i| tx(&format!("t{:02}", i), "1", "BTC")).collect();
        let rendered = spec().render(&rows, &SortState::Unsorted);
        assert_eq!(rendered.total, 25);
        assert_eq!(rendered.body.len(), DISPLAY_WINDOW);
        assert_eq!(column_of(&rendered, "txid")[0], "t00");
        assert_eq!(column_of(&rendered, "txid")[19], "t19");
        assert_eq!(rendered.footer, "showing the first 20 of 25 rows");
    }

    #[test]
    fn test_window_is_prefix_of_sorted_sequence() {
        // Sorting then windowing: the window holds the 20 smallest.
        let rows: Vec<Transaction> = (0..25)
            .rev()
            .map(|i| tx(&format!("t{:02}", i), &i.to_string(), "BTC"))
            .collect();
        let sort = SortState::Ascending("txAmount".to_string());
        let rendered = spec().render(&rows, &sort);
        let amounts = column_of(&rendered, "txAmount");
        assert_eq!(amounts[0], "0");
        assert_eq!(amounts[19], "19");
    }

    #[test]
    fn test_small_dataset_footer() {
        let rows = vec![tx("a", "1", "BTC"), tx("b", "2", "BTC")];
        let rendered = spec().render(&rows, &SortState::Unsorted);
        assert_eq!(rendered.body.len(), 2);
        assert_eq!(rendered.footer, "showing the first 2 of 2 rows");
    }

    #[test]
    fn test_empty_dataset_renders_headers_only() {
        let rendered = spec().render(&[], &SortState::Unsorted);
        assert!(rendered.body.is_empty());
        assert_eq!(rendered.headers.len(), 7);
        assert_eq!(rendered.groups.len(), 1);
        assert_eq!(rendered.groups[0].span, 7);
        assert_eq!(rendered.footer, "showing the first 0 of 0 rows");
    }

    #[test]
    fn test_unknown_sort_key_behaves_as_unsorted() {
        let rows = vec![tx("c", "3", "BTC"), tx("a", "1", "BTC")];
        let sort = SortState::Ascending("nonexistent".to_string());
        let rendered = spec().render(&rows, &sort);
        assert_eq!(column_of(&rendered, "txid"), vec!["c", "a"]);
    }

    #[test]
    fn test_render_is_idempotent_and_non_destructive() {
        let rows = vec![tx("b", "2", "BTC"), tx("a", "1", "BTC")];
        let snapshot = rows.clone();
        let sort = SortState::Ascending("txid".to_string());
        let first = spec().render(&rows, &sort);
        let second = spec().render(&rows, &sort);
        assert_eq!(first, second);
        // The input sequence is never mutated.
        assert_eq!(rows, snapshot);
    }

    #[test]
    fn test_sort_cycle_on_one_column() {
        let state = SortState::Unsorted;
        let state = state.toggle("epoch");
        assert_eq!(state, SortState::Ascending("epoch".to_string()));
        let state = state.toggle("epoch");
        assert_eq!(state, SortState::Descending("epoch".to_string()));
        let state = state.toggle("epoch");
        assert_eq!(state, SortState::Unsorted);
    }

    #[test]
    fn test_switching_column_starts_ascending() {
        let state = SortState::Descending("epoch".to_string());
        assert_eq!(state.toggle("txid"), SortState::Ascending("txid".to_string()));
        let state = SortState::Ascending("epoch".to_string());
        assert_eq!(state.toggle("txid"), SortState::Ascending("txid".to_string()));
    }

    #[test]
    fn test_full_cycle_returns_to_provider_order() {
        // Scenario: sort ascending, descending, then back to unsorted --
        // the table shows the original order again.
        let rows = vec![tx("c", "3", "BTC"), tx("a", "1", "BTC"), tx("b", "2", "BTC")];
        let mut state = SortState::Unsorted;
        state = state.toggle("txAmount");
        state = state.toggle("txAmount");
        state = state.toggle("txAmount");
        assert_eq!(state, SortState::Unsorted);
        let rendered = spec().render(&rows, &state);
        assert_eq!(column_of(&rendered, "txid"), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_indicator_follows_state() {
        let rows = vec![tx("a", "1", "BTC")];
        let sort = SortState::Descending("epoch".to_string());
        let rendered = spec().render(&rows, &sort);
        for header in &rendered.headers {
            if header.key == "epoch" {
                assert_eq!(header.indicator, Some(SortDirection::Desc));
            } else {
                assert_eq!(header.indicator, None);
            }
        }
    }

    #[test]
    fn test_sort_state_from_params() {
        assert_eq!(SortState::from_params(None, None), SortState::Unsorted);
        assert_eq!(SortState::from_params(Some(""), Some("asc")), SortState::Unsorted);
        assert_eq!(
            SortState::from_params(Some("epoch"), Some("asc")),
            SortState::Ascending("epoch".to_string())
        );
        assert_eq!(
            SortState::from_params(Some("epoch"), Some("desc")),
            SortState::Descending("epoch".to_string())
        );
        // Malformed direction falls back to ascending.
        assert_eq!(
            SortState::from_params(Some("epoch"), Some("sideways")),
            SortState::Ascending("epoch".to_string())
        );
    }

    #[test]
    fn test_duplicate_column_key_fails_fast() {
        let result = TableSpec::new(vec![ColumnGroup::new(
            "Transactions",
            vec![
                ColumnDef::new("Tx ID", "txid", |t| t.txid.clone().map(FieldValue::Text)),
                ColumnDef::new("Tx ID again", "txid", |t| t.txid.clone().map(FieldValue::Text)),
            ],
        )]);
        match result {
            Err(CoreError::DuplicateColumn { key }) => assert_eq!(key, "txid"),
            other => panic!("expected DuplicateColumn, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_duplicate_key_across_groups_fails_fast() {
        let result = TableSpec::new(vec![
            ColumnGroup::new(
                "One",
                vec![ColumnDef::new("Epoch", "epoch", |t| {
                    t.epoch.map(|e| FieldValue::Number(e as f64))
                })],
            ),
            ColumnGroup::new(
                "Two",
                vec![ColumnDef::new("Epoch", "epoch", |t| {
                    t.epoch.map(|e| FieldValue::Number(e as f64))
                })],
            ),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_epoch_sorts_numerically() {
        let mut a = tx("a", "1", "BTC");
        a.epoch = Some(1610012000);
        let mut b = tx("b", "1", "BTC");
        b.epoch = Some(161001);
        let rows = vec![a, b];
        let sort = SortState::Ascending("epoch".to_string());
        let rendered = spec().render(&rows, &sort);
        assert_eq!(column_of(&rendered, "txid"), vec!["b", "a"]);
    }
}
