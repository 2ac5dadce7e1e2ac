//! Composition of the client list query: filter, then sort, then page window.
//!
//! The pieces render to SQL that runs unchanged on PostgreSQL and SQLite.
//! Placeholders are numbered (`$1`, `$2`, ...) and a single filter pattern is
//! shared by every searched column.

use crate::models::{SortColumn, SortState};

/// Columns searched by the free-text filter, in the joined `clients c LEFT
/// JOIN addresses a` relation. A NULL column never matches.
const SEARCHED_COLUMNS: [&str; 9] = [
    "c.first_name",
    "c.last_name",
    "c.email",
    "c.phone",
    "a.street_address",
    "a.city",
    "a.state",
    "a.zip",
    "c.description",
];

pub(crate) const CLIENT_SELECT: &str = "SELECT c.id, c.first_name, c.last_name, c.email, c.phone, c.description, \
     a.id AS address_id, a.street_address, a.city, a.state, a.zip \
     FROM clients c LEFT JOIN addresses a ON a.id = c.address_id";

pub(crate) const CLIENT_COUNT: &str =
    "SELECT COUNT(*) FROM clients c LEFT JOIN addresses a ON a.id = c.address_id";

/// One request for a page of the client list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientQuery {
    pub filter: String,
    pub sort: SortState,
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
}

impl ClientQuery {
    pub fn new(filter: impl Into<String>, sort: SortState, page: i64, page_size: i64) -> Self {
        Self {
            filter: filter.into(),
            sort,
            page,
            page_size,
        }
    }

    pub fn filter(&self) -> ClientFilter {
        ClientFilter::new(&self.filter)
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.page_size)
    }
}

/// Case-insensitive substring filter over the searched columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFilter {
    pattern: Option<String>,
}

impl ClientFilter {
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            return Self { pattern: None };
        }
        Self {
            pattern: Some(format!("%{}%", escape_like(text))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// The bound `LIKE` pattern, if the filter is active.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// `WHERE` clause using placeholder `$index`, or an empty string when the
    /// filter is inactive.
    pub fn where_clause(&self, index: usize) -> String {
        if self.is_empty() {
            return String::new();
        }
        let predicates: Vec<String> = SEARCHED_COLUMNS
            .iter()
            .map(|column| format!("LOWER({column}) LIKE LOWER(${index}) ESCAPE '\\'"))
            .collect();
        format!(" WHERE ({})", predicates.join(" OR "))
    }
}

/// Escape `LIKE` metacharacters so the filter text matches literally.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn sort_expression(column: SortColumn) -> &'static str {
    match column {
        SortColumn::FirstName => "c.first_name",
        SortColumn::LastName => "c.last_name",
        SortColumn::Email => "c.email",
        SortColumn::Phone => "c.phone",
        SortColumn::Address => "a.street_address",
        SortColumn::Description => "c.description",
    }
}

/// `ORDER BY` clause for a sort state. Client id breaks ties so that page
/// boundaries are stable.
pub fn order_clause(sort: SortState) -> String {
    let expression = sort_expression(sort.column());
    let direction = if sort.is_descending() {
        "DESC NULLS LAST"
    } else {
        "ASC NULLS FIRST"
    };
    format!(" ORDER BY {expression} {direction}, c.id ASC")
}

/// Rows skipped and taken for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Window for a 1-based `page`. Pages before the first, or a
    /// non-positive size, produce an empty window.
    pub fn new(page: i64, page_size: i64) -> Self {
        if page < 1 || page_size < 1 {
            return Self { offset: 0, limit: 0 };
        }
        Self {
            offset: (page - 1).saturating_mul(page_size),
            limit: page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }
}

/// Full statement for one page of clients. The window placeholders follow
/// the filter pattern when one is bound.
pub fn page_statement(filter: &ClientFilter, sort: SortState) -> String {
    let window_index = if filter.is_empty() { 1 } else { 2 };
    format!(
        "{CLIENT_SELECT}{}{} LIMIT ${} OFFSET ${}",
        filter.where_clause(1),
        order_clause(sort),
        window_index,
        window_index + 1
    )
}

pub fn count_statement(filter: &ClientFilter) -> String {
    format!("{CLIENT_COUNT}{}", filter.where_clause(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let filter = ClientFilter::new("");
        assert!(filter.is_empty());
        assert_eq!(filter.where_clause(1), "");
        assert_eq!(count_statement(&filter), CLIENT_COUNT);
    }

    #[test]
    fn filter_pattern_is_wrapped_and_left_for_the_store_to_fold() {
        let filter = ClientFilter::new("DoE");
        assert_eq!(filter.pattern(), Some("%DoE%"));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(ClientFilter::new("a_b").pattern(), Some("%a\\_b%"));
    }

    #[test]
    fn where_clause_searches_every_column_with_one_placeholder() {
        let clause = ClientFilter::new("x").where_clause(1);
        for column in SEARCHED_COLUMNS {
            assert!(
                clause.contains(&format!("LOWER({column}) LIKE LOWER($1) ESCAPE")),
                "{column} missing"
            );
        }
        assert!(!clause.contains("$2"));
    }

    #[test]
    fn order_clause_follows_sort_state() {
        assert_eq!(
            order_clause(SortState::FirstNameAsc),
            " ORDER BY c.first_name ASC NULLS FIRST, c.id ASC"
        );
        assert_eq!(
            order_clause(SortState::AddressDesc),
            " ORDER BY a.street_address DESC NULLS LAST, c.id ASC"
        );
    }

    #[test]
    fn page_window_skips_previous_pages() {
        assert_eq!(PageWindow::new(1, 10), PageWindow { offset: 0, limit: 10 });
        assert_eq!(PageWindow::new(2, 1), PageWindow { offset: 1, limit: 1 });
        assert_eq!(PageWindow::new(3, 10), PageWindow { offset: 20, limit: 10 });
    }

    #[test]
    fn page_before_first_is_empty() {
        assert!(PageWindow::new(0, 10).is_empty());
        assert!(PageWindow::new(-4, 10).is_empty());
        assert!(PageWindow::new(1, 0).is_empty());
    }

    #[test]
    fn page_statement_numbers_window_after_filter() {
        let unfiltered = page_statement(&ClientFilter::new(""), SortState::default());
        assert!(unfiltered.ends_with("LIMIT $1 OFFSET $2"));

        let filtered = page_statement(&ClientFilter::new("doe"), SortState::default());
        assert!(filtered.ends_with("LIMIT $2 OFFSET $3"));
    }
}
