//! View-ready composites of the client list and its metadata.

pub mod html;
pub mod json;

use crate::models::{Client, SortColumn, SortState};

/// Paging metadata for the index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_number: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(total: i64, page_number: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 && total > 0 {
            total / page_size + i64::from(total % page_size != 0)
        } else {
            0
        };
        Self {
            page_number,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    pub selected_text: String,
}

impl FilterView {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            selected_text: text.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        !self.selected_text.is_empty()
    }
}

/// The applied sort and, per column, the sort its header link requests next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortHeaders {
    pub current: SortState,
    pub first_name: SortState,
    pub last_name: SortState,
    pub email: SortState,
    pub phone: SortState,
    pub address: SortState,
    pub description: SortState,
}

impl SortHeaders {
    pub fn new(current: SortState) -> Self {
        Self {
            current,
            first_name: current.next_for(SortColumn::FirstName),
            last_name: current.next_for(SortColumn::LastName),
            email: current.next_for(SortColumn::Email),
            phone: current.next_for(SortColumn::Phone),
            address: current.next_for(SortColumn::Address),
            description: current.next_for(SortColumn::Description),
        }
    }

    pub fn for_column(&self, column: SortColumn) -> SortState {
        match column {
            SortColumn::FirstName => self.first_name,
            SortColumn::LastName => self.last_name,
            SortColumn::Email => self.email,
            SortColumn::Phone => self.phone,
            SortColumn::Address => self.address,
            SortColumn::Description => self.description,
        }
    }
}

/// Everything the client index renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexView {
    pub clients: Vec<Client>,
    pub pagination: Pagination,
    pub filter: FilterView,
    pub sort: SortHeaders,
}

impl IndexView {
    pub fn new(
        clients: Vec<Client>,
        pagination: Pagination,
        filter: FilterView,
        sort: SortHeaders,
    ) -> Self {
        Self {
            clients,
            pagination,
            filter,
            sort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_round_up() {
        assert_eq!(Pagination::new(23, 1, 10).total_pages, 3);
        assert_eq!(Pagination::new(20, 1, 10).total_pages, 2);
        assert_eq!(Pagination::new(0, 1, 10).total_pages, 0);
        assert_eq!(Pagination::new(5, 1, 0).total_pages, 0);
    }

    #[test]
    fn huge_page_size_is_one_page() {
        let pages = Pagination::new(23, 1, i64::MAX);
        assert_eq!(pages.total_pages, 1);
        assert!(!pages.has_next());

        assert_eq!(Pagination::new(i64::MAX, 1, i64::MAX).total_pages, 1);
        assert_eq!(Pagination::new(i64::MAX, 1, 2).total_pages, i64::MAX / 2 + 1);
    }

    #[test]
    fn previous_and_next_follow_position() {
        let first = Pagination::new(23, 1, 10);
        assert!(!first.has_previous());
        assert!(first.has_next());

        let middle = Pagination::new(23, 2, 10);
        assert!(middle.has_previous());
        assert!(middle.has_next());

        let last = Pagination::new(23, 3, 10);
        assert!(last.has_previous());
        assert!(!last.has_next());

        let empty = Pagination::new(0, 1, 10);
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
    }

    #[test]
    fn headers_toggle_active_column_and_default_others_to_ascending() {
        let headers = SortHeaders::new(SortState::EmailAsc);

        assert_eq!(headers.current, SortState::EmailAsc);
        assert_eq!(headers.email, SortState::EmailDesc);
        assert_eq!(headers.first_name, SortState::FirstNameAsc);
        assert_eq!(headers.address, SortState::AddressAsc);

        let headers = SortHeaders::new(SortState::EmailDesc);
        assert_eq!(headers.for_column(SortColumn::Email), SortState::EmailAsc);
    }

    #[test]
    fn filter_is_applied_only_when_non_empty() {
        assert!(!FilterView::new("").is_applied());
        assert!(FilterView::new("doe").is_applied());
    }
}
