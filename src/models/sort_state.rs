use std::fmt;
use std::str::FromStr;

/// A column the client list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Description,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::FirstName,
        SortColumn::LastName,
        SortColumn::Email,
        SortColumn::Phone,
        SortColumn::Address,
        SortColumn::Description,
    ];

    /// Header label shown in the client table.
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::FirstName => "First Name",
            SortColumn::LastName => "Last Name",
            SortColumn::Email => "Email",
            SortColumn::Phone => "Phone",
            SortColumn::Address => "Address",
            SortColumn::Description => "Description",
        }
    }

    pub fn ascending(self) -> SortState {
        match self {
            SortColumn::FirstName => SortState::FirstNameAsc,
            SortColumn::LastName => SortState::LastNameAsc,
            SortColumn::Email => SortState::EmailAsc,
            SortColumn::Phone => SortState::PhoneAsc,
            SortColumn::Address => SortState::AddressAsc,
            SortColumn::Description => SortState::DescriptionAsc,
        }
    }

    pub fn descending(self) -> SortState {
        match self {
            SortColumn::FirstName => SortState::FirstNameDesc,
            SortColumn::LastName => SortState::LastNameDesc,
            SortColumn::Email => SortState::EmailDesc,
            SortColumn::Phone => SortState::PhoneDesc,
            SortColumn::Address => SortState::AddressDesc,
            SortColumn::Description => SortState::DescriptionDesc,
        }
    }
}

/// Ordering applied to the client list. `as_str` names double as the
/// `sortOrder` query parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortState {
    #[default]
    FirstNameAsc,
    FirstNameDesc,
    LastNameAsc,
    LastNameDesc,
    EmailAsc,
    EmailDesc,
    PhoneAsc,
    PhoneDesc,
    AddressAsc,
    AddressDesc,
    DescriptionAsc,
    DescriptionDesc,
}

impl SortState {
    pub const ALL: [SortState; 12] = [
        SortState::FirstNameAsc,
        SortState::FirstNameDesc,
        SortState::LastNameAsc,
        SortState::LastNameDesc,
        SortState::EmailAsc,
        SortState::EmailDesc,
        SortState::PhoneAsc,
        SortState::PhoneDesc,
        SortState::AddressAsc,
        SortState::AddressDesc,
        SortState::DescriptionAsc,
        SortState::DescriptionDesc,
    ];

    pub fn column(self) -> SortColumn {
        match self {
            SortState::FirstNameAsc | SortState::FirstNameDesc => SortColumn::FirstName,
            SortState::LastNameAsc | SortState::LastNameDesc => SortColumn::LastName,
            SortState::EmailAsc | SortState::EmailDesc => SortColumn::Email,
            SortState::PhoneAsc | SortState::PhoneDesc => SortColumn::Phone,
            SortState::AddressAsc | SortState::AddressDesc => SortColumn::Address,
            SortState::DescriptionAsc | SortState::DescriptionDesc => SortColumn::Description,
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(
            self,
            SortState::FirstNameDesc
                | SortState::LastNameDesc
                | SortState::EmailDesc
                | SortState::PhoneDesc
                | SortState::AddressDesc
                | SortState::DescriptionDesc
        )
    }

    /// The state a click on `column`'s header produces while `self` is applied:
    /// ascending flips to descending, anything else starts at ascending.
    pub fn next_for(self, column: SortColumn) -> SortState {
        if self == column.ascending() {
            column.descending()
        } else {
            column.ascending()
        }
    }

    /// Lenient parse used for query parameters; unknown values fall back to the default.
    pub fn parse_or_default(value: Option<&str>) -> SortState {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortState::FirstNameAsc => "FirstNameAsc",
            SortState::FirstNameDesc => "FirstNameDesc",
            SortState::LastNameAsc => "LastNameAsc",
            SortState::LastNameDesc => "LastNameDesc",
            SortState::EmailAsc => "EmailAsc",
            SortState::EmailDesc => "EmailDesc",
            SortState::PhoneAsc => "PhoneAsc",
            SortState::PhoneDesc => "PhoneDesc",
            SortState::AddressAsc => "AddressAsc",
            SortState::AddressDesc => "AddressDesc",
            SortState::DescriptionAsc => "DescriptionAsc",
            SortState::DescriptionDesc => "DescriptionDesc",
        }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order `{0}`")]
pub struct UnknownSortState(pub String);

impl FromStr for SortState {
    type Err = UnknownSortState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownSortState(s.to_string()))
    }
}
