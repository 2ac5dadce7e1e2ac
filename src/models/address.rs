/// A stored mailing address.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: i64,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// The mutable part of an address, as written by inserts and in-place updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFields {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// A validated request to overwrite an existing address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressUpdate {
    pub id: i64,
    pub fields: AddressFields,
}

impl Address {
    pub fn fields(&self) -> AddressFields {
        AddressFields {
            street_address: self.street_address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
        }
    }
}
