use super::{Address, AddressFields};

/// A client together with its eagerly loaded address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub description: Option<String>,
    pub address: Option<Address>,
}

/// One row of `clients LEFT JOIN addresses`.
#[derive(sqlx::FromRow, Debug)]
pub struct ClientRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub description: Option<String>,
    pub address_id: Option<i64>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        let address = row.address_id.map(|id| Address {
            id,
            street_address: row.street_address.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            state: row.state.unwrap_or_default(),
            zip: row.zip.unwrap_or_default(),
        });

        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            description: row.description,
            address,
        }
    }
}

/// Everything about a client except its identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub description: Option<String>,
    pub address: Option<AddressFields>,
}

/// A validated request to merge new field values into an existing client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUpdate {
    pub id: i64,
    pub fields: ClientFields,
}

impl Client {
    pub fn fields(&self) -> ClientFields {
        ClientFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            description: self.description.clone(),
            address: self.address.as_ref().map(Address::fields),
        }
    }
}
