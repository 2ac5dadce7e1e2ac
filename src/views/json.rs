//! JSON projections returned when the caller prefers a machine-readable body.

use serde::Serialize;

use crate::models::{Address, AddressFields, AddressUpdate, Client, ClientUpdate};
use crate::validation::ValidationErrors;

use super::IndexView;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressJson {
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl From<&AddressFields> for AddressJson {
    fn from(address: &AddressFields) -> Self {
        Self {
            street_address: Some(address.street_address.clone()),
            city: Some(address.city.clone()),
            state: Some(address.state.clone()),
            zip: Some(address.zip.clone()),
        }
    }
}

impl From<&Address> for AddressJson {
    fn from(address: &Address) -> Self {
        Self::from(&address.fields())
    }
}

/// A client record. A client without an address still carries an
/// `address` object, with every field `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientJson {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: AddressJson,
    pub description: Option<String>,
}

impl From<&Client> for ClientJson {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client
                .address
                .as_ref()
                .map(AddressJson::from)
                .unwrap_or_default(),
            description: client.description.clone(),
        }
    }
}

impl From<&ClientUpdate> for ClientJson {
    fn from(update: &ClientUpdate) -> Self {
        let fields = &update.fields;
        Self {
            id: update.id,
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            address: fields
                .address
                .as_ref()
                .map(AddressJson::from)
                .unwrap_or_default(),
            description: fields.description.clone(),
        }
    }
}

/// An address together with its own id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressRecordJson {
    pub id: i64,
    #[serde(flatten)]
    pub address: AddressJson,
}

impl From<&AddressUpdate> for AddressRecordJson {
    fn from(update: &AddressUpdate) -> Self {
        Self {
            id: update.id,
            address: AddressJson::from(&update.fields),
        }
    }
}

/// A client's id with its address, served by the edit-address page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientAddressJson {
    pub id: i64,
    pub address: AddressJson,
}

impl From<&Client> for ClientAddressJson {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            address: client
                .address
                .as_ref()
                .map(AddressJson::from)
                .unwrap_or_default(),
        }
    }
}

impl IndexView {
    /// Flat projection of the current page.
    pub fn to_json(&self) -> Vec<ClientJson> {
        self.clients.iter().map(ClientJson::from).collect()
    }
}

/// Outcome of an action, as `{success, message}`, `{success, data}` or
/// `{success, message, errors}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ActionResult {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            errors: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors: None,
        }
    }

    pub fn invalid(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            message: Some("Invalid data".to_string()),
            data: None,
            errors: Some(errors),
        }
    }
}

impl<T: Serialize> ActionResult<T> {
    pub fn with_data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: None,
        }
    }
}
