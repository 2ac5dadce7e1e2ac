//! Shapes of submitted client and address records, before validation.
//!
//! JSON bodies nest the address under `address`; HTML forms post it flat.

use serde::Deserialize;

use crate::models::{Address, Client};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub id: Option<i64>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl AddressInput {
    fn is_blank(&self) -> bool {
        [&self.street_address, &self.city, &self.state, &self.zip]
            .iter()
            .all(|value| value.as_deref().map_or(true, |v| v.trim().is_empty()))
    }
}

impl From<&Address> for AddressInput {
    fn from(address: &Address) -> Self {
        Self {
            id: Some(address.id),
            street_address: Some(address.street_address.clone()),
            city: Some(address.city.clone()),
            state: Some(address.state.clone()),
            zip: Some(address.zip.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressInput>,
    pub description: Option<String>,
}

impl From<&Client> for ClientInput {
    fn from(client: &Client) -> Self {
        Self {
            id: Some(client.id),
            first_name: Some(client.first_name.clone()),
            last_name: Some(client.last_name.clone()),
            email: Some(client.email.clone()),
            phone: Some(client.phone.clone()),
            address: client.address.as_ref().map(AddressInput::from),
            description: client.description.clone(),
        }
    }
}

/// The edit-client HTML form, with the address fields inlined.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFormFields {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl From<ClientFormFields> for ClientInput {
    fn from(form: ClientFormFields) -> Self {
        let address = AddressInput {
            id: None,
            street_address: form.street_address,
            city: form.city,
            state: form.state,
            zip: form.zip,
        };

        Self {
            id: form.id,
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            address: (!address.is_blank()).then_some(address),
            description: form.description,
        }
    }
}

/// A body that arrives either as JSON or as an urlencoded form whose shape
/// may differ from the JSON one.
pub trait FormShape: Sized {
    type Form: Into<Self>;
}

impl FormShape for ClientInput {
    type Form = ClientFormFields;
}

impl FormShape for AddressInput {
    type Form = AddressInput;
}

/// An id as it arrives: a JSON number, or text from a query string or form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

/// Identifier supplied in a query string or a delete body. A malformed value
/// reads as a missing one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdParam {
    pub id: Option<RawId>,
}

impl IdParam {
    pub fn id(&self) -> Option<i64> {
        match self.id.as_ref()? {
            RawId::Number(id) => Some(*id),
            RawId::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl FormShape for IdParam {
    type Form = IdParam;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_form_with_empty_address_fields_has_no_address() {
        let form: ClientFormFields = serde_urlencoded::from_str(
            "id=3&firstName=John&lastName=Doe&email=j%40x.com&phone=123&description=&streetAddress=&city=&state=&zip=",
        )
        .unwrap();
        let input = ClientInput::from(form);

        assert_eq!(input.id, Some(3));
        assert_eq!(input.first_name.as_deref(), Some("John"));
        assert_eq!(input.email.as_deref(), Some("j@x.com"));
        assert!(input.address.is_none());
    }

    #[test]
    fn flat_form_address_fields_are_nested() {
        let form: ClientFormFields = serde_urlencoded::from_str(
            "id=3&firstName=John&streetAddress=1+Main+St&city=Anytown&state=CA&zip=123450",
        )
        .unwrap();
        let address = ClientInput::from(form).address.expect("address");

        assert_eq!(address.street_address.as_deref(), Some("1 Main St"));
        assert_eq!(address.zip.as_deref(), Some("123450"));
    }

    #[test]
    fn json_client_nests_address() {
        let input: ClientInput = serde_json::from_str(
            r#"{"id":1,"firstName":"Jane","address":{"streetAddress":"2 Elm","city":"X","state":"NY","zip":"678900"}}"#,
        )
        .unwrap();

        assert_eq!(input.id, Some(1));
        assert_eq!(input.address.unwrap().city.as_deref(), Some("X"));
    }

    #[test]
    fn malformed_id_reads_as_missing() {
        let text = |v: &str| IdParam { id: Some(RawId::Text(v.into())) };
        assert_eq!(text("12").id(), Some(12));
        assert_eq!(text("abc").id(), None);
        assert_eq!(IdParam::default().id(), None);
    }

    #[test]
    fn id_accepts_json_numbers_and_form_text() {
        let json: IdParam = serde_json::from_str(r#"{"id":5}"#).unwrap();
        assert_eq!(json.id(), Some(5));

        let form: IdParam = serde_urlencoded::from_str("id=8").unwrap();
        assert_eq!(form.id(), Some(8));
    }
}
