//! Field rules for submitted clients and addresses.
//!
//! Validation runs before any mutation and turns a loosely typed input into
//! the record the store writes, or into a list of field/message pairs.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::forms::{AddressInput, ClientInput};
use crate::models::{AddressFields, AddressUpdate, ClientFields, ClientUpdate};

static LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("letters pattern"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()\-.]{7,20}$").expect("phone pattern"));
static ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").expect("zip pattern"));

/// One broken rule, keyed by the submitted field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    #[serde(rename = "errorMessage")]
    pub message: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// The submitted value, unless it is missing or blank. Surrounding
/// whitespace is kept and checked by the field pattern.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

struct Rule {
    field: &'static str,
    required: &'static str,
    pattern: Option<(&'static Lazy<Regex>, &'static str)>,
}

static FIRST_NAME: Rule = Rule {
    field: "firstName",
    required: "First Name is required",
    pattern: Some((&LETTERS, "First Name should contain only letters")),
};
static LAST_NAME: Rule = Rule {
    field: "lastName",
    required: "Last Name is required",
    pattern: Some((&LETTERS, "Last Name should contain only letters")),
};
static EMAIL_RULE: Rule = Rule {
    field: "email",
    required: "Email is required",
    pattern: Some((&EMAIL, "Invalid Email Address")),
};
static PHONE_RULE: Rule = Rule {
    field: "phone",
    required: "Phone is required",
    pattern: Some((&PHONE, "Invalid Phone Number")),
};
static STREET: Rule = Rule {
    field: "streetAddress",
    required: "Street Address is required",
    pattern: None,
};
static CITY: Rule = Rule {
    field: "city",
    required: "City is required",
    pattern: None,
};
static STATE: Rule = Rule {
    field: "state",
    required: "State is required",
    pattern: None,
};
static ZIP_RULE: Rule = Rule {
    field: "zip",
    required: "ZIP is required",
    pattern: Some((&ZIP, "ZIP must be 6 digits")),
};

impl Rule {
    fn check(&self, value: Option<&str>, errors: &mut ValidationErrors) -> String {
        match value {
            None => {
                errors.push(self.field, self.required);
                String::new()
            }
            Some(v) => {
                if let Some((pattern, message)) = self.pattern {
                    if !pattern.is_match(v) {
                        errors.push(self.field, message);
                    }
                }
                v.to_string()
            }
        }
    }
}

fn check_id(
    id: Option<i64>,
    field: &'static str,
    required: &'static str,
    positive: &'static str,
    errors: &mut ValidationErrors,
) -> i64 {
    match id {
        None => {
            errors.push(field, required);
            0
        }
        Some(id) if id < 1 => {
            errors.push(field, positive);
            id
        }
        Some(id) => id,
    }
}

fn check_address_fields(input: &AddressInput, errors: &mut ValidationErrors) -> AddressFields {
    AddressFields {
        street_address: STREET.check(present(&input.street_address), errors),
        city: CITY.check(present(&input.city), errors),
        state: STATE.check(present(&input.state), errors),
        zip: ZIP_RULE.check(present(&input.zip), errors),
    }
}

/// Validate a submitted client. The nested address id is not checked: the
/// client edit path never changes it.
pub fn validate_client(input: &ClientInput) -> Result<ClientUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let id = check_id(
        input.id,
        "id",
        "Client ID is required",
        "Client ID must be a positive number.",
        &mut errors,
    );
    let fields = ClientFields {
        first_name: FIRST_NAME.check(present(&input.first_name), &mut errors),
        last_name: LAST_NAME.check(present(&input.last_name), &mut errors),
        email: EMAIL_RULE.check(present(&input.email), &mut errors),
        phone: PHONE_RULE.check(present(&input.phone), &mut errors),
        description: present(&input.description).map(str::to_string),
        address: input
            .address
            .as_ref()
            .map(|address| check_address_fields(address, &mut errors)),
    };

    errors.into_result(|| ClientUpdate { id, fields })
}

pub fn validate_address(input: &AddressInput) -> Result<AddressUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let id = check_id(
        input.id,
        "id",
        "Address ID is required",
        "Address ID must be a positive number.",
        &mut errors,
    );
    let fields = check_address_fields(input, &mut errors);

    errors.into_result(|| AddressUpdate { id, fields })
}

/// Check an already typed record against the same rules.
#[cfg(test)]
pub(crate) fn validate_fields(fields: &ClientFields) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    let some = |v: &String| Some(v.clone());

    FIRST_NAME.check(present(&some(&fields.first_name)), &mut errors);
    LAST_NAME.check(present(&some(&fields.last_name)), &mut errors);
    EMAIL_RULE.check(present(&some(&fields.email)), &mut errors);
    PHONE_RULE.check(present(&some(&fields.phone)), &mut errors);
    if let Some(address) = &fields.address {
        STREET.check(present(&some(&address.street_address)), &mut errors);
        CITY.check(present(&some(&address.city)), &mut errors);
        STATE.check(present(&some(&address.state)), &mut errors);
        ZIP_RULE.check(present(&some(&address.zip)), &mut errors);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_client() -> ClientInput {
        ClientInput {
            id: Some(1),
            first_name: Some("John".into()),
            last_name: Some("Doe".into()),
            email: Some("john@example.com".into()),
            phone: Some("123-456-7890".into()),
            address: Some(AddressInput {
                id: None,
                street_address: Some("123 Main St".into()),
                city: Some("Anytown".into()),
                state: Some("CA".into()),
                zip: Some("123450".into()),
            }),
            description: Some("   ".into()),
        }
    }

    #[test]
    fn valid_client_becomes_update() {
        let update = validate_client(&valid_client()).unwrap();

        assert_eq!(update.id, 1);
        assert_eq!(update.fields.first_name, "John");
        assert_eq!(update.fields.description, None);
        assert_eq!(update.fields.address.unwrap().zip, "123450");
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = validate_client(&ClientInput::default()).unwrap_err();

        assert_eq!(errors.message_for("id"), Some("Client ID is required"));
        assert_eq!(errors.message_for("firstName"), Some("First Name is required"));
        assert_eq!(errors.message_for("lastName"), Some("Last Name is required"));
        assert_eq!(errors.message_for("email"), Some("Email is required"));
        assert_eq!(errors.message_for("phone"), Some("Phone is required"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn names_must_be_letters_only() {
        let mut input = valid_client();
        input.first_name = Some("J0hn".into());
        input.last_name = Some("Doe-Smith".into());

        let errors = validate_client(&input).unwrap_err();
        assert_eq!(errors.message_for("firstName"), Some("First Name should contain only letters"));
        assert_eq!(errors.message_for("lastName"), Some("Last Name should contain only letters"));
    }

    #[test]
    fn padded_names_are_not_letters_only() {
        let mut input = valid_client();
        input.first_name = Some(" John ".into());

        let errors = validate_client(&input).unwrap_err();
        assert_eq!(errors.message_for("firstName"), Some("First Name should contain only letters"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn blank_required_field_is_missing() {
        let mut input = valid_client();
        input.last_name = Some("   ".into());

        let errors = validate_client(&input).unwrap_err();
        assert_eq!(errors.message_for("lastName"), Some("Last Name is required"));
    }

    #[test]
    fn email_and_phone_shapes_are_checked() {
        let mut input = valid_client();
        input.email = Some("not-an-email".into());
        input.phone = Some("call me".into());

        let errors = validate_client(&input).unwrap_err();
        assert_eq!(errors.message_for("email"), Some("Invalid Email Address"));
        assert_eq!(errors.message_for("phone"), Some("Invalid Phone Number"));
    }

    #[test]
    fn accepted_phone_shapes() {
        for phone in ["123-456-7890", "+1 (555) 123-4567", "555.123.4567", "5551234"] {
            assert!(PHONE.is_match(phone), "{phone} rejected");
        }
    }

    #[test]
    fn zip_must_be_exactly_six_digits() {
        for zip in ["12345", "1234567", "12a456"] {
            let mut input = valid_client();
            input.address.as_mut().unwrap().zip = Some(zip.into());
            let errors = validate_client(&input).unwrap_err();
            assert_eq!(errors.message_for("zip"), Some("ZIP must be 6 digits"), "{zip}");
        }
    }

    #[test]
    fn non_positive_id_is_rejected() {
        let mut input = valid_client();
        input.id = Some(0);

        let errors = validate_client(&input).unwrap_err();
        assert_eq!(errors.message_for("id"), Some("Client ID must be a positive number."));
    }

    #[test]
    fn address_requires_every_field_and_an_id() {
        let errors = validate_address(&AddressInput::default()).unwrap_err();

        assert_eq!(errors.message_for("id"), Some("Address ID is required"));
        assert_eq!(errors.message_for("streetAddress"), Some("Street Address is required"));
        assert_eq!(errors.message_for("city"), Some("City is required"));
        assert_eq!(errors.message_for("state"), Some("State is required"));
        assert_eq!(errors.message_for("zip"), Some("ZIP is required"));
    }

    #[test]
    fn errors_serialize_as_field_message_pairs() {
        let errors = validate_address(&AddressInput {
            id: Some(1),
            street_address: Some("1 Main".into()),
            city: Some("X".into()),
            state: Some("CA".into()),
            zip: Some("1".into()),
        })
        .unwrap_err();

        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!([{ "field": "zip", "errorMessage": "ZIP must be 6 digits" }])
        );
    }
}
