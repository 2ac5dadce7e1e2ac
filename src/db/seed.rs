use crate::models::{AddressFields, ClientFields};
use crate::query::ClientFilter;

use super::Database;

// first, last, email, phone, street, city, state, zip
const SAMPLE_ROSTER: [[&str; 8]; 23] = [
    ["John", "Doe", "john@example.com", "123-456-7890", "123 Main St", "Anytown", "CA", "123450"],
    ["Jane", "Smith", "jane@example.com", "987-654-3210", "456 Elm St", "Othertown", "NY", "678900"],
    ["Alice", "Johnson", "alice@example.com", "555-123-4567", "789 Oak St", "Springfield", "IL", "627010"],
    ["Bob", "Williams", "bob@example.com", "555-987-6543", "101 Pine St", "Shelbyville", "IN", "461760"],
    ["Charlie", "Brown", "charlie@example.com", "555-555-5555", "202 Maple St", "Capital City", "NV", "891010"],
    ["David", "Jones", "david@example.com", "555-111-2222", "303 Birch St", "Ogdenville", "UT", "844010"],
    ["Eve", "Garcia", "eve@example.com", "555-333-4444", "404 Cedar St", "North Haverbrook", "NH", "037840"],
    ["Frank", "Miller", "frank@example.com", "555-666-7777", "505 Walnut St", "Brockway", "MI", "480970"],
    ["Grace", "Davis", "grace@example.com", "555-888-9999", "606 Spruce St", "Springfield", "MO", "658020"],
    ["Hank", "Rodriguez", "hank@example.com", "555-000-1111", "707 Fir St", "Springfield", "OR", "974770"],
    ["Ivy", "Martinez", "ivy@example.com", "555-222-3333", "808 Pine St", "Shelbyville", "KY", "400650"],
    ["Jack", "Hernandez", "jack@example.com", "555-444-5555", "909 Maple St", "Capital City", "TX", "733010"],
    ["Karen", "Lopez", "karen@example.com", "555-666-7777", "111 Birch St", "Ogdenville", "CO", "802020"],
    ["Leo", "Gonzalez", "leo@example.com", "555-888-9999", "222 Cedar St", "North Haverbrook", "VT", "056020"],
    ["Mona", "Wilson", "mona@example.com", "555-000-1111", "333 Walnut St", "Brockway", "WI", "530050"],
    ["Nina", "Anderson", "nina@example.com", "555-222-3333", "444 Spruce St", "Springfield", "MA", "011030"],
    ["Oscar", "Thomas", "oscar@example.com", "555-444-5555", "555 Fir St", "Springfield", "OH", "455020"],
    ["Paul", "Taylor", "paul@example.com", "555-666-7777", "666 Pine St", "Shelbyville", "TN", "371600"],
    ["Quincy", "Moore", "quincy@example.com", "555-888-9999", "777 Maple St", "Capital City", "GA", "303010"],
    ["Rachel", "Jackson", "rachel@example.com", "555-000-1111", "888 Birch St", "Ogdenville", "FL", "320990"],
    ["Steve", "Martin", "steve@example.com", "555-222-3333", "999 Cedar St", "North Haverbrook", "AZ", "850010"],
    ["Tina", "Lee", "tina@example.com", "555-444-5555", "1010 Walnut St", "Brockway", "WA", "980040"],
    ["Uma", "Perez", "uma@example.com", "555-666-7777", "1212 Spruce St", "Springfield", "PA", "171010"],
];

/// The built-in sample roster, one client per address.
pub fn sample_clients() -> Vec<ClientFields> {
    SAMPLE_ROSTER
        .iter()
        .enumerate()
        .map(|(i, [first, last, email, phone, street, city, state, zip])| ClientFields {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            description: Some(format!("Sample client {}", i + 1)),
            address: Some(AddressFields {
                street_address: street.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                zip: zip.to_string(),
            }),
        })
        .collect()
}

/// Insert the sample roster when the clients table is empty. Returns the
/// number of clients inserted.
pub async fn seed_if_empty(db: &Database) -> sqlx::Result<usize> {
    let existing = db.count_clients(&ClientFilter::new("")).await?;
    if existing > 0 {
        tracing::debug!(existing, "clients present, skipping seed");
        return Ok(0);
    }

    let ids = db.insert_clients(&sample_clients()).await?;

    tracing::info!(count = ids.len(), "seeded sample clients");
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_fields;

    #[test]
    fn sample_roster_passes_validation() {
        for (i, client) in sample_clients().iter().enumerate() {
            let errors = validate_fields(client);
            assert!(errors.is_empty(), "sample client {} invalid: {errors:?}", i + 1);
        }
    }
}
