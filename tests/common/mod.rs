#![allow(dead_code)]

use client_manager::db::Database;
use client_manager::models::{AddressFields, ClientFields};

/// A fresh, empty store that lives for the duration of the test.
pub async fn memory_db() -> Database {
    let db = Database::connect("sqlite::memory:", 1)
        .await
        .expect("open in-memory database");
    db.ensure_schema().await.expect("create schema");
    db
}

pub fn address(street: &str, city: &str) -> AddressFields {
    AddressFields {
        street_address: street.to_string(),
        city: city.to_string(),
        state: "CA".to_string(),
        zip: "123450".to_string(),
    }
}

pub fn client(first: &str, last: &str, address: Option<AddressFields>) -> ClientFields {
    ClientFields {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: "555-123-4567".to_string(),
        description: None,
        address,
    }
}

/// John Doe, Alice Smith and Bob Doe, each with an address. Returns their
/// ids in that order.
pub async fn three_clients(db: &Database) -> [i64; 3] {
    let john = db
        .insert_client(&client("John", "Doe", Some(address("1 Main St", "Anytown"))))
        .await
        .expect("insert John");
    let alice = db
        .insert_client(&client("Alice", "Smith", Some(address("2 Oak St", "Springfield"))))
        .await
        .expect("insert Alice");
    let bob = db
        .insert_client(&client("Bob", "Doe", Some(address("3 Pine St", "Shelbyville"))))
        .await
        .expect("insert Bob");
    [john, alice, bob]
}

/// Drop the clients table so every later query against it fails.
pub async fn break_store(db: &Database) {
    sqlx::query("DROP TABLE clients")
        .execute(db.get_pool())
        .await
        .expect("drop clients table");
}
