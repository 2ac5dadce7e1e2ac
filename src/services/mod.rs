//! Client roster operations. Every function takes the store explicitly.

pub mod clients;
pub mod queries;

pub use clients::{delete_client, get_client, update_address, update_client};
pub use queries::{count_clients, get_clients, load_page, ClientPage};
