mod address;
mod client;
mod sort_state;

pub use address::{Address, AddressFields, AddressUpdate};
pub use client::{Client, ClientFields, ClientRow, ClientUpdate};
pub use sort_state::{SortColumn, SortState};
