pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod models;
pub mod query;
pub mod services;
pub mod validation;
pub mod views;
pub mod web;
