//! HTTP request handlers for the REST API.

pub mod catalog;
pub mod generate;
pub mod history;
pub mod session;
pub mod settings;
