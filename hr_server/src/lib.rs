//! Hand replay backend library: configuration, hand storage, and the HTTP
//! API, reusable from the server binary and integration tests.

pub mod api;
pub mod config;
pub mod logging;
pub mod store;
