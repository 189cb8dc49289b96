//! Hand replay client library: the HTTP client for the backend and the
//! step-through TUI.

pub mod api_client;
pub mod tui_app;
