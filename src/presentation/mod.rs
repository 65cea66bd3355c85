// Presentation layer - HTTP routing and request handling
pub mod app_state;
pub mod error_response;
pub mod handlers;
pub mod routes;
