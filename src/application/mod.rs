// Application layer - Use cases and the ports they depend on
pub mod query_repository;
pub mod query_service;
pub mod weather_provider;
pub mod weather_service;

#[cfg(test)]
pub mod test_support;
