// Domain layer - Weather queries, locations and forecast aggregation
pub mod forecast;
pub mod location;
pub mod weather_query;
