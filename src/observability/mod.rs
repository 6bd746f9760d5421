pub mod logger;
pub mod metrics;
pub mod routes;
