pub mod api;
pub mod config;
pub mod docs;
pub mod fixtures;
pub mod model;
pub mod routes;
pub mod scan;
pub mod store;
pub mod utils;
