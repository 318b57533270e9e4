pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod remote;
pub mod store;
