//! Stateless filter → search → paginate pipeline over any record collection.

mod config;
mod engine;
mod record;
mod state;

pub use config::{FilterOption, QueryConfig, FILTER_ALL};
pub use engine::{query, QueryPage};
pub use record::{FieldValue, Record};
pub use state::QueryState;
