#[allow(clippy::module_inception)]
pub mod error;

pub use error::{
    format_error_chain, CliError, FetchError, RefreshError, SchemaError, StorageError, StoreError,
};
