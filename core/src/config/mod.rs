mod load;
mod types;

pub use load::{get_taskdesk_data_dir, load_default, load_from_str};
pub use types::{AppConfig, LoggingConfig, RemoteConfig, StorageConfig};
