pub mod file;

pub use file::FileStorage;
