pub mod cli;
pub mod tasks;
