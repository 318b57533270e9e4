//! taskdesk-cli library, exposed so the shell's pieces can be unit tested.

pub mod commands;
pub mod render;
pub mod session;
