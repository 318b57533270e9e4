pub mod factory;
pub mod remote;
pub mod storage;
