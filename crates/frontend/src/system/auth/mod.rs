pub mod context;
pub mod gateway;
pub mod guard;
pub mod storage;
