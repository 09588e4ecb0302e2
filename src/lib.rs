pub mod config;
pub mod filter;
pub mod logging;
pub mod quote;
pub mod render;
pub mod repository;
pub mod session;
pub mod shutdown;
pub mod storage;
pub mod sync;
pub mod transfer;
pub mod ui;
