pub mod config;
pub mod logging;
pub mod show;
pub mod version;
