pub mod config;
pub mod favorites;
pub mod http_client;
pub mod logging;
pub mod output;
