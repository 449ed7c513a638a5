pub mod config;
pub mod constants;
pub mod convert;
pub mod logging;
pub mod price;
pub mod server;
pub mod token;
