mod config_loader;
mod http_client;

pub use config_loader::*;
pub use http_client::*;
