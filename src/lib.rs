pub mod config;
pub mod display;
pub mod horizon;
pub mod predict;
pub mod quality;
pub mod session;
pub mod timezone;

pub use config::{Config, Settings};
pub use session::Session;
