pub mod app;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod database;
pub mod error;
pub mod webhooks;

pub use error::EcoBotError;
