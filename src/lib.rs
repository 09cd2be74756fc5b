pub mod analysis;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod generative;
pub mod health;
