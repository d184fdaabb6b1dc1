pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod session;
pub mod utils;
pub mod validation;
