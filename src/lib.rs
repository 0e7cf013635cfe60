pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod flows;
pub mod media;
pub mod screens;
pub mod store;
pub mod terminal;
