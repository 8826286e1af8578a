//! Core completion engine module

pub mod client;
pub mod config;
pub mod errors;
pub mod generate;
pub mod models;
