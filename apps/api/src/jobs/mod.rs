pub mod cache;
pub mod client;
pub mod handlers;
pub mod matcher;
pub mod models;
pub mod service;
