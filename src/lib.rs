pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod service;
pub mod session;
pub mod sync;
pub mod views;

#[cfg(test)]
pub mod testing;
