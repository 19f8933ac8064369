pub mod config;
pub mod logging;

pub mod fetcher;
pub mod harness;
pub mod runner;
pub mod strategy;
pub mod url_model;
