// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod error;

pub mod net;
pub mod progress;
pub mod report;
pub mod runner;
pub mod scrape;

pub use error::{Error, Result};
