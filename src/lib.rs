//! Library surface of the headline ranker, shared by the binary and the
//! integration tests.
//!
//! A run fetches headlines for one [`models::Category`] from a set of
//! [`models::Source`]s, then tokenizes, ranks, scores and selects them in
//! [`ranking`]. [`news::News`] drives the whole pipeline.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod news;
pub mod outputs;
pub mod ranking;
pub mod scrapers;
pub mod utils;

pub use error::{NewsError, Result};
pub use news::News;
