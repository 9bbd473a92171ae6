//! Report star, fork, issue, pull request and contributor counts for a
//! single GitHub repository.

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod github;
pub mod logging;
pub mod report;
pub mod reporter;
pub mod stats;

#[cfg(test)]
mod test_support;
