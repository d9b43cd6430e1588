//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: identifiers for participants, chat messages and rounds
//! - [`error::DomainError`]: domain-level errors
//! - [`config_issue`]: structured configuration issues

pub mod config_issue;
pub mod error;
pub mod ids;
