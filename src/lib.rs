// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Inbox Email Metrics
//!
//! Turns raw inbox messages into a fixed table of heuristic metrics for
//! manual review: sender, send time, tone, email type, call to action,
//! subject emotion, hook style and content category.
//!
//! # Features
//!
//! - Lenient MIME parsing that prefers plain text over HTML bodies
//! - HTML link and image signals
//! - Ordered keyword/regex rule tables for every label
//! - Pluggable sentiment scoring and mail sources
//! - Gmail REST API source with OAuth refresh
//!
//! # Example
//!
//! ```rust
//! use mail_metrics::{Metric, extract_features};
//!
//! let raw = "From: Ana <ana@example.com>\r\n\
//!            Subject: How to get rich?!\r\n\
//!            Date: Mon, 01 Jan 2024 10:30:00 +0000\r\n\
//!            \r\n\
//!            Hey, thanks for reading!";
//! let table = extract_features(raw).to_metric_table();
//!
//! assert_eq!(table.get(Metric::TimeSent), Some("10:30 AM, Monday"));
//! assert_eq!(table.get(Metric::HookStyle), Some("Question – Curiosity"));
//! ```

pub mod classify;
pub mod cli;
pub mod config;
mod error;
pub mod features;
pub mod gmail;
pub mod html;
pub mod parser;
pub mod sentiment;
pub mod source;
mod types;

pub use config::{AppConfig, Credentials};
pub use error::{Error, Result};
pub use features::{EmailFeatures, extract_features, extract_features_with};
pub use gmail::GmailSource;
pub use parser::parse_message;
pub use sentiment::{LexiconScorer, TextScorer};
pub use source::{MailSource, analyze_messages};
pub use types::*;
