//! codemod library
//!
//! Idempotent, pattern-triggered source rewrites. A migration is a
//! [`rules::RuleSet`]; [`rewriter::FileRewriter`] applies it to one file,
//! [`writer::BackupWriter`] persists the result and [`runner::Runner`]
//! drives a whole file list into a [`runner::RunReport`].

pub mod cli;
pub mod config;
pub mod error;
pub mod rewriter;
pub mod rules;
pub mod runner;
pub mod scanner;
pub mod utils;
pub mod writer;

pub use error::CodemodError;
