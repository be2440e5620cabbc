//! Hallroute CLI library.
//!
//! This crate provides command-line interface utilities for the hallroute
//! planner, including terminal styling and output formatting.

pub mod output;
pub mod terminal;
