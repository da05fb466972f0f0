//! Sahel fonts CLI library.

pub mod cli;
