//! File outputs beyond the parameter document.

pub mod export;
