//! UI components.

pub mod parallel_links;
