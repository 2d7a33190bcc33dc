//! Database layer: map search compilation and execution.

pub mod search;
