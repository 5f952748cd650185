//! Reusable helpers shared by solutions

pub mod fan_out;
