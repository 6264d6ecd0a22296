//! fetchkit benchmarking suite
//!
//! Benchmarks of the public/engine conversion paths, error translation and
//! version ordering.

pub mod common;

pub use common::*;
