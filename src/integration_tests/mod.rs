//! Tests that exercise the evaluator and the sweep end to end.

pub mod rate_equation;
pub mod sweep;
