//! Calculator logic
//!
//! - Expression tokenizing, parsing and evaluation (eval.rs)

pub mod eval;

pub use eval::{eval_display, EvalError, INVALID_EXPRESSION};
