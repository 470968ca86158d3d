//! Ludic events-to-code generator: event trees to target-language source.
//!
//! ```text
//! (EventTree, Registry, Target) → validate → walk/emit → (source, support files)
//! ```
//!
//! The walk is target-agnostic: every backend-specific piece of texture —
//! call qualification, flag declarations, loop syntax, include lines —
//! lives behind the [`Target`] trait. Generation is a pure function of
//! its inputs; concurrent runs over one frozen registry need no locking.
//!
//! # Semantics
//!
//! - Conditions combine with short-circuit AND: a failed condition leaves
//!   no call path to later conditions or to the node's actions.
//! - Actions all run, in order, once the conditions held.
//! - Children follow the node kind: in-line for standard events, gated
//!   with an optional else path for branches, wrapped in the target's
//!   loop construct (count hoisted) for loops.
//! - Every instruction used anywhere contributes its support files to a
//!   deduplicated, first-encounter-ordered manifest.
//! - Any unresolved reference aborts the whole generation; partial source
//!   is never returned.

mod error;
mod expr;
mod generator;
mod manifest;
mod target;
mod validate;
mod writer;

pub use error::{CodegenError, CodegenResult};
pub use generator::{generate, generate_with_limits, GeneratedCode};
pub use target::{CppTarget, JsTarget, Target};
