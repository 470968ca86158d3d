//! Shared types for the Ludic events compiler.
//!
//! This crate defines the event tree model (the author-composed program),
//! the instruction and parameter kinds shared by the registry and the
//! code generator, and the safety limits applied to untrusted trees.

pub mod instruction;
pub mod tree;

pub use instruction::{
    BinOp, Expression, InstructionInstance, InstructionKind, ParamKind, ParamSpec, ParamValue,
};
pub use tree::{EventKind, EventNode, EventTree, TreeLimits};
