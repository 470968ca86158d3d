//! Codegen error types.

use ludic_registry::RegistryError;
use ludic_types::InstructionKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during code generation.
///
/// Any one of these aborts generation for the whole tree; partially
/// generated game logic is worse than a build failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CodegenError {
    /// An instruction reference failed to resolve against the registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The instruction exists but carries no binding for the active
    /// backend. Distinct from an unknown instruction: the catalog knows
    /// it, this target does not.
    #[error("{kind} '{extension}.{name}' has no binding for backend '{backend}'")]
    MissingBackendBinding {
        extension: String,
        name: String,
        kind: InstructionKind,
        backend: String,
    },

    /// Bound arguments do not match the descriptor's parameter spec.
    #[error("parameter mismatch in {kind} '{extension}.{name}': {detail}")]
    ParameterMismatch {
        extension: String,
        name: String,
        kind: InstructionKind,
        detail: String,
    },

    /// The tree exceeds the configured safety bounds.
    #[error("event tree too large: {0}")]
    TreeTooLarge(String),
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
