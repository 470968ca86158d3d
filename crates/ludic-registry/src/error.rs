//! Registry error types.

use ludic_types::InstructionKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the registration and lookup interface.
///
/// All failures are structured results; nothing in the registry silently
/// no-ops, with the single exception of re-registering a byte-identical
/// extension (an allowance for repeated plugin initialization).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RegistryError {
    /// An extension with this id is already registered with different
    /// content.
    #[error("extension '{id}' is already registered with different content")]
    DuplicateExtension { id: String },

    /// The referenced extension id is not registered.
    #[error("unknown extension '{id}'")]
    UnknownExtension { id: String },

    /// The extension exists but has no such instruction in the requested
    /// namespace.
    #[error("unknown {kind} '{name}' in extension '{extension}'")]
    UnknownInstruction {
        extension: String,
        name: String,
        kind: InstructionKind,
    },
}

/// Registry result type alias.
pub type RegistryResult<T> = Result<T, RegistryError>;
