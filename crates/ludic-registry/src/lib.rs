//! The extension registry: the process-wide catalog of every condition,
//! action, and expression the compiler knows how to emit.
//!
//! # Lifecycle
//!
//! Extensions are declared once, single-threaded, during process start:
//!
//! ```
//! use ludic_registry::{Binding, Extension, InstructionDescriptor, Registry};
//!
//! let mut registry = Registry::new();
//! let ext = Extension::new("BuiltinAdvanced").with_condition(
//!     InstructionDescriptor::new("Always", "Always", "Always triggers.").with_binding(
//!         "js",
//!         Binding::new("gdjs.evtTools.common.returnFalse").with_support_file("commontools.js"),
//!     ),
//! );
//! registry.register(ext).unwrap();
//! let registry = registry.freeze();
//! ```
//!
//! After [`Registry::freeze`] the catalog is shared read-only; concurrent
//! generation runs borrow it without locking.

mod descriptor;
mod error;
mod extension;
mod registry;

pub use descriptor::{Binding, InstructionDescriptor};
pub use error::{RegistryError, RegistryResult};
pub use extension::{Extension, InstructionSet};
pub use registry::Registry;
