//! Instruction descriptors and their per-backend code bindings.
//!
//! A descriptor is pure data: what an instruction looks like to the
//! author (fullname, description, parameter signature) and, per backend,
//! what the generator must emit for it (target symbol + support files).

use std::collections::BTreeMap;

use ludic_types::{ParamKind, ParamSpec};
use serde::{Deserialize, Serialize};

/// Per-backend code binding: the callable symbol to emit and the support
/// files generated output must include whenever the instruction is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub function_name: String,
    pub support_files: Vec<String>,
}

impl Binding {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            support_files: Vec::new(),
        }
    }

    /// Append a required support file.
    pub fn with_support_file(mut self, file: impl Into<String>) -> Self {
        self.support_files.push(file.into());
        self
    }
}

/// Metadata for one condition, action, or expression.
///
/// `fullname` and `description` arrive already localized; the core treats
/// them as opaque strings and they never influence emitted code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionDescriptor {
    pub name: String,
    pub fullname: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    /// Backend id → binding. `BTreeMap` keeps serialization canonical
    /// for content fingerprinting.
    pub bindings: BTreeMap<String, Binding>,
}

impl InstructionDescriptor {
    pub fn new(
        name: impl Into<String>,
        fullname: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fullname: fullname.into(),
            description: description.into(),
            params: Vec::new(),
            bindings: BTreeMap::new(),
        }
    }

    /// Append a required parameter.
    pub fn with_param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(ParamSpec::required(name, kind));
        self
    }

    /// Append an optional (tail) parameter.
    pub fn with_optional_param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(ParamSpec::optional(name, kind));
        self
    }

    /// Set the binding for one backend, replacing any previous one.
    pub fn with_binding(mut self, backend: impl Into<String>, binding: Binding) -> Self {
        self.bindings.insert(backend.into(), binding);
        self
    }

    /// Set a binding on an existing descriptor. Backends may be bound at
    /// different times by different loaders.
    pub fn set_binding(&mut self, backend: impl Into<String>, binding: Binding) {
        self.bindings.insert(backend.into(), binding);
    }

    /// Exact binding lookup by backend id.
    pub fn binding(&self, backend: &str) -> Option<&Binding> {
        self.bindings.get(backend)
    }

    /// Whether the instruction is supported at all for the backend, as
    /// opposed to supported-but-misconfigured.
    pub fn has_backend(&self, backend: &str) -> bool {
        self.bindings.contains_key(backend)
    }

    /// Number of parameters that must be bound.
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| !p.optional).count()
    }
}
