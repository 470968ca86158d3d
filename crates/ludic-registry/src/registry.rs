//! The process-wide extension catalog.
//!
//! Built once at startup by explicit registration calls — there is no
//! hidden static state — then frozen and shared read-only with every
//! generation run.

use std::collections::HashMap;
use std::sync::Arc;

use ludic_types::InstructionKind;

use crate::descriptor::InstructionDescriptor;
use crate::error::{RegistryError, RegistryResult};
use crate::extension::Extension;

/// The catalog mapping extension ids to their instruction sets.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    extensions: HashMap<String, Extension>,
    /// Registration order, for diagnostic listing only.
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension.
    ///
    /// Re-registering byte-identical content is an idempotent no-op, so
    /// plugin initialization may safely run more than once. Registering
    /// different content under an existing id is `DuplicateExtension`.
    pub fn register(&mut self, extension: Extension) -> RegistryResult<()> {
        if let Some(existing) = self.extensions.get(&extension.id) {
            if existing.fingerprint() == extension.fingerprint() {
                return Ok(());
            }
            return Err(RegistryError::DuplicateExtension {
                id: extension.id.clone(),
            });
        }
        self.order.push(extension.id.clone());
        self.extensions.insert(extension.id.clone(), extension);
        Ok(())
    }

    /// Copy every descriptor of `source_id` under `new_id`, resolved
    /// eagerly so the registry stays a flat, directly-queryable map.
    ///
    /// Returns a mutable handle to the clone so the caller can add or
    /// override descriptors (a newer platform generation reusing an older
    /// one's semantics under new support files). Overrides never affect
    /// the source extension. A self-clone is a success no-op.
    pub fn clone_extension(
        &mut self,
        source_id: &str,
        new_id: &str,
    ) -> RegistryResult<&mut Extension> {
        if !self.extensions.contains_key(source_id) {
            return Err(RegistryError::UnknownExtension {
                id: source_id.to_string(),
            });
        }
        if source_id == new_id {
            return Ok(self.extensions.get_mut(new_id).unwrap());
        }
        if self.extensions.contains_key(new_id) {
            return Err(RegistryError::DuplicateExtension {
                id: new_id.to_string(),
            });
        }
        let copy = self.extensions[source_id].cloned_as(new_id);
        self.order.push(new_id.to_string());
        self.extensions.insert(new_id.to_string(), copy);
        Ok(self.extensions.get_mut(new_id).unwrap())
    }

    /// Resolve an instruction descriptor.
    pub fn lookup(
        &self,
        extension_id: &str,
        name: &str,
        kind: InstructionKind,
    ) -> RegistryResult<&InstructionDescriptor> {
        let extension =
            self.extensions
                .get(extension_id)
                .ok_or_else(|| RegistryError::UnknownExtension {
                    id: extension_id.to_string(),
                })?;
        extension
            .namespace(kind)
            .get(name)
            .ok_or_else(|| RegistryError::UnknownInstruction {
                extension: extension_id.to_string(),
                name: name.to_string(),
                kind,
            })
    }

    pub fn extension(&self, id: &str) -> Option<&Extension> {
        self.extensions.get(id)
    }

    /// Registration-phase handle for mutating an existing extension,
    /// e.g. a script-backend loader binding instructions the native
    /// loader already declared.
    pub fn extension_mut(&mut self, id: &str) -> Option<&mut Extension> {
        self.extensions.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.extensions.contains_key(id)
    }

    /// Extensions in registration order, for diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.order.iter().filter_map(|id| self.extensions.get(id))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// End the registration phase: the returned handle is read-only and
    /// cheap to share across concurrent generation runs.
    pub fn freeze(self) -> Arc<Registry> {
        Arc::new(self)
    }
}
