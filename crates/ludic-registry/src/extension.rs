//! Extensions: named bundles of instruction descriptors.

use std::collections::HashMap;

use ludic_types::InstructionKind;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::descriptor::InstructionDescriptor;

/// One namespace of an extension (conditions, actions, or expressions).
///
/// Insertion order is preserved for diagnostic listing only; lookup is by
/// name and order never affects codegen. Serializes as the plain ordered
/// descriptor list, which keeps the form canonical for fingerprinting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Vec<InstructionDescriptor>",
    into = "Vec<InstructionDescriptor>"
)]
pub struct InstructionSet {
    entries: Vec<InstructionDescriptor>,
    index: HashMap<String, usize>,
}

impl From<Vec<InstructionDescriptor>> for InstructionSet {
    fn from(entries: Vec<InstructionDescriptor>) -> Self {
        let mut set = Self::default();
        for descriptor in entries {
            set.insert(descriptor);
        }
        set
    }
}

impl From<InstructionSet> for Vec<InstructionDescriptor> {
    fn from(set: InstructionSet) -> Self {
        set.entries
    }
}

impl InstructionSet {
    /// Insert a descriptor, replacing an existing one of the same name in
    /// place (the replacement keeps the original's position).
    pub fn insert(&mut self, descriptor: InstructionDescriptor) {
        match self.index.get(&descriptor.name) {
            Some(&i) => self.entries[i] = descriptor,
            None => {
                self.index
                    .insert(descriptor.name.clone(), self.entries.len());
                self.entries.push(descriptor);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&InstructionDescriptor> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut InstructionDescriptor> {
        self.index.get(name).map(|&i| &mut self.entries[i])
    }

    /// Descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &InstructionDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named bundle of instruction descriptors, the unit of registration.
///
/// The informational strings arrive already localized and are opaque to
/// the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub id: String,
    pub fullname: String,
    pub description: String,
    pub author: String,
    pub license: String,
    conditions: InstructionSet,
    actions: InstructionSet,
    expressions: InstructionSet,
}

impl Extension {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fullname: String::new(),
            description: String::new(),
            author: String::new(),
            license: String::new(),
            conditions: InstructionSet::default(),
            actions: InstructionSet::default(),
            expressions: InstructionSet::default(),
        }
    }

    /// Set the informational strings shown in the editor.
    pub fn with_information(
        mut self,
        fullname: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
        license: impl Into<String>,
    ) -> Self {
        self.fullname = fullname.into();
        self.description = description.into();
        self.author = author.into();
        self.license = license.into();
        self
    }

    pub fn with_condition(mut self, descriptor: InstructionDescriptor) -> Self {
        self.conditions.insert(descriptor);
        self
    }

    pub fn with_action(mut self, descriptor: InstructionDescriptor) -> Self {
        self.actions.insert(descriptor);
        self
    }

    pub fn with_expression(mut self, descriptor: InstructionDescriptor) -> Self {
        self.expressions.insert(descriptor);
        self
    }

    /// The namespace for one instruction kind.
    pub fn namespace(&self, kind: InstructionKind) -> &InstructionSet {
        match kind {
            InstructionKind::Condition => &self.conditions,
            InstructionKind::Action => &self.actions,
            InstructionKind::Expression => &self.expressions,
        }
    }

    /// Mutable namespace access for the registration phase, e.g. a later
    /// loader binding an additional backend to existing descriptors.
    pub fn namespace_mut(&mut self, kind: InstructionKind) -> &mut InstructionSet {
        match kind {
            InstructionKind::Condition => &mut self.conditions,
            InstructionKind::Action => &mut self.actions,
            InstructionKind::Expression => &mut self.expressions,
        }
    }

    pub fn condition(&self, name: &str) -> Option<&InstructionDescriptor> {
        self.conditions.get(name)
    }

    pub fn action(&self, name: &str) -> Option<&InstructionDescriptor> {
        self.actions.get(name)
    }

    pub fn expression(&self, name: &str) -> Option<&InstructionDescriptor> {
        self.expressions.get(name)
    }

    pub fn condition_mut(&mut self, name: &str) -> Option<&mut InstructionDescriptor> {
        self.conditions.get_mut(name)
    }

    pub fn action_mut(&mut self, name: &str) -> Option<&mut InstructionDescriptor> {
        self.actions.get_mut(name)
    }

    pub fn expression_mut(&mut self, name: &str) -> Option<&mut InstructionDescriptor> {
        self.expressions.get_mut(name)
    }

    /// Re-id a deep copy of this extension, for clone registration.
    pub(crate) fn cloned_as(&self, new_id: &str) -> Self {
        let mut copy = self.clone();
        copy.id = new_id.to_string();
        copy
    }

    /// Content fingerprint over the canonical JSON form, used for the
    /// idempotent duplicate-registration check.
    pub fn fingerprint(&self) -> [u8; 32] {
        let json = serde_json::to_vec(self).unwrap_or_default();
        Sha256::digest(&json).into()
    }
}
