//! The support-file manifest.

use std::collections::HashSet;

/// Deduplicated, first-encounter-ordered list of support files the
/// generated source depends on. Returned alongside the source so the
/// external build step can assemble the final compilation unit.
#[derive(Debug, Default)]
pub struct SupportManifest {
    files: Vec<String>,
    seen: HashSet<String>,
}

impl SupportManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one support file; repeats are ignored.
    pub fn add(&mut self, file: &str) {
        if self.seen.insert(file.to_string()) {
            self.files.push(file.to_string());
        }
    }

    /// Record a binding's support files in declaration order.
    pub fn add_files(&mut self, files: &[String]) {
        for file in files {
            self.add(file);
        }
    }

    pub fn into_files(self) -> Vec<String> {
        self.files
    }
}
