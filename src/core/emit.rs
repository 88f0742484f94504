//! Descriptor Emitter.

use serde::Serialize;

use crate::host::{Element, ElementKind};

/// One flattened field, before formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub kind: ElementKind,
    pub label: String,
    pub field_path: String,
    pub optional: bool,
    pub description: String,
}

impl Descriptor {
    /// `{label} [path] description` when optional, `{label} path description`
    /// otherwise.
    pub fn content(&self) -> String {
        let line = if self.optional {
            format!("{{{}}} [{}] {}", self.label, self.field_path, self.description)
        } else {
            format!("{{{}}} {} {}", self.label, self.field_path, self.description)
        };
        line.trim_end().to_string()
    }
}

pub fn emit(descriptor: &Descriptor) -> Element {
    Element::new(descriptor.kind.source_name(), &descriptor.content())
}
