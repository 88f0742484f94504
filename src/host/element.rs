use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One documentation element of a comment block, in the shape the
/// documentation generator hands to its hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Raw `@name content` text.
    pub source: String,
    /// Lower-cased element name, e.g. `apiparam`.
    pub name: String,
    /// Element name as written, e.g. `apiParam`.
    pub source_name: String,
    pub content: String,
}

impl Element {
    /// Build an element the way the generator does for `@{source_name} {content}`.
    pub fn new(source_name: &str, content: &str) -> Self {
        Self {
            source: format!("@{source_name} {content}\n"),
            name: source_name.to_lowercase(),
            source_name: source_name.to_string(),
            content: format!("{content}\n"),
        }
    }

    /// Kind of interface directive this element is, if any.
    pub fn directive_kind(&self) -> Option<ElementKind> {
        ElementKind::from_custom_name(&self.name)
    }
}

/// Standard element kinds an interface directive expands into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Success,
    Param,
    Query,
    Body,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Success,
        ElementKind::Param,
        ElementKind::Query,
        ElementKind::Body,
    ];

    /// Lower-cased name of the custom directive element.
    pub fn custom_name(self) -> &'static str {
        match self {
            ElementKind::Success => "apisuccessinterface",
            ElementKind::Param => "apiparaminterface",
            ElementKind::Query => "apiqueryinterface",
            ElementKind::Body => "apibodyinterface",
        }
    }

    /// Name of the standard element emitted for this kind.
    pub fn source_name(self) -> &'static str {
        match self {
            ElementKind::Success => "apiSuccess",
            ElementKind::Param => "apiParam",
            ElementKind::Query => "apiQuery",
            ElementKind::Body => "apiBody",
        }
    }

    pub fn from_custom_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.custom_name() == name)
    }
}
