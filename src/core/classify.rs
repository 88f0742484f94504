//! Type Classifier: primitive, enum, object or array of objects.
//!
//! Primitive detection is lexical. A field typed with an alias of `string`
//! is an object unless its text is literally one of [`PRIMITIVE_TYPES`].

/// Type names rendered as primitives, in the casings the TypeScript
/// surface allows.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "Boolean", "string", "String", "number", "Number", "Date", "any",
];

/// Marker of an array type in its textual form.
const ARRAY_MARKER: &str = "[]";

pub fn is_primitive(type_text: &str) -> bool {
    PRIMITIVE_TYPES.contains(&type_text)
}

/// Classification of one field's declared type, computed once and threaded
/// through emission and recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass {
    Primitive(String),
    Enum,
    Object,
    /// `element` is the type text with the array marker removed.
    ArrayOfObject { element: String },
}

impl TypeClass {
    /// Classify a declared type from its text and whether it names an enum.
    pub fn classify(type_text: &str, is_enum: bool) -> Self {
        if is_primitive(type_text) {
            return TypeClass::Primitive(type_text.to_string());
        }
        if is_enum {
            return TypeClass::Enum;
        }
        if type_text.contains(ARRAY_MARKER) {
            return TypeClass::ArrayOfObject {
                element: type_text.replacen(ARRAY_MARKER, "", 1),
            };
        }
        TypeClass::Object
    }

    /// Label shown between braces in the emitted element.
    pub fn label(&self) -> String {
        match self {
            TypeClass::Primitive(name) => capitalize(name),
            TypeClass::Enum => "Enum".to_string(),
            TypeClass::Object => "Object".to_string(),
            TypeClass::ArrayOfObject { element } if is_primitive(element) => capitalize(element),
            TypeClass::ArrayOfObject { .. } => "Object[]".to_string(),
        }
    }

    /// Whether the members of this type are expanded below the field.
    pub fn has_members(&self) -> bool {
        matches!(self, TypeClass::Object | TypeClass::ArrayOfObject { .. })
    }
}

/// `string` -> `String`, `DATE` -> `Date`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `SquareConfig` -> `squareConfig`.
pub fn decapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
