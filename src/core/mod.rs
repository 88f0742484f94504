//! Type-resolution and flattening engine.
//!
//! Pipeline for one directive:
//!
//! 1. [`directive`] destructures the element content.
//! 2. [`catalog`] loads the declaring file and its dependencies.
//! 3. [`resolve`] walks the reference's namespaces.
//! 4. [`expand`] picks the root shape and drives [`flatten`], which
//!    classifies each field via [`classify`].
//! 5. [`emit`] formats descriptors as host elements.

pub mod catalog;
pub mod classify;
pub mod context;
pub mod directive;
pub mod emit;
pub mod expand;
pub mod file_scanner;
pub mod flatten;
pub mod parsers;
pub mod resolve;
pub mod types;

pub use catalog::{CatalogError, TypeCatalog};
pub use classify::TypeClass;
pub use context::{CollectingLogger, ExpandContext, Logger, TracingLogger};
pub use directive::ParsedDirective;
pub use emit::{Descriptor, emit};
pub use expand::expand;
pub use flatten::{Flattener, Members, NoMembers, members_of};
pub use resolve::{ResolveError, Resolved, TypeReference, lookup_type, resolve};
