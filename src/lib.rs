//! apidoc-ts - expand TypeScript interfaces into apiDoc parameters
//!
//! A documentation comment like
//!
//! ```text
//! /**
//!  * @api {get} /squares List squares
//!  * @apiSuccessInterface (./models.ts) {SquareConfig[]} squares
//!  */
//! ```
//!
//! is expanded into one `@apiSuccess` element per (nested, inherited) field
//! of `SquareConfig`.
//!
//! ## Module Structure
//!
//! - `core`: type catalog, reference resolution and the flattening engine
//! - `host`: element records and hook surface of the documentation generator
//! - `plugin`: the `parser-find-elements` hook tying both together
//! - `issues`: warnings reported while expanding
//! - `config`: configuration file loading
//! - `cli`: command-line interface

pub mod cli;
pub mod config;
pub mod core;
pub mod host;
pub mod issues;
pub mod plugin;
