//! Source parsers.
//!
//! - `typescript`: `.ts`/`.tsx`/`.d.ts` parser (uses swc for AST generation)

pub mod typescript;
