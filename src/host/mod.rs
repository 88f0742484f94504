//! Host surface: the element records, hook registration and comment-block
//! scanning of the documentation generator this crate plugs into.

pub mod block;
mod element;
mod hooks;

pub use block::{CommentBlock, find_blocks, parse_block, split_elements};
pub use element::{Element, ElementKind};
pub use hooks::{HookPoint, HookRegistry, Host, ParserHook};
