//! Markup module: The renderable fragment produced by components.
//!
//! This module contains:
//! - [`Node`]: A small element/text tree handed to paint surfaces
//! - [`is_valid_tag`]: Tag name validation used at render time
//!
//! Trees are built fresh on every render and never patched in place.

mod node;

pub use node::{is_valid_tag, Node};
