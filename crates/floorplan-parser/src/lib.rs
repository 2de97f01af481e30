//! Parser for slicing floorplan descriptions.
//!
//! The input is a whitespace-separated pre-order encoding of a strictly
//! binary tree: `H`/`V` for cuts and `<id>(<width>,<height>)` for blocks.
//! Tokens are lexed with `nom` and assembled with an explicit stack of cuts
//! still waiting for children.

mod builder;
mod lexer;

pub use builder::{build_tree, load_tree, parse_str, BuildOptions};
pub use lexer::{lex_token, Token};
