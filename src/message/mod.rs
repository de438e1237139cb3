//! IRC line parsing and typed message construction.
//!
//! A raw line is split into its loose structural parts
//! ([`RawMessage`](types::RawMessage)), classified by command
//! ([`classify`](types::classify)), and lifted into the closed
//! [`TypedMessage`](variants::TypedMessage) set that the client
//! orchestrator dispatches.

pub mod parse;
pub mod types;
pub mod variants;

pub use parse::{parse_line, split_lines};
pub use types::{classify, Kind, RawMessage};
pub use variants::TypedMessage;
