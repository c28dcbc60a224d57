//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! The grammar is split by statement family; every part extends the same
//! [`Parser`].

mod ddl;
mod dml;
mod drift;
mod error;
mod expression;
mod parser;
mod pratt;
mod select;
mod stream;

pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;
pub use stream::{Checkpoint, TokenStream};
