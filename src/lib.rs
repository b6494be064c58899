//! Conversion of context-free grammars to Chomsky Normal Form and CYK
//! recognition over the converted grammars.

pub mod cnf;
pub mod cyk;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;

pub use cnf::convert_to_cnf;
pub use cyk::{parse, ParseError, ParseResult};
pub use grammar::{Grammar, Production, Symbol};
