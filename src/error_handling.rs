use std::path::PathBuf;
use std::fmt::Display;

use itertools::Itertools;

use crate::cyk::ParseError;
use crate::generator::GenerateError;
use crate::parser::FormatErrors;

pub trait ErrorType: Display + PartialEq {}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Location {
            file: file.into(),
            line
        }
    }

    // Location of a whole file rather than one of its lines
    pub fn file(file: impl Into<PathBuf>) -> Self {
        Location::new(file, 0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.location, self.error)
    }
}

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;

/// Everything that can stop the command line tool
#[derive(Debug)]
pub enum ToolError {
    Format(FormatErrors),
    Parse(ParseError),
    Generate(GenerateError),
}

impl From<FormatErrors> for ToolError {
    fn from(errors: FormatErrors) -> Self {
        ToolError::Format(errors)
    }
}

impl From<ParseError> for ToolError {
    fn from(error: ParseError) -> Self {
        ToolError::Parse(error)
    }
}

impl From<GenerateError> for ToolError {
    fn from(error: GenerateError) -> Self {
        ToolError::Generate(error)
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // One malformed line per output line
            ToolError::Format(errors) => write!(f, "{}", errors.iter().join("\n")),
            ToolError::Parse(error) => write!(f, "{}", error),
            ToolError::Generate(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ToolError {}
