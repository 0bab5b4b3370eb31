use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum SpecDiffError {
    #[error("Could not read specification {path}")]
    #[diagnostic(code(specdiff::no_file))]
    NoFile { path: PathBuf },

    #[error("Parse error in {file}: {message}")]
    #[diagnostic(code(specdiff::parse_error))]
    ParseError { file: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(specdiff::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(specdiff::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(specdiff::json))]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SpecDiffError>;
