//! Top-level error type for formfill.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives; this wrapper preserves the full diagnostic chain (error codes,
//! help text, sources) through to the user. Generation-service failures never
//! reach this type: the classifier and synthesizer absorb them into their
//! fallback values.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::form::PdfError;

#[derive(Debug, Error, Diagnostic)]
pub enum FormfillError {
    #[error("input file not found at '{path}'")]
    #[diagnostic(
        code(formfill::input_not_found),
        help("Pass an existing fillable PDF with --input-file.")
    )]
    InputNotFound { path: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pdf(#[from] PdfError),
}
