use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for code generation (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for template error reporting.
///
/// Keeps the template text and its name together so errors can point at the
/// offending tag.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a syntax error at `span`.
    pub fn parse_error(&self, message: impl Into<String>, span: impl Into<SourceSpan>) -> Box<Error> {
        Box::new(Error::TemplateParse {
            src: self.named_source(),
            span: span.into(),
            message: message.into(),
        })
    }

    /// Create a render error at `span`.
    pub fn render_error(&self, message: impl Into<String>, span: impl Into<SourceSpan>) -> Box<Error> {
        Box::new(Error::Render {
            src: self.named_source(),
            span: span.into(),
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read template '{path}'")]
    #[diagnostic(
        code(sprocgen::template_io),
        help("templates are looked up under the template directory, see --template-dir")
    )]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid template syntax: {message}")]
    #[diagnostic(code(sprocgen::template_syntax))]
    TemplateParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("failed to render template: {message}")]
    #[diagnostic(code(sprocgen::render))]
    Render {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("failed to build template context")]
    #[diagnostic(code(sprocgen::context))]
    Context {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error for a template path.
    pub fn template_io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::TemplateIo {
            path: path.into(),
            source,
        })
    }
}
