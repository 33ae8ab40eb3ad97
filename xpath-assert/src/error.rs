use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

/// A boxed error as produced by parsers and evaluators outside this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The XML source could not be turned into a document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed XML: {0}")]
    Malformed(String),
    #[error("XML is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("Cannot read XML from {}: {error}", path.display())]
    Io { path: PathBuf, error: std::io::Error },
    #[error("Parser failed: {0}")]
    Other(BoxError),
}

/// The XPath expression could not be evaluated against a document.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The engine reported an XPath error, such as `XPST0003` for a syntax
    /// error or `XPST0081` for an undeclared namespace prefix.
    #[error("{code}: {message}")]
    Engine {
        code: String,
        message: String,
        /// Where in the expression the error was found, if known.
        span: Option<Range<usize>>,
    },
    /// The expression produced something other than nodes, such as a
    /// number or a string.
    #[error("XPath `{expression}` does not select nodes")]
    NotANodeSet { expression: String },
    #[error("Evaluator failed: {0}")]
    Other(BoxError),
}

impl From<xee_xpath::error::Error> for EvaluationError {
    fn from(e: xee_xpath::error::Error) -> Self {
        EvaluationError::Engine {
            code: e.error.code().to_string(),
            message: e.error.message().to_string(),
            span: e.span.map(|span| span.range()),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("XPath expression is empty")]
    EmptyExpression,
    #[error("Namespace declaration `{0}` is not of the form prefix=uri")]
    NamespaceDeclaration(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl Error {
    /// Whether this error came from parsing the XML source.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(..))
    }

    /// Whether this error came from evaluating the XPath expression.
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Error::Evaluation(..))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
