use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use xpath_assert::{
    check_that, has_xpath, not, AssertionError, Error, EvaluationError, NamespaceContext,
    XmlDocument,
};

use crate::error::render_error;

#[derive(Debug, Args)]
pub(crate) struct HasXPath {
    /// xpath expression that should select at least one node
    pub(crate) xpath: String,
    /// input xml file (default stdin)
    pub(crate) infile: Option<PathBuf>,
    /// Namespace URI to use in XPath for element names without a namespace
    /// prefix.
    ///
    /// If omitted, the default namespace is the empty string (i.e. the
    /// names are not in a namespace).
    #[arg(long)]
    pub(crate) default_namespace_uri: Option<String>,
    /// Namespace declaration to make available in XPath (can be repeated)
    /// The format is prefix=uri.
    #[arg(long)]
    pub(crate) namespace: Vec<String>,
    /// Succeed only if the expression selects nothing
    #[arg(long)]
    pub(crate) not: bool,
    /// Evaluate relative to the document element instead of the document
    /// node, so `entry/id` rather than `feed/entry/id`.
    #[arg(long)]
    pub(crate) document_element: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Holds,
    Fails,
    /// The expression had an error that was already reported.
    Unevaluated,
}

impl Verdict {
    pub(crate) const ERROR_EXIT_CODE: u8 = 2;

    pub(crate) fn exit_code(self) -> ExitCode {
        match self {
            Verdict::Holds => ExitCode::SUCCESS,
            Verdict::Fails => ExitCode::FAILURE,
            Verdict::Unevaluated => Self::ERROR_EXIT_CODE.into(),
        }
    }
}

impl HasXPath {
    pub(crate) fn run(&self) -> anyhow::Result<Verdict> {
        let xml = self.input_xml()?;
        match self.check(&xml) {
            Ok(()) => Ok(Verdict::Holds),
            Err(AssertionError::Failed(failure)) => {
                eprintln!("{failure}");
                Ok(Verdict::Fails)
            }
            Err(AssertionError::Error(Error::Evaluation(
                e @ EvaluationError::Engine { span: Some(_), .. },
            ))) => {
                render_error(&self.xpath, &e)?;
                Ok(Verdict::Unevaluated)
            }
            Err(AssertionError::Error(error)) => {
                let context = match &error {
                    Error::Parse(_) => "Cannot parse XML",
                    Error::Evaluation(_) => "Cannot evaluate XPath",
                    _ => "Invalid arguments",
                };
                Err(anyhow::Error::new(error).context(context))
            }
        }
    }

    pub(crate) fn check(&self, xml: &str) -> Result<(), AssertionError> {
        let mut namespaces = NamespaceContext::from_declarations(&self.namespace)?;
        if let Some(uri) = &self.default_namespace_uri {
            namespaces.insert("", uri.as_str());
        }

        let mut document = XmlDocument::parse(xml).map_err(Error::from)?;
        if self.document_element {
            document = document.document_element().map_err(Error::from)?;
        }

        let matcher = has_xpath(self.xpath.as_str()).with_namespace_context(namespaces);
        if self.not {
            check_that(&document, not(&matcher))
        } else {
            check_that(&document, &matcher)
        }
    }

    fn input_xml(&self) -> anyhow::Result<String> {
        match &self.infile {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input XML file: {}", path.display())),
            None => {
                let mut xml = String::new();
                io::stdin()
                    .lock()
                    .read_to_string(&mut xml)
                    .context("Failed to read XML from stdin")?;
                Ok(xml)
            }
        }
    }
}
