use crate::error::{EvaluationError, ParseError};
use crate::namespaces::NamespaceContext;

/// The result of evaluating an XPath expression as a node-set.
///
/// Only the number of selected nodes is kept; the nodes themselves stay
/// behind in the evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeSet {
    len: usize,
}

impl NodeSet {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Turns XML text into a document an evaluator can query.
pub trait XmlParser {
    type Document;

    fn parse(&self, xml: &str) -> Result<Self::Document, ParseError>;
}

/// Evaluates an XPath expression against a document.
///
/// An implementation must report a failure, not an empty node-set, when
/// the expression cannot be compiled, uses an undeclared prefix, or yields
/// something other than nodes.
pub trait XPathEvaluator {
    type Document;

    fn evaluate(
        &self,
        expression: &str,
        document: &Self::Document,
        namespaces: &NamespaceContext,
    ) -> Result<NodeSet, EvaluationError>;
}

impl<T: XmlParser + ?Sized> XmlParser for &T {
    type Document = T::Document;

    fn parse(&self, xml: &str) -> Result<Self::Document, ParseError> {
        (**self).parse(xml)
    }
}

impl<T: XPathEvaluator + ?Sized> XPathEvaluator for &T {
    type Document = T::Document;

    fn evaluate(
        &self,
        expression: &str,
        document: &Self::Document,
        namespaces: &NamespaceContext,
    ) -> Result<NodeSet, EvaluationError> {
        (**self).evaluate(expression, document, namespaces)
    }
}
