use std::path::Path;

use crate::assert::Matcher;
use crate::document::{XeeEvaluator, XeeParser, XmlDocument};
use crate::engine::{NodeSet, XPathEvaluator, XmlParser};
use crate::error::{Error, Result};
use crate::namespaces::NamespaceContext;
use crate::outcome::{MatchStatus, Outcome};
use crate::source::{Input, Source};

/// Checks whether an XPath expression selects anything in an XML document.
///
/// By default XML is parsed with [`XeeParser`] and expressions are evaluated
/// with [`XeeEvaluator`]. Either can be replaced for a single checker with
/// [`HasXPath::with_parser`] and [`HasXPath::with_evaluator`].
///
/// ```
/// use xpath_assert::{has_xpath, Outcome};
///
/// let outcome = has_xpath("//feed/entry/id")
///     .check("<feed><entry><id>1</id></entry></feed>")
///     .unwrap();
/// assert_eq!(outcome, Outcome::Matched);
/// ```
#[derive(Debug, Clone)]
pub struct HasXPath<P = XeeParser, E = XeeEvaluator> {
    expression: String,
    namespaces: NamespaceContext,
    parser: P,
    evaluator: E,
}

/// Check for `expression` with the default parser and evaluator.
///
/// An empty expression is reported when the check runs.
pub fn has_xpath(expression: impl Into<String>) -> HasXPath {
    HasXPath {
        expression: expression.into(),
        namespaces: NamespaceContext::default(),
        parser: XeeParser,
        evaluator: XeeEvaluator,
    }
}

impl HasXPath {
    /// Like [`has_xpath`], but rejects an empty expression right away.
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        let checker = has_xpath(expression);
        if checker.expression.is_empty() {
            return Err(Error::EmptyExpression);
        }
        Ok(checker)
    }
}

impl<P, E> HasXPath<P, E> {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn namespace_context(&self) -> &NamespaceContext {
        &self.namespaces
    }

    /// Resolve prefixes in the expression with these namespaces.
    ///
    /// Replaces any namespaces set before.
    pub fn with_namespace_context(mut self, namespaces: NamespaceContext) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.insert(prefix, uri);
        self
    }

    /// Parse XML text with `parser` instead.
    pub fn with_parser<Q>(self, parser: Q) -> HasXPath<Q, E> {
        HasXPath {
            expression: self.expression,
            namespaces: self.namespaces,
            parser,
            evaluator: self.evaluator,
        }
    }

    /// Evaluate the expression with `evaluator` instead.
    pub fn with_evaluator<F>(self, evaluator: F) -> HasXPath<P, F> {
        HasXPath {
            expression: self.expression,
            namespaces: self.namespaces,
            parser: self.parser,
            evaluator,
        }
    }
}

impl<P, E> HasXPath<P, E>
where
    P: XmlParser,
    E: XPathEvaluator<Document = P::Document>,
{
    /// Run the check against `source`.
    ///
    /// Text is parsed first; a parsed document is used as is. Failing to
    /// parse or to evaluate is an error, never [`Outcome::NotMatched`].
    pub fn check<'a>(&self, source: impl Into<Source<'a, P::Document>>) -> Result<Outcome>
    where
        P::Document: 'a,
    {
        self.select(source.into()).map(Outcome::from)
    }

    /// Whether the expression selects anything in `source`.
    pub fn matches<'a>(&self, source: impl Into<Source<'a, P::Document>>) -> Result<bool>
    where
        P::Document: 'a,
    {
        self.check(source).map(Outcome::is_matched)
    }

    fn select(&self, source: Source<'_, P::Document>) -> Result<NodeSet> {
        if self.expression.is_empty() {
            return Err(Error::EmptyExpression);
        }
        match source.read()? {
            Input::Node(document) => self.evaluate_document(document),
            Input::Xml(xml) => {
                let document = self.parser.parse(&xml)?;
                self.evaluate_document(&document)
            }
        }
    }

    fn evaluate_document(&self, document: &P::Document) -> Result<NodeSet> {
        let node_set = self
            .evaluator
            .evaluate(&self.expression, document, &self.namespaces)?;
        tracing::debug!(
            expression = %self.expression,
            namespaces = self.namespaces.len(),
            selected = node_set.len(),
            "evaluated XPath"
        );
        Ok(node_set)
    }

    fn status(&self, source: Source<'_, P::Document>) -> MatchStatus {
        match self.select(source) {
            Ok(node_set) if node_set.is_empty() => {
                MatchStatus::Mismatched("XPath returned no results.".to_string())
            }
            Ok(node_set) if node_set.len() == 1 => {
                MatchStatus::Matched("XPath returned 1 result.".to_string())
            }
            Ok(node_set) => {
                MatchStatus::Matched(format!("XPath returned {} results.", node_set.len()))
            }
            Err(error) => MatchStatus::Error(error),
        }
    }

    fn description(&self) -> String {
        format!("XML with XPath {}", self.expression)
    }
}

impl<P, E> Matcher<str> for HasXPath<P, E>
where
    P: XmlParser,
    E: XPathEvaluator<Document = P::Document>,
{
    fn evaluate(&self, actual: &str) -> MatchStatus {
        self.status(Source::Text(actual))
    }

    fn describe(&self) -> String {
        self.description()
    }
}

impl<P, E> Matcher<String> for HasXPath<P, E>
where
    P: XmlParser,
    E: XPathEvaluator<Document = P::Document>,
{
    fn evaluate(&self, actual: &String) -> MatchStatus {
        self.status(Source::Text(actual))
    }

    fn describe(&self) -> String {
        self.description()
    }
}

impl<P, E> Matcher<[u8]> for HasXPath<P, E>
where
    P: XmlParser,
    E: XPathEvaluator<Document = P::Document>,
{
    fn evaluate(&self, actual: &[u8]) -> MatchStatus {
        self.status(Source::Bytes(actual))
    }

    fn describe(&self) -> String {
        self.description()
    }
}

impl<P, E> Matcher<Path> for HasXPath<P, E>
where
    P: XmlParser,
    E: XPathEvaluator<Document = P::Document>,
{
    fn evaluate(&self, actual: &Path) -> MatchStatus {
        self.status(Source::File(actual))
    }

    fn describe(&self) -> String {
        self.description()
    }
}

impl<P, E> Matcher<XmlDocument> for HasXPath<P, E>
where
    P: XmlParser<Document = XmlDocument>,
    E: XPathEvaluator<Document = XmlDocument>,
{
    fn evaluate(&self, actual: &XmlDocument) -> MatchStatus {
        self.status(Source::Node(actual))
    }

    fn describe(&self) -> String {
        self.description()
    }
}
