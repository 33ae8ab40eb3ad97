use std::cell::RefCell;
use std::fmt;

use xee_xpath::context::StaticContextBuilder;
use xee_xpath::{Documents, Item, Itemable, Queries, Query};

use crate::engine::{NodeSet, XPathEvaluator, XmlParser};
use crate::error::{EvaluationError, ParseError};
use crate::namespaces::NamespaceContext;

/// Which node of an [`XmlDocument`] expressions are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextNode {
    /// The document node. `feed/entry` selects below the root.
    Document,
    /// The document element. `entry` selects below the root.
    DocumentElement,
}

/// A parsed XML document, as produced by [`XeeParser`].
///
/// Evaluation never changes the document tree. The engine does need
/// exclusive access to its document collection while a query runs, so a
/// document can be checked from one thread at a time only.
pub struct XmlDocument {
    documents: RefCell<Documents>,
    context: Item,
    context_node: ContextNode,
}

impl XmlDocument {
    /// Parse XML text. The document node is the context node.
    pub fn parse(xml: &str) -> Result<Self, ParseError> {
        let mut documents = Documents::new();
        let handle = documents
            .add_string_without_uri(xml)
            .map_err(|e| ParseError::Malformed(e.to_string()))?;
        let context = select_one(&mut documents, handle, "/")
            .map_err(|e| ParseError::Malformed(e.to_string()))?;
        tracing::debug!(len = xml.len(), "parsed XML document");
        Ok(Self {
            documents: RefCell::new(documents),
            context,
            context_node: ContextNode::Document,
        })
    }

    /// Use the document element as context node instead.
    pub fn document_element(mut self) -> Result<Self, EvaluationError> {
        if self.context_node == ContextNode::DocumentElement {
            return Ok(self);
        }
        let context = select_one(self.documents.get_mut(), &self.context, "/*")?;
        tracing::trace!("context node is now the document element");
        Ok(Self {
            context,
            context_node: ContextNode::DocumentElement,
            ..self
        })
    }

    pub fn context_node(&self) -> ContextNode {
        self.context_node
    }

    /// Evaluate `expression` and count the nodes it selects.
    fn select(
        &self,
        expression: &str,
        namespaces: &NamespaceContext,
    ) -> Result<NodeSet, EvaluationError> {
        let mut static_context_builder = StaticContextBuilder::default();
        static_context_builder.namespaces(namespaces.iter());
        let queries = Queries::new(static_context_builder);
        let query = queries.many(expression, |_, item: &Item| {
            Ok(matches!(item, Item::Node(_)))
        })?;

        let mut documents = self.documents.borrow_mut();
        let nodes = query.execute(&mut documents, &self.context)?;
        if nodes.iter().any(|is_node| !is_node) {
            return Err(EvaluationError::NotANodeSet {
                expression: expression.to_string(),
            });
        }
        Ok(NodeSet::new(nodes.len()))
    }
}

impl fmt::Debug for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDocument")
            .field("context_node", &self.context_node)
            .finish_non_exhaustive()
    }
}

fn select_one(
    documents: &mut Documents,
    item: impl Itemable,
    expression: &str,
) -> Result<Item, xee_xpath::error::Error> {
    let queries = Queries::default();
    let query = queries.one(expression, |_, item: &Item| Ok(item.clone()))?;
    query.execute(documents, item)
}

/// Parses with xee's document collection, backed by xot.
#[derive(Debug, Clone, Copy, Default)]
pub struct XeeParser;

impl XmlParser for XeeParser {
    type Document = XmlDocument;

    fn parse(&self, xml: &str) -> Result<XmlDocument, ParseError> {
        XmlDocument::parse(xml)
    }
}

/// Evaluates XPath 3.1 with xee.
///
/// Prefixes not declared in the [`NamespaceContext`] are a static error
/// (`XPST0081`), reported as [`EvaluationError::Engine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct XeeEvaluator;

impl XPathEvaluator for XeeEvaluator {
    type Document = XmlDocument;

    fn evaluate(
        &self,
        expression: &str,
        document: &XmlDocument,
        namespaces: &NamespaceContext,
    ) -> Result<NodeSet, EvaluationError> {
        document.select(expression, namespaces)
    }
}
