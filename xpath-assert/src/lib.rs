//! Assert that an XPath expression selects something in an XML document.
//!
//! ```
//! use xpath_assert::{assert_that, has_xpath, not};
//!
//! let xml = r#"<a><b attr="abc"></b></a>"#;
//! assert_that(xml, has_xpath("//a/b/@attr"));
//! assert_that(xml, not(has_xpath("//a/c")));
//! ```
//!
//! Parsing and evaluation go through the [`XmlParser`] and [`XPathEvaluator`]
//! traits. The defaults are backed by [xee](https://docs.rs/xee-xpath).

mod assert;
mod document;
mod engine;
mod error;
mod has_xpath;
mod namespaces;
mod outcome;
mod source;

pub use assert::{
    all_of, any_of, assert_that, both, check_that, either, is_empty_string, not, AllOf, AnyOf,
    AssertionError, AssertionFailure, IsEmptyString, Matcher, Not,
};
pub use document::{ContextNode, XeeEvaluator, XeeParser, XmlDocument};
pub use engine::{NodeSet, XPathEvaluator, XmlParser};
pub use error::{BoxError, Error, EvaluationError, ParseError, Result};
pub use has_xpath::{has_xpath, HasXPath};
pub use namespaces::NamespaceContext;
pub use outcome::{MatchStatus, Outcome};
pub use source::Source;
