use std::cell::Cell;
use std::collections::HashMap;
use std::io::Write;

use rstest::rstest;
use xpath_assert::{
    assert_that, both, check_that, has_xpath, is_empty_string, not, AssertionError, Error,
    EvaluationError, NamespaceContext, NodeSet, Outcome, ParseError, XPathEvaluator,
    XeeEvaluator, XmlDocument, XmlParser,
};

const SINGLE_ENTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?><feed>   <title>title</title>   <entry>       <title>title1</title>       <id>id1</id>   </entry></feed>"#;

const TWO_ENTRIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?><feed>   <title>title</title>   <entry>       <title>title1</title>       <id>id1</id>   </entry>   <entry>       <title>title2</title>       <id>id2</id>   </entry></feed>"#;

const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?><feed xmlns="http://www.w3.org/2005/Atom">   <title>title</title>   <entry>       <title>title1</title>       <id>id1</id>   </entry></feed>"#;

const ATTR: &str = r#"<a><b attr="abc"></b></a>"#;

fn failure(result: Result<(), AssertionError>) -> xpath_assert::AssertionFailure {
    match result {
        Err(AssertionError::Failed(failure)) => failure,
        other => panic!("expected an assertion failure, got {other:?}"),
    }
}

#[test]
fn test_found_in_document_element_with_single_occurrence() {
    let root = XmlDocument::parse(SINGLE_ENTRY)
        .unwrap()
        .document_element()
        .unwrap();

    assert_that(&root, has_xpath("entry/id"));
    assert_that(&root, has_xpath("entry/title"));
    assert_that(&root, not(has_xpath("entry/description")));
}

#[rstest]
#[case(SINGLE_ENTRY)]
#[case(TWO_ENTRIES)]
fn test_found_in_string(#[case] xml: &str) {
    assert_that(xml, has_xpath("//feed/entry/id"));
    assert_that(xml, has_xpath("//feed/entry/title"));
    assert_that(xml, not(has_xpath("//feed/entry/description")));
}

#[test]
fn test_found_in_owned_string() {
    let xml = TWO_ENTRIES.to_string();
    assert_that(&xml, has_xpath("//feed/entry[2]/id"));
}

#[test]
fn test_attribute_is_found() {
    assert_that(ATTR, has_xpath("//a/b/@attr"));

    let failure = failure(check_that(ATTR, has_xpath(r#"//a/b[@attr="abcd"]"#)));
    assert!(failure.actual().contains("XPath returned no results"));
    assert_eq!(failure.expected(), r#"XML with XPath //a/b[@attr="abcd"]"#);
}

#[test]
fn test_found_with_namespace_context() {
    let prefix2uri = HashMap::from([("atom", "http://www.w3.org/2005/Atom")]);
    let namespaces: NamespaceContext = prefix2uri.into_iter().collect();
    let root = XmlDocument::parse(ATOM_FEED)
        .unwrap()
        .document_element()
        .unwrap();

    assert_that(
        &root,
        has_xpath("//atom:feed/atom:entry/atom:id").with_namespace_context(namespaces.clone()),
    );
    assert_that(
        &root,
        has_xpath("//atom:feed/atom:entry/atom:title").with_namespace_context(namespaces.clone()),
    );
    assert_that(
        &root,
        not(has_xpath("//atom:feed/atom:entry/atom:description")
            .with_namespace_context(namespaces)),
    );
}

#[test]
fn test_unresolved_prefix_is_an_error_even_when_negated() {
    let expression = "//atom:feed/atom:entry/atom:id";
    let err = has_xpath(expression).check(ATOM_FEED).unwrap_err();
    assert!(err.is_evaluation());

    let result = check_that(ATOM_FEED, not(has_xpath(expression)));
    assert!(matches!(result, Err(AssertionError::Error(Error::Evaluation(_)))));
}

#[test]
fn test_unprefixed_names_do_not_match_namespaced_elements() {
    assert_eq!(
        has_xpath("//feed/entry/id").check(ATOM_FEED).unwrap(),
        Outcome::NotMatched
    );
}

#[test]
fn test_combined_with_failing_matcher() {
    // the XPath is malformed but is never evaluated
    let result = check_that(
        "not empty",
        both(is_empty_string()).and(has_xpath("count(//atom:feed/atom:entry")),
    );
    let failure = failure(result);
    assert_eq!(failure.actual(), r#"an empty string was "not empty""#);
}

#[test]
fn test_combined_with_passing_matcher() {
    assert_that(
        ATTR,
        both(not(is_empty_string())).and(has_xpath("//a/b/@attr")),
    );
}

#[test]
fn test_combined_failure_is_attributed_to_xpath() {
    let failure = failure(check_that(
        ATTR,
        both(not(is_empty_string())).and(has_xpath("//a/c")),
    ));
    assert_eq!(
        failure.expected(),
        "(not an empty string and XML with XPath //a/c)"
    );
    assert_eq!(failure.actual(), "XML with XPath //a/c XPath returned no results.");
}

struct FaultingParser {
    calls: Cell<usize>,
}

impl XmlParser for FaultingParser {
    type Document = XmlDocument;

    fn parse(&self, _xml: &str) -> Result<XmlDocument, ParseError> {
        self.calls.set(self.calls.get() + 1);
        Err(ParseError::Other(
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stream closed").into(),
        ))
    }
}

#[test]
fn test_uses_parser() {
    let parser = FaultingParser {
        calls: Cell::new(0),
    };
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?><fruits><fruit name="apple"/><fruit name="orange"/><fruit name="banana"/></fruits>"#;

    let result = check_that(xml, has_xpath("//fruits/fruit").with_parser(&parser));

    assert!(matches!(
        result,
        Err(AssertionError::Error(Error::Parse(ParseError::Other(_))))
    ));
    assert_eq!(parser.calls.get(), 1);
}

#[test]
fn test_parser_failure_reason_is_reported() {
    let parser = FaultingParser {
        calls: Cell::new(0),
    };
    let err = check_that("<foo/>", has_xpath("//foo").with_parser(&parser)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Assertion could not be evaluated: Parser failed: stream closed"
    );
}

struct FailingEvaluator;

impl XPathEvaluator for FailingEvaluator {
    type Document = XmlDocument;

    fn evaluate(
        &self,
        _expression: &str,
        _document: &XmlDocument,
        _namespaces: &NamespaceContext,
    ) -> Result<NodeSet, EvaluationError> {
        Err(EvaluationError::Other("index unavailable".into()))
    }
}

#[test]
fn test_evaluator_failure_reason_is_reported() {
    let err = check_that("<foo/>", not(has_xpath("//bar").with_evaluator(FailingEvaluator)))
        .unwrap_err();
    assert!(err.to_string().contains("Evaluator failed: index unavailable"));
}

#[test]
fn test_faulting_parser_fails_negated_check_too() {
    let parser = FaultingParser {
        calls: Cell::new(0),
    };
    let result = check_that("<foo/>", not(has_xpath("//bar").with_parser(&parser)));
    assert!(matches!(result, Err(AssertionError::Error(e)) if e.is_parse()));
    assert_eq!(parser.calls.get(), 1);
}

struct CountingEvaluator {
    calls: Cell<usize>,
}

impl XPathEvaluator for CountingEvaluator {
    type Document = XmlDocument;

    fn evaluate(
        &self,
        expression: &str,
        document: &XmlDocument,
        namespaces: &NamespaceContext,
    ) -> Result<NodeSet, EvaluationError> {
        self.calls.set(self.calls.get() + 1);
        XeeEvaluator.evaluate(expression, document, namespaces)
    }
}

#[test]
fn test_uses_evaluator() {
    let evaluator = CountingEvaluator {
        calls: Cell::new(0),
    };
    assert_that("<foo/>", not(has_xpath("//bar").with_evaluator(&evaluator)));
    assert_eq!(evaluator.calls.get(), 1);
}

#[test]
fn test_quotes_can_be_mixed() {
    assert_that("<a>b'b</a>", has_xpath(r#"//a[text()="b'b"]"#));
}

#[test]
fn test_useful_message_when_failing_combined_with_not() {
    let failure = failure(check_that(ATTR, not(has_xpath("//a/b/@attr"))));
    assert_eq!(failure.expected(), "not XML with XPath //a/b/@attr");
    insta::assert_snapshot!(failure.to_string(), @r"
    Expected: not XML with XPath //a/b/@attr
         but: XPath returned 1 result.
    ");
}

#[test]
#[should_panic(expected = "not XML with XPath //a/b/@attr")]
fn test_assert_that_panics_with_message() {
    assert_that(ATTR, not(has_xpath("//a/b/@attr")));
}

#[test]
fn test_non_node_result_is_an_error() {
    let err = has_xpath("count(//a)").check(ATTR).unwrap_err();
    assert!(matches!(
        err,
        Error::Evaluation(EvaluationError::NotANodeSet { expression }) if expression == "count(//a)"
    ));
}

#[test]
fn test_check_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{TWO_ENTRIES}").unwrap();

    assert_that(file.path(), has_xpath("//entry/id"));
    assert_that(file.path(), not(has_xpath("//entry/description")));
}

#[test]
fn test_missing_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = has_xpath("//a")
        .check(dir.path().join("missing.xml").as_path())
        .unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::Io { .. })));
}

#[test]
fn test_checker_is_reusable_across_sources() {
    let checker = has_xpath("//entry/id");
    assert!(checker.matches(SINGLE_ENTRY).unwrap());
    assert!(checker.matches(TWO_ENTRIES).unwrap());
    assert!(!checker.matches("<feed/>").unwrap());
}
