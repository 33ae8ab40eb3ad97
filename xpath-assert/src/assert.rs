use std::fmt;

use crate::error::Error;
use crate::outcome::MatchStatus;

/// Something that can be asserted about a value of type `T`.
pub trait Matcher<T: ?Sized> {
    /// Decide whether `actual` matches, and say what was found.
    fn evaluate(&self, actual: &T) -> MatchStatus;

    /// What a matching value looks like, as in "Expected: ...".
    fn describe(&self) -> String;

    /// What was found in `actual`, as in "but: ...".
    fn describe_mismatch(&self, actual: &T) -> String {
        match self.evaluate(actual) {
            MatchStatus::Matched(description) | MatchStatus::Mismatched(description) => {
                description
            }
            MatchStatus::Error(error) => error.to_string(),
        }
    }
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn evaluate(&self, actual: &T) -> MatchStatus {
        (**self).evaluate(actual)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn evaluate(&self, actual: &T) -> MatchStatus {
        (**self).evaluate(actual)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Matches when `matcher` does not.
///
/// An error from `matcher` is still an error: the absence of XPath results
/// is only established by an evaluation that succeeded.
pub fn not<M>(matcher: M) -> Not<M> {
    Not(matcher)
}

#[derive(Debug, Clone)]
pub struct Not<M>(M);

impl<T: ?Sized, M: Matcher<T>> Matcher<T> for Not<M> {
    fn evaluate(&self, actual: &T) -> MatchStatus {
        self.0.evaluate(actual).negate()
    }

    fn describe(&self) -> String {
        format!("not {}", self.0.describe())
    }
}

/// Matches when every matcher matches.
///
/// Matchers run in order. The first mismatch or error is reported and the
/// rest are not run.
pub struct AllOf<'m, T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T> + 'm>>,
}

pub fn all_of<'m, T: ?Sized>() -> AllOf<'m, T> {
    AllOf {
        matchers: Vec::new(),
    }
}

/// Start an [`AllOf`]: `both(a).and(b)`.
pub fn both<'m, T: ?Sized, M: Matcher<T> + 'm>(matcher: M) -> AllOf<'m, T> {
    all_of().and(matcher)
}

impl<'m, T: ?Sized> AllOf<'m, T> {
    pub fn and<M: Matcher<T> + 'm>(mut self, matcher: M) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl<T: ?Sized> Matcher<T> for AllOf<'_, T> {
    fn evaluate(&self, actual: &T) -> MatchStatus {
        let mut descriptions = Vec::with_capacity(self.matchers.len());
        for matcher in &self.matchers {
            match matcher.evaluate(actual) {
                MatchStatus::Matched(description) => descriptions.push(description),
                MatchStatus::Mismatched(description) => {
                    return MatchStatus::Mismatched(format!(
                        "{} {}",
                        matcher.describe(),
                        description
                    ))
                }
                error => return error,
            }
        }
        MatchStatus::Matched(descriptions.join(" and "))
    }

    fn describe(&self) -> String {
        join_descriptions(self.matchers.iter().map(|m| m.describe()), "and")
    }
}

/// Matches when any matcher matches.
///
/// Matchers run in order until one matches. An error stops the run.
pub struct AnyOf<'m, T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T> + 'm>>,
}

pub fn any_of<'m, T: ?Sized>() -> AnyOf<'m, T> {
    AnyOf {
        matchers: Vec::new(),
    }
}

/// Start an [`AnyOf`]: `either(a).or(b)`.
pub fn either<'m, T: ?Sized, M: Matcher<T> + 'm>(matcher: M) -> AnyOf<'m, T> {
    any_of().or(matcher)
}

impl<'m, T: ?Sized> AnyOf<'m, T> {
    pub fn or<M: Matcher<T> + 'm>(mut self, matcher: M) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl<T: ?Sized> Matcher<T> for AnyOf<'_, T> {
    fn evaluate(&self, actual: &T) -> MatchStatus {
        let mut descriptions = Vec::with_capacity(self.matchers.len());
        for matcher in &self.matchers {
            match matcher.evaluate(actual) {
                MatchStatus::Mismatched(description) => descriptions.push(description),
                MatchStatus::Matched(description) => {
                    return MatchStatus::Matched(format!(
                        "{} {}",
                        matcher.describe(),
                        description
                    ))
                }
                error => return error,
            }
        }
        MatchStatus::Mismatched(descriptions.join(" or "))
    }

    fn describe(&self) -> String {
        join_descriptions(self.matchers.iter().map(|m| m.describe()), "or")
    }
}

fn join_descriptions(descriptions: impl Iterator<Item = String>, conjunction: &str) -> String {
    let descriptions = descriptions.collect::<Vec<_>>();
    format!("({})", descriptions.join(&format!(" {conjunction} ")))
}

/// Matches the empty string.
pub fn is_empty_string() -> IsEmptyString {
    IsEmptyString
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IsEmptyString;

impl Matcher<str> for IsEmptyString {
    fn evaluate(&self, actual: &str) -> MatchStatus {
        let description = format!("was {actual:?}");
        if actual.is_empty() {
            MatchStatus::Matched(description)
        } else {
            MatchStatus::Mismatched(description)
        }
    }

    fn describe(&self) -> String {
        "an empty string".to_string()
    }
}

impl Matcher<String> for IsEmptyString {
    fn evaluate(&self, actual: &String) -> MatchStatus {
        Matcher::<str>::evaluate(self, actual)
    }

    fn describe(&self) -> String {
        Matcher::<str>::describe(self)
    }
}

/// A value did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    expected: String,
    actual: String,
}

impl AssertionFailure {
    /// The description of the matcher, e.g. `not XML with XPath //a/b`.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// What was found instead.
    pub fn actual(&self) -> &str {
        &self.actual
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected: {}\n     but: {}", self.expected, self.actual)
    }
}

impl std::error::Error for AssertionFailure {}

#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    /// The value was checked and did not match.
    #[error(transparent)]
    Failed(#[from] AssertionFailure),
    /// The value could not be checked at all.
    #[error("Assertion could not be evaluated: {0}")]
    Error(Error),
}

impl From<Error> for AssertionError {
    fn from(error: Error) -> Self {
        AssertionError::Error(error)
    }
}

/// Check `actual` against `matcher`.
pub fn check_that<T: ?Sized, M: Matcher<T>>(
    actual: &T,
    matcher: M,
) -> Result<(), AssertionError> {
    match matcher.evaluate(actual) {
        MatchStatus::Matched(_) => Ok(()),
        MatchStatus::Mismatched(description) => Err(AssertionFailure {
            expected: matcher.describe(),
            actual: description,
        }
        .into()),
        MatchStatus::Error(error) => Err(error.into()),
    }
}

/// Like [`check_that`], but panics on failure. Meant for tests.
#[track_caller]
pub fn assert_that<T: ?Sized, M: Matcher<T>>(actual: &T, matcher: M) {
    if let Err(error) = check_that(actual, matcher) {
        panic!("{error}");
    }
}
