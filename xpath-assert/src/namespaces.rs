use ahash::{HashMap, HashMapExt};

use crate::error::{Error, Result};

/// Namespace prefixes that an XPath expression can use.
///
/// Maps a prefix to a namespace URI. The empty prefix sets the default
/// namespace for element names in the expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    prefixes: HashMap<String, String>,
}

impl NamespaceContext {
    pub fn new() -> Self {
        Self {
            prefixes: HashMap::new(),
        }
    }

    /// Parse declarations of the form `prefix=uri`.
    ///
    /// The URI may itself contain `=`; only the first one separates.
    pub fn from_declarations<S: AsRef<str>>(
        declarations: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let mut context = Self::new();
        for declaration in declarations {
            let declaration = declaration.as_ref();
            let (prefix, uri) = declaration
                .split_once('=')
                .ok_or_else(|| Error::NamespaceDeclaration(declaration.to_string()))?;
            context.insert(prefix, uri);
        }
        Ok(context)
    }

    /// Bind a prefix to a namespace URI, replacing any earlier binding.
    pub fn insert(&mut self, prefix: impl Into<String>, uri: impl Into<String>) -> &mut Self {
        self.prefixes.insert(prefix.into(), uri.into());
        self
    }

    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.insert(prefix, uri);
        self
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterate over `(prefix, uri)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for NamespaceContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        for (prefix, uri) in iter {
            context.insert(prefix, uri);
        }
        context
    }
}

impl<K, V> Extend<(K, V)> for NamespaceContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (prefix, uri) in iter {
            self.insert(prefix, uri);
        }
    }
}
