use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::ParseError;

/// What an XPath check runs against.
///
/// Everything but [`Source::Node`] goes through the parser first. A node is
/// only ever borrowed; checking it leaves it as it was.
#[derive(Debug)]
pub enum Source<'a, D: ?Sized> {
    Text(&'a str),
    /// UTF-8 encoded XML.
    Bytes(&'a [u8]),
    /// An XML file, read completely before parsing.
    File(&'a Path),
    Node(&'a D),
}

impl<D: ?Sized> Clone for Source<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for Source<'_, D> {}

/// A source after reading: XML text still to parse, or a parsed node.
pub(crate) enum Input<'a, D: ?Sized> {
    Xml(Cow<'a, str>),
    Node(&'a D),
}

impl<'a, D: ?Sized> Source<'a, D> {
    pub(crate) fn read(self) -> Result<Input<'a, D>, ParseError> {
        match self {
            Source::Text(xml) => Ok(Input::Xml(Cow::Borrowed(xml))),
            Source::Bytes(bytes) => Ok(Input::Xml(Cow::Borrowed(std::str::from_utf8(bytes)?))),
            Source::File(path) => read_file(path).map(|xml| Input::Xml(Cow::Owned(xml))),
            Source::Node(node) => Ok(Input::Node(node)),
        }
    }
}

fn read_file(path: &Path) -> Result<String, ParseError> {
    let io_error = |error| ParseError::Io {
        path: path.to_path_buf(),
        error,
    };
    let xml_file = File::open(path).map_err(io_error)?;
    let mut buf_reader = BufReader::new(xml_file);
    let mut xml = String::new();
    buf_reader.read_to_string(&mut xml).map_err(io_error)?;
    Ok(xml)
}

impl<'a, D: ?Sized> From<&'a str> for Source<'a, D> {
    fn from(xml: &'a str) -> Self {
        Source::Text(xml)
    }
}

impl<'a, D: ?Sized> From<&'a String> for Source<'a, D> {
    fn from(xml: &'a String) -> Self {
        Source::Text(xml)
    }
}

impl<'a, D: ?Sized> From<&'a [u8]> for Source<'a, D> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Bytes(bytes)
    }
}

impl<'a, D: ?Sized> From<&'a Path> for Source<'a, D> {
    fn from(path: &'a Path) -> Self {
        Source::File(path)
    }
}

impl<'a> From<&'a crate::XmlDocument> for Source<'a, crate::XmlDocument> {
    fn from(document: &'a crate::XmlDocument) -> Self {
        Source::Node(document)
    }
}
