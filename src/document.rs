use std::fmt;

use serde_yaml::Number;

use crate::decoder::{RawNode, RawRecord};
use crate::error::YamlTableError;

/// Describes the shape of a decoded YAML value, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    Boolean,
    Number,
    String,
    Record,
    Sequence,
}

impl Shape {
    /// Returns the shape of a raw YAML value.
    pub fn of(value: &RawNode) -> Self {
        match value {
            RawNode::Null => Shape::Null,
            RawNode::Bool(_) => Shape::Boolean,
            RawNode::Number(_) => Shape::Number,
            RawNode::String(_) => Shape::String,
            RawNode::Sequence(_) => Shape::Sequence,
            RawNode::Mapping(_) => Shape::Record,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Null => "null",
            Shape::Boolean => "boolean",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Record => "record",
            Shape::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// A leaf value: string, number, boolean or null.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Returns the string content if this scalar is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    /// Null renders as the empty string; everything else uses its YAML text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// A key or a value inside a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf value.
    Scalar(Scalar),
    /// A nested record.
    Record(Record),
    /// An ordered list whose elements are all records.
    RecordList(Vec<Record>),
}

impl Node {
    /// Returns the scalar if this node is one.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Node::Scalar(Scalar::Null) => Shape::Null,
            Node::Scalar(Scalar::Bool(_)) => Shape::Boolean,
            Node::Scalar(Scalar::Number(_)) => Shape::Number,
            Node::Scalar(Scalar::String(_)) => Shape::String,
            Node::Record(_) => Shape::Record,
            Node::RecordList(_) => Shape::Sequence,
        }
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Scalar(scalar)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Node::Record(record)
    }
}

impl TryFrom<&RawNode> for Node {
    type Error = YamlTableError;

    /// Converts a raw YAML value into a node.
    ///
    /// Every element of a sequence must be a mapping; anything else is
    /// rejected with [`YamlTableError::Shape`] before the node is built.
    fn try_from(value: &RawNode) -> Result<Self, Self::Error> {
        match value {
            RawNode::Null => Ok(Node::Scalar(Scalar::Null)),
            RawNode::Bool(b) => Ok(Node::Scalar(Scalar::Bool(*b))),
            RawNode::Number(n) => Ok(Node::Scalar(Scalar::Number(n.clone()))),
            RawNode::String(s) => Ok(Node::Scalar(Scalar::String(s.clone()))),
            RawNode::Mapping(m) => Ok(Node::Record(Record::try_from(m)?)),
            RawNode::Sequence(items) => items
                .iter()
                .map(record_from_element)
                .collect::<Result<Vec<_>, _>>()
                .map(Node::RecordList),
        }
    }
}

/// Converts one element of a record list.
fn record_from_element(value: &RawNode) -> Result<Record, YamlTableError> {
    match value {
        RawNode::Mapping(m) => Record::try_from(m),
        other => Err(YamlTableError::Shape {
            shape: Shape::of(other),
        }),
    }
}

/// An ordered sequence of key/value pairs.
///
/// Pairs keep the order in which they appeared in the source text; column and
/// row order in the rendered tables follow it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(Node, Node)>,
}

impl Record {
    /// Creates a new, empty `Record`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key/value pair at the end of the record.
    pub fn push(&mut self, key: impl Into<Node>, value: impl Into<Node>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Iterates over the pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<&RawRecord> for Record {
    type Error = YamlTableError;

    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        let entries = raw
            .pairs
            .iter()
            .map(|(k, v)| -> Result<(Node, Node), YamlTableError> {
                Ok((Node::try_from(k)?, Node::try_from(v)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Record { entries })
    }
}

/// The decoded top-level input.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// The root is a single record.
    Record(Record),
    /// The root is a list of records.
    RecordList(Vec<Record>),
}

impl Document {
    /// Builds a list-of-records document from decoded mappings.
    pub fn from_raw_records(raw: Vec<RawRecord>) -> Result<Self, YamlTableError> {
        raw.iter()
            .map(Record::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Document::RecordList)
    }

    /// Builds a single-record document from a decoded mapping.
    pub fn from_raw_record(raw: RawRecord) -> Result<Self, YamlTableError> {
        Record::try_from(&raw).map(Document::Record)
    }
}
