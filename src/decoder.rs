//! Ordered document decoder.
//!
//! Turns raw YAML bytes into a [`Document`]. A list of records is tried first,
//! then a single record. Mappings are read into [`RawRecord`] pair lists, so
//! the decoded records keep the field order of the source text and repeated
//! keys are kept as separate fields.

use std::fmt;

use log::debug;
use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde_yaml::Number;

use crate::document::Document;
use crate::error::YamlTableError;

/// A YAML value as parsed, before shape checking. Tags are dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<RawNode>),
    Mapping(RawRecord),
}

/// The key/value pairs of a YAML mapping, in source order, duplicates included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    pub pairs: Vec<(RawNode, RawNode)>,
}

struct RawNodeVisitor;

impl<'de> Visitor<'de> for RawNodeVisitor {
    type Value = RawNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawNode, E> {
        Ok(RawNode::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawNode, E> {
        Ok(RawNode::Number(Number::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawNode, E> {
        Ok(RawNode::Number(Number::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawNode, E> {
        Ok(RawNode::Number(Number::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawNode, E> {
        Ok(RawNode::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawNode, E> {
        Ok(RawNode::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawNode, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(RawNode::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<RawNode, A::Error> {
        RawRecordVisitor.visit_map(map).map(RawNode::Mapping)
    }

    // `!tag value`
    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<RawNode, A::Error> {
        let (_tag, variant) = data.variant::<String>()?;
        variant.newtype_variant()
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawNodeVisitor)
    }
}

struct RawRecordVisitor;

impl<'de> Visitor<'de> for RawRecordVisitor {
    type Value = RawRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawRecord, A::Error> {
        let mut pairs = Vec::new();
        while let Some(pair) = map.next_entry::<RawNode, RawNode>()? {
            pairs.push(pair);
        }
        Ok(RawRecord { pairs })
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<RawRecord, A::Error> {
        let (_tag, variant) = data.variant::<String>()?;
        variant.newtype_variant()
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawRecordVisitor)
    }
}

/// Decodes `input` into a [`Document`].
///
/// # Returns
///
/// * `Ok(None)` - the input is empty; there is nothing to render.
/// * `Ok(Some(document))` - the input is a list of records or a single record.
/// * `Err(YamlTableError::Decode)` - the input is neither; carries the parser
///   diagnostic of the attempt matching the root (list for a sequence root).
/// * `Err(YamlTableError::Shape)` - a nested record list holds a non-record element.
pub fn decode(input: &[u8]) -> Result<Option<Document>, YamlTableError> {
    if input.is_empty() {
        return Ok(None);
    }

    let list_err = match serde_yaml::from_slice::<Vec<RawRecord>>(input) {
        Ok(records) => {
            debug!("decoded a list of {} records", records.len());
            return Document::from_raw_records(records).map(Some);
        }
        Err(err) => err,
    };
    debug!("input is not a list of records: {}", list_err);

    match serde_yaml::from_slice::<RawRecord>(input) {
        Ok(record) => {
            debug!("decoded a single record with {} fields", record.pairs.len());
            Document::from_raw_record(record).map(Some)
        }
        Err(record_err) => {
            let root_is_sequence = matches!(
                serde_yaml::from_slice::<RawNode>(input),
                Ok(RawNode::Sequence(_))
            );
            Err(YamlTableError::Decode(if root_is_sequence {
                list_err
            } else {
                record_err
            }))
        }
    }
}
