//! Embedded structured-data schema
//!
//! JSON-LD blocks come in two shapes: a single object or a list of
//! objects. The author field is itself either one object or a list.
//! Every field is optional and unknown fields are ignored; a block that
//! fits neither shape fails to decode, which callers treat the same as
//! no block at all.

use serde::Deserialize;

/// Decoded embedded structured-data block
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StructuredData {
    /// A bare top-level object
    One(DataObject),
    /// A list of objects (@graph-style arrays)
    Many(Vec<DataObject>),
}

impl StructuredData {
    /// View either shape as a sequence of candidate objects
    pub fn objects(&self) -> &[DataObject] {
        match self {
            StructuredData::One(obj) => std::slice::from_ref(obj),
            StructuredData::Many(list) => list,
        }
    }
}

/// One candidate object within a structured-data block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataObject {
    #[serde(default)]
    pub author: Option<AuthorField>,
    #[serde(default)]
    pub page: Option<PageField>,
}

/// Author field: one entry or a list of entries
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    One(AuthorEntry),
    Many(Vec<AuthorEntry>),
}

impl AuthorField {
    /// First author entry of either shape
    pub fn first(&self) -> Option<&AuthorEntry> {
        match self {
            AuthorField::One(entry) => Some(entry),
            AuthorField::Many(list) => list.first(),
        }
    }
}

/// A single author record
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorEntry {
    #[serde(default)]
    pub name: Option<String>,
}

/// CMS-style nested page metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PageField {
    #[serde(default, rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub publisher: Option<String>,
}
