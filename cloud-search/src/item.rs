// ABOUTME: Searchable item model shared by every console entity kind
// ABOUTME: Exposes a read-only flattened view of item fields for matching

use crate::constants::{entity_type, fields};
use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Linode,
    Volume,
    Domain,
    Image,
    NodeBalancer,
    KubernetesCluster,
    Bucket,
    Firewall,
    Database,
    Unknown(String),
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Linode => entity_type::LINODE,
            EntityType::Volume => entity_type::VOLUME,
            EntityType::Domain => entity_type::DOMAIN,
            EntityType::Image => entity_type::IMAGE,
            EntityType::NodeBalancer => entity_type::NODEBALANCER,
            EntityType::KubernetesCluster => entity_type::KUBERNETES_CLUSTER,
            EntityType::Bucket => entity_type::BUCKET,
            EntityType::Firewall => entity_type::FIREWALL,
            EntityType::Database => entity_type::DATABASE,
            EntityType::Unknown(s) => s.as_str(),
        }
    }
}

impl From<&str> for EntityType {
    fn from(s: &str) -> Self {
        match s {
            entity_type::LINODE => EntityType::Linode,
            entity_type::VOLUME => EntityType::Volume,
            entity_type::DOMAIN => EntityType::Domain,
            entity_type::IMAGE => EntityType::Image,
            entity_type::NODEBALANCER => EntityType::NodeBalancer,
            entity_type::KUBERNETES_CLUSTER => EntityType::KubernetesCluster,
            entity_type::BUCKET => EntityType::Bucket,
            entity_type::FIREWALL => EntityType::Firewall,
            entity_type::DATABASE => EntityType::Database,
            other => EntityType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        EntityType::from(s.as_str())
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        match entity_type {
            EntityType::Unknown(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifier carried by an item; the API hands out both numeric and string ids.
///
/// Numbers keep their JSON form, so ids past `i64` or with a fraction load
/// and print unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemValue::Number(n) => write!(f, "{}", n),
            ItemValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ItemValue {
    fn from(n: i64) -> Self {
        ItemValue::Number(n.into())
    }
}

impl From<u64> for ItemValue {
    fn from(n: u64) -> Self {
        ItemValue::Number(n.into())
    }
}

impl From<i32> for ItemValue {
    fn from(n: i32) -> Self {
        ItemValue::Number(n.into())
    }
}

impl From<&str> for ItemValue {
    fn from(s: &str) -> Self {
        ItemValue::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableItem {
    pub value: ItemValue,
    pub label: String,
    #[serde(rename = "entityType")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl SearchableItem {
    pub fn new(
        value: impl Into<ItemValue>,
        label: impl Into<String>,
        entity_type: impl Into<EntityType>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            entity_type: entity_type.into(),
            data: Map::new(),
        }
    }

    /// Attach a data field, replacing any previous value under the same key
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Look up a field as if `data` were merged into the item.
    ///
    /// Top-level properties win over data keys of the same name. Values that
    /// have no text form (null, nested objects) read as absent.
    pub fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            fields::LABEL => Some(FieldValue::Text(Cow::Borrowed(self.label.as_str()))),
            fields::VALUE => Some(FieldValue::Text(Cow::Owned(self.value.to_string()))),
            fields::ENTITY_TYPE => Some(FieldValue::Text(Cow::Borrowed(self.entity_type.as_str()))),
            _ => self.data.get(key).and_then(FieldValue::from_json),
        }
    }

    /// Whether `key` names a field this item could carry.
    ///
    /// The default search fields count as known even when an item lacks them,
    /// so `tags:x` on an untagged item is a plain non-match.
    pub fn is_known_field(&self, key: &str) -> bool {
        fields::DEFAULT_SEARCH_FIELDS.contains(&key)
            || fields::TOP_LEVEL_FIELDS.contains(&key)
            || self.data.contains_key(key)
    }

    pub fn tags(&self) -> Vec<&str> {
        self.string_list(fields::TAGS)
    }

    pub fn ips(&self) -> Vec<&str> {
        self.string_list(fields::IPS)
    }

    fn string_list(&self, key: &str) -> Vec<&str> {
        match self.data.get(key) {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

/// Text view of a single item field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    List(Vec<Cow<'a, str>>),
}

impl<'a> FieldValue<'a> {
    fn from_json(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(values) => Some(FieldValue::List(
                values.iter().filter_map(scalar_text).collect(),
            )),
            other => scalar_text(other).map(FieldValue::Text),
        }
    }

    /// Case-insensitive substring match; `needle` must already be lowercase
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            FieldValue::Text(text) => text.to_lowercase().contains(needle),
            FieldValue::List(values) => values
                .iter()
                .any(|value| value.to_lowercase().contains(needle)),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::List(values) => write!(f, "{}", values.join(" ")),
        }
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Read a JSON array of items
pub fn load_items<R: Read>(reader: R) -> Result<Vec<SearchableItem>, SearchError> {
    let items = serde_json::from_reader(reader)?;
    Ok(items)
}

/// Read a JSON array of items from a file
pub fn load_items_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SearchableItem>, SearchError> {
    let file = std::fs::File::open(path.as_ref())
        .map_err(|e| SearchError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
    let items = load_items(std::io::BufReader::new(file))?;
    log::debug!(
        "Loaded {} items from {}",
        items.len(),
        path.as_ref().display()
    );
    Ok(items)
}
