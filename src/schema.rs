//! Schema types for the Figma variables response.
//!
//! Only the fields the pipeline reads are modeled; everything else in the
//! payload is ignored.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariablesResponse {
    #[serde(default)]
    pub meta: VariablesMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariablesMeta {
    #[serde(default, deserialize_with = "list_or_map")]
    pub variables: Vec<Variable>,
    #[serde(default, deserialize_with = "list_or_map")]
    pub variable_collections: Vec<Collection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub resolved_type: ResolvedType,
    #[serde(default, alias = "collectionId")]
    pub variable_collection_id: Option<String>,
    /// Raw values keyed by mode id, in document order.
    #[serde(default)]
    pub values_by_mode: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub default_mode_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub modes: Vec<Mode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The REST API returns `{id: item}` maps while plugin exports use arrays.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrMap<T> {
    List(Vec<T>),
    Map(Map<String, Value>),
}

fn list_or_map<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Option::<ListOrMap<T>>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(ListOrMap::List(items)) => Ok(items),
        Some(ListOrMap::Map(map)) => map
            .into_iter()
            .map(|(_, value)| serde_json::from_value(value).map_err(serde::de::Error::custom))
            .collect(),
    }
}
