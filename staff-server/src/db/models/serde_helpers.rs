//! Common serde helpers for handling null values from SurrealDB
//!
//! Documents are schemaless and may be written by other tools, so a field can
//! be absent, `NONE`, or `null`. These helpers give such fields a neutral value.

use serde::{Deserialize, Deserializer};

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Deserialize string that treats null as empty
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}
