//! Lenient decoding for string-keyed maps.
//!
//! The Dislo server encodes an empty map as an empty list (`[]`) and occasionally sends
//! `null` where a map is expected. Both decode to an empty map here; a non-empty list
//! is keyed by element index.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum MapOrList<V> {
    Map(BTreeMap<String, V>),
    List(Vec<V>),
}

/// Deserialize a map that may arrive as a map, a list, or `null`.
///
/// # Errors
///
/// Fails when the value is neither a map nor a list of `V`.
pub fn lenient<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    Ok(match Option::<MapOrList<V>>::deserialize(deserializer)? {
        Some(MapOrList::Map(map)) => map,
        Some(MapOrList::List(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), value))
            .collect(),
        None => BTreeMap::new(),
    })
}
