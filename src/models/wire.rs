use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::marker::PhantomData;

/// JSON object decoded with its keys kept in the order the backend sent them.
///
/// Category and AMC maps drive chart ordering, so a `HashMap` would scramble
/// them. Duplicate keys keep their first position and take the last value.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    fn insert(&mut self, key: String, value: V) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k.into(), v);
        }
        map
    }
}

struct OrderedMapVisitor<V> {
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DisplayValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl DisplayValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Decodes a field the backend sends as either a string or a number.
///
/// `null` and a missing field both become `None` (pair with `#[serde(default)]`).
pub fn opt_display_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<DisplayValue> = Option::deserialize(deserializer)?;
    Ok(value.map(DisplayValue::into_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Labelled {
        #[serde(default, deserialize_with = "opt_display_string")]
        value: Option<String>,
    }

    #[test]
    fn test_ordered_map_keeps_backend_order() {
        let map: OrderedMap<u64> =
            serde_json::from_str(r#"{"Zeta": 1, "Alpha": 7, "Mid": 3}"#).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(map.get("Alpha"), Some(&7));
    }

    #[test]
    fn test_ordered_map_duplicate_key_keeps_first_slot() {
        let map: OrderedMap<u64> = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 9}"#).unwrap();
        let entries: Vec<(&str, &u64)> = map.iter().collect();
        assert_eq!(entries, vec![("a", &9), ("b", &2)]);
    }

    #[test]
    fn test_ordered_map_rejects_array() {
        let result: Result<OrderedMap<u64>, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_string_accepts_numbers_and_text() {
        let text: Labelled = serde_json::from_str(r#"{"value": "12.5%"}"#).unwrap();
        assert_eq!(text.value.as_deref(), Some("12.5%"));

        let int: Labelled = serde_json::from_str(r#"{"value": 4}"#).unwrap();
        assert_eq!(int.value.as_deref(), Some("4"));

        let float: Labelled = serde_json::from_str(r#"{"value": 0.75}"#).unwrap();
        assert_eq!(float.value.as_deref(), Some("0.75"));
    }

    #[test]
    fn test_display_string_missing_or_null() {
        let missing: Labelled = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.value, None);

        let null: Labelled = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(null.value, None);
    }
}
