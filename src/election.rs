//! The election record and its stored encoding.

use crate::error::{RegistryError, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

/// A single election as kept in the ledger under its `id`.
///
/// The stored value is compact JSON: `id`, `name`, `description`, followed by
/// any fields this type does not model. Those are held as their original
/// JSON text and written back byte for byte, so a newer writer's data
/// survives an update made by this crate.
#[derive(Debug, Clone)]
pub struct Election {
    pub id: String,
    pub name: String,
    pub description: String,
    extra: Vec<(String, Box<RawValue>)>,
}

impl Election {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            extra: Vec::new(),
        }
    }

    /// Raw JSON of a stored field that is not part of this model.
    pub fn extra_field(&self, key: &str) -> Option<&RawValue> {
        self.extra
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| &**v)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RegistryError::CorruptRecord {
            id: self.id.clone(),
            reason: e.to_string(),
        })
    }

    /// Decodes the value stored at `key`.
    ///
    /// The key is authoritative: a value without an `id` takes the key, and a
    /// value naming a different `id` is rejected.
    pub fn decode(key: &str, bytes: &[u8]) -> Result<Self> {
        let mut election: Election =
            serde_json::from_slice(bytes).map_err(|e| RegistryError::CorruptRecord {
                id: key.to_string(),
                reason: e.to_string(),
            })?;

        if election.id.is_empty() {
            election.id = key.to_string();
        } else if election.id != key {
            return Err(RegistryError::CorruptRecord {
                id: key.to_string(),
                reason: format!("stored id {:?} does not match its key", election.id),
            });
        }

        Ok(election)
    }
}

impl PartialEq for Election {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.description == other.description
            && self.extra.len() == other.extra.len()
            && self
                .extra
                .iter()
                .zip(&other.extra)
                .all(|((ka, va), (kb, vb))| ka == kb && va.get() == vb.get())
    }
}

impl Eq for Election {}

impl Serialize for Election {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3 + self.extra.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("description", &self.description)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Election {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ElectionVisitor)
    }
}

struct ElectionVisitor;

impl<'de> Visitor<'de> for ElectionVisitor {
    type Value = Election;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an election object")
    }

    fn visit_map<A: MapAccess<'de>>(
        self,
        mut access: A,
    ) -> std::result::Result<Election, A::Error> {
        let mut election = Election::new("", "", "");

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "id" => election.id = access.next_value()?,
                "name" => election.name = access.next_value()?,
                "description" => election.description = access.next_value()?,
                _ => {
                    if election.extra.iter().any(|(k, _)| *k == key) {
                        return Err(de::Error::custom(format!("duplicate field `{key}`")));
                    }
                    let value: Box<RawValue> = access.next_value()?;
                    election.extra.push((key, value));
                }
            }
        }

        Ok(election)
    }
}
