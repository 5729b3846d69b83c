use serde::Serialize;
use serde_json::Value;

use crate::helpers::to_pascal_case;

/// Signature every category uses to turn a fetched document into a record.
pub type Extractor<R> = fn(&Value) -> Result<R, ExtractError>;

/// Record holding only the normalized display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRecord {
    name: String,
}

/// Field order here is the key order in `weapons.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponRecord {
    name: String,
    rarity: Value,
}

/// Set name plus the name of each of its five pieces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactRecord {
    name: String,
    flower: String,
    plume: String,
    sands: String,
    goblet: String,
    circlet: String,
}

#[allow(unused)]
impl NamedRecord {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[allow(unused)]
impl WeaponRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whatever the source document had, number or string.
    pub fn rarity(&self) -> &Value {
        &self.rarity
    }
}

pub fn named(doc: &Value) -> Result<NamedRecord, ExtractError> {
    Ok(NamedRecord {
        name: normalized(doc, "name")?,
    })
}

pub fn weapon(doc: &Value) -> Result<WeaponRecord, ExtractError> {
    Ok(WeaponRecord {
        name: normalized(doc, "name")?,
        rarity: field(doc, "rarity")?.clone(),
    })
}

pub fn artifact(doc: &Value) -> Result<ArtifactRecord, ExtractError> {
    Ok(ArtifactRecord {
        name: normalized(doc, "name")?,
        flower: piece_name(doc, "flower")?,
        plume: piece_name(doc, "plume")?,
        sands: piece_name(doc, "sands")?,
        goblet: piece_name(doc, "goblet")?,
        circlet: piece_name(doc, "circlet")?,
    })
}

fn field<'a>(doc: &'a Value, key: &str) -> Result<&'a Value, ExtractError> {
    doc.get(key)
        .ok_or_else(|| ExtractError::MissingField(key.to_string()))
}

fn normalized(doc: &Value, key: &str) -> Result<String, ExtractError> {
    field(doc, key)?
        .as_str()
        .map(to_pascal_case)
        .ok_or_else(|| ExtractError::NotAString(key.to_string()))
}

fn piece_name(doc: &Value, piece: &str) -> Result<String, ExtractError> {
    normalized(field(doc, piece)?, "name").map_err(|err| err.within(piece))
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("missing field '{0}'")]
    MissingField(String),
    #[error("field '{0}' is not a string")]
    NotAString(String),
}

impl ExtractError {
    /// Prefix the offending key with its parent object, e.g. `flower.name`.
    fn within(self, parent: &str) -> Self {
        match self {
            Self::MissingField(key) => Self::MissingField(format!("{parent}.{key}")),
            Self::NotAString(key) => Self::NotAString(format!("{parent}.{key}")),
        }
    }
}
