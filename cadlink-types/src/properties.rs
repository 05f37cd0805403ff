use serde::{Deserialize, Serialize};

/// Type-dependent attribute bag captured from one live entity.
///
/// The shape is keyed on the host's type tag at capture time and stored as
/// JSON text in the snapshot store. Variants are untagged on the wire so
/// stored rows keep the original flat shapes (`start_point`/`end_point`,
/// `center`/`radius`, `text`/`position`/`height`).
///
/// `Other` carries whatever a collaborator chose to record for types the
/// scanner does not model (custom device blocks record `label`/`position`
/// this way); an empty object means nothing is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityProperties {
    Line {
        start_point: [f64; 3],
        end_point: [f64; 3],
    },
    Circle {
        center: [f64; 3],
        radius: f64,
    },
    Text {
        text: String,
        position: Option<[f64; 3]>,
        height: Option<f64>,
    },
    Other(serde_json::Value),
}

impl EntityProperties {
    /// An empty bag for entity types the scanner does not model.
    #[must_use]
    pub fn empty() -> Self {
        Self::Other(serde_json::Value::Object(Default::default()))
    }

    /// The searchable text content, if this entity carries any.
    ///
    /// `Other` bags are probed for a top-level `"text"` field so that
    /// text-bearing entities outside the modeled variants still take part
    /// in pattern search.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Other(value) => value.get("text").and_then(|v| v.as_str()),
            _ => None,
        }
    }

    /// Insertion position, where the entity has one.
    #[must_use]
    pub fn insertion_point(&self) -> Option<[f64; 3]> {
        match self {
            Self::Text { position, .. } => *position,
            _ => None,
        }
    }

    /// Serializes the bag to the JSON text stored in the `properties` column.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a bag back out of stored JSON text.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
