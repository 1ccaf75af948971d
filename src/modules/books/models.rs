use serde::{Deserialize, Deserializer, Serialize};

/// A stored book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Store-assigned identifier, immutable once created
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub quantity: i64,
}

/// Create/update request body as received, before validation.
///
/// Every field is optional here so that missing fields are reported through
/// the same per-field validation errors as out-of-range ones. `quantity` keeps
/// an explicit `null` (`Some(None)`) apart from an absent key (`None`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Option<i64>>,
}

/// Wraps whatever the key held, `null` included, so absence stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The mutable fields of a book after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub quantity: i64,
}

impl Book {
    /// The mutable fields of this record
    pub fn fields(&self) -> NewBook {
        NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Query string of the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
