/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Serde codec rendering a [`DbId`] as its decimal string form in JSON.
///
/// 64-bit ids exceed the integer range JavaScript can represent exactly,
/// so every id crossing the API boundary is serialized as a string
/// (`"42"`). Deserialization accepts either a string or a bare number so
/// clients that still send numeric ids keep working.
///
/// Use with `#[serde(with = "waypost_core::types::id_string")]`.
pub mod id_string {
    use serde::de::{Deserializer, Error, Unexpected};
    use serde::{Deserialize, Serializer};

    use super::DbId;

    pub fn serialize<S: Serializer>(id: &DbId, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DbId, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            Number(i64),
        }

        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::Number(id) => Ok(id),
            StringOrNumber::String(s) => s
                .parse::<DbId>()
                .map_err(|_| Error::invalid_value(Unexpected::Str(&s), &"a decimal id string")),
        }
    }
}
