//! Serde helpers for values that do not fit in a JSON number.
//!
//! Permission bitmasks and snowflake ids exceed the range JavaScript consumers can
//! represent safely, so backups store them as decimal strings.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize_u64_as_string<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_u64_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    String::deserialize(deserializer)?
        .parse::<u64>()
        .map_err(D::Error::custom)
}
