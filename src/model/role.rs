use serde::{Deserialize, Serialize};

use crate::util::serde_string::{deserialize_u64_from_string, serialize_u64_as_string};

/// A captured role.
///
/// The guild's default role is captured with `is_everyone` set and is replayed by
/// editing the target's default role rather than creating a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleData {
    pub name: String,
    pub color: u32,
    pub hoist: bool,
    #[serde(
        serialize_with = "serialize_u64_as_string",
        deserialize_with = "deserialize_u64_from_string"
    )]
    pub permissions: u64,
    pub mentionable: bool,
    pub position: u16,
    pub is_everyone: bool,
}
