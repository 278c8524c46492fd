use serde::{Deserialize, Serialize};

/// A captured guild member. Members are informational only and never replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberData {
    pub user_id: String,
    pub username: String,
    pub discriminator: Option<u16>,
    pub avatar_url: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub joined_timestamp: Option<i64>,
    /// Names of the member's roles.
    pub roles: Vec<String>,
    pub bot: bool,
}
