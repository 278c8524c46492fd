use serde::{Deserialize, Serialize};

/// A captured ban.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanData {
    pub id: String,
    pub reason: Option<String>,
}
