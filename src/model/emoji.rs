use serde::{Deserialize, Serialize};

/// A captured custom emoji.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiData {
    pub name: String,
    pub url: String,
    /// Image as a `data:` URI, present only when media was embedded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
}
