pub mod best_effort;
pub mod parse;
pub mod serde_string;
