use serde::{Deserialize, Serialize};

/// Document-level facts read from the trailer's Info dictionary.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: usize,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub subject: Option<String>,
}
