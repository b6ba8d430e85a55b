use serde::{Deserialize, Serialize};

/// A retrieved passage handed to answer generation and, afterwards, to grounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub chunk_id: String,
    /// Breadcrumb path of the passage's section.
    pub title: String,
    pub text: String,
}
