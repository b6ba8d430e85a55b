use serde::{Deserialize, Serialize};

/// Kind of a detected network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Cidr,
    Ipv4,
    Ipv6,
}

/// A network address found in a query, with its prefix length when present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkAddress {
    pub address: String,
    #[serde(rename = "type")]
    pub kind: AddressKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

/// A CLI command recognized in a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntity {
    /// Full command text, lowercased and whitespace-normalized.
    pub command: String,
    /// The verb, e.g. `show` in `show ip route`.
    pub action: String,
    /// Everything after the verb, possibly empty.
    pub target: String,
}

/// A topic-level match, e.g. a vendor or a technology family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticGroup {
    /// Group type: `term` for technology families, `vendor` for vendor names.
    #[serde(rename = "type")]
    pub kind: String,
    /// Dictionary topic that produced the match.
    pub topic: String,
    /// Matched literal terms.
    pub elements: Vec<String>,
    pub confidence: f64,
}

/// Entities and keywords extracted from one query. Built fresh per query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Deduplicated, lowercased keywords in first-seen order.
    pub keywords: Vec<String>,
    pub network_addresses: Vec<NetworkAddress>,
    pub commands: Vec<CommandEntity>,
    pub semantic_groups: Vec<SemanticGroup>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
            && self.network_addresses.is_empty()
            && self.commands.is_empty()
            && self.semantic_groups.is_empty()
    }

    /// Detected vendor topics, if any.
    pub fn vendors(&self) -> impl Iterator<Item = &SemanticGroup> {
        self.semantic_groups.iter().filter(|g| g.kind == "vendor")
    }
}
