//! Parser configuration types

use crate::x3f::tags::{self, Tag};

/// Default upper bound on the number of entries in one property list.
pub const DEFAULT_MAX_PROPERTY_COUNT: u32 = 1000;

/// Configuration for decoding an X3F container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Identifiers accepted at the start of the directory section.
    /// Files are known to carry "SECd"; some readers also let "SECc" through.
    pub accepted_directory_signatures: Vec<Tag>,
    /// Property lists declaring more entries than this are rejected outright
    pub max_property_count: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            accepted_directory_signatures: vec![tags::SECD],
            max_property_count: DEFAULT_MAX_PROPERTY_COUNT,
        }
    }
}

impl ParserConfig {
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    pub fn accepts_directory_signature(&self, tag: Tag) -> bool {
        self.accepted_directory_signatures.contains(&tag)
    }
}

/// Builder for ParserConfig
#[derive(Default)]
pub struct ParserConfigBuilder {
    accepted_directory_signatures: Option<Vec<Tag>>,
    max_property_count: Option<u32>,
}

impl ParserConfigBuilder {
    /// Replaces the accepted directory identifiers.
    pub fn directory_signatures(mut self, signatures: Vec<Tag>) -> Self {
        self.accepted_directory_signatures = Some(signatures);
        self
    }

    /// Adds one identifier to the accepted set (starting from the default set).
    pub fn accept_directory_signature(mut self, tag: Tag) -> Self {
        let signatures = self
            .accepted_directory_signatures
            .get_or_insert_with(|| ParserConfig::default().accepted_directory_signatures);
        if !signatures.contains(&tag) {
            signatures.push(tag);
        }
        self
    }

    pub fn max_property_count(mut self, max: u32) -> Self {
        self.max_property_count = Some(max);
        self
    }

    pub fn build(self) -> ParserConfig {
        let default = ParserConfig::default();
        ParserConfig {
            accepted_directory_signatures: self
                .accepted_directory_signatures
                .unwrap_or(default.accepted_directory_signatures),
            max_property_count: self.max_property_count.unwrap_or(default.max_property_count),
        }
    }
}
