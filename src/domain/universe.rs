//! Asset universe.
//!
//! The universe fixes the dimension n and the index-to-asset mapping used by
//! every vector and matrix in a run. Index i always refers to the same asset.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUniverse {
    assets: Vec<String>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UniverseError {
    #[error("empty token in asset list")]
    EmptyToken,

    #[error("duplicate asset: {0}")]
    DuplicateAsset(String),

    #[error("asset list is empty")]
    Empty,
}

impl AssetUniverse {
    pub fn new(assets: Vec<String>) -> Result<Self, UniverseError> {
        if assets.is_empty() {
            return Err(UniverseError::Empty);
        }
        let mut seen = HashSet::new();
        for asset in &assets {
            if asset.trim().is_empty() {
                return Err(UniverseError::EmptyToken);
            }
            if !seen.insert(asset.as_str()) {
                return Err(UniverseError::DuplicateAsset(asset.clone()));
            }
        }
        Ok(Self { assets })
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.assets.get(index).map(String::as_str)
    }

    pub fn index_of(&self, asset: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == asset)
    }
}

/// Parse a comma-separated asset list, keeping the given order.
///
/// Names are trimmed but otherwise kept verbatim since they double as file stems.
pub fn parse_assets(input: &str) -> Result<AssetUniverse, UniverseError> {
    let mut assets = Vec::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        assets.push(trimmed.to_string());
    }
    AssetUniverse::new(assets)
}
