//! Asset Set Loading and Lookup

use crate::error::AssetError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// The reference lists every analysis matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    GivenNames,
    Surnames,
    /// US states/territories and Canadian provinces/territories, names and abbreviations
    States,
    /// Canadian place names
    Canada,
    Cities,
    Counties,
    Zipcodes,
    /// County FIPS codes
    Fips,
}

impl AssetKind {
    /// All kinds, in load order
    pub const ALL: [AssetKind; 8] = [
        AssetKind::GivenNames,
        AssetKind::Surnames,
        AssetKind::States,
        AssetKind::Canada,
        AssetKind::Cities,
        AssetKind::Counties,
        AssetKind::Zipcodes,
        AssetKind::Fips,
    ];

    /// File name of the backing list inside an assets directory
    pub fn file_name(self) -> &'static str {
        match self {
            AssetKind::GivenNames => "given-names",
            AssetKind::Surnames => "surnames",
            AssetKind::States => "states",
            AssetKind::Canada => "canada",
            AssetKind::Cities => "cities",
            AssetKind::Counties => "counties",
            AssetKind::Zipcodes => "zipcodes",
            AssetKind::Fips => "fips",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Immutable set of lower-cased canonical tokens
#[derive(Debug, Clone, Default)]
pub struct AssetSet {
    name: &'static str,
    tokens: HashSet<String>,
}

impl AssetSet {
    /// Build a set from arbitrary tokens, lower-casing each one
    pub fn from_tokens<I, S>(name: &'static str, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .collect();
        Self { name, tokens }
    }

    /// Load a newline-delimited list file.
    ///
    /// Blank lines are skipped and trailing `\r` is stripped. A missing or
    /// unreadable file is an error; there is no empty fallback.
    pub fn load(name: &'static str, path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AssetError::MissingAssetList {
            name,
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::from_tokens(
            name,
            content
                .lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.is_empty()),
        );
        debug!("Loaded asset list '{}' with {} entries", name, set.len());
        Ok(set)
    }

    /// Case-insensitive membership test
    pub fn contains(&self, token: &str) -> bool {
        if self.tokens.contains(token) {
            return true;
        }
        let lowered = token.to_lowercase();
        lowered != token && self.tokens.contains(&lowered)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// The full collection of reference sets, one per [`AssetKind`].
///
/// Constructed once and passed to the analyzer behind an `Arc`; nothing
/// mutates it after construction.
#[derive(Debug, Clone)]
pub struct AssetSets {
    sets: [AssetSet; 8],
}

impl AssetSets {
    /// Load every list from `dir`, failing on the first missing one
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        info!("Loading reference asset lists from {}", dir.display());

        let mut builder = Self::builder();
        for kind in AssetKind::ALL {
            let set = AssetSet::load(kind.file_name(), dir.join(kind.file_name()))?;
            builder = builder.with_set(kind, set);
        }
        Ok(builder.build())
    }

    /// Start building a substitute collection; unset kinds stay empty
    pub fn builder() -> AssetSetsBuilder {
        AssetSetsBuilder::default()
    }

    /// Look up one set
    pub fn get(&self, kind: AssetKind) -> &AssetSet {
        &self.sets[kind.slot()]
    }
}

/// Builder for [`AssetSets`]
#[derive(Debug, Default)]
pub struct AssetSetsBuilder {
    sets: [Option<AssetSet>; 8],
}

impl AssetSetsBuilder {
    /// Supply a prepared set for `kind`
    pub fn with_set(mut self, kind: AssetKind, set: AssetSet) -> Self {
        self.sets[kind.slot()] = Some(set);
        self
    }

    /// Supply `kind` from raw tokens
    pub fn with_tokens<I, S>(self, kind: AssetKind, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = AssetSet::from_tokens(kind.file_name(), tokens);
        self.with_set(kind, set)
    }

    pub fn build(self) -> AssetSets {
        let mut sets = self.sets;
        AssetSets {
            sets: std::array::from_fn(|i| {
                let kind = AssetKind::ALL[i];
                sets[i]
                    .take()
                    .unwrap_or_else(|| AssetSet::from_tokens(kind.file_name(), [""; 0]))
            }),
        }
    }
}
