//! Static catalog of supported cities and their dataset capabilities.

use std::path::{Path, PathBuf};

use crate::error::ExploreError;

/// Capability descriptor for one city's dataset.
///
/// `has_demographics` declares whether the CSV carries the optional
/// `Gender` and `Birth Year` columns. The stats engine branches on this
/// flag, never on the city name itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CityInfo {
    pub slug: &'static str,
    pub file_name: &'static str,
    pub has_demographics: bool,
}

static CITIES: &[CityInfo] = &[
    CityInfo {
        slug: "chicago",
        file_name: "chicago.csv",
        has_demographics: true,
    },
    CityInfo {
        slug: "new york city",
        file_name: "new_york_city.csv",
        has_demographics: true,
    },
    CityInfo {
        slug: "washington",
        file_name: "washington.csv",
        has_demographics: false,
    },
];

/// Resolves city identifiers to their source CSV under a data directory.
#[derive(Debug, Clone)]
pub struct Registry {
    data_dir: PathBuf,
}

impl Registry {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Registry {
            data_dir: data_dir.into(),
        }
    }

    /// Looks up a city by identifier, case-insensitively and ignoring
    /// surrounding whitespace.
    pub fn resolve(&self, city: &str) -> Result<&'static CityInfo, ExploreError> {
        let wanted = city.trim().to_lowercase();
        CITIES
            .iter()
            .find(|c| c.slug == wanted)
            .ok_or(ExploreError::UnknownCity { name: wanted })
    }

    /// Path of the city's source CSV inside the configured data directory.
    pub fn source_path(&self, info: &CityInfo) -> PathBuf {
        self.data_dir.join(info.file_name)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Supported identifiers, for prompts and error messages.
    pub fn cities() -> impl Iterator<Item = &'static str> {
        CITIES.iter().map(|c| c.slug)
    }
}
