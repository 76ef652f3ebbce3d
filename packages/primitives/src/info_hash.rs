use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fingerprint the tracker assigns to a torrent.
///
/// The dashboard does not interpret it. The tracker usually returns a 40
/// characters hex string (`BitTorrent` info hash v1) but any non-empty value
/// is accepted and sent back verbatim when asking for the torrent peers or
/// for the torrent file.
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Debug, Display)]
#[serde(transparent)]
pub struct InfoHash(String);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConversionError {
    #[error("an info-hash can't be empty")]
    Empty,
}

impl InfoHash {
    /// # Errors
    ///
    /// Will return an error if the value is empty or only contains whitespace.
    pub fn new(value: &str) -> Result<Self, ConversionError> {
        let value = value.trim();

        if value.is_empty() {
            return Err(ConversionError::Empty);
        }

        Ok(Self(value.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for InfoHash {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for InfoHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
