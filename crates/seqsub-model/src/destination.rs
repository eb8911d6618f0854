//! Submission destinations and the per-run selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A submission target.
///
/// `Shared` is the generic table every run produces; the other three are
/// selected per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    BioSample,
    Sra,
    Gisaid,
    Shared,
}

impl Destination {
    /// Optional destinations in merge priority order.
    pub const OPTIONAL: [Destination; 3] =
        [Destination::BioSample, Destination::Sra, Destination::Gisaid];

    /// Processing order for a full run.
    pub const ALL: [Destination; 4] = [
        Destination::BioSample,
        Destination::Sra,
        Destination::Gisaid,
        Destination::Shared,
    ];

    /// Short tag used in the static metadata `db` column and on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            Destination::BioSample => "bs",
            Destination::Sra => "sra",
            Destination::Gisaid => "gs",
            Destination::Shared => "gen",
        }
    }

    /// Prefix applied to every column of the destination's output table.
    pub fn column_prefix(self) -> &'static str {
        match self {
            Destination::BioSample => "bs-",
            Destination::Sra => "sra-",
            Destination::Gisaid => "gs-",
            Destination::Shared => "",
        }
    }

    /// Column of the repository column map holding this destination's names.
    pub fn map_column(self) -> &'static str {
        match self {
            Destination::BioSample => "biosample",
            Destination::Sra => "sra",
            Destination::Gisaid => "gisaid",
            Destination::Shared => "gen",
        }
    }

    /// File name of the destination's filtered table.
    pub fn table_file_name(self) -> &'static str {
        match self {
            Destination::BioSample => "biosample_table.csv",
            Destination::Sra => "sra_table.csv",
            Destination::Gisaid => "gisaid_table.csv",
            Destination::Shared => "shared_table.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Destination::BioSample => "BioSample",
            Destination::Sra => "SRA",
            Destination::Gisaid => "GISAID",
            Destination::Shared => "Shared",
        }
    }

    /// Column name with the destination prefix applied.
    pub fn prefixed(self, column: &str) -> String {
        format!("{}{column}", self.column_prefix())
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Destination::ALL
            .into_iter()
            .find(|destination| destination.tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Destination {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Destination::from_tag(s).ok_or_else(|| ModelError::UnknownDestination(s.to_string()))
    }
}

/// The optional destinations selected for a run, kept in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationSelection {
    destinations: Vec<Destination>,
}

impl DestinationSelection {
    /// Builds a selection from destinations in any order; duplicates and
    /// `Shared` are ignored.
    pub fn new<I>(destinations: I) -> Self
    where
        I: IntoIterator<Item = Destination>,
    {
        let requested: Vec<Destination> = destinations.into_iter().collect();
        let destinations = Destination::OPTIONAL
            .into_iter()
            .filter(|candidate| requested.contains(candidate))
            .collect();
        Self { destinations }
    }

    /// Every optional destination.
    pub fn all() -> Self {
        Self::new(Destination::OPTIONAL)
    }

    /// Parses tags such as `["bs", "sra"]`.
    pub fn from_tags<I, S>(tags: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut destinations = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() {
                continue;
            }
            destinations.push(tag.parse::<Destination>()?);
        }
        Ok(Self::new(destinations))
    }

    pub fn contains(&self, destination: Destination) -> bool {
        destination == Destination::Shared || self.destinations.contains(&destination)
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Selected optional destinations in priority order.
    pub fn optional(&self) -> &[Destination] {
        &self.destinations
    }

    /// Selected destinations followed by `Shared`, in processing order.
    pub fn processing_order(&self) -> Vec<Destination> {
        let mut order = self.destinations.clone();
        order.push(Destination::Shared);
        order
    }
}
