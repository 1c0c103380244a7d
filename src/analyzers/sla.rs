//! SLA tiers and the multi-location derivation rule

use serde::{Deserialize, Serialize};
use std::fmt;

/// Published availability SLA, ordered from least to most available
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sla {
    #[serde(rename = "99.9%")]
    ThreeNines,
    #[serde(rename = "99.95%")]
    ThreeNinesFive,
    #[serde(rename = "99.99%")]
    FourNines,
    #[serde(rename = "99.995%")]
    FourNinesFive,
    #[serde(rename = "99.999%")]
    FiveNines,
}

impl Sla {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThreeNines => "99.9%",
            Self::ThreeNinesFive => "99.95%",
            Self::FourNines => "99.99%",
            Self::FourNinesFive => "99.995%",
            Self::FiveNines => "99.999%",
        }
    }
}

impl fmt::Display for Sla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier table for services replicated across several regions, each region
/// individually zone-redundant or not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiLocationTiers {
    /// No location is zone-redundant
    pub baseline: Sla,
    /// At least one location is zone-redundant
    pub zone_redundant: Sla,
    /// Every location is zone-redundant and there are at least two
    pub multi_region_zone_redundant: Sla,
}

/// Outcome of [`MultiLocationTiers::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationSla {
    pub sla: Sla,
    /// At least one location is zone-redundant
    pub availability_zones: bool,
}

impl MultiLocationTiers {
    /// Derive the tier from the zone-redundancy flag of every configured
    /// location.
    ///
    /// The top tier is all-or-nothing: one non-redundant location caps the
    /// result at `zone_redundant`, and so does a lone redundant location.
    pub fn evaluate<I>(&self, locations: I) -> LocationSla
    where
        I: IntoIterator<Item = bool>,
    {
        let mut sla = self.baseline;
        let mut availability_zones = false;
        let mut missing_zone_redundancy = false;
        let mut location_count = 0usize;

        for zone_redundant in locations {
            location_count += 1;
            if zone_redundant {
                availability_zones = true;
                sla = self.zone_redundant;
            } else {
                missing_zone_redundancy = true;
            }
        }

        if availability_zones && location_count >= 2 && !missing_zone_redundancy {
            sla = self.multi_region_zone_redundant;
        }

        LocationSla {
            sla,
            availability_zones,
        }
    }
}
