//! The index of plots shipped with the application.

use std::fmt;

use bevy_ecs::resource::Resource;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::error::PlotError;

/// One region of the official index and its plots, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub plots: Vec<String>,
}

/// The official plots index: region name to plot names.
///
/// Region order is the order of keys in the source document, which a plain map would lose.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficialPlots {
    regions: Vec<Region>,
}

impl OfficialPlots {
    pub fn from_json(json: &str) -> Result<Self, PlotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn plots(&self, region: &str) -> &[String] {
        self.regions
            .iter()
            .find(|r| r.name == region)
            .map(|r| r.plots.as_slice())
            .unwrap_or_default()
    }

    /// The first region and its first plot, if any.
    pub fn first(&self) -> Option<(&str, Option<&str>)> {
        self.regions
            .first()
            .map(|r| (r.name.as_str(), r.plots.first().map(String::as_str)))
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Asset path of an official plot document.
pub fn official_plot_path(region: &str, plot: &str) -> String {
    format!("officialPlots/{region}/{plot}.json")
}

impl<'de> Deserialize<'de> for OfficialPlots {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegionsVisitor;

        impl<'de> Visitor<'de> for RegionsVisitor {
            type Value = OfficialPlots;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of region names to plot name lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut regions = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, plots)) = map.next_entry::<String, Vec<String>>()? {
                    regions.push(Region { name, plots });
                }
                Ok(OfficialPlots { regions })
            }
        }

        deserializer.deserialize_map(RegionsVisitor)
    }
}
