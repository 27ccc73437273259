//! Searchable addresses taken from `addr:*` and `name` tags

use serde::{Deserialize, Serialize};

use crate::model::Tags;

/// OSM element an address was read from. Node and way ids live in separate
/// id spaces, so the kind is part of an address's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsmKind {
    Node,
    Way,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub kind: OsmKind,
    pub osm_id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Address {
    /// `None` when the tags carry neither an `addr:*` part nor a `name`
    pub fn from_tags(
        kind: OsmKind,
        osm_id: i64,
        lat: f64,
        lon: f64,
        tags: &Tags,
    ) -> Option<Self> {
        let get = |key: &str| {
            tags.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let address = Self {
            kind,
            osm_id,
            lat,
            lon,
            housenumber: get("addr:housenumber"),
            street: get("addr:street"),
            city: get("addr:city"),
            postcode: get("addr:postcode"),
            country: get("addr:country"),
            suburb: get("addr:suburb"),
            state: get("addr:state"),
            province: get("addr:province"),
            floor: get("addr:floor"),
            name: get("name"),
        };

        let has_fields = address.fields().next().is_some();
        has_fields.then_some(address)
    }

    /// Text parts in display order, empty ones skipped
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        [
            &self.name,
            &self.street,
            &self.housenumber,
            &self.floor,
            &self.postcode,
            &self.city,
            &self.suburb,
            &self.state,
            &self.province,
            &self.country,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref())
    }
}
