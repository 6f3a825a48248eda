use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::geo::{search_radius_degrees, Location};
use crate::graph::{Connection, ProximitySource};
use crate::spatial::SpatialIndex;

/// Stable airport identifier taken from the location dataset.
pub type AirportId = String;

/// Airport with its human-readable codes and location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub id: AirportId,
    /// Three-letter code, absent when the dataset carries the null marker.
    pub iata: Option<String>,
    /// Four-letter code, absent when the dataset carries the null marker.
    pub icao: Option<String>,
    pub name: String,
    pub location: Location,
}

impl Airport {
    /// Three-letter code, falling back to the four-letter code and finally the
    /// raw identifier.
    pub fn display_code(&self) -> &str {
        non_empty(&self.iata)
            .or_else(|| non_empty(&self.icao))
            .unwrap_or(self.id.as_str())
    }

    fn codes(&self) -> impl Iterator<Item = &str> {
        non_empty(&self.iata).into_iter().chain(non_empty(&self.icao))
    }
}

fn non_empty(code: &Option<String>) -> Option<&str> {
    code.as_deref().filter(|code| !code.is_empty())
}

/// Identity resolution and proximity queries over the static airport set.
///
/// Airports are kept in input order; the spatial index answers with positions
/// into that order.
pub struct AirportIndex {
    airports: Vec<Airport>,
    by_code: HashMap<String, usize>,
    by_id: HashMap<AirportId, usize>,
    spatial: SpatialIndex,
}

impl AirportIndex {
    /// Register every airport by lower-cased code and by identifier, then
    /// build the spatial index.
    ///
    /// Codes are not checked for uniqueness; a duplicated code resolves to the
    /// airport registered last.
    pub fn build(airports: Vec<Airport>) -> Self {
        let mut by_code = HashMap::new();
        let mut by_id = HashMap::new();

        for (position, airport) in airports.iter().enumerate() {
            for code in airport.codes() {
                by_code.insert(code.to_lowercase(), position);
            }
            by_id.insert(airport.id.clone(), position);
        }

        let spatial = SpatialIndex::build(airports.iter().map(|airport| airport.location));

        info!(
            airports = airports.len(),
            codes = by_code.len(),
            "built airport index"
        );

        Self {
            airports,
            by_code,
            by_id,
            spatial,
        }
    }

    /// Number of loaded airports.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Returns true if no airports are loaded.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Number of distinct registered codes.
    pub fn code_count(&self) -> usize {
        self.by_code.len()
    }

    /// Airports in input order.
    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    /// Case-insensitive exact code lookup.
    pub fn by_code(&self, code: &str) -> Option<&Airport> {
        self.by_code
            .get(&code.to_lowercase())
            .map(|&position| &self.airports[position])
    }

    /// Lookup by internal identifier.
    pub fn by_id(&self, id: &str) -> Option<&Airport> {
        self.by_id
            .get(id)
            .map(|&position| &self.airports[position])
    }

    /// Display code for an identifier; never fails.
    ///
    /// Degrades from the three-letter code to the four-letter code to the raw
    /// identifier, which is also returned for unknown identifiers.
    pub fn code_for_id<'a>(&'a self, id: &'a str) -> &'a str {
        self.by_id(id).map(Airport::display_code).unwrap_or(id)
    }

    /// Ground connections from `target` to every other airport within
    /// `max_distance_km` great-circle kilometres.
    pub fn proximity_edges(
        &self,
        target: &Airport,
        max_distance_km: f64,
    ) -> BTreeMap<AirportId, Connection> {
        if max_distance_km < 0.0 {
            return BTreeMap::new();
        }

        let radius = search_radius_degrees(max_distance_km, target.location.latitude);
        self.spatial
            .within(target.location, radius)
            .into_iter()
            .map(|position| &self.airports[position])
            .filter(|candidate| candidate.id != target.id)
            .filter_map(|candidate| {
                let distance = target.location.distance_to(&candidate.location);
                (distance <= max_distance_km)
                    .then(|| (candidate.id.clone(), Connection::proximity(distance)))
            })
            .collect()
    }
}

impl ProximitySource for AirportIndex {
    fn proximity_edges(
        &self,
        airport_id: &str,
        max_distance_km: f64,
    ) -> Option<BTreeMap<AirportId, Connection>> {
        self.by_id(airport_id)
            .map(|airport| AirportIndex::proximity_edges(self, airport, max_distance_km))
    }
}

impl std::fmt::Debug for AirportIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirportIndex")
            .field("airports", &self.airports.len())
            .field("codes", &self.by_code.len())
            .finish()
    }
}
