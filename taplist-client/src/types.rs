//! Brewery listing data types

use serde::{Deserialize, Serialize};

/// One brewery record as returned by the listing endpoint.
///
/// The service sends more fields than these; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brewery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state_province: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub address_1: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Aggregate metadata from the `/meta` endpoint.
///
/// The service reports all three counters as JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingMeta {
    pub total: String,
    pub page: String,
    pub per_page: String,
}

impl ListingMeta {
    /// Parsed total count, `None` when the reported value is not a number
    pub fn total_count(&self) -> Option<u64> {
        self.total.parse().ok()
    }
}

/// Render-ready row projected from a [`Brewery`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreweryRow {
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub address: String,
    pub phone: Option<String>,
}

impl From<&Brewery> for BreweryRow {
    fn from(brewery: &Brewery) -> Self {
        // Empty and missing address parts are skipped rather than joined blindly.
        let address = [
            brewery.street.as_deref(),
            brewery.address_1.as_deref(),
            Some(brewery.state_province.as_str()),
            Some(brewery.state.as_str()),
            Some(brewery.postal_code.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        Self {
            name: brewery.name.clone(),
            city: brewery.city.clone(),
            state: brewery.state.clone(),
            country: brewery.country.clone(),
            address,
            phone: brewery.phone.clone(),
        }
    }
}

/// Denormalized table projection combining the list response with the meta total
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreweryTable {
    pub total: u64,
    pub rows: Vec<BreweryRow>,
}

impl BreweryTable {
    /// Project a list response into rows.
    ///
    /// `meta_total` wins when known; otherwise the list length stands in.
    pub fn project(list: &[Brewery], meta_total: Option<u64>) -> Self {
        Self {
            total: meta_total.unwrap_or(list.len() as u64),
            rows: list.iter().map(BreweryRow::from).collect(),
        }
    }
}

/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Right,
}

/// Header descriptor for one table column
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Sort key sent to the service for sortable columns
    pub id: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub align: ColumnAlign,
}

/// The columns the listing table renders, in display order
pub const COLUMNS: [Column; 6] = [
    Column { id: "serial", label: "Serial No.", sortable: false, align: ColumnAlign::Right },
    Column { id: "name", label: "Name", sortable: true, align: ColumnAlign::Left },
    Column { id: "city", label: "City", sortable: true, align: ColumnAlign::Left },
    Column { id: "state", label: "State", sortable: false, align: ColumnAlign::Left },
    Column { id: "country", label: "Country", sortable: true, align: ColumnAlign::Left },
    Column { id: "address", label: "Address", sortable: false, align: ColumnAlign::Left },
];
