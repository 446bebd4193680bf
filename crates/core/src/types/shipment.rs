//! Shipment tracking records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A milestone in a shipment's journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentEvent {
    /// Milestone name (e.g. "Gate In Full").
    pub name: String,
    /// Local timestamp as reported by the carrier.
    pub timestamp: String,
    /// Where the milestone happened.
    pub location: String,
}

/// A tracked ocean shipment.
///
/// Serialized with camelCase field names to match the tracking UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub booking_number: String,
    pub bl_number: String,
    pub container_number: String,
    pub vessel_name: String,
    pub voyage: String,
    pub current_port: String,
    pub eta: DateTime<Utc>,
    pub status: String,
    /// Milestones in chronological order.
    pub events: Vec<ShipmentEvent>,
}

impl Shipment {
    /// Returns the identifier this shipment carries for `kind`.
    #[must_use]
    pub fn identifier(&self, kind: SearchKind) -> &str {
        match kind {
            SearchKind::Container => &self.container_number,
            SearchKind::BillOfLading => &self.bl_number,
            SearchKind::Booking => &self.booking_number,
        }
    }
}

/// Error returned when a string does not name a search kind.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid search type: {0}")]
pub struct ParseSearchKindError(pub String);

/// Identifier scheme used to look up a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    /// Container number (e.g. `MSCU1234567`).
    #[serde(rename = "container")]
    Container,
    /// Bill of lading number.
    #[serde(rename = "bl")]
    BillOfLading,
    /// Carrier booking number.
    #[serde(rename = "booking")]
    Booking,
}

impl std::str::FromStr for SearchKind {
    type Err = ParseSearchKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "container" => Ok(Self::Container),
            "bl" => Ok(Self::BillOfLading),
            "booking" => Ok(Self::Booking),
            _ => Err(ParseSearchKindError(s.to_owned())),
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Container => f.write_str("container"),
            Self::BillOfLading => f.write_str("bl"),
            Self::Booking => f.write_str("booking"),
        }
    }
}
