//! Built-in demo shipment dataset.

use shipment_tracker_core::Shipment;

const DEMO_SHIPMENTS_JSON: &str = include_str!("../../data/demo_shipments.json");

/// Parse the built-in demo shipments.
///
/// # Errors
///
/// Returns an error only if the embedded dataset is malformed.
pub fn demo_shipments() -> Result<Vec<Shipment>, serde_json::Error> {
    serde_json::from_str(DEMO_SHIPMENTS_JSON)
}
