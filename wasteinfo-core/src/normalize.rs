//! Mapping from provider place records to waste centers.

use crate::model::{NOT_AVAILABLE, OpeningHours, OpeningStatus, PlaceRecord, WasteCenter};

const NO_DESCRIPTION: &str = "No additional description available";

impl WasteCenter {
    /// Normalize one place into the client-facing shape.
    #[must_use]
    pub fn from_place(place: &PlaceRecord) -> Self {
        Self {
            name: place
                .name
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            address: place
                .vicinity
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            // Phone numbers need a separate place details lookup.
            contact: NOT_AVAILABLE.to_owned(),
            opening_hours: opening_status(place.opening_hours.as_ref()),
            description: describe(place),
        }
    }
}

impl From<&PlaceRecord> for WasteCenter {
    fn from(place: &PlaceRecord) -> Self {
        Self::from_place(place)
    }
}

/// Opening state derived from an optional hours block.
#[must_use]
pub fn opening_status(hours: Option<&OpeningHours>) -> OpeningStatus {
    match hours {
        None => OpeningStatus::NotAvailable,
        Some(OpeningHours {
            open_now: Some(true),
        }) => OpeningStatus::OpenNow,
        Some(_) => OpeningStatus::ClosedNow,
    }
}

/// Category tags followed by the address, joined by `", "`.
#[must_use]
pub fn describe(place: &PlaceRecord) -> String {
    let mut parts: Vec<String> = place.types.clone();

    if let Some(vicinity) = place.vicinity.as_deref() {
        parts.push(format!("Located at: {vicinity}"));
    }

    if parts.is_empty() {
        return NO_DESCRIPTION.to_owned();
    }

    parts.join(", ")
}
