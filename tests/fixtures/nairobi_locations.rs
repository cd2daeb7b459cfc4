//! Nairobi locations for realistic test fixtures.
//!
//! Approximate coordinates of well-known neighbourhood landmarks.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub locality: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, locality: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, locality, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Depot
// ============================================================================

pub const CBD_WAREHOUSE: Location = Location::new("CBD Warehouse", "CBD", -1.2921, 36.8219);

// ============================================================================
// Customer drop-offs
// ============================================================================

pub const DROP_OFFS: &[Location] = &[
    Location::new("Sarit Centre", "Westlands", -1.2610, 36.8027),
    Location::new("Westgate Mall", "Westlands", -1.2571, 36.8030),
    Location::new("Yaya Centre", "Kilimani", -1.2925, 36.7873),
    Location::new("Prestige Plaza", "Kilimani", -1.3001, 36.7865),
    Location::new("Junction Mall", "Dagoretti", -1.2985, 36.7622),
    Location::new("Karen Crossroads", "Karen", -1.3197, 36.7076),
    Location::new("Galleria Mall", "Langata", -1.3385, 36.7655),
    Location::new("Capital Centre", "South B", -1.3133, 36.8363),
    Location::new("Garden City", "Kasarani", -1.2325, 36.8786),
    Location::new("Two Rivers", "Gigiri", -1.2105, 36.7957),
    Location::new("Village Market", "Gigiri", -1.2290, 36.8049),
    Location::new("Thika Road Mall", "Roysambu", -1.2195, 36.8886),
];
