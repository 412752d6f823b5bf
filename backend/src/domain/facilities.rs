//! Health facility reference data and nearest-facility resolution.
//!
//! Used by the escalation path after a symptomatic response: precise
//! coordinates win, then the per-LGA default, then a generic recommendation.

use super::geo::Coordinates;

/// Static reference record for one facility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthFacility {
    pub name: &'static str,
    pub address: &'static str,
    /// LGA this facility is the default referral for
    pub lga: &'static str,
    pub coordinates: Option<Coordinates>,
}

/// Fallback advice when no facility can be resolved at all.
pub const GENERIC_RECOMMENDATION: &str =
    "Please visit your nearest primary health center for a check-up as soon as you can.";

static FACILITIES: &[HealthFacility] = &[
    HealthFacility {
        name: "Kano General Hospital",
        address: "Bompai Road, Kano",
        lga: "kano",
        coordinates: Some(Coordinates { lat: 12.0100, lon: 8.5470 }),
    },
    HealthFacility {
        name: "Murtala Muhammed Specialist Hospital",
        address: "Kofar Mata Road, Kano Municipal",
        lga: "kano municipal",
        coordinates: Some(Coordinates { lat: 11.9964, lon: 8.5167 }),
    },
    HealthFacility {
        name: "Lagos Island General Hospital",
        address: "Broad Street, Lagos Island",
        lga: "lagos",
        coordinates: Some(Coordinates { lat: 6.4549, lon: 3.3903 }),
    },
    HealthFacility {
        name: "General Hospital Ikeja",
        address: "Opebi Link Road, Ikeja",
        lga: "ikeja",
        coordinates: Some(Coordinates { lat: 6.5966, lon: 3.3515 }),
    },
    HealthFacility {
        name: "National Hospital Abuja",
        address: "Plot 132 Central District, Abuja",
        lga: "abuja",
        coordinates: Some(Coordinates { lat: 9.0397, lon: 7.4823 }),
    },
    HealthFacility {
        name: "Benue State University Teaching Hospital",
        address: "Gboko Road, Makurdi",
        lga: "makurdi",
        coordinates: Some(Coordinates { lat: 7.7080, lon: 8.5500 }),
    },
    HealthFacility {
        name: "University of Maiduguri Teaching Hospital",
        address: "Bama Road, Maiduguri",
        lga: "maiduguri",
        coordinates: Some(Coordinates { lat: 11.8136, lon: 13.1208 }),
    },
    HealthFacility {
        name: "University of Port Harcourt Teaching Hospital",
        address: "East-West Road, Port Harcourt",
        lga: "port harcourt",
        coordinates: Some(Coordinates { lat: 4.9018, lon: 6.9226 }),
    },
    HealthFacility {
        name: "ESUT Teaching Hospital Parklane",
        address: "Park Avenue, GRA, Enugu",
        lga: "enugu north",
        coordinates: Some(Coordinates { lat: 6.4502, lon: 7.5010 }),
    },
    HealthFacility {
        name: "Jos University Teaching Hospital",
        address: "Lamingo, Jos North",
        lga: "jos north",
        coordinates: Some(Coordinates { lat: 9.9333, lon: 8.8910 }),
    },
    // Referral desk entry without surveyed coordinates; reachable only via
    // the per-LGA default path.
    HealthFacility {
        name: "Specialist Hospital Sokoto",
        address: "Sultan Abubakar Road, Sokoto",
        lga: "sokoto",
        coordinates: None,
    },
];

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Closest facility with surveyed coordinates to the given point.
pub fn nearest(point: Coordinates) -> Option<&'static HealthFacility> {
    FACILITIES
        .iter()
        .filter_map(|f| f.coordinates.map(|c| (f, haversine_km(point, c))))
        .min_by(|a, b| a.1.partial_cmp(&b.1).expect("haversine distances are finite"))
        .map(|(f, _)| f)
}

/// Default referral facility for an LGA (normalized lookup), if one exists.
pub fn default_for_lga(lga: &str) -> Option<&'static HealthFacility> {
    let key = lga.trim().to_lowercase();
    FACILITIES.iter().find(|f| f.lga == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_picks_the_closest_facility() {
        // A point in central Kano should resolve to a Kano facility, not Lagos.
        let facility = nearest(Coordinates { lat: 12.00, lon: 8.55 }).unwrap();
        assert!(facility.name.contains("Kano") || facility.address.contains("Kano"));
    }

    #[test]
    fn nearest_skips_facilities_without_coordinates() {
        // Right on top of the Sokoto entry, which has no survey point; the
        // resolver must return some other facility instead of panicking.
        let facility = nearest(Coordinates { lat: 13.0059, lon: 5.2476 }).unwrap();
        assert_ne!(facility.name, "Specialist Hospital Sokoto");
    }

    #[test]
    fn lga_default_is_normalized() {
        assert_eq!(default_for_lga("  KANO ").unwrap().name, "Kano General Hospital");
        assert_eq!(
            default_for_lga("Port Harcourt").unwrap().name,
            "University of Port Harcourt Teaching Hospital"
        );
    }

    #[test]
    fn unknown_lga_has_no_default() {
        assert!(default_for_lga("Atlantis").is_none());
    }

    #[test]
    fn haversine_is_zero_for_identical_points() {
        let p = Coordinates { lat: 9.0, lon: 7.0 };
        assert!(haversine_km(p, p) < 1e-9);
    }
}
