//! Great-circle navigation mathematics.
//!
//! This module provides the geodesic primitives used to derive kinematic
//! data from raw GPS positions. Functions use a spherical earth
//! approximation with double-precision trigonometry.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Heading: degrees true (0-360, 0=north, 90=east)
//! - Distance: kilometers

use std::f64::consts::PI;

/// Earth's mean radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees conversion factor.
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Conversion factor: kilometers to nautical miles.
///
/// Dividing a distance in kilometers flown over an elapsed time in hours
/// by this factor's reciprocal yields groundspeed in knots.
pub const KM_TO_NM: f64 = 0.539957;

/// Calculate the great-circle distance between two positions.
///
/// Uses the haversine formula, which is numerically stable for the short
/// to medium distances seen between consecutive telemetry samples.
/// Symmetric in its arguments; returns 0 for identical points.
///
/// # Arguments
///
/// * `lat1`, `lon1` - First position in decimal degrees
/// * `lat2`, `lon2` - Second position in decimal degrees
///
/// # Returns
///
/// Distance in kilometers.
///
/// # Example
///
/// ```
/// use skylog::geo::distance_km;
///
/// // One degree of longitude on the equator is ~111 km
/// let dist = distance_km(0.0, 0.0, 0.0, 1.0);
/// assert!((dist - 111.2).abs() < 1.0);
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let delta_lat = (lat2 - lat1) * DEG_TO_RAD;
    let delta_lon = (lon2 - lon1) * DEG_TO_RAD;

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Calculate the initial bearing from one position to another.
///
/// Returns the forward azimuth along the great circle from the first
/// point to the second. Uses the spherical earth model.
///
/// # Arguments
///
/// * `lat1`, `lon1` - Starting position in decimal degrees
/// * `lat2`, `lon2` - Ending position in decimal degrees
///
/// # Returns
///
/// Bearing in degrees (0-360, 0=north, 90=east).
///
/// # Example
///
/// ```
/// use skylog::geo::true_heading_deg;
///
/// // Heading from the origin to a point due east
/// let heading = true_heading_deg(0.0, 0.0, 0.0, 1.0);
/// assert!((heading - 90.0).abs() < 0.1);
/// ```
pub fn true_heading_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1 * DEG_TO_RAD;
    let lat2_rad = lat2 * DEG_TO_RAD;
    let delta_lon = (lon2 - lon1) * DEG_TO_RAD;

    let x = delta_lon.sin() * lat2_rad.cos();
    let y = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    let bearing_rad = x.atan2(y);
    normalize_heading(bearing_rad * RAD_TO_DEG)
}

/// Normalize a heading to the range [0, 360) degrees.
///
/// Handles negative headings and values >= 360 by wrapping appropriately.
///
/// # Example
///
/// ```
/// use skylog::geo::normalize_heading;
///
/// assert_eq!(normalize_heading(0.0), 0.0);
/// assert_eq!(normalize_heading(360.0), 0.0);
/// assert_eq!(normalize_heading(-90.0), 270.0);
/// ```
pub fn normalize_heading(heading: f64) -> f64 {
    let mut h = heading % 360.0;
    if h < 0.0 {
        h += 360.0;
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== distance_km tests ====================

    #[test]
    fn test_distance_zero_for_identical_points() {
        let dist = distance_km(45.0, -122.0, 45.0, -122.0);
        assert!(dist.abs() < 1e-9, "Same point should have zero distance");
    }

    #[test]
    fn test_distance_symmetry() {
        let dist_ab = distance_km(45.0, -122.0, 46.0, -121.0);
        let dist_ba = distance_km(46.0, -121.0, 45.0, -122.0);

        assert!(
            (dist_ab - dist_ba).abs() < 1e-9,
            "Distance should be symmetric"
        );
    }

    #[test]
    fn test_distance_one_degree_longitude_at_equator() {
        // One degree of longitude on the equator is ~111.2 km
        let dist = distance_km(0.0, 0.0, 0.0, 1.0);
        assert!(
            (dist - 111.2).abs() / 111.2 < 0.01,
            "1° lon at equator should be ~111 km, got {}",
            dist
        );
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        // One degree of latitude is ~111.2 km anywhere
        let dist = distance_km(45.0, 10.0, 46.0, 10.0);
        assert!(
            (dist - 111.2).abs() < 1.5,
            "1° lat should be ~111 km, got {}",
            dist
        );
    }

    #[test]
    fn test_distance_hamburg_to_toulouse() {
        // EDDH (Hamburg) to LFBO (Toulouse) is approximately 1,280 km
        let dist = distance_km(53.630278, 9.988333, 43.629444, 1.363889);
        assert!(
            (dist - 1280.0).abs() < 30.0,
            "Expected ~1280 km, got {}",
            dist
        );
    }

    #[test]
    fn test_distance_short_hop() {
        // Two points ~1 km apart (0.009° of latitude)
        let dist = distance_km(47.0, 8.0, 47.009, 8.0);
        assert!((dist - 1.0).abs() < 0.05, "Expected ~1 km, got {}", dist);
    }

    // ==================== true_heading_deg tests ====================

    #[test]
    fn test_heading_north() {
        let heading = true_heading_deg(0.0, 0.0, 1.0, 0.0);
        assert!(
            heading < 0.5 || heading > 359.5,
            "Due north should be ~0°, got {}",
            heading
        );
    }

    #[test]
    fn test_heading_east() {
        let heading = true_heading_deg(0.0, 0.0, 0.0, 1.0);
        assert!(
            (heading - 90.0).abs() < 0.5,
            "Due east should be ~90°, got {}",
            heading
        );
    }

    #[test]
    fn test_heading_south() {
        let heading = true_heading_deg(1.0, 0.0, 0.0, 0.0);
        assert!(
            (heading - 180.0).abs() < 0.5,
            "Due south should be ~180°, got {}",
            heading
        );
    }

    #[test]
    fn test_heading_west() {
        let heading = true_heading_deg(0.0, 0.0, 0.0, -1.0);
        assert!(
            (heading - 270.0).abs() < 0.5,
            "Due west should be ~270°, got {}",
            heading
        );
    }

    #[test]
    fn test_heading_always_in_range() {
        let points = [
            (0.0, 0.0, 1.0, 1.0),
            (53.6, 9.9, 43.6, 1.4),
            (-33.9, 151.2, -37.8, 144.9),
            (40.6, -73.8, 33.9, -118.4),
        ];
        for (lat1, lon1, lat2, lon2) in points {
            let heading = true_heading_deg(lat1, lon1, lat2, lon2);
            assert!(
                (0.0..360.0).contains(&heading),
                "Heading {} out of [0, 360)",
                heading
            );
        }
    }

    // ==================== normalize_heading tests ====================

    #[test]
    fn test_normalize_heading_valid_range() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert_eq!(normalize_heading(90.0), 90.0);
        assert_eq!(normalize_heading(180.0), 180.0);
        assert_eq!(normalize_heading(270.0), 270.0);
    }

    #[test]
    fn test_normalize_heading_negative() {
        assert!((normalize_heading(-1.0) - 359.0).abs() < 1e-9);
        assert!((normalize_heading(-90.0) - 270.0).abs() < 1e-9);
        assert!((normalize_heading(-180.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_heading_overflow() {
        assert!((normalize_heading(360.0) - 0.0).abs() < 1e-9);
        assert!((normalize_heading(450.0) - 90.0).abs() < 1e-9);
        assert!((normalize_heading(720.0) - 0.0).abs() < 1e-9);
    }

    // ==================== conversion constant tests ====================

    #[test]
    fn test_km_to_nm_constant() {
        // 1852 m per nautical mile
        assert!((KM_TO_NM - 1.0 / 1.852).abs() < 1e-4);
    }
}
