//! Candidate grid around a base location.
//!
//! A fixed 9×9 lattice: offsets of -2 to 2 in half-unit steps, each unit
//! [`STEP_DEG`], so a ±1° box at quarter-degree spacing. Distances use a
//! flat-earth approximation with a fixed miles-per-degree for each axis.

/// Grid offsets in step units, applied to both axes.
const OFFSETS: [f64; 9] = [-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0];

/// Degrees per offset unit.
pub const STEP_DEG: f64 = 0.5;

/// Miles per degree of latitude.
pub const MILES_PER_DEG_LAT: f64 = 69.0;

/// Miles per degree of longitude (about 38°N).
pub const MILES_PER_DEG_LON: f64 = 54.6;

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// One candidate location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Latitude offset from base (degrees)
    pub delta_lat: f64,
    /// Longitude offset from base (degrees)
    pub delta_lon: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_miles: f64,
}

impl GridCell {
    /// 8-point compass bearing from the base location.
    #[must_use]
    pub fn bearing(&self) -> &'static str {
        compass_bearing(self.delta_lat, self.delta_lon)
    }
}

/// Planar distance (miles) for a degree offset.
#[must_use]
pub fn planar_distance_miles(delta_lat: f64, delta_lon: f64) -> f64 {
    (delta_lat * MILES_PER_DEG_LAT).hypot(delta_lon * MILES_PER_DEG_LON)
}

/// 8-point compass bearing of a degree offset, north = 0°.
///
/// The zero offset reports `N`.
#[must_use]
pub fn compass_bearing(delta_lat: f64, delta_lon: f64) -> &'static str {
    let degrees = delta_lon.atan2(delta_lat).to_degrees();
    let sector = ((degrees + 360.0 + 22.5) % 360.0 / 45.0) as usize;
    COMPASS[sector.min(COMPASS.len() - 1)]
}

/// Cells within `radius_miles` of the base, latitude-offset major.
#[must_use]
pub fn grid_cells(base_latitude: f64, base_longitude: f64, radius_miles: f64) -> Vec<GridCell> {
    OFFSETS
        .iter()
        .flat_map(|&lat_offset| OFFSETS.iter().map(move |&lon_offset| (lat_offset, lon_offset)))
        .filter_map(|(lat_offset, lon_offset)| {
            let delta_lat = lat_offset * STEP_DEG;
            let delta_lon = lon_offset * STEP_DEG;
            let distance_miles = planar_distance_miles(delta_lat, delta_lon);
            (distance_miles <= radius_miles).then_some(GridCell {
                delta_lat,
                delta_lon,
                latitude: base_latitude + delta_lat,
                longitude: base_longitude + delta_lon,
                distance_miles,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn full_grid_fits_in_default_radius() {
        // corner: hypot(69, 54.6) ≈ 88 mi
        let cells = grid_cells(38.0, -98.0, 150.0);
        assert_eq!(cells.len(), 81);
        assert_relative_eq!(cells[0].latitude, 37.0);
        assert_relative_eq!(cells[0].longitude, -99.0);
        assert_relative_eq!(cells[1].longitude, -98.75);
        assert_relative_eq!(cells[80].latitude, 39.0);
    }

    #[test]
    fn radius_filters_cells() {
        let cells = grid_cells(38.0, -98.0, 0.0);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].distance_miles, 0.0);

        // the four neighbours at 0.25°: 17.25 mi N/S, 13.65 mi E/W
        assert_eq!(grid_cells(38.0, -98.0, 13.7).len(), 3);
        assert_eq!(grid_cells(38.0, -98.0, 17.3).len(), 5);
    }

    #[test]
    fn compass_sectors() {
        assert_eq!(compass_bearing(1.0, 0.0), "N");
        assert_eq!(compass_bearing(1.0, 1.0), "NE");
        assert_eq!(compass_bearing(0.0, 1.0), "E");
        assert_eq!(compass_bearing(-1.0, 1.0), "SE");
        assert_eq!(compass_bearing(-1.0, 0.0), "S");
        assert_eq!(compass_bearing(-1.0, -1.0), "SW");
        assert_eq!(compass_bearing(0.0, -1.0), "W");
        assert_eq!(compass_bearing(1.0, -1.0), "NW");
        assert_eq!(compass_bearing(0.0, 0.0), "N");
    }
}
