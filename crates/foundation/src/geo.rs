/// Geographic point in WGS84 degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned geographic bounding box in WGS84 degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

// Rough meters-per-degree of latitude at mid latitudes.
const METERS_PER_DEGREE: f64 = 111_000.0;

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south: south_west.lat,
            west: south_west.lng,
            north: north_east.lat,
            east: north_east.lng,
        }
    }

    /// Expand a center point to a box extending `radius_m` meters in each
    /// direction. Longitude degrees shrink with latitude.
    pub fn from_center(center: LatLng, radius_m: f64) -> Self {
        let dlat = radius_m / METERS_PER_DEGREE;
        let dlng = radius_m / (METERS_PER_DEGREE * center.lat.to_radians().cos().max(1e-6));
        Self {
            south: center.lat - dlat,
            west: center.lng - dlng,
            north: center.lat + dlat,
            east: center.lng + dlng,
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Render as `west,south,east,north`, the order the overlay services
    /// expect for their `bbox` query parameter.
    pub fn to_bbox_string(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}
