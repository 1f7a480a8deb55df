//! Irish Grid (TM65, EPSG:29902) to WGS84 (EPSG:4326).
//!
//! Inverse Transverse Mercator on the Airy Modified ellipsoid, then a
//! seven-parameter Helmert shift from TM65 to WGS84 through geocentric
//! cartesian coordinates.

use std::f64::consts::PI;

struct Ellipsoid {
    semi_major_axis: f64,
    inverse_flattening: f64,
}

impl Ellipsoid {
    fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - 1.0 / self.inverse_flattening)
    }

    fn eccentricity_squared(&self) -> f64 {
        let a = self.semi_major_axis;
        let b = self.semi_minor_axis();
        1.0 - (b * b) / (a * a)
    }
}

const AIRY_MODIFIED: Ellipsoid = Ellipsoid {
    semi_major_axis: 6_377_340.189,
    inverse_flattening: 299.324_964_6,
};

const WGS84: Ellipsoid = Ellipsoid {
    semi_major_axis: 6_378_137.0,
    inverse_flattening: 298.257_223_563,
};

const SCALE_FACTOR: f64 = 1.000_035;
const ORIGIN_LATITUDE_DEGREES: f64 = 53.5;
const ORIGIN_LONGITUDE_DEGREES: f64 = -8.0;
const FALSE_EASTING: f64 = 200_000.0;
const FALSE_NORTHING: f64 = 250_000.0;

/// TM65 to WGS84, position vector convention: translations in meters,
/// rotations in arc seconds, scale in ppm.
const HELMERT_TRANSLATION: [f64; 3] = [482.5, -130.6, 564.6];
const HELMERT_ROTATION_ARCSEC: [f64; 3] = [-1.042, -0.214, -0.631];
const HELMERT_SCALE_PPM: f64 = 8.15;

const MERIDIAN_ARC_TOLERANCE: f64 = 0.000_01;
const MAX_ITERATIONS: usize = 100;

/// Converts Irish Grid easting/northing to a WGS84 point, x = longitude and
/// y = latitude in degrees. Non-finite input gives a NaN point.
pub fn irish_grid_to_wgs84(easting: f64, northing: f64) -> geo_types::Point {
    if !easting.is_finite() || !northing.is_finite() {
        return geo_types::Point::new(f64::NAN, f64::NAN);
    }

    let (latitude, longitude) = inverse_transverse_mercator(easting, northing);
    let cartesian = geodetic_to_cartesian(&AIRY_MODIFIED, latitude, longitude);
    let shifted = helmert(cartesian);
    let (latitude, longitude) = cartesian_to_geodetic(&WGS84, shifted);

    geo_types::Point::new(longitude.to_degrees(), latitude.to_degrees())
}

fn meridional_arc(latitude: f64) -> f64 {
    let a = AIRY_MODIFIED.semi_major_axis;
    let b = AIRY_MODIFIED.semi_minor_axis();
    let n = (a - b) / (a + b);
    let n2 = n * n;
    let n3 = n2 * n;

    let origin = ORIGIN_LATITUDE_DEGREES.to_radians();
    let d = latitude - origin;
    let s = latitude + origin;

    b * SCALE_FACTOR
        * ((1.0 + n + 1.25 * n2 + 1.25 * n3) * d
            - (3.0 * n + 3.0 * n2 + 21.0 / 8.0 * n3) * d.sin() * s.cos()
            + (15.0 / 8.0 * n2 + 15.0 / 8.0 * n3) * (2.0 * d).sin() * (2.0 * s).cos()
            - 35.0 / 24.0 * n3 * (3.0 * d).sin() * (3.0 * s).cos())
}

/// Returns (latitude, longitude) in radians on the Airy Modified ellipsoid.
fn inverse_transverse_mercator(easting: f64, northing: f64) -> (f64, f64) {
    let a = AIRY_MODIFIED.semi_major_axis;
    let e2 = AIRY_MODIFIED.eccentricity_squared();

    let mut latitude = ORIGIN_LATITUDE_DEGREES.to_radians();
    let mut arc = 0.0;
    for _ in 0..MAX_ITERATIONS {
        latitude += (northing - FALSE_NORTHING - arc) / (a * SCALE_FACTOR);
        arc = meridional_arc(latitude);

        if (northing - FALSE_NORTHING - arc).abs() < MERIDIAN_ARC_TOLERANCE {
            break;
        }
    }

    let sin = latitude.sin();
    let cos = latitude.cos();
    let tan = latitude.tan();
    let tan2 = tan * tan;
    let tan4 = tan2 * tan2;
    let tan6 = tan4 * tan2;

    let nu = a * SCALE_FACTOR / (1.0 - e2 * sin * sin).sqrt();
    let rho = a * SCALE_FACTOR * (1.0 - e2) * (1.0 - e2 * sin * sin).powf(-1.5);
    let eta2 = nu / rho - 1.0;

    let vii = tan / (2.0 * rho * nu);
    let viii = tan / (24.0 * rho * nu.powi(3)) * (5.0 + 3.0 * tan2 + eta2 - 9.0 * tan2 * eta2);
    let ix = tan / (720.0 * rho * nu.powi(5)) * (61.0 + 90.0 * tan2 + 45.0 * tan4);
    let x = 1.0 / (cos * nu);
    let xi = 1.0 / (cos * 6.0 * nu.powi(3)) * (nu / rho + 2.0 * tan2);
    let xii = 1.0 / (cos * 120.0 * nu.powi(5)) * (5.0 + 28.0 * tan2 + 24.0 * tan4);
    let xiia =
        1.0 / (cos * 5040.0 * nu.powi(7)) * (61.0 + 662.0 * tan2 + 1320.0 * tan4 + 720.0 * tan6);

    let de = easting - FALSE_EASTING;

    let lat = latitude - vii * de.powi(2) + viii * de.powi(4) - ix * de.powi(6);
    let lon = ORIGIN_LONGITUDE_DEGREES.to_radians() + x * de - xi * de.powi(3) + xii * de.powi(5)
        - xiia * de.powi(7);

    (lat, lon)
}

fn geodetic_to_cartesian(ellipsoid: &Ellipsoid, latitude: f64, longitude: f64) -> [f64; 3] {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let nu = a / (1.0 - e2 * latitude.sin().powi(2)).sqrt();

    [
        nu * latitude.cos() * longitude.cos(),
        nu * latitude.cos() * longitude.sin(),
        (1.0 - e2) * nu * latitude.sin(),
    ]
}

fn helmert([x, y, z]: [f64; 3]) -> [f64; 3] {
    let arcsec = PI / 648_000.0;
    let [tx, ty, tz] = HELMERT_TRANSLATION;
    let rx = HELMERT_ROTATION_ARCSEC[0] * arcsec;
    let ry = HELMERT_ROTATION_ARCSEC[1] * arcsec;
    let rz = HELMERT_ROTATION_ARCSEC[2] * arcsec;
    let s = 1.0 + HELMERT_SCALE_PPM * 1e-6;

    [
        tx + s * x - rz * y + ry * z,
        ty + rz * x + s * y - rx * z,
        tz - ry * x + rx * y + s * z,
    ]
}

/// Returns (latitude, longitude) in radians, height is dropped.
fn cartesian_to_geodetic(ellipsoid: &Ellipsoid, [x, y, z]: [f64; 3]) -> (f64, f64) {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let p = x.hypot(y);

    let mut latitude = z.atan2(p * (1.0 - e2));
    for _ in 0..10 {
        let nu = a / (1.0 - e2 * latitude.sin().powi(2)).sqrt();
        latitude = (z + e2 * nu * latitude.sin()).atan2(p);
    }

    (latitude, y.atan2(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_false_origin_projects_to_natural_origin() {
        let (latitude, longitude) = inverse_transverse_mercator(FALSE_EASTING, FALSE_NORTHING);

        assert!((latitude.to_degrees() - 53.5).abs() < 1e-9);
        assert!((longitude.to_degrees() + 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_datum_shift_is_small() {
        let point = irish_grid_to_wgs84(FALSE_EASTING, FALSE_NORTHING);

        // TM65 and WGS84 differ by well under a kilometre in Ireland
        assert!((point.x() + 8.0).abs() < 0.002);
        assert!((point.y() - 53.5).abs() < 0.002);
        assert!(point.x() != -8.0);
    }

    #[test]
    fn test_belfast_city_hall() {
        let point = irish_grid_to_wgs84(333_900.0, 374_000.0);

        assert!((point.x() - (-5.9301)).abs() < 0.005, "{:?}", point);
        assert!((point.y() - 54.5964).abs() < 0.005, "{:?}", point);
    }

    #[test]
    fn test_geocentric_round_trip() {
        let latitude = 54.6_f64.to_radians();
        let longitude = (-6.2_f64).to_radians();

        let cartesian = geodetic_to_cartesian(&WGS84, latitude, longitude);
        let (lat, lon) = cartesian_to_geodetic(&WGS84, cartesian);

        assert!((lat - latitude).abs() < 1e-11);
        assert!((lon - longitude).abs() < 1e-11);
    }

    #[test]
    fn test_non_finite_input() {
        let point = irish_grid_to_wgs84(f64::NAN, 250_000.0);
        assert!(point.x().is_nan());
        assert!(point.y().is_nan());
    }
}
