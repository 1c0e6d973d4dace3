/// Decode a Maidenhead locator to (lat, lon) degrees.
///
/// Four characters resolve the 2°x1° square; six characters refine to
/// the sub-square. Anything shorter or containing out-of-range
/// characters decodes to `None`. The returned point is the square's
/// south-west corner, which is all the regional bucketing needs.
pub fn maidenhead_to_lat_lon(grid: &str) -> Option<(f64, f64)> {
    let chars: Vec<char> = grid.trim().to_ascii_uppercase().chars().collect();
    if chars.len() < 4 {
        return None;
    }

    let field_lon = field_index(chars[0])?;
    let field_lat = field_index(chars[1])?;
    let square_lon = chars[2].to_digit(10)? as f64;
    let square_lat = chars[3].to_digit(10)? as f64;

    let (sub_lon, sub_lat) = if chars.len() >= 6 {
        (subsquare_index(chars[4])?, subsquare_index(chars[5])?)
    } else {
        (0.0, 0.0)
    };

    let lon = field_lon * 20.0 + square_lon * 2.0 + sub_lon / 12.0 - 180.0;
    let lat = field_lat * 10.0 + square_lat + sub_lat / 24.0 - 90.0;
    Some((lat, lon))
}

fn field_index(c: char) -> Option<f64> {
    if c.is_ascii_uppercase() && c <= 'R' {
        Some((c as u8 - b'A') as f64)
    } else {
        None
    }
}

fn subsquare_index(c: char) -> Option<f64> {
    if c.is_ascii_uppercase() && c <= 'X' {
        Some((c as u8 - b'A') as f64)
    } else {
        None
    }
}

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two (lat, lon) points in km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}
