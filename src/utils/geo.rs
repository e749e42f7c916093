// ============================================================================
// GEO - Distancia de gran círculo (haversine)
// ============================================================================

use crate::models::order::Location;

/// Radio terrestre en km
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distancia haversine entre dos coordenadas, en kilómetros, redondeada a
/// dos decimales.
pub fn haversine_km(a: Location, b: Location) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    let km = EARTH_RADIUS_KM * c;
    (km * 100.0).round() / 100.0
}

/// Distancia en metros enteros, redondeada al metro más cercano.
pub fn distance_meters(a: Location, b: Location) -> u32 {
    (haversine_km(a, b) * 1000.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let p = Location::new(9.03, 38.74);
        assert_eq!(haversine_km(p, p), 0.0);
        assert_eq!(distance_meters(p, p), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Location::new(9.03, 38.74);
        let b = Location::new(8.98, 38.79);
        assert_eq!(haversine_km(a, b), haversine_km(b, a));

        let c = Location::new(-1.29, 36.82);
        assert_eq!(distance_meters(a, c), distance_meters(c, a));
    }

    #[test]
    fn reading_just_north_is_inside_fence() {
        // ~7.8m al norte del destino
        let destination = Location::new(9.0300, 38.7400);
        let driver = Location::new(9.03007, 38.7400);
        let meters = distance_meters(driver, destination);
        assert!(meters <= 10, "esperaba <=10m, midió {}m", meters);
    }

    #[test]
    fn reading_a_block_away_is_outside_fence() {
        // ~111m al norte del destino
        let destination = Location::new(9.0300, 38.7400);
        let driver = Location::new(9.0310, 38.7400);
        let meters = distance_meters(driver, destination);
        assert!(
            (100..=120).contains(&meters),
            "esperaba ~111m, midió {}m",
            meters
        );
    }

    #[test]
    fn known_city_pair_distance() {
        // Addis Abeba -> Adama, ~75km en línea recta
        let addis = Location::new(9.0300, 38.7400);
        let adama = Location::new(8.5400, 39.2700);
        let km = haversine_km(addis, adama);
        assert!((70.0..=85.0).contains(&km), "midió {}km", km);
    }
}
