//! Datos semilla de la flota
//! 
//! Cuatro rutas fijas, un conductor por bus y buses repartidos en
//! round-robin entre las rutas con estado y posición iniciales aleatorios.

use chrono::Utc;
use rand::Rng;
use tracing::info;

use crate::config::SeedConfig;
use crate::models::{Bus, BusStatus, Driver, Route};

use super::fleet_store::FleetStore;

/// Rutas fijas del campus: (id, número, nombre, paradas)
const CAMPUS_ROUTES: [(&str, &str, &str, [&str; 4]); 4] = [
    ("r1", "101", "Downtown Express", ["Main Square", "Library", "Engineering Block", "Hostel A"]),
    ("r2", "102", "North Campus Shuttle", ["Railway Station", "Medical College", "Science Block", "Admin Office"]),
    ("r3", "201", "South Suburban", ["Ring Road", "Sector 5", "Commerce Block", "Cafeteria"]),
    ("r4", "305", "East Ring", ["East Gate", "Arts Block", "Gymnasium", "Hostel B"]),
];

pub fn seed_routes() -> Vec<Route> {
    CAMPUS_ROUTES
        .iter()
        .map(|(id, number, name, stops)| Route {
            id: id.to_string(),
            number: number.to_string(),
            name: name.to_string(),
            stops: stops.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}

/// Nombre de display del conductor `index`: "Driver A", "Driver B", ...
fn driver_name(index: usize) -> String {
    match u8::try_from(index).ok().filter(|i| *i < 26) {
        Some(i) => format!("Driver {}", char::from(b'A' + i)),
        None => format!("Driver {}", index + 1),
    }
}

pub fn seed_drivers(count: usize) -> Vec<Driver> {
    (0..count)
        .map(|i| Driver {
            id: format!("d{}", i + 1),
            name: driver_name(i),
            phone: format!("+1 555-010{}", i + 10),
            bus_id: format!("b{}", i + 1),
        })
        .collect()
}

pub fn seed_buses<R: Rng>(rng: &mut R, routes: &[Route], config: &SeedConfig) -> Vec<Bus> {
    let now = Utc::now();
    (0..config.fleet_size)
        .map(|i| {
            let route_id = routes
                .get(i % routes.len().max(1))
                .map(|r| r.id.clone())
                .unwrap_or_default();
            let status = if rng.gen_bool(config.online_probability) {
                BusStatus::Online
            } else {
                BusStatus::Offline
            };
            Bus {
                id: format!("b{}", i + 1),
                number: format!("EDU-{}", 100 + i),
                route_id,
                driver_id: format!("d{}", i + 1),
                status,
                capacity: config.capacity,
                lat: config.reference_lat + (rng.gen::<f64>() - 0.5) * config.spread,
                lng: config.reference_lng + (rng.gen::<f64>() - 0.5) * config.spread,
                last_updated: now,
            }
        })
        .collect()
}

/// Construir el almacén completo a partir del fixture
pub fn seed_fleet<R: Rng>(rng: &mut R, config: &SeedConfig) -> FleetStore {
    let routes = seed_routes();
    let drivers = seed_drivers(config.fleet_size);
    let buses = seed_buses(rng, &routes, config);

    let online = buses.iter().filter(|b| b.is_online()).count();
    info!(
        "🌱 Flota semilla: {} rutas, {} conductores, {} buses ({} en línea)",
        routes.len(),
        drivers.len(),
        buses.len(),
        online
    );

    FleetStore::new(routes, drivers, buses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seed_fleet_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let store = seed_fleet(&mut rng, &SeedConfig::default());

        assert_eq!(store.routes().len(), 4);
        assert_eq!(store.drivers().len(), 25);
        assert_eq!(store.buses().len(), 25);
        assert!(store.dangling_references().is_empty());
    }

    #[test]
    fn test_buses_round_robin_across_routes() {
        let mut rng = StdRng::seed_from_u64(7);
        let store = seed_fleet(&mut rng, &SeedConfig::default());
        let route_ids: Vec<&str> = store.buses().iter().take(5).map(|b| b.route_id.as_str()).collect();
        assert_eq!(route_ids, vec!["r1", "r2", "r3", "r4", "r1"]);
    }

    #[test]
    fn test_fixture_identifiers() {
        let drivers = seed_drivers(25);
        assert_eq!(drivers[0].name, "Driver A");
        assert_eq!(drivers[0].phone, "+1 555-01010");
        assert_eq!(drivers[24].name, "Driver Y");
        assert_eq!(drivers[24].phone, "+1 555-01034");
        assert_eq!(driver_name(30), "Driver 31");

        let mut rng = StdRng::seed_from_u64(1);
        let buses = seed_buses(&mut rng, &seed_routes(), &SeedConfig::default());
        assert_eq!(buses[0].number, "EDU-100");
        assert_eq!(buses[0].driver_id, "d1");
        assert_eq!(buses[0].capacity, 40);
    }

    #[test]
    fn test_positions_jittered_near_reference() {
        let config = SeedConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for bus in seed_buses(&mut rng, &seed_routes(), &config) {
            assert!((bus.lat - config.reference_lat).abs() <= config.spread / 2.0);
            assert!((bus.lng - config.reference_lng).abs() <= config.spread / 2.0);
        }
    }

    #[test]
    fn test_online_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let all_online = SeedConfig { online_probability: 1.0, ..Default::default() };
        assert!(seed_buses(&mut rng, &seed_routes(), &all_online).iter().all(|b| b.is_online()));

        let all_offline = SeedConfig { online_probability: 0.0, ..Default::default() };
        assert!(seed_buses(&mut rng, &seed_routes(), &all_offline).iter().all(|b| !b.is_online()));
    }
}
