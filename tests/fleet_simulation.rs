use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use edutrack::config::{SeedConfig, SimulationConfig};
use edutrack::models::BusStatus;
use edutrack::services::relationship_resolver::{buses_offline_count, buses_online_count};
use edutrack::services::PositionSimulator;
use edutrack::store::{seed_fleet, FleetStore};

fn fleet() -> FleetStore {
    let mut rng = StdRng::seed_from_u64(99);
    seed_fleet(&mut rng, &SeedConfig::default())
}

fn config() -> SimulationConfig {
    SimulationConfig {
        tick_interval: Duration::from_millis(3000),
        max_step: 0.0005,
        rng_seed: Some(7),
    }
}

#[tokio::test(start_paused = true)]
async fn test_simulator_moves_only_online_buses() {
    let store = fleet().into_shared();
    let before = store.read().await.snapshot();

    let handle = PositionSimulator::new(store.clone(), config()).start();
    assert!(handle.is_running());

    tokio::time::sleep(Duration::from_millis(3100)).await;
    let ticks = handle.stop().await;
    assert_eq!(ticks, 1);

    let after = store.read().await.snapshot();
    for (old, new) in before.buses.iter().zip(after.buses.iter()) {
        match old.status {
            BusStatus::Online => {
                assert!((new.lat - old.lat).abs() <= 0.0005);
                assert!((new.lng - old.lng).abs() <= 0.0005);
                assert!(new.last_updated > old.last_updated);
            }
            BusStatus::Offline => assert_eq!(new, old),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_no_tick_before_first_interval() {
    let store = fleet().into_shared();
    let before = store.read().await.snapshot();

    let handle = PositionSimulator::new(store.clone(), config()).start();
    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert_eq!(handle.stop().await, 0);

    assert_eq!(store.read().await.snapshot().buses, before.buses);
}

#[tokio::test(start_paused = true)]
async fn test_stop_leaves_no_running_timer() {
    let store = fleet().into_shared();
    let handle = PositionSimulator::new(store.clone(), config()).start();

    tokio::time::sleep(Duration::from_millis(9100)).await;
    assert_eq!(handle.stop().await, 3);

    let frozen = store.read().await.snapshot();
    tokio::time::sleep(Duration::from_millis(30_000)).await;
    assert_eq!(store.read().await.snapshot().buses, frozen.buses);
}

#[tokio::test(start_paused = true)]
async fn test_status_toggle_is_picked_up_by_next_tick() {
    let store = fleet().into_shared();
    let target = {
        let mut guard = store.write().await;
        let id = guard.buses().iter().find(|b| !b.is_online()).map(|b| b.id.clone()).unwrap();
        guard.set_bus_status(&id, BusStatus::Online);
        id
    };
    let before = store.read().await.bus(&target).cloned().unwrap();

    let handle = PositionSimulator::new(store.clone(), config()).start();
    tokio::time::sleep(Duration::from_millis(3100)).await;
    handle.stop().await;

    let after = store.read().await.bus(&target).cloned().unwrap();
    assert!(after.last_updated > before.last_updated);

    let guard = store.read().await;
    assert_eq!(buses_online_count(&guard) + buses_offline_count(&guard), guard.buses().len());
}
