use crate::config::FleetConfig;
use crate::fleet::Fleet;
use crate::flight::{Flight, FlightId};
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::path::PathBuf;
use tempfile::TempDir;

/// A fleet backed by a data file in a fresh temp dir. Keep the dir alive with the fleet.
pub fn open_fleet() -> (TempDir, Fleet) {
    let dir = tempfile::tempdir().unwrap();
    let fleet = Fleet::open(config(&dir)).unwrap();
    (dir, fleet)
}

pub fn config(dir: &TempDir) -> FleetConfig {
    FleetConfig::new(data_file(dir))
}

pub fn data_file(dir: &TempDir) -> PathBuf {
    dir.path().join("flights.txt")
}

pub fn add_flight(fleet: &mut Fleet, origin: &str, destination: &str) -> Flight {
    fleet
        .add("AA", origin, destination, "08:00", "11:00")
        .unwrap()
}

pub fn ids(flights: &[&Flight]) -> Vec<FlightId> {
    flights.iter().map(|f| f.id).collect()
}

pub fn leg_ids(legs: &[Flight]) -> Vec<FlightId> {
    legs.iter().map(|f| f.id).collect()
}

pub fn arb_location() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("AP_1"), Just("AP_2"), Just("AP_3"), Just("AP_4")]
}

/// Fleet edits a property test can replay.
#[derive(Debug, Clone)]
pub enum Edit {
    Add(&'static str, &'static str),
    Delete(usize),
}

pub fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (arb_location(), arb_location()).prop_map(|(o, d)| Edit::Add(o, d)),
        1 => (0..8usize).prop_map(Edit::Delete),
    ]
}
