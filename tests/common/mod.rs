//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use launchcast::cache::ModelCache;
use launchcast::data::{DatasetRepository, Table, Value};
use launchcast::service::PredictionService;
use launchcast::training::{ForestTrainer, TrainConfig};

/// A small launch dataset in the shape of the ISRO CSV. Vehicle, orbit
/// and application each separate the two outcomes exactly.
pub fn launches_table() -> Table {
    let mut rows = Vec::new();
    for i in 0..30 {
        let (vehicle, orbit, application, remarks) = if i % 3 == 0 {
            ("GSLV Mk III", "GTO", "Navigation", "Launch failed")
        } else {
            ("PSLV-C37", "LEO", "Earth Observation", "Launch successful")
        };
        rows.push(vec![
            Value::from(vehicle),
            Value::from("01-Jan-20"),
            Value::from(orbit),
            Value::from(application),
            Value::from(remarks),
        ]);
    }
    Table::new(
        vec![
            "Launch Vehicle".into(),
            "Launch Date".into(),
            "Orbit Type".into(),
            "Application".into(),
            "Remarks".into(),
        ],
        rows,
    )
    .unwrap()
}

pub fn capsules_table() -> Table {
    Table::new(
        vec!["capsule_id".into(), "landings".into(), "status".into()],
        vec![
            vec![Value::from("C101"), Value::from(0.0), Value::from("retired")],
            vec![Value::from("C102"), Value::from(1.0), Value::from("active")],
            vec![Value::from("C103"), Value::from(2.0), Value::from("active")],
            vec![Value::from("C104"), Value::from(0.0), Value::from("retired")],
            vec![Value::from("C105"), Value::from(3.0), Value::from("active")],
            vec![Value::from("C106"), Value::from(0.0), Value::from("destroyed")],
        ],
    )
    .unwrap()
}

pub fn payloads_table() -> Table {
    Table::new(
        vec!["payload_id".into(), "type".into()],
        vec![
            vec![Value::from("FalconSAT-2"), Value::from("Satellite")],
            vec![Value::from("Dragon Qual"), Value::from("Dragon Boilerplate")],
            vec![Value::from("RatSat"), Value::from("Satellite")],
        ],
    )
    .unwrap()
}

pub fn ships_table() -> Table {
    Table::new(
        vec!["ship_id".into(), "active".into()],
        vec![
            vec![Value::from("GOMSTREE"), Value::from(true)],
            vec![Value::from("AMERICANCHAMPION"), Value::from(false)],
        ],
    )
    .unwrap()
}

pub fn rockets_table() -> Table {
    Table::new(
        vec!["rocket_id".into(), "active".into()],
        vec![
            vec![Value::from("falcon1"), Value::from(false)],
            vec![Value::from("falcon9"), Value::from(true)],
            vec![Value::from("falconheavy"), Value::from(true)],
        ],
    )
    .unwrap()
}

/// Service over the given datasets with a fresh temp-dir cache and a
/// small, fast forest.
pub fn service(datasets: Vec<(&str, Table)>) -> (tempfile::TempDir, PredictionService) {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = DatasetRepository::new();
    for (name, table) in datasets {
        repo.insert(name, table);
    }
    let cache = ModelCache::open(dir.path()).unwrap();
    let trainer = ForestTrainer::new(TrainConfig::builder().n_trees(9).build());
    (dir, PredictionService::with_trainer(repo, cache, trainer))
}
