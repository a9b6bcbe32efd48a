use std::path::PathBuf;

/// Settings for an open fleet.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// CSV file the records are read from and rewritten to.
    pub data_file: PathBuf,

    /// Most identifiers the emergency stack will hold.
    pub emergency_capacity: usize,

    /// Most boarded flights kept in the departure log.
    pub history_capacity: usize,
}

impl FleetConfig {
    pub const DEFAULT_EMERGENCY_CAPACITY: usize = 50;
    pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Self::default()
        }
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("flights.txt"),
            emergency_capacity: Self::DEFAULT_EMERGENCY_CAPACITY,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
        }
    }
}
