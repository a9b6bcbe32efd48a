use crate::time::ClockTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;
use tabled::Tabled;

pub type FlightId = u64;
pub type Location = Arc<str>;

/// A scheduled flight. Field order is the on-disk column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct Flight {
    #[tabled(rename = "ID")]
    pub id: FlightId,
    #[tabled(rename = "Carrier")]
    pub carrier: Arc<str>,
    #[tabled(rename = "From")]
    pub origin: Location,
    #[tabled(rename = "To")]
    pub destination: Location,
    #[tabled(rename = "Dep")]
    pub departure: Arc<str>,
    #[tabled(rename = "Arr")]
    pub arrival: Arc<str>,
}

impl Flight {
    pub fn departure_time(&self) -> Option<ClockTime> {
        self.departure.parse().ok()
    }

    pub fn arrival_time(&self) -> Option<ClockTime> {
        self.arrival.parse().ok()
    }

    /// Minutes from departure to arrival, counting an earlier arrival as next-day.
    pub fn block_minutes(&self) -> Option<u16> {
        Some(self.departure_time()?.minutes_until(self.arrival_time()?))
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {} -> {} | {}-{}",
            self.id, self.carrier, self.origin, self.destination, self.departure, self.arrival
        )
    }
}
