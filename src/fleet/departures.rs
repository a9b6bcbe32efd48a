use crate::flight::Flight;

/// Bounded log of boarded flights, kept as they were when they left the schedule.
pub struct DepartureLog {
    flights: Vec<Flight>,
    capacity: usize,
}

impl DepartureLog {
    pub fn with_capacity(capacity: usize) -> Self {
        DepartureLog {
            flights: Vec::new(),
            capacity,
        }
    }

    /// Returns `false` once the log is full; the flight is not recorded.
    pub fn record(&mut self, flight: Flight) -> bool {
        if self.flights.len() >= self.capacity {
            return false;
        }
        self.flights.push(flight);
        true
    }

    /// Most recent departure first.
    pub fn recent(&self) -> Vec<Flight> {
        self.flights.iter().rev().cloned().collect()
    }
}
