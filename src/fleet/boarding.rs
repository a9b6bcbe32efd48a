use crate::flight::FlightId;
use std::collections::VecDeque;

/// FIFO of flights called for boarding.
#[derive(Default)]
pub struct BoardingQueue {
    ids: VecDeque<FlightId>,
}

impl BoardingQueue {
    pub fn enqueue(&mut self, id: FlightId) {
        self.ids.push_back(id);
    }

    pub fn dequeue(&mut self) -> Option<FlightId> {
        self.ids.pop_front()
    }

    /// Front to rear.
    pub fn as_list(&self) -> Vec<FlightId> {
        self.ids.iter().copied().collect()
    }
}
