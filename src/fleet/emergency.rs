use crate::flight::FlightId;

/// Bounded LIFO of flights waiting for an emergency diversion.
pub struct PriorityStack {
    ids: Vec<FlightId>,
    capacity: usize,
}

impl PriorityStack {
    pub fn with_capacity(capacity: usize) -> Self {
        PriorityStack {
            ids: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Fails when full. Whether the flight exists is the caller's concern.
    pub fn push(&mut self, id: FlightId) -> bool {
        if self.ids.len() >= self.capacity {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn pop(&mut self) -> Option<FlightId> {
        self.ids.pop()
    }

    /// Top first.
    pub fn peek_all(&self) -> Vec<FlightId> {
        self.ids.iter().rev().copied().collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
