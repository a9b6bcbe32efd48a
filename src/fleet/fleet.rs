use crate::config::FleetConfig;
use crate::error::Result;
use crate::fleet::boarding::BoardingQueue;
use crate::fleet::departures::DepartureLog;
use crate::fleet::emergency::PriorityStack;
use crate::fleet::index::OrderedIndex;
use crate::fleet::persist;
use crate::fleet::routes::RouteGraph;
use crate::flight::{Flight, FlightId, Location};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The flight schedule and everything derived from it.
///
/// `flights` is the source of truth. The sorted index and the route graph are caches
/// over it: add extends them, every other change rebuilds them. Each mutation is
/// written through to the data file before it returns.
pub struct Fleet {
    config: FleetConfig,
    flights: Vec<Flight>,
    index: OrderedIndex,
    routes: RouteGraph,
    emergency: PriorityStack,
    boarding: BoardingQueue,
    departures: DepartureLog,
}

impl Fleet {
    /// Loads the data file named in `config` and builds the indexes.
    pub fn open(config: FleetConfig) -> Result<Self> {
        let flights = persist::load(&config.data_file)?;
        let mut fleet = Fleet {
            emergency: PriorityStack::with_capacity(config.emergency_capacity),
            departures: DepartureLog::with_capacity(config.history_capacity),
            boarding: BoardingQueue::default(),
            index: OrderedIndex::default(),
            routes: RouteGraph::default(),
            flights,
            config,
        };
        fleet.rebuild_indices();
        info!(flights = fleet.flights.len(), path = %fleet.config.data_file.display(), "fleet opened");
        Ok(fleet)
    }

    pub fn data_file(&self) -> &Path {
        &self.config.data_file
    }

    fn next_id(&self) -> FlightId {
        self.flights.iter().map(|f| f.id).max().map_or(1, |max| max + 1)
    }

    fn rebuild_indices(&mut self) {
        self.index = OrderedIndex::from_records(&self.flights);
        self.routes = RouteGraph::from_records(&self.flights);
        debug!(
            indexed = self.index.len(),
            locations = self.routes.locations().len(),
            "rebuilt index and route graph"
        );
    }

    /// Writes the current schedule to the data file.
    pub fn save(&self) -> Result<()> {
        persist::save(&self.config.data_file, &self.flights)
    }

    /// Adds a flight under the next free id. Text fields are trimmed but otherwise taken as-is.
    pub fn add(
        &mut self,
        carrier: &str,
        origin: &str,
        destination: &str,
        departure: &str,
        arrival: &str,
    ) -> Result<Flight> {
        let flight = Flight {
            id: self.next_id(),
            carrier: Arc::from(carrier.trim()),
            origin: Location::from(origin.trim()),
            destination: Location::from(destination.trim()),
            departure: Arc::from(departure.trim()),
            arrival: Arc::from(arrival.trim()),
        };
        self.flights.push(flight.clone());
        self.index.insert(flight.clone());
        self.routes.insert(flight.clone());
        self.save()?;
        info!(id = flight.id, "added flight {}", flight);
        Ok(flight)
    }

    /// Removes the flight with `id`. Returns `false` if there is none.
    pub fn delete(&mut self, id: FlightId) -> Result<bool> {
        let Some(pos) = self.flights.iter().position(|f| f.id == id) else {
            return Ok(false);
        };
        let removed = self.flights.remove(pos);
        self.rebuild_indices();
        self.save()?;
        info!(id, "deleted flight {}", removed);
        Ok(true)
    }

    pub fn find_by_id(&self, id: FlightId) -> Option<&Flight> {
        self.flights.iter().find(|f| f.id == id)
    }

    /// Flights whose destination matches `name`, ignoring case, in schedule order.
    pub fn find_by_destination(&self, name: &str) -> Vec<&Flight> {
        let wanted = name.to_lowercase();
        self.flights
            .iter()
            .filter(|f| f.destination.to_lowercase() == wanted)
            .collect()
    }

    /// Schedule order, which is insertion order.
    pub fn list_all(&self) -> Vec<&Flight> {
        self.flights.iter().collect()
    }

    /// Ascending id order, read from the tree index.
    pub fn sorted(&self) -> Vec<&Flight> {
        self.index.inorder()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Recomputes the index and route graph from the schedule, then saves.
    pub fn rebuild(&mut self) -> Result<()> {
        self.rebuild_indices();
        self.save()
    }

    /// Replaces the in-memory schedule with what is on disk. The emergency stack,
    /// boarding queue and departure log are left alone.
    pub fn reload_from_disk(&mut self) -> Result<()> {
        self.flights = persist::load(&self.config.data_file)?;
        self.rebuild_indices();
        info!(flights = self.flights.len(), "reloaded from disk");
        Ok(())
    }

    pub fn routes(&self) -> &RouteGraph {
        &self.routes
    }

    /// See [`RouteGraph::find_itinerary`].
    pub fn find_itinerary(
        &self,
        source: &str,
        destination: &str,
        max_stops: usize,
    ) -> Option<Vec<Flight>> {
        self.routes.find_itinerary(source, destination, max_stops)
    }

    pub fn push_emergency(&mut self, id: FlightId) -> bool {
        if self.find_by_id(id).is_none() {
            return false;
        }
        let pushed = self.emergency.push(id);
        if !pushed {
            warn!(id, capacity = self.emergency.capacity(), "emergency stack full");
        }
        pushed
    }

    /// Takes the most recent emergency off the stack. The flight stays scheduled.
    pub fn pop_emergency(&mut self) -> Option<FlightId> {
        self.emergency.pop()
    }

    /// Top first.
    pub fn emergency_stack(&self) -> Vec<FlightId> {
        self.emergency.peek_all()
    }

    pub fn emergency_capacity(&self) -> usize {
        self.emergency.capacity()
    }

    pub fn enqueue_boarding(&mut self, id: FlightId) -> bool {
        if self.find_by_id(id).is_none() {
            return false;
        }
        self.boarding.enqueue(id);
        true
    }

    /// Boards the flight at the front of the queue: it is logged as departed and
    /// removed from the schedule.
    pub fn dequeue_boarding(&mut self) -> Result<Option<FlightId>> {
        let Some(id) = self.boarding.dequeue() else {
            return Ok(None);
        };
        match self.find_by_id(id).cloned() {
            Some(flight) => {
                if !self.departures.record(flight) {
                    warn!(id, "departure log full, not recording");
                }
                self.delete(id)?;
            }
            None => warn!(id, "boarded flight was no longer scheduled"),
        }
        Ok(Some(id))
    }

    /// Front to rear.
    pub fn boarding_queue(&self) -> Vec<FlightId> {
        self.boarding.as_list()
    }

    /// Boarded flights, most recent first.
    pub fn departures(&self) -> Vec<Flight> {
        self.departures.recent()
    }
}
