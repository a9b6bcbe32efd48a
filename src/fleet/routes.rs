use crate::flight::{Flight, Location};
use std::collections::{HashMap, VecDeque};
use tracing::trace;

/// How a location was first reached during an itinerary search.
struct Hop<'a> {
    from: &'a str,
    leg: &'a Flight,
    legs_taken: usize,
}

/// Outgoing flights per location. Every destination is a key, even with no departures.
#[derive(Default)]
pub struct RouteGraph {
    adjacency: HashMap<Location, Vec<Flight>>,
}

impl RouteGraph {
    pub fn from_records<'a>(flights: impl IntoIterator<Item = &'a Flight>) -> Self {
        let mut graph = RouteGraph::default();
        flights.into_iter().for_each(|f| graph.insert(f.clone()));
        graph
    }

    pub fn insert(&mut self, flight: Flight) {
        self.adjacency.entry(flight.destination.clone()).or_default();
        self.adjacency
            .entry(flight.origin.clone())
            .or_default()
            .push(flight);
    }

    pub fn contains(&self, location: &str) -> bool {
        self.adjacency.contains_key(location)
    }

    pub fn outgoing(&self, location: &str) -> &[Flight] {
        self.adjacency
            .get(location)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All known locations, sorted by name.
    pub fn locations(&self) -> Vec<&Location> {
        let mut names = self.adjacency.keys().collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Fewest-legs itinerary from `source` to `destination` with at most `max_stops`
    /// intermediate locations.
    ///
    /// Breadth-first over locations, marking each on first discovery, so among equally
    /// short routes the one whose legs were inserted first wins. Arrival is only checked
    /// once at least one leg has been flown: asking for `source == destination` finds a
    /// round trip if one fits the bound, and never an empty itinerary.
    pub fn find_itinerary(
        &self,
        source: &str,
        destination: &str,
        max_stops: usize,
    ) -> Option<Vec<Flight>> {
        let (source, _) = self.adjacency.get_key_value(source)?;
        let (destination, _) = self.adjacency.get_key_value(destination)?;
        let (source, destination): (&str, &str) = (&**source, &**destination);
        let max_legs = max_stops.saturating_add(1);

        let mut discovered: HashMap<&str, Option<Hop<'_>>> = HashMap::new();
        if source != destination {
            discovered.insert(source, None);
        }
        let mut frontier: VecDeque<(&str, usize)> = VecDeque::from([(source, 0)]);

        let mut arrived = None;
        while let Some((location, legs_taken)) = frontier.pop_front() {
            if location == destination && legs_taken > 0 {
                arrived = Some(legs_taken);
                break;
            }
            if legs_taken >= max_legs {
                continue;
            }
            for leg in self.outgoing(location) {
                let next: &str = &leg.destination;
                if discovered.contains_key(next) {
                    continue;
                }
                trace!(from = location, to = next, flight = leg.id, "discovered");
                discovered.insert(
                    next,
                    Some(Hop {
                        from: location,
                        leg,
                        legs_taken: legs_taken + 1,
                    }),
                );
                frontier.push_back((next, legs_taken + 1));
            }
        }

        // walk back a fixed number of hops; a round trip revisits the source
        let legs_taken = arrived?;
        let mut legs = Vec::with_capacity(legs_taken);
        let mut current = destination;
        for _ in 0..legs_taken {
            let hop = discovered.get(current)?.as_ref()?;
            debug_assert!(hop.legs_taken == legs_taken - legs.len());
            legs.push(hop.leg.clone());
            current = hop.from;
        }
        legs.reverse();
        Some(legs)
    }
}
