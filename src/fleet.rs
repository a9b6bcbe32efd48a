pub mod boarding;
pub mod departures;
pub mod emergency;
pub mod fleet;
pub mod index;
pub mod persist;
pub mod routes;

pub use fleet::Fleet;
