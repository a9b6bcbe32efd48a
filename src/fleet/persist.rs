//! Flat-file storage for the fleet.
//!
//! One flight per line, no header, six CSV fields:
//! `id,carrier,origin,destination,departure,arrival`. Lines that cannot be read
//! as a flight are dropped on load without error.

use crate::error::{Result, StoreError};
use crate::flight::{Flight, FlightId};
use csv::StringRecord;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const FIELDS: usize = 6;

fn parse_record(record: &StringRecord) -> Option<Flight> {
    if record.len() < FIELDS {
        return None;
    }
    let id = record.get(0)?.trim().parse::<FlightId>().ok()?;
    let field = |i: usize| record.get(i).map(Arc::<str>::from);
    Some(Flight {
        id,
        carrier: field(1)?,
        origin: field(2)?,
        destination: field(3)?,
        departure: field(4)?,
        arrival: field(5)?,
    })
}

/// Reads every well-formed flight in file order. A missing file is an empty fleet.
pub fn load(path: &Path) -> Result<Vec<Flight>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no flight file yet");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut flights = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        match row.ok().as_ref().and_then(parse_record) {
            Some(flight) => flights.push(flight),
            None => skipped += 1,
        }
    }
    debug!(path = %path.display(), loaded = flights.len(), skipped, "read flight file");
    Ok(flights)
}

/// Rewrites the whole file with `flights`, in order.
pub fn save(path: &Path, flights: &[Flight]) -> Result<()> {
    let csv_error = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for flight in flights {
        writer.serialize(flight).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), count = flights.len(), "wrote flight file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn flight(id: u64, carrier: &str, origin: &str, destination: &str) -> Flight {
        Flight {
            id,
            carrier: Arc::from(carrier),
            origin: Arc::from(origin),
            destination: Arc::from(destination),
            departure: Arc::from("08:00"),
            arrival: Arc::from("11:00"),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let flights = load(&dir.path().join("nope.txt")).unwrap();
        assert!(flights.is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.txt");
        fs::write(
            &path,
            "1,AA,JFK,LAX,08:00,11:00\n\
             two,AA,JFK,LAX,08:00,11:00\n\
             3,AA,JFK,LAX,08:00\n\
             \n\
             4,UA,SFO,ORD,9:15,15:20,extra\n\
             -5,AA,JFK,LAX,08:00,11:00\n",
        )
        .unwrap();

        let flights = load(&path).unwrap();
        let ids: Vec<u64> = flights.iter().map(|f| f.id).collect();
        assert_eq!(vec![1, 4], ids);
        assert_eq!("15:20", &*flights[1].arrival);
    }

    #[test]
    fn test_quoting_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.txt");
        let flights = vec![
            flight(1, "Air \"Blue\", Ltd", "New York, JFK", "LAX"),
            flight(2, "Multi\nLine", " Padded ", "SFO"),
        ];
        save(&path, &flights).unwrap();
        assert_eq!(flights, load(&path).unwrap());
    }

    #[test]
    fn test_written_exactly_as_stored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flights.txt");
        let mut f = flight(9, "AA", "JFK", "LAX");
        f.departure = Arc::from("8am");
        save(&path, &[f]).unwrap();
        assert_eq!("9,AA,JFK,LAX,8am,11:00\n", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_unwritable_path_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("flights.txt");
        assert!(matches!(save(&path, &[]), Err(StoreError::Io { .. })));
    }
}
