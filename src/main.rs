use crate::config::FleetConfig;
use crate::fleet::Fleet;
use crate::flight::{Flight, FlightId};
use crate::logging::{Verbosity, init_logging};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::settings::Style;
use tabled::{Table, Tabled};

mod config;
mod error;
mod fleet;
mod flight;
mod logging;
mod time;

#[derive(Parser)]
struct Args {
    /// Path to the flight data file (CSV, created on first save)
    #[arg(short, long, value_name = "FILE", default_value = "flights.txt")]
    data_file: PathBuf,

    /// How many flights the emergency stack can hold
    #[arg(long, value_name = "N", default_value_t = FleetConfig::DEFAULT_EMERGENCY_CAPACITY)]
    emergency_capacity: usize,

    /// How many boarded flights the departure log keeps
    #[arg(long, value_name = "N", default_value_t = FleetConfig::DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn fleet_config(&self) -> FleetConfig {
        FleetConfig {
            emergency_capacity: self.emergency_capacity,
            history_capacity: self.history_capacity,
            ..FleetConfig::new(self.data_file.clone())
        }
    }
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        Ok((0, candidates))
    }
}

/// One itinerary leg as shown to the user, with times normalized when they parse.
#[derive(Tabled)]
struct LegRow {
    #[tabled(rename = "Leg")]
    leg: usize,
    #[tabled(rename = "Flight")]
    id: FlightId,
    #[tabled(rename = "Carrier")]
    carrier: String,
    #[tabled(rename = "Route")]
    route: String,
    #[tabled(rename = "Dep")]
    departure: String,
    #[tabled(rename = "Arr")]
    arrival: String,
    #[tabled(rename = "Block")]
    block: String,
}

impl LegRow {
    fn new(leg: usize, flight: &Flight) -> Self {
        let shown = |raw: &str| time::normalize(raw).unwrap_or_else(|| raw.to_string());
        LegRow {
            leg,
            id: flight.id,
            carrier: flight.carrier.to_string(),
            route: format!("{} -> {}", flight.origin, flight.destination),
            departure: shown(&*flight.departure),
            arrival: shown(&*flight.arrival),
            block: flight
                .block_minutes()
                .map(|m| format!("{}h{:02}", m / 60, m % 60))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn paginate(content: &str) -> std::io::Result<()> {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    pager.wait().map(|_| ())
}

fn show_table(table: Table, rows: usize) {
    if rows > 20 {
        let content = table.to_string();
        if let Err(e) = paginate(&content) {
            tracing::debug!("pager unavailable: {}", e);
            println!("{}", content);
        }
    } else {
        println!("{}", table);
    }
}

fn show_flights(flights: &[&Flight], empty: &str) {
    if flights.is_empty() {
        println!("{}", empty);
        return;
    }
    let mut table = Table::new(flights);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    show_table(table, flights.len());
}

fn show_ids(title: &str, ids: &[FlightId], empty: &str) {
    if ids.is_empty() {
        println!("{}", empty);
        return;
    }
    println!("{}", title);
    for id in ids {
        println!("  - Flight ID {}", id);
    }
}

/// Comma-separated when a comma is present, so names may contain spaces.
fn split_args(rest: &str) -> Vec<&str> {
    let rest = rest.trim();
    if rest.is_empty() {
        vec![]
    } else if rest.contains(',') {
        rest.split(',').map(str::trim).collect()
    } else {
        rest.split_whitespace().collect()
    }
}

fn parse_id(arg: Option<&&str>) -> Option<FlightId> {
    arg.and_then(|s| s.parse::<FlightId>().ok())
}

fn ok(message: String) {
    println!("{}", message.green());
}

fn fail(message: String) {
    println!("{}", message.yellow());
}

fn report(err: error::StoreError) {
    println!("{} {}", "Error:".red().bold(), err);
}

fn print_help() {
    println!("\nAvailable Commands:");
    println!("  ls [sorted]                   - List flights in schedule order, or by ID (tree index)");
    println!("  add <carrier>, <from>, <to>, <dep>, <arr>");
    println!("                                - Add a flight (IDs are assigned automatically)");
    println!("  find <id>                     - Show one flight");
    println!("  dest <name>                   - Flights to a destination (case-insensitive)");
    println!("  rm <id>                       - Delete a flight");
    println!("  push <id> / pop / stack       - Emergency diversion stack");
    println!("  board <id> / depart / queue   - Boarding queue; depart removes the flight");
    println!("  history                       - Departed flights, most recent first");
    println!("  route <from> <to> <stops>     - Fewest-legs itinerary with at most <stops> stops");
    println!("  airports                      - Known locations");
    println!("  rebuild / reload / save       - Rebuild indexes, re-read the file, write the file");
    println!("  help / ?                      - Show this help menu");
    println!("  exit / quit                   - Exit\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(Verbosity::from_occurrences(args.verbose));

    let mut fleet = Fleet::open(args.fleet_config())?;
    println!(
        "Flight desk online. Loaded {} flights from {}",
        fleet.len(),
        fleet.data_file().display()
    );
    if fleet.is_empty() {
        println!("No flights yet. Type 'help' for commands.");
    }

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: [
            "ls", "add", "find", "dest", "rm", "push", "pop", "stack", "board", "depart", "queue",
            "history", "route", "airports", "rebuild", "reload", "save", "help", "exit",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let (command, rest) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
                let parts = split_args(rest);
                match command {
                    "ls" => match parts.first().copied() {
                        Some("sorted" | "s") => show_flights(&fleet.sorted(), "No flights to show."),
                        _ => show_flights(&fleet.list_all(), "No flights scheduled."),
                    },
                    "add" => {
                        if let [carrier, origin, destination, departure, arrival] = parts[..] {
                            if parts.iter().any(|p| p.is_empty()) {
                                fail("Please fill all fields.".to_string());
                            } else {
                                match fleet.add(carrier, origin, destination, departure, arrival) {
                                    Ok(flight) => ok(format!("Added flight {}", flight)),
                                    Err(e) => report(e),
                                }
                            }
                        } else {
                            println!("Usage: add <carrier>, <from>, <to>, <dep>, <arr>");
                        }
                    },
                    "find" => match parse_id(parts.first()) {
                        Some(id) => match fleet.find_by_id(id) {
                            Some(flight) => println!("Found: {}", flight),
                            None => fail(format!("No flight with ID {} found.", id)),
                        },
                        None => println!("Usage: find <id>"),
                    },
                    "dest" => {
                        let name = rest.trim();
                        if name.is_empty() {
                            println!("Usage: dest <name>");
                        } else {
                            show_flights(&fleet.find_by_destination(name), &format!("No flights found to {}.", name));
                        }
                    },
                    "rm" => match parse_id(parts.first()) {
                        Some(id) => match fleet.delete(id) {
                            Ok(true) => ok(format!("Deleted flight {}.", id)),
                            Ok(false) => fail(format!("No flight with ID {} found.", id)),
                            Err(e) => report(e),
                        },
                        None => println!("Usage: rm <id>"),
                    },
                    "push" => match parse_id(parts.first()) {
                        Some(id) if fleet.push_emergency(id) => ok(format!("Pushed flight {} to emergency stack.", id)),
                        Some(id) => fail(format!("Failed to push flight {} (not found or stack full).", id)),
                        None => println!("Usage: push <id>"),
                    },
                    "pop" => match fleet.pop_emergency() {
                        Some(id) => ok(format!("Popped emergency flight {} (performed landing).", id)),
                        None => fail("Emergency stack is empty.".to_string()),
                    },
                    "stack" => {
                        let ids = fleet.emergency_stack();
                        let title = format!("Emergency stack, top first ({}/{}):", ids.len(), fleet.emergency_capacity());
                        show_ids(&title, &ids, "Emergency stack empty.");
                    },
                    "board" => match parse_id(parts.first()) {
                        Some(id) if fleet.enqueue_boarding(id) => ok(format!("Enqueued flight {} for boarding.", id)),
                        Some(id) => fail(format!("Failed to enqueue flight {} (not found).", id)),
                        None => println!("Usage: board <id>"),
                    },
                    "depart" => match fleet.dequeue_boarding() {
                        Ok(Some(id)) => ok(format!("Flight {} boarded and departed.", id)),
                        Ok(None) => fail("Boarding queue empty.".to_string()),
                        Err(e) => report(e),
                    },
                    "queue" => show_ids("Boarding queue (front -> rear):", &fleet.boarding_queue(), "Boarding queue empty."),
                    "history" => {
                        let departed = fleet.departures();
                        show_flights(&departed.iter().collect::<Vec<_>>(), "No flights in history.");
                    },
                    "route" => {
                        let stops = parts.get(2).and_then(|s| s.parse::<usize>().ok());
                        if let (Some(src), Some(dst), Some(stops)) = (parts.first(), parts.get(1), stops) {
                            match fleet.find_itinerary(src, dst, stops) {
                                Some(legs) => {
                                    println!("Itinerary from {} to {} ({} legs):", src, dst, legs.len());
                                    let rows = legs.iter().enumerate().map(|(i, f)| LegRow::new(i + 1, f)).collect::<Vec<_>>();
                                    let mut table = Table::new(&rows);
                                    table.with(Style::rounded());
                                    show_table(table, rows.len());
                                }
                                None => match [src, dst].into_iter().find(|name| !fleet.routes().contains(name)) {
                                    Some(name) => fail(format!("Unknown airport '{}'.", name)),
                                    None => fail(format!("No itinerary found from '{}' to '{}' within {} stops.", src, dst, stops)),
                                },
                            }
                        } else {
                            println!("Usage: route <from> <to> <max_stops>  (or comma-separated for names with spaces)");
                        }
                    },
                    "airports" => {
                        let names = fleet.routes().locations();
                        if names.is_empty() {
                            println!("No airports known.");
                        } else {
                            for name in names {
                                println!("  {} ({} departures)", name, fleet.routes().outgoing(name).len());
                            }
                        }
                    },
                    "rebuild" => match fleet.rebuild() {
                        Ok(()) => ok("Rebuilt tree index and route graph from current flights.".to_string()),
                        Err(e) => report(e),
                    },
                    "reload" => match fleet.reload_from_disk() {
                        Ok(()) => ok(format!("Reloaded {} flights from {}.", fleet.len(), fleet.data_file().display())),
                        Err(e) => report(e),
                    },
                    "save" => match fleet.save() {
                        Ok(()) => ok(format!("Saved {} flights.", fleet.len())),
                        Err(e) => report(e),
                    },
                    "help" | "?" => print_help(),
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", command),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_split_args() {
        assert_eq!(vec!["JFK", "LAX", "1"], split_args(" JFK  LAX 1 "));
        assert_eq!(vec!["New York", "Los Angeles", "0"], split_args("New York, Los Angeles,0"));
        assert_eq!(vec!["AA", "", "LAX"], split_args("AA,,LAX"));
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn test_leg_row_normalizes_times() {
        let flight = Flight {
            id: 4,
            carrier: Arc::from("AI"),
            origin: Arc::from("DEL"),
            destination: Arc::from("BOM"),
            departure: Arc::from("8:05pm"),
            arrival: Arc::from("2215"),
        };
        let row = LegRow::new(1, &flight);
        assert_eq!("20:05", row.departure);
        assert_eq!("22:15", row.arrival);
        assert_eq!("2h10", row.block);
        assert_eq!("DEL -> BOM", row.route);
    }

    #[test]
    fn test_args_map_onto_config() {
        let args = Args::parse_from(["flightdesk", "-d", "/tmp/f.txt", "--emergency-capacity", "3", "-vv"]);
        let config = args.fleet_config();
        assert_eq!(PathBuf::from("/tmp/f.txt"), config.data_file);
        assert_eq!(3, config.emergency_capacity);
        assert_eq!(FleetConfig::DEFAULT_HISTORY_CAPACITY, config.history_capacity);
        assert_eq!(2, args.verbose);
    }
}
