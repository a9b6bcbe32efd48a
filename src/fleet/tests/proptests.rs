use crate::fleet::Fleet;
use crate::fleet::tests::utils::{Edit, arb_edit, arb_location, config, ids, open_fleet};
use proptest::prelude::*;
use proptest::proptest;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_ids_increase_and_index_stays_sorted(edits in prop::collection::vec(arb_edit(), 1..40)) {
        let (_dir, mut fleet) = open_fleet();

        for edit in edits {
            match edit {
                Edit::Add(origin, destination) => {
                    let expected = fleet.list_all().iter().map(|f| f.id).max().map_or(1, |m| m + 1);
                    let flight = fleet.add("AA", origin, destination, "08:00", "11:00").unwrap();
                    prop_assert_eq!(expected, flight.id);
                }
                Edit::Delete(nth) => {
                    let target = fleet.list_all().get(nth).map(|f| f.id);
                    if let Some(id) = target {
                        prop_assert!(fleet.delete(id).unwrap());
                        prop_assert!(fleet.find_by_id(id).is_none());
                    }
                }
            }

            let sorted = ids(&fleet.sorted());
            prop_assert!(sorted.windows(2).all(|w| w[0] < w[1]), "index out of order: {:?}", sorted);
            let mut listed = ids(&fleet.list_all());
            listed.sort();
            prop_assert_eq!(listed, sorted);
        }
    }

    #[test]
    fn test_itinerary_respects_bound_and_is_stable(
        routes in prop::collection::vec((arb_location(), arb_location()), 0..25),
        source in arb_location(),
        destination in arb_location(),
        max_stops in 0..4usize,
    ) {
        let (_dir, mut fleet) = open_fleet();
        for (origin, dest) in routes {
            fleet.add("AA", origin, dest, "08:00", "11:00").unwrap();
        }

        let first = fleet.find_itinerary(source, destination, max_stops);
        prop_assert_eq!(&first, &fleet.find_itinerary(source, destination, max_stops));

        if let Some(legs) = first {
            prop_assert!(!legs.is_empty());
            prop_assert!(legs.len() <= max_stops + 1);
            prop_assert_eq!(source, &*legs[0].origin);
            prop_assert_eq!(destination, &*legs[legs.len() - 1].destination);
            prop_assert!(legs.windows(2).all(|w| w[0].destination == w[1].origin));

            // no shorter itinerary exists
            if legs.len() > 1 {
                prop_assert!(fleet.find_itinerary(source, destination, legs.len() - 2).is_none());
            }
        }
    }

    #[test]
    fn test_save_and_reload_round_trip(
        rows in prop::collection::vec(("[A-Za-z ,\"]{0,8}", arb_location(), arb_location(), "[0-9:apm ]{0,6}"), 0..15)
    ) {
        let (dir, mut fleet) = open_fleet();
        for (carrier, origin, destination, departure) in &rows {
            fleet.add(carrier, origin, destination, departure, "11:00").unwrap();
        }
        fleet.save().unwrap();

        let reopened = Fleet::open(config(&dir)).unwrap();
        let before: Vec<_> = fleet.list_all().into_iter().cloned().collect();
        let after: Vec<_> = reopened.list_all().into_iter().cloned().collect();
        prop_assert_eq!(before, after);
    }
}
