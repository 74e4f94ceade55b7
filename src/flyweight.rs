//! Flyweight: a police vehicle database that stores every (brand, model,
//! color) combination once and hands out shared handles to it.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;
use serde::Deserialize;

use crate::error::Result;

// =============================================================================
// Shared / unique state
// =============================================================================

/// An unordered set of state values.
///
/// Backed by a `BTreeSet`, so iteration is always sorted and duplicates
/// collapse. Used both for the shared part stored in a [`Flyweight`] and for
/// the unique part passed to [`Flyweight::operation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SharedState(BTreeSet<String>);

impl SharedState {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SharedState(values.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Display key, see [`get_key`].
    pub fn key(&self) -> String {
        get_key(self.iter())
    }
}

impl<S: Into<String>> FromIterator<S> for SharedState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SharedState::new(iter)
    }
}

impl fmt::Display for SharedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().map(|v| format!("'{v}'")).join(", "))
    }
}

/// Key for a state combination: values in sorted order joined by `_`.
///
/// Sorting makes the key independent of the order the caller listed the
/// values in, so `{"a", "b"}` and `{"b", "a"}` both map to `"a_b"`. The
/// factory itself is keyed by [`SharedState`]; this string is only what
/// `list_flyweights` reports, and `{"a_b"}` renders the same as `{"a", "b"}`.
pub fn get_key<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().to_owned())
        .sorted()
        .dedup()
        .join("_")
}

// =============================================================================
// Flyweight
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
pub struct Flyweight {
    shared_state: SharedState,
}

impl Flyweight {
    pub fn new(shared_state: SharedState) -> Self {
        Flyweight { shared_state }
    }

    pub fn shared_state(&self) -> &SharedState {
        &self.shared_state
    }

    pub fn key(&self) -> String {
        self.shared_state.key()
    }

    pub fn operation(&self, unique_state: &SharedState) -> String {
        format!(
            "Flyweight: Displaying shared ({}) and unique ({}) state.",
            self.shared_state, unique_state
        )
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Memoizing constructor for flyweights.
pub trait FlyweightPool {
    fn get_or_create(&mut self, shared_state: &SharedState) -> Rc<Flyweight>;
    fn count(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlyweightListing {
    pub count: usize,
    pub keys: Vec<String>,
}

impl fmt::Display for FlyweightListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FlyweightFactory: I have {} flyweights:", self.count)?;
        write!(f, "{}", self.keys.join("\n"))
    }
}

/// Whether a factory request found its state cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Reused,
    Created,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Reused => write!(f, "FlyweightFactory: Reusing existing flyweight."),
            Lookup::Created => {
                write!(f, "FlyweightFactory: Can't find a flyweight, creating new one.")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FlyweightFactory {
    flyweights: HashMap<SharedState, Rc<Flyweight>>,
}

impl FlyweightFactory {
    pub fn new<I>(initial_flyweights: I) -> Self
    where
        I: IntoIterator<Item = SharedState>,
    {
        let mut factory = FlyweightFactory::default();
        for state in initial_flyweights {
            factory
                .flyweights
                .entry(state.clone())
                .or_insert_with(|| Rc::new(Flyweight::new(state)));
        }
        tracing::debug!(count = factory.flyweights.len(), "seeded flyweight factory");
        factory
    }

    pub fn get_flyweight(&mut self, shared_state: &SharedState) -> Rc<Flyweight> {
        self.lookup(shared_state).0
    }

    /// Like [`get_flyweight`](Self::get_flyweight), also telling whether the
    /// state was already cached.
    pub fn lookup(&mut self, shared_state: &SharedState) -> (Rc<Flyweight>, Lookup) {
        match self.flyweights.entry(shared_state.clone()) {
            Entry::Occupied(entry) => {
                tracing::debug!(key = %shared_state.key(), "reusing existing flyweight");
                (Rc::clone(entry.get()), Lookup::Reused)
            }
            Entry::Vacant(entry) => {
                tracing::debug!(key = %shared_state.key(), "can't find a flyweight, creating new one");
                let flyweight = Rc::new(Flyweight::new(shared_state.clone()));
                entry.insert(Rc::clone(&flyweight));
                (flyweight, Lookup::Created)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.flyweights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flyweights.is_empty()
    }

    /// Count and keys, keys sorted for stable output.
    pub fn list_flyweights(&self) -> FlyweightListing {
        FlyweightListing {
            count: self.flyweights.len(),
            keys: self.flyweights.values().map(|f| f.key()).sorted().collect(),
        }
    }
}

impl FlyweightPool for FlyweightFactory {
    fn get_or_create(&mut self, shared_state: &SharedState) -> Rc<Flyweight> {
        self.get_flyweight(shared_state)
    }

    fn count(&self) -> usize {
        self.len()
    }
}

// =============================================================================
// Police database client
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CarModel {
    pub brand: String,
    pub model: String,
    pub color: String,
}

impl CarModel {
    pub fn shared_state(&self) -> SharedState {
        SharedState::new([&self.brand, &self.model, &self.color].map(String::as_str))
    }
}

#[derive(Debug, Deserialize)]
struct CarCatalog {
    car: Vec<CarModel>,
}

const POLICE_CARS: &str = include_str!("police_cars.toml");

pub fn parse_catalog(source: &str) -> Result<Vec<CarModel>> {
    let catalog: CarCatalog = toml::from_str(source)?;
    Ok(catalog.car)
}

/// The cars the police database starts with.
pub fn seed_catalog() -> Result<Vec<CarModel>> {
    parse_catalog(POLICE_CARS)
}

#[derive(Debug)]
pub struct CarRecord {
    pub lookup: Lookup,
    pub flyweight: Rc<Flyweight>,
    pub rendered: String,
}

pub fn add_car_to_police_database(
    factory: &mut FlyweightFactory,
    plates: &str,
    owner: &str,
    brand: &str,
    model: &str,
    color: &str,
) -> CarRecord {
    let (flyweight, lookup) = factory.lookup(&SharedState::new([brand, model, color]));
    // Unique state is computed by the client and never stored in the factory.
    let rendered = flyweight.operation(&SharedState::new([plates, owner]));

    CarRecord {
        lookup,
        flyweight,
        rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn triple(brand: &str, model: &str, color: &str) -> SharedState {
        SharedState::new([brand, model, color])
    }

    fn seeded() -> FlyweightFactory {
        FlyweightFactory::new(
            seed_catalog()
                .unwrap()
                .iter()
                .map(CarModel::shared_state),
        )
    }

    #[test]
    fn test_get_key_is_order_independent() {
        assert_eq!(get_key(["a", "b"]), get_key(["b", "a"]));
        assert_eq!(get_key(["a", "b"]), "a_b");
    }

    #[test]
    fn test_get_key_collapses_duplicates() {
        assert_eq!(get_key(["red", "BMW", "red"]), "BMW_red");
    }

    #[test]
    fn test_shared_state_display_is_sorted() {
        let state = triple("pink", "Chevrolet", "Camaro2018");
        assert_eq!(state.to_string(), "{'Camaro2018', 'Chevrolet', 'pink'}");
    }

    #[test]
    fn test_same_state_returns_same_instance() {
        let mut factory = FlyweightFactory::default();
        let first = factory.get_flyweight(&triple("BMW", "M5", "red"));
        let second = factory.get_flyweight(&triple("red", "M5", "BMW"));

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn test_underscore_values_do_not_collide() {
        let mut factory = FlyweightFactory::default();
        let joined = factory.get_flyweight(&SharedState::new(["a_b"]));
        let split = factory.get_flyweight(&SharedState::new(["a", "b"]));

        assert_eq!(factory.count(), 2);
        assert!(!Rc::ptr_eq(&joined, &split));
        assert_eq!(split.shared_state(), &SharedState::new(["b", "a"]));
        assert_eq!(joined.key(), split.key());
    }

    #[test]
    fn test_lookup_reports_hit_and_miss() {
        let mut factory = FlyweightFactory::default();
        assert!(factory.is_empty());

        let (created, lookup) = factory.lookup(&triple("BMW", "M5", "red"));
        assert_eq!(lookup, Lookup::Created);
        assert!(!factory.is_empty());

        let (reused, lookup) = factory.lookup(&triple("M5", "red", "BMW"));
        assert_eq!(lookup, Lookup::Reused);
        assert!(Rc::ptr_eq(&created, &reused));
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn test_seed_catalog_has_five_cars() {
        let cars = seed_catalog().unwrap();
        assert_eq!(cars.len(), 5);
        assert_eq!(
            cars[0],
            CarModel {
                brand: "Chevrolet".into(),
                model: "Camaro2018".into(),
                color: "pink".into(),
            }
        );
    }

    #[test]
    fn test_seeding_with_duplicates() {
        let factory = FlyweightFactory::new([
            triple("BMW", "M5", "red"),
            triple("M5", "BMW", "red"),
        ]);
        assert_eq!(factory.len(), 1);
    }

    #[test]
    fn test_police_database_scenario() {
        let mut factory = seeded();
        assert_eq!(factory.list_flyweights().count, 5);

        let before = factory.get_flyweight(&triple("BMW", "M5", "red"));

        let reused =
            add_car_to_police_database(&mut factory, "CL234IR", "James Doe", "BMW", "M5", "red");
        assert_eq!(reused.lookup, Lookup::Reused);
        assert!(Rc::ptr_eq(&before, &reused.flyweight));
        assert_eq!(factory.count(), 5);

        let created =
            add_car_to_police_database(&mut factory, "CL234IR", "James Doe", "BMW", "X1", "red");
        assert_eq!(created.lookup, Lookup::Created);
        assert_eq!(factory.count(), 6);

        for car in seed_catalog().unwrap() {
            factory.get_or_create(&car.shared_state());
        }
        assert_eq!(factory.count(), 6);
        assert!(Rc::ptr_eq(
            &before,
            &factory.get_or_create(&triple("BMW", "M5", "red"))
        ));
    }

    #[test]
    fn test_operation_output() {
        let mut factory = FlyweightFactory::default();
        let record =
            add_car_to_police_database(&mut factory, "CL234IR", "James Doe", "BMW", "M5", "red");
        assert_eq!(
            record.rendered,
            "Flyweight: Displaying shared ({'BMW', 'M5', 'red'}) and unique ({'CL234IR', 'James Doe'}) state."
        );
    }

    #[test]
    fn test_listing_display() {
        let factory = FlyweightFactory::new([triple("BMW", "X6", "white"), triple("BMW", "M5", "red")]);
        assert_eq!(
            factory.list_flyweights().to_string(),
            "FlyweightFactory: I have 2 flyweights:\nBMW_M5_red\nBMW_X6_white"
        );
    }

    #[test]
    fn test_malformed_catalog() {
        assert!(parse_catalog("[[car]]\nbrand = \"BMW\"\n").is_err());
    }

    proptest! {
        #[test]
        fn prop_key_stable_under_reordering(mut values in prop::collection::vec("[a-z]{1,6}", 1..6)) {
            let key = get_key(&values);
            values.reverse();
            prop_assert_eq!(&key, &get_key(&values));
            values.rotate_left(1);
            prop_assert_eq!(key, get_key(&values));
        }

        #[test]
        fn prop_count_equals_distinct_combinations(
            combos in prop::collection::vec(prop::collection::btree_set("[a-z]{1,4}", 1..4), 1..12),
            repeats in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
        ) {
            let mut factory = FlyweightFactory::default();
            for combo in &combos {
                factory.get_flyweight(&combo.iter().cloned().collect());
            }
            let distinct = factory.count();
            for index in &repeats {
                let combo = index.get(&combos);
                factory.get_flyweight(&combo.iter().cloned().collect());
            }

            let unique: std::collections::HashSet<_> = combos.iter().collect();
            prop_assert_eq!(distinct, unique.len());
            prop_assert_eq!(factory.count(), unique.len());
        }
    }
}
