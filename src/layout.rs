//! Rack addressing model.
//!
//! A rack is subdivided into levels (vertical), bays (horizontal groups) and
//! bins per bay. Single-faced racks expose one direction (`R`); double-faced
//! racks expose two (`R` and `L`). Every slot is uniquely addressed by the
//! tuple `(direction, level, bay, bin)` within its rack.

use std::collections::HashMap;
use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;
use utoipa::ToSchema;

/// Face configuration of a rack.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RackFace {
    #[sea_orm(string_value = "single")]
    Single,
    #[sea_orm(string_value = "double")]
    Double,
}

impl RackFace {
    /// Directions accessible on this face configuration.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            RackFace::Single => &[Direction::R],
            RackFace::Double => &[Direction::R, Direction::L],
        }
    }

    fn code(self) -> &'static str {
        match self {
            RackFace::Single => "S",
            RackFace::Double => "D",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(RackFace::Single),
            "D" => Some(RackFace::Double),
            _ => None,
        }
    }
}

/// Accessible side of a rack.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Direction {
    #[sea_orm(string_value = "R")]
    R,
    #[sea_orm(string_value = "L")]
    L,
}

/// Dimensional configuration of a rack. Fixed at rack creation; the slot
/// address space is fully determined by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RackConfig {
    pub face_type: RackFace,
    pub levels: i32,
    pub bays: i32,
    pub bins_per_bay: i32,
}

impl RackConfig {
    pub fn new(face_type: RackFace, levels: i32, bays: i32, bins_per_bay: i32) -> Option<Self> {
        if levels < 1 || bays < 1 || bins_per_bay < 1 {
            return None;
        }
        Some(Self {
            face_type,
            levels,
            bays,
            bins_per_bay,
        })
    }

    /// Builds the rack code label, e.g. `R-S-L3-B4-P2`.
    pub fn code(&self) -> String {
        format!(
            "R-{}-L{}-B{}-P{}",
            self.face_type.code(),
            self.levels,
            self.bays,
            self.bins_per_bay
        )
    }

    /// Parses a rack code back into its configuration. Malformed input
    /// yields `None`; `parse(c.code()) == Some(c)` for every valid config.
    pub fn parse(code: &str) -> Option<Self> {
        let mut parts = code.split('-');
        if parts.next()? != "R" {
            return None;
        }
        let face_type = RackFace::from_code(parts.next()?)?;
        let levels = parse_dimension(parts.next()?, 'L')?;
        let bays = parse_dimension(parts.next()?, 'B')?;
        let bins_per_bay = parse_dimension(parts.next()?, 'P')?;
        if parts.next().is_some() {
            return None;
        }
        Self::new(face_type, levels, bays, bins_per_bay)
    }

    pub fn directions(&self) -> &'static [Direction] {
        self.face_type.directions()
    }

    /// Total number of addressable slots.
    pub fn slot_count(&self) -> u64 {
        self.levels as u64
            * self.bays as u64
            * self.bins_per_bay as u64
            * self.directions().len() as u64
    }

    /// Whether the address lies within this rack's dimensions.
    pub fn contains(&self, address: &SlotAddress) -> bool {
        self.directions().contains(&address.direction)
            && (1..=self.levels).contains(&address.level)
            && (1..=self.bays).contains(&address.bay)
            && (1..=self.bins_per_bay).contains(&address.bin)
    }

    /// Materializes the full address space in grid traversal order:
    /// direction, then levels descending, bays ascending, bins ascending.
    pub fn addresses(&self) -> impl Iterator<Item = SlotAddress> + '_ {
        self.directions().iter().flat_map(move |&direction| {
            (1..=self.levels).rev().flat_map(move |level| {
                (1..=self.bays).flat_map(move |bay| {
                    (1..=self.bins_per_bay).map(move |bin| SlotAddress {
                        direction,
                        level,
                        bay,
                        bin,
                    })
                })
            })
        })
    }
}

fn parse_dimension(part: &str, tag: char) -> Option<i32> {
    let digits = part.strip_prefix(tag)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n >= 1)
}

/// Unique address of a slot within its rack.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub struct SlotAddress {
    pub direction: Direction,
    pub level: i32,
    pub bay: i32,
    pub bin: i32,
}

impl SlotAddress {
    pub fn new(direction: Direction, level: i32, bay: i32, bin: i32) -> Self {
        Self {
            direction,
            level,
            bay,
            bin,
        }
    }

    /// Human-readable coordinate label, e.g. `R-L1-B2-P3`.
    pub fn coordinate(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SlotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-L{}-B{}-P{}",
            self.direction, self.level, self.bay, self.bin
        )
    }
}

/// A record that lives at a slot address and may hold a stock placement.
pub trait SlotCell {
    fn address(&self) -> SlotAddress;
    fn is_occupied(&self) -> bool;
}

/// Address-keyed lookup over a rack's slot records.
pub struct SlotIndex<T> {
    map: HashMap<SlotAddress, T>,
}

impl<T: SlotCell> SlotIndex<T> {
    /// Constructs the lookup. Duplicate addresses indicate an upstream data
    /// error; the occupied record wins the key and a warning is logged.
    pub fn build(slots: impl IntoIterator<Item = T>) -> Self {
        let mut map: HashMap<SlotAddress, T> = HashMap::new();
        for slot in slots {
            let address = slot.address();
            match map.get(&address).map(T::is_occupied) {
                Some(existing_occupied) => {
                    if existing_occupied || slot.is_occupied() {
                        warn!(%address, "duplicate slot address, keeping occupied record");
                    } else {
                        warn!(%address, "duplicate slot address");
                    }
                    if !existing_occupied {
                        map.insert(address, slot);
                    }
                }
                None => {
                    map.insert(address, slot);
                }
            }
        }
        Self { map }
    }

    pub fn get(&self, address: &SlotAddress) -> Option<&T> {
        self.map.get(address)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Renders one face of the rack as levels (top level first), each level
    /// as bays in ascending order, each bay as bins in ascending order.
    /// Cells missing from the slot data render as `None`.
    pub fn grid(&self, config: &RackConfig, direction: Direction) -> Vec<Vec<Vec<Option<&T>>>> {
        (1..=config.levels)
            .rev()
            .map(|level| {
                (1..=config.bays)
                    .map(|bay| {
                        (1..=config.bins_per_bay)
                            .map(|bin| self.get(&SlotAddress::new(direction, level, bay, bin)))
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestSlot {
        address: SlotAddress,
        occupied: bool,
    }

    impl SlotCell for TestSlot {
        fn address(&self) -> SlotAddress {
            self.address
        }

        fn is_occupied(&self) -> bool {
            self.occupied
        }
    }

    fn slot(direction: Direction, level: i32, bay: i32, bin: i32, occupied: bool) -> TestSlot {
        TestSlot {
            address: SlotAddress::new(direction, level, bay, bin),
            occupied,
        }
    }

    #[test]
    fn rack_code_builds_expected_label() {
        let config = RackConfig::new(RackFace::Double, 3, 2, 2).unwrap();
        assert_eq!(config.code(), "R-D-L3-B2-P2");
        assert_eq!(config.directions(), &[Direction::R, Direction::L]);
        assert_eq!(config.slot_count(), 24);
    }

    #[test]
    fn rack_code_round_trips() {
        let config = RackConfig::new(RackFace::Single, 3, 4, 2).unwrap();
        assert_eq!(config.code(), "R-S-L3-B4-P2");
        assert_eq!(RackConfig::parse(&config.code()), Some(config));
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        for code in [
            "",
            "R",
            "R-S",
            "R-S-L3-B4",
            "R-S-L3-B4-P2-X1",
            "X-S-L3-B4-P2",
            "R-T-L3-B4-P2",
            "R-S-L0-B4-P2",
            "R-S-L3-B0-P2",
            "R-S-L3-B4-P0",
            "R-S-Lx-B4-P2",
            "R-S-L3-Bx-P2",
            "R-S-L-B4-P2",
            "R-S-L3-B4-P-2",
            "R-S-B4-L3-P2",
            "r-s-l3-b4-p2",
        ] {
            assert_eq!(RackConfig::parse(code), None, "accepted {code:?}");
        }
    }

    #[test]
    fn config_rejects_non_positive_dimensions() {
        assert!(RackConfig::new(RackFace::Single, 0, 1, 1).is_none());
        assert!(RackConfig::new(RackFace::Single, 1, -1, 1).is_none());
        assert!(RackConfig::new(RackFace::Single, 1, 1, 0).is_none());
    }

    #[test]
    fn single_face_has_one_direction() {
        let config = RackConfig::new(RackFace::Single, 2, 2, 2).unwrap();
        assert_eq!(config.directions(), &[Direction::R]);
        assert_eq!(config.slot_count(), 8);
        assert!(!config.contains(&SlotAddress::new(Direction::L, 1, 1, 1)));
    }

    #[test]
    fn addresses_cover_the_full_space_without_duplicates() {
        let config = RackConfig::new(RackFace::Double, 3, 2, 2).unwrap();
        let addresses: Vec<_> = config.addresses().collect();
        assert_eq!(addresses.len() as u64, config.slot_count());

        let unique: std::collections::HashSet<_> = addresses.iter().collect();
        assert_eq!(unique.len(), addresses.len());
        assert!(addresses.iter().all(|a| config.contains(a)));
    }

    #[test]
    fn addresses_follow_grid_traversal_order() {
        let config = RackConfig::new(RackFace::Single, 2, 2, 2).unwrap();
        let addresses: Vec<_> = config.addresses().collect();
        let expected = [
            (2, 1, 1),
            (2, 1, 2),
            (2, 2, 1),
            (2, 2, 2),
            (1, 1, 1),
            (1, 1, 2),
            (1, 2, 1),
            (1, 2, 2),
        ];
        let actual: Vec<_> = addresses.iter().map(|a| (a.level, a.bay, a.bin)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn coordinate_label_format() {
        let address = SlotAddress::new(Direction::L, 2, 3, 1);
        assert_eq!(address.coordinate(), "L-L2-B3-P1");
    }

    #[test]
    fn index_holds_one_key_per_well_formed_slot() {
        let config = RackConfig::new(RackFace::Double, 3, 2, 2).unwrap();
        let slots: Vec<_> = config
            .addresses()
            .map(|address| TestSlot {
                address,
                occupied: false,
            })
            .collect();
        let index = SlotIndex::build(slots);
        assert_eq!(index.len() as u64, config.slot_count());
    }

    #[test]
    fn index_prefers_occupied_record_on_duplicate_address() {
        let empty = slot(Direction::R, 1, 1, 1, false);
        let occupied = slot(Direction::R, 1, 1, 1, true);

        let index = SlotIndex::build(vec![empty.clone(), occupied.clone()]);
        assert_eq!(index.len(), 1);
        assert!(index.get(&occupied.address).unwrap().occupied);

        // Same outcome regardless of input order.
        let index = SlotIndex::build(vec![occupied.clone(), empty]);
        assert_eq!(index.len(), 1);
        assert!(index.get(&occupied.address).unwrap().occupied);
    }

    #[test]
    fn grid_orders_levels_descending_and_bays_bins_ascending() {
        let config = RackConfig::new(RackFace::Single, 3, 2, 2).unwrap();
        let index = SlotIndex::build(config.addresses().map(|address| TestSlot {
            address,
            occupied: false,
        }));

        let grid = index.grid(&config, Direction::R);
        assert_eq!(grid.len(), 3);
        for (row, level) in grid.iter().zip([3, 2, 1]) {
            assert_eq!(row.len(), 2);
            for (bay_cells, bay) in row.iter().zip([1, 2]) {
                assert_eq!(bay_cells.len(), 2);
                for (cell, bin) in bay_cells.iter().zip([1, 2]) {
                    let slot = cell.expect("cell should be present");
                    assert_eq!(slot.address, SlotAddress::new(Direction::R, level, bay, bin));
                }
            }
        }
    }

    #[test]
    fn grid_renders_missing_cells_as_none() {
        let config = RackConfig::new(RackFace::Single, 1, 1, 2).unwrap();
        let index = SlotIndex::build(vec![slot(Direction::R, 1, 1, 1, true)]);

        let grid = index.grid(&config, Direction::R);
        assert!(grid[0][0][0].is_some());
        assert!(grid[0][0][1].is_none());
    }

    proptest! {
        #[test]
        fn rack_code_round_trips_for_any_valid_config(
            face in prop_oneof![Just(RackFace::Single), Just(RackFace::Double)],
            levels in 1i32..=50,
            bays in 1i32..=50,
            bins in 1i32..=50,
        ) {
            let config = RackConfig::new(face, levels, bays, bins).unwrap();
            prop_assert_eq!(RackConfig::parse(&config.code()), Some(config));
        }

        #[test]
        fn parse_never_panics_on_arbitrary_input(code in ".{0,40}") {
            let _ = RackConfig::parse(&code);
        }
    }
}
