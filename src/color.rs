//! Stable per-country series colors.
//!
//! A country keeps its palette slot for as long as it stays selected. When it
//! is deselected the slot is released and the next newly selected country takes
//! the lowest free slot, so the remaining lines never change color under the
//! user's eyes.

use crate::models::Series;
use std::collections::{BTreeMap, BTreeSet};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The 20-color categorical palette (d3 category20 order).
pub const CATEGORY20: [(u8, u8, u8); 20] = [
    (0x1f, 0x77, 0xb4),
    (0xae, 0xc7, 0xe8),
    (0xff, 0x7f, 0x0e),
    (0xff, 0xbb, 0x78),
    (0x2c, 0xa0, 0x2c),
    (0x98, 0xdf, 0x8a),
    (0xd6, 0x27, 0x28),
    (0xff, 0x98, 0x96),
    (0x94, 0x67, 0xbd),
    (0xc5, 0xb0, 0xd5),
    (0x8c, 0x56, 0x4b),
    (0xc4, 0x9c, 0x94),
    (0xe3, 0x77, 0xc2),
    (0xf7, 0xb6, 0xd2),
    (0x7f, 0x7f, 0x7f),
    (0xc7, 0xc7, 0xc7),
    (0xbc, 0xbd, 0x22),
    (0xdb, 0xdb, 0x8d),
    (0x17, 0xbe, 0xcf),
    (0x9e, 0xda, 0xe5),
];

/// Palette color for a slot; slots past the palette wrap around.
pub fn palette_color(slot: usize) -> Rgba {
    let (r, g, b) = CATEGORY20[slot % CATEGORY20.len()];
    Rgba::rgb(r, g, b)
}

/// Country code → palette slot, kept across refreshes.
#[derive(Debug, Clone, Default)]
pub struct ColorAssigner {
    slots: BTreeMap<String, usize>,
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_of(&self, country_code: &str) -> Option<usize> {
        self.slots.get(country_code).copied()
    }

    /// Release slots of deselected countries, give newly selected ones the
    /// lowest free slot, and write the resulting color into each series.
    ///
    /// Slots follow the selection, not the drawn series: a selected country
    /// with no data for the current subject keeps its color for later.
    pub fn assign(&mut self, selected: &[String], series: &mut [Series]) {
        let keep: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
        self.slots.retain(|code, _| keep.contains(code.as_str()));

        let codes = selected
            .iter()
            .map(String::as_str)
            .chain(series.iter().map(|s| s.country_code.as_str()));
        for code in codes {
            if !self.slots.contains_key(code) {
                let slot = self.lowest_free_slot();
                log::debug!("color slot {} -> {}", slot, code);
                self.slots.insert(code.to_string(), slot);
            }
        }
        for s in series.iter_mut() {
            s.color = self.slot_of(&s.country_code).map(palette_color);
        }
    }

    fn lowest_free_slot(&self) -> usize {
        let used: BTreeSet<usize> = self.slots.values().copied().collect();
        (0..CATEGORY20.len())
            .find(|i| !used.contains(i))
            .unwrap_or(self.slots.len() % CATEGORY20.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(code: &str) -> Series {
        Series {
            country_code: code.into(),
            country_name: code.into(),
            values: Vec::new(),
            min_y: None,
            max_y: None,
            color: None,
            legend_y: None,
        }
    }

    #[test]
    fn test_rgba_creation() {
        let color = Rgba::rgb(255, 128, 64);
        assert_eq!(color.a, 255);
        assert_eq!(color.hex(), "#ff8040");
    }

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn assign(colors: &mut ColorAssigner, series: &mut [Series]) {
        let selected: Vec<String> = series.iter().map(|s| s.country_code.clone()).collect();
        colors.assign(&selected, series);
    }

    #[test]
    fn freed_slot_goes_to_next_new_country() {
        let mut colors = ColorAssigner::new();
        let mut abc = vec![series("AAA"), series("BBB"), series("CCC")];
        assign(&mut colors, &mut abc);
        assert_eq!(colors.slot_of("AAA"), Some(0));
        assert_eq!(colors.slot_of("BBB"), Some(1));
        assert_eq!(colors.slot_of("CCC"), Some(2));

        let mut ac = vec![series("AAA"), series("CCC")];
        assign(&mut colors, &mut ac);
        assert_eq!(colors.slot_of("BBB"), None);

        let mut acd = vec![series("AAA"), series("CCC"), series("DDD")];
        assign(&mut colors, &mut acd);
        assert_eq!(colors.slot_of("AAA"), Some(0));
        assert_eq!(colors.slot_of("CCC"), Some(2));
        assert_eq!(colors.slot_of("DDD"), Some(1));
        assert_eq!(acd[2].color, Some(palette_color(1)));
        assert_eq!(acd[0].color, abc[0].color);
    }

    #[test]
    fn order_change_keeps_colors() {
        let mut colors = ColorAssigner::new();
        let mut first = vec![series("USA"), series("VEN")];
        assign(&mut colors, &mut first);
        let mut swapped = vec![series("VEN"), series("USA")];
        assign(&mut colors, &mut swapped);
        assert_eq!(swapped[0].color, first[1].color);
        assert_eq!(swapped[1].color, first[0].color);
    }

    #[test]
    fn selected_country_without_data_keeps_its_slot() {
        let mut colors = ColorAssigner::new();
        let mut first = vec![series("VEN"), series("USA")];
        colors.assign(&codes(&["VEN", "USA"]), &mut first);

        // VEN stays selected but has nothing to draw for this subject.
        let mut only_usa = vec![series("USA")];
        colors.assign(&codes(&["VEN", "USA"]), &mut only_usa);
        assert_eq!(colors.slot_of("VEN"), Some(0));

        let mut with_deu = vec![series("USA"), series("DEU")];
        colors.assign(&codes(&["VEN", "USA", "DEU"]), &mut with_deu);
        assert_eq!(colors.slot_of("DEU"), Some(2));

        let mut back = vec![series("VEN"), series("USA"), series("DEU")];
        colors.assign(&codes(&["VEN", "USA", "DEU"]), &mut back);
        assert_eq!(back[0].color, first[0].color);
        assert_eq!(back[0].color, Some(palette_color(0)));
        assert_eq!(back[2].color, Some(palette_color(2)));
    }
}
