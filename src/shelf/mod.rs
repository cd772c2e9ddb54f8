//! CB-010: The shelf: listed recipes, the open one, and stale loads.
//!
//! Selection is mirrored into the navigation fragment. A fragment present
//! when the listing arrives pre-selects the matching recipe. Loads are
//! ticketed: a document that arrives after the selection moved on is
//! dropped (last writer wins).

pub mod navigation;

use crate::core::book::{capitalize, Book};
use crate::core::palette::{self, Colour};
use crate::core::types::{Recipe, RecipeEntry};
use crate::source::{recipe_stem, RECIPE_EXTENSION};
use navigation::{decode_fragment, Navigation};
use tracing::debug;

/// A recipe as it stands on the shelf.
#[derive(Debug, Clone, PartialEq)]
pub struct Spine {
    pub index: usize,
    pub title: String,
    pub colour: Colour,
    /// Left offset in percent
    pub margin_left: f64,
    /// Right offset in percent
    pub margin_right: f64,
}

/// Proof that a load was started for a particular selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    index: usize,
    generation: u64,
}

impl LoadTicket {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Listing plus selection state.
#[derive(Debug)]
pub struct Shelf<N: Navigation> {
    entries: Vec<RecipeEntry>,
    selected: Option<usize>,
    generation: u64,
    navigation: N,
}

impl<N: Navigation> Shelf<N> {
    pub fn new(navigation: N) -> Self {
        Self {
            entries: Vec::new(),
            selected: None,
            generation: 0,
            navigation,
        }
    }

    /// Install a freshly fetched listing and honour the current fragment.
    pub fn set_listing(&mut self, entries: Vec<RecipeEntry>) {
        self.entries = entries;
        self.selected = None;
        self.generation += 1;

        let fragment = decode_fragment(&self.navigation.get());
        if fragment.is_empty() {
            return;
        }
        match self.position(&fragment) {
            Some(index) => {
                debug!(fragment = %fragment, index, "fragment selects recipe");
                self.select(Some(index));
            }
            None => debug!(fragment = %fragment, "fragment matches no recipe"),
        }
    }

    pub fn entries(&self) -> &[RecipeEntry] {
        &self.entries
    }

    /// Index of the recipe a fragment names (`#pancakes` → `pancakes.yaml`).
    pub fn find(&self, fragment: &str) -> Option<usize> {
        self.position(&decode_fragment(fragment))
    }

    fn position(&self, stem: &str) -> Option<usize> {
        let wanted = format!("{}{}", stem, RECIPE_EXTENSION);
        self.entries.iter().position(|entry| entry.name == wanted)
    }

    /// Open a recipe (or close the book with `None`). Out-of-range indices
    /// close the book.
    pub fn select(&mut self, index: Option<usize>) {
        let index = index.filter(|i| *i < self.entries.len());
        let fragment = index
            .map(|i| recipe_stem(&self.entries[i].name))
            .unwrap_or_default();
        self.navigation.set(fragment);
        self.selected = index;
        self.generation += 1;
    }

    /// Close the open book.
    pub fn back(&mut self) {
        self.select(None);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&RecipeEntry> {
        self.selected.map(|i| &self.entries[i])
    }

    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    /// Start loading the selected recipe.
    pub fn begin_load(&self) -> Option<LoadTicket> {
        self.selected.map(|index| LoadTicket {
            index,
            generation: self.generation,
        })
    }

    /// Whether a load result still belongs to the current selection.
    pub fn accept(&self, ticket: &LoadTicket) -> bool {
        self.generation == ticket.generation && self.selected == Some(ticket.index)
    }

    /// Open the book for a finished load, unless it went stale.
    pub fn open_book(&self, ticket: &LoadTicket, recipe: Recipe) -> Option<Book> {
        if !self.accept(ticket) {
            debug!(index = ticket.index, "dropping stale recipe load");
            return None;
        }
        Some(Book::open(recipe, ticket.index))
    }

    /// Every recipe as a spine, in listing order.
    pub fn spines(&self) -> Vec<Spine> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let (margin_left, margin_right) = palette::shelf_margins(index);
                Spine {
                    index,
                    title: display_name(&entry.name),
                    colour: palette::get_colour(index),
                    margin_left,
                    margin_right,
                }
            })
            .collect()
    }
}

/// Shelf title of a recipe file: `pancakes.yaml` → `Pancakes`.
pub fn display_name(file_name: &str) -> String {
    capitalize(recipe_stem(file_name))
}
