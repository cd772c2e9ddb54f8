//! CB-004: Deterministic decorative colours.
//!
//! A sine hash picks a book colour and a shelf offset from the recipe's
//! position in the listing, so reloads never reshuffle the shelf.

/// A book cover gradient: (top, bottom).
pub type Colour = (&'static str, &'static str);

/// Cover colours.
pub const COLOURS: [Colour; 7] = [
    ("#733e39", "#3e2731"),
    ("#3e8948", "#265c42"),
    ("#d77643", "#be4a2f"),
    ("#0099db", "#124e89"),
    ("#e43b44", "#a22633"),
    ("#feae34", "#f77622"),
    ("#b55088", "#68386c"),
];

/// Total horizontal slack of a spine on the shelf, in percent.
pub const SHELF_SLACK: f64 = 20.0;

/// Fractional part of `sin(seed) * size`, in `[0, 1)`. Not cryptographic.
pub fn pseudo_random(seed: f64, size: f64) -> f64 {
    let x = seed.sin() * size;
    (x - x.floor()).clamp(0.0, 1.0 - f64::EPSILON)
}

/// Cover colour for the recipe at `index`.
pub fn get_colour(index: usize) -> Colour {
    let r = pseudo_random(index as f64 + 14.0, 17000.0);
    let slot = (r * COLOURS.len() as f64).floor() as usize;
    COLOURS[slot.min(COLOURS.len() - 1)]
}

/// Left and right margin (percent) of the spine at `index`.
pub fn shelf_margins(index: usize) -> (f64, f64) {
    let left = pseudo_random(index as f64 + 9.0, 10000.0) * SHELF_SLACK;
    (left, SHELF_SLACK - left)
}
