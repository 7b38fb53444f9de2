//! # Bucket Math
//!
//! Pure conversion between bucket indices and the prices they represent.
//!
//! Bucket prices form a geometric lattice: each step up the lattice multiplies the price by
//! 1.005, with index 0 pinned at a price of exactly 1. The supported span runs from
//! `MIN_PRICE_INDEX` to `MAX_PRICE_INDEX`, covering prices from roughly 1e-7 to 1e9 quote
//! tokens per unit of collateral.
//!
//! `index_to_price` and `price_to_index` are deterministic, strictly monotonic and mutually
//! inverse for every index on the lattice. Conversions outside the span abort the transaction.

use scrypto::prelude::*;
use scrypto_math::*;

/// The lowest supported bucket index.
pub const MIN_PRICE_INDEX: i64 = -3232;

/// The highest supported bucket index.
pub const MAX_PRICE_INDEX: i64 = 4156;

/// The price ratio between two adjacent buckets on the lattice.
pub fn price_step() -> Decimal {
    dec!(1.005)
}

/// The lowest price on the lattice.
pub fn min_price() -> Decimal {
    index_to_price(MIN_PRICE_INDEX)
}

/// The highest price on the lattice.
pub fn max_price() -> Decimal {
    index_to_price(MAX_PRICE_INDEX)
}

/// Converts a bucket index to its price on the lattice.
///
/// # Panics
/// * If `index` lies outside the supported bucket span.
pub fn index_to_price(index: i64) -> Decimal {
    assert!(
        (MIN_PRICE_INDEX..=MAX_PRICE_INDEX).contains(&index),
        "Price index out of range."
    );

    price_step().checked_powi(index).unwrap()
}

/// Converts a price to the index of the nearest bucket on the lattice.
///
/// For any price produced by `index_to_price` this returns exactly the originating index;
/// prices between two buckets resolve to the closer of the two.
///
/// # Panics
/// * If `price` is not positive, or lies outside the supported price span.
pub fn price_to_index(price: Decimal) -> i64 {
    assert!(price > Decimal::ZERO, "Price out of range.");

    let ratio = price.ln().unwrap() / price_step().ln().unwrap();
    let rounded = ratio
        .checked_round(0, RoundingMode::ToNearestMidpointAwayFromZero)
        .unwrap();
    let index: i64 = (rounded.attos() / Decimal::ONE.attos()).try_into().unwrap();

    assert!(
        (MIN_PRICE_INDEX..=MAX_PRICE_INDEX).contains(&index),
        "Price out of range."
    );

    index
}

/// Returns the smallest index whose bucket price is at least `price`.
///
/// Used to translate a borrower's price limit into the lowest bucket a draw-down may touch.
///
/// # Panics
/// * If `price` is not positive, or no bucket on the lattice is priced at or above it.
pub fn index_at_or_above(price: Decimal) -> i64 {
    let index = price_to_index(price);

    if index_to_price(index) >= price {
        index
    } else {
        assert!(index < MAX_PRICE_INDEX, "Price out of range.");
        index + 1
    }
}

/// Whether `price` lies exactly on the bucket lattice.
pub fn is_valid_price(price: Decimal) -> bool {
    if price < min_price() || price > max_price() {
        return false;
    }

    index_to_price(price_to_index(price)) == price
}
