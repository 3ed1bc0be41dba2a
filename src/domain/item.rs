//! Shopping item model.
//!
//! An [`Item`] is what the user buys: a name, a bought/selected flag and a
//! quantity between 0 and 9. Every item also carries an [`ItemId`] that the
//! item store assigns when the item enters it. The id is never persisted; it is
//! what render nodes carry so a finished drag can be mapped back to store
//! entries without comparing names.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Store-assigned identity of an item, stable for the lifetime of the process.
///
/// `ItemId::default()` is the unassigned id carried by freshly deserialized
/// items until the store adopts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Item quantity, always within `0..=9`.
///
/// Out-of-range values are clamped rather than rejected: the quantity picker
/// only offers 0-9, so anything else comes from a hand-edited or imported file.
///
/// ```
/// use shoplist::domain::Quantity;
///
/// assert_eq!(Quantity::clamped(15).get(), 9);
/// assert_eq!(Quantity::clamped(-3).get(), 0);
/// assert_eq!(Quantity::clamped(4).get(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u8);

impl Quantity {
    /// Largest representable quantity.
    pub const MAX: u8 = 9;

    /// Quantity given to newly added items.
    pub const ONE: Self = Self(1);

    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let value = value.clamp(0, i64::from(Self::MAX));
        Self(u8::try_from(value).unwrap_or(Self::MAX))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        if !raw.is_finite() {
            return Err(serde::de::Error::custom("quantity must be a finite number"));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self::clamped(raw.trunc() as i64))
    }
}

/// A single entry on the shopping list.
///
/// Serialized as `{ "name": ..., "selected": ..., "quantity": ... }`. Missing
/// `selected` reads as `false` and missing `quantity` as 0, which is how lists
/// written before quantities existed are displayed (no quantity suffix).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip)]
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub quantity: Quantity,
}

impl Item {
    /// Creates an unselected item with quantity 1, the shape produced by "add".
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            selected: false,
            quantity: Quantity::ONE,
        }
    }
}

/// Equality ignores the store-assigned id: two lists are equal when they
/// serialize to the same document.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.selected == other.selected
            && self.quantity == other.quantity
    }
}

impl Eq for Item {}
