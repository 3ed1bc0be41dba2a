//! The nine fixed shopping categories.
//!
//! Categories are the unit of grouping and the scope of every reorder. Their
//! declaration order is the display, share and serialization order. On disk a
//! category is written by its Hebrew display name; the command line also accepts
//! a short English slug.

use crate::domain::error::ShoplistError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A fixed shopping category.
///
/// `Ord` follows declaration order, so a `BTreeMap<Category, _>` iterates in
/// display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Produce,
    Frozen,
    Canned,
    General,
    Drinks,
    NutsAndLegumes,
    Dairy,
    Cleaning,
    Snacks,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 9] = [
        Self::Produce,
        Self::Frozen,
        Self::Canned,
        Self::General,
        Self::Drinks,
        Self::NutsAndLegumes,
        Self::Dairy,
        Self::Cleaning,
        Self::Snacks,
    ];

    /// Display name, also used as the serialized key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Produce => "ירקות ופירות",
            Self::Frozen => "קפואים",
            Self::Canned => "שימורים",
            Self::General => "כללי",
            Self::Drinks => "שתיה",
            Self::NutsAndLegumes => "פיצוחים וקטניות",
            Self::Dairy => "מוצרי חלב",
            Self::Cleaning => "ניקיון",
            Self::Snacks => "חטיפים",
        }
    }

    /// Single-word ASCII alias accepted on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Produce => "produce",
            Self::Frozen => "frozen",
            Self::Canned => "canned",
            Self::General => "general",
            Self::Drinks => "drinks",
            Self::NutsAndLegumes => "nuts",
            Self::Dairy => "dairy",
            Self::Cleaning => "cleaning",
            Self::Snacks => "snacks",
        }
    }

    /// Looks a category up by display name or slug.
    ///
    /// Slugs match case-insensitively; display names must match exactly after
    /// trimming.
    ///
    /// ```
    /// use shoplist::domain::Category;
    ///
    /// assert_eq!(Category::from_name("מוצרי חלב"), Some(Category::Dairy));
    /// assert_eq!(Category::from_name("Dairy"), Some(Category::Dairy));
    /// assert_eq!(Category::from_name("bakery"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == name || c.slug().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ShoplistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ShoplistError::UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category: {name}")))
    }
}
