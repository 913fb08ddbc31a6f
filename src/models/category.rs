//! Transaction categories.

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Classification label applied to a transaction.
///
/// The set is closed: forms and selectors consume exactly these twelve
/// values. Serialization uses the human-readable labels so the persisted
/// JSON holds the same strings the UI displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Restaurants, cafes, and groceries.
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    /// Retail purchases.
    Shopping,
    /// Rent, mortgage, and utilities.
    Housing,
    /// Fuel, transit, and vehicle costs.
    Transportation,
    /// Leisure and recreation.
    Entertainment,
    /// Medical and pharmacy expenses.
    Healthcare,
    /// Grooming, fitness, and wellbeing.
    #[serde(rename = "Personal Care")]
    PersonalCare,
    /// Tuition, courses, and books.
    Education,
    /// Trips and holidays.
    Travel,
    /// Gifts and charitable donations.
    #[serde(rename = "Gifts & Donations")]
    GiftsAndDonations,
    /// Salary and other incoming money.
    Income,
    /// Anything that fits nowhere else.
    Other,
}

impl Category {
    /// All twelve categories, in display order.
    pub const ALL: [Self; 12] = [
        Self::FoodAndDining,
        Self::Shopping,
        Self::Housing,
        Self::Transportation,
        Self::Entertainment,
        Self::Healthcare,
        Self::PersonalCare,
        Self::Education,
        Self::Travel,
        Self::GiftsAndDonations,
        Self::Income,
        Self::Other,
    ];

    /// Returns the human-readable label, as shown in forms and persisted
    /// in the JSON slot.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Shopping => "Shopping",
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::PersonalCare => "Personal Care",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::GiftsAndDonations => "Gifts & Donations",
            Self::Income => "Income",
            Self::Other => "Other",
        }
    }
}

impl core::fmt::Display for Category {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for Category {
    type Err = TrackerError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| TrackerError::UnknownCategory(s.to_owned()))
    }
}
