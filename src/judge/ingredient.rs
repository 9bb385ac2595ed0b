//! Ingredient and sauce flags, and the bitmask sets built from them

use serde::{Deserialize, Serialize};

/// Toppings that go between the bun halves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ingredient {
    Salad,
    Tomato,
    Pickles,
    Cheese,
}

impl Ingredient {
    pub const ALL: [Ingredient; 4] = [
        Ingredient::Salad,
        Ingredient::Tomato,
        Ingredient::Pickles,
        Ingredient::Cheese,
    ];
    pub const COUNT: u32 = Self::ALL.len() as u32;

    /// Bit position in an [`IngredientSet`]
    pub fn index(self) -> u32 {
        match self {
            Ingredient::Salad => 0,
            Ingredient::Tomato => 1,
            Ingredient::Pickles => 2,
            Ingredient::Cheese => 3,
        }
    }

    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ingredient::Salad => "salad",
            Ingredient::Tomato => "tomato",
            Ingredient::Pickles => "pickles",
            Ingredient::Cheese => "cheese",
        }
    }
}

/// Sauces squeezed from the bottles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SauceType {
    Ketchup,
    Mustard,
}

impl SauceType {
    pub const ALL: [SauceType; 2] = [SauceType::Ketchup, SauceType::Mustard];
    pub const COUNT: u32 = Self::ALL.len() as u32;

    /// Bit position in a [`SauceSet`]
    pub fn index(self) -> u32 {
        match self {
            SauceType::Ketchup => 0,
            SauceType::Mustard => 1,
        }
    }

    pub fn bit(self) -> u32 {
        1 << self.index()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SauceType::Ketchup => "ketchup",
            SauceType::Mustard => "mustard",
        }
    }
}

macro_rules! flag_set {
    ($(#[$meta:meta])* $name:ident, $flag:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(from = "u32", into = "u32")]
        pub struct $name(u32);

        impl From<u32> for $name {
            fn from(bits: u32) -> Self {
                Self::from_bits(bits)
            }
        }

        impl From<$name> for u32 {
            fn from(set: $name) -> u32 {
                set.0
            }
        }

        impl $name {
            pub const EMPTY: Self = Self(0);

            /// Build from raw bits; bits outside the flag space are dropped
            pub fn from_bits(bits: u32) -> Self {
                Self(bits & ((1 << $flag::COUNT) - 1))
            }

            pub fn bits(self) -> u32 {
                self.0
            }

            pub fn contains(self, flag: $flag) -> bool {
                self.0 & flag.bit() != 0
            }

            pub fn insert(&mut self, flag: $flag) {
                self.0 |= flag.bit();
            }

            pub fn with(mut self, flag: $flag) -> Self {
                self.insert(flag);
                self
            }

            pub fn len(self) -> u32 {
                self.0.count_ones()
            }

            pub fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Flags in the set, in declaration order
            pub fn iter(self) -> impl Iterator<Item = $flag> {
                $flag::ALL.into_iter().filter(move |f| self.contains(*f))
            }
        }

        impl FromIterator<$flag> for $name {
            fn from_iter<I: IntoIterator<Item = $flag>>(iter: I) -> Self {
                iter.into_iter().fold(Self::EMPTY, Self::with)
            }
        }
    };
}

flag_set!(
    /// Which ingredients a burger asks for (not how many of each)
    IngredientSet,
    Ingredient
);

flag_set!(
    /// Which sauces a burger asks for
    SauceSet,
    SauceType
);
