//! Product and customer vocabularies used by the shop scorers.
//!
//! Names match exactly: no trimming and no case folding, so `"diaper"` and
//! `" Diaper"` are `Other`. Values outside the vocabulary are carried as `Other`
//! rather than rejected, and every table below gives `Other` the bonus the
//! storefront has always applied to unrecognized values.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Diaper,
    BabyCare,
    Feeding,
    Bath,
    Toy,
    Footwear,
    Gear,
    BoyFashion,
    GirlFashion,
    Skincare,
    Other(String),
}

impl ProductCategory {
    pub const KNOWN: [ProductCategory; 10] = [
        Self::Diaper,
        Self::BabyCare,
        Self::Feeding,
        Self::Bath,
        Self::Toy,
        Self::Footwear,
        Self::Gear,
        Self::BoyFashion,
        Self::GirlFashion,
        Self::Skincare,
    ];

    pub fn parse(raw: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.as_str() == raw)
            .cloned()
            .unwrap_or_else(|| Self::Other(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Diaper => "Diaper",
            Self::BabyCare => "BabyCare",
            Self::Feeding => "Feeding",
            Self::Bath => "Bath",
            Self::Toy => "Toy",
            Self::Footwear => "Footwear",
            Self::Gear => "Gear",
            Self::BoyFashion => "BoyFashion",
            Self::GirlFashion => "GirlFashion",
            Self::Skincare => "Skincare",
            Self::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Added to purchase probability.
    pub fn purchase_bonus(&self) -> f64 {
        match self {
            Self::Diaper => 0.15,
            Self::BabyCare => 0.14,
            Self::Feeding => 0.13,
            Self::Bath => 0.12,
            Self::Toy => 0.11,
            Self::Footwear => 0.10,
            Self::Gear => 0.09,
            Self::BoyFashion | Self::GirlFashion => 0.08,
            Self::Skincare => 0.05,
            Self::Other(_) => 0.0,
        }
    }

    pub fn demand_tier(&self) -> DemandTier {
        match self {
            Self::Diaper | Self::BabyCare | Self::Feeding => DemandTier::Essential,
            Self::Bath | Self::Toy => DemandTier::Popular,
            _ => DemandTier::Specialized,
        }
    }

    pub fn purchase_wording(&self) -> Option<&'static str> {
        let text = match self {
            Self::Diaper => "Diapering products are essential items with high purchase likelihood.",
            Self::BabyCare => "Baby care essentials are high-priority purchases for parents.",
            Self::Feeding => "Feeding products are essential for child nutrition and development.",
            Self::Bath => "Bath and hygiene products are regular necessities for families.",
            Self::Toy => "Toys appeal to parents and children, with good purchase potential.",
            Self::Footwear => "Footwear is needed regularly as children grow.",
            Self::Gear => "Gear and accessories provide convenience and safety.",
            Self::BoyFashion | Self::GirlFashion => {
                "Fashion items appeal to style-conscious parents and children."
            }
            Self::Skincare => "Skincare products have moderate purchase appeal.",
            Self::Other(_) => return None,
        };
        Some(text)
    }
}

impl FromStr for ProductCategory {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemandTier {
    Essential,
    Popular,
    Specialized,
}

impl DemandTier {
    pub fn score(&self) -> f64 {
        match self {
            Self::Essential => 1.0,
            Self::Popular => 0.8,
            Self::Specialized => 0.6,
        }
    }

    pub fn wording(&self) -> &'static str {
        match self {
            Self::Essential => "essential product category",
            Self::Popular => "popular product category",
            Self::Specialized => "specialized product category",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CustomerType {
    Parent,
    #[default]
    Customer,
    Other(String),
}

impl CustomerType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Parent" => Self::Parent,
            "Customer" => Self::Customer,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Parent => "Parent",
            Self::Customer => "Customer",
            Self::Other(name) => name,
        }
    }

    pub fn purchase_bonus(&self) -> f64 {
        match self {
            Self::Parent => 0.15,
            Self::Customer => 0.10,
            Self::Other(_) => 0.0,
        }
    }

    pub fn purchase_wording(&self) -> Option<&'static str> {
        match self {
            Self::Parent => {
                Some("Parents are the primary target audience and show high purchase intent.")
            }
            Self::Customer => Some("Customers show moderate purchase intent for these products."),
            Self::Other(_) => None,
        }
    }
}

impl FromStr for CustomerType {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CustomerType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
