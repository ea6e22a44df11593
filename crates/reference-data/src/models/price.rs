//! Price field and price sheet models.
//!
//! A [`PriceSheet`] holds one optional value per priceable field. Values are
//! always `Decimal` and serialize as strings, so no precision is lost on the
//! way through snapshots and changelogs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Scale factor between per-unit and per-million-unit quotes.
pub const PER_MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// The closed set of priceable fields of a catalog entry.
///
/// Field sets are fixed and known in advance; providers map their own
/// payload layout onto these fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    Prompt,
    Completion,
    Request,
    Image,
    InputCacheRead,
    InputCacheWrite,
}

impl PriceField {
    /// All priceable fields, in canonical order.
    pub const ALL: [PriceField; 6] = [
        PriceField::Prompt,
        PriceField::Completion,
        PriceField::Request,
        PriceField::Image,
        PriceField::InputCacheRead,
        PriceField::InputCacheWrite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::Prompt => "prompt",
            PriceField::Completion => "completion",
            PriceField::Request => "request",
            PriceField::Image => "image",
            PriceField::InputCacheRead => "input_cache_read",
            PriceField::InputCacheWrite => "input_cache_write",
        }
    }

    /// Token-denominated fields carry a derived per-million view; `request`
    /// and `image` are flat per-call amounts and are never scaled.
    pub fn is_metered(&self) -> bool {
        matches!(
            self,
            PriceField::Prompt
                | PriceField::Completion
                | PriceField::InputCacheRead
                | PriceField::InputCacheWrite
        )
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit convention a provider quotes metered fields in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    /// Quoted per single unit (the canonical convention).
    PerUnit,
    /// Quoted per million units; divided down before any comparison.
    PerMillion,
}

/// Per-field price values, any subset of which may be present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSheet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_cache_read: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_cache_write: Option<Decimal>,
}

impl PriceSheet {
    pub fn get(&self, field: PriceField) -> Option<Decimal> {
        match field {
            PriceField::Prompt => self.prompt,
            PriceField::Completion => self.completion,
            PriceField::Request => self.request,
            PriceField::Image => self.image,
            PriceField::InputCacheRead => self.input_cache_read,
            PriceField::InputCacheWrite => self.input_cache_write,
        }
    }

    pub fn set(&mut self, field: PriceField, value: Option<Decimal>) {
        let slot = match field {
            PriceField::Prompt => &mut self.prompt,
            PriceField::Completion => &mut self.completion,
            PriceField::Request => &mut self.request,
            PriceField::Image => &mut self.image,
            PriceField::InputCacheRead => &mut self.input_cache_read,
            PriceField::InputCacheWrite => &mut self.input_cache_write,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        PriceField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn has_values(&self) -> bool {
        !self.is_empty()
    }

    /// Derived per-million view of a metered field. Pure arithmetic - this is
    /// never recorded as a decision and never fails.
    pub fn per_million(&self, field: PriceField) -> Option<Decimal> {
        if !field.is_metered() {
            return None;
        }
        self.get(field).map(|value| value * PER_MILLION)
    }

    /// Convert a provider sheet to the canonical per-unit convention.
    pub fn normalized(&self, unit: PriceUnit) -> PriceSheet {
        match unit {
            PriceUnit::PerUnit => self.clone(),
            PriceUnit::PerMillion => {
                let mut sheet = self.clone();
                for field in PriceField::ALL {
                    if field.is_metered() {
                        sheet.set(field, self.get(field).map(|value| value / PER_MILLION));
                    }
                }
                sheet
            }
        }
    }
}

/// Coerce a raw JSON payload value to a `Decimal`.
///
/// Providers quote prices as strings or numbers interchangeably; anything
/// absent, empty, or unparseable is an absent field, not an error.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Null => None,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<Decimal>().ok()
        }
        Value::Number(number) => number.to_string().parse::<Decimal>().ok(),
        _ => None,
    }
}
