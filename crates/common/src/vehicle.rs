//! Descriptive vehicle attributes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Condition of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    Used,
    New,
}

impl Condition {
    /// Returns the canonical upper-case name, as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Used => "USED",
            Condition::New => "NEW",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that does not name a [`Condition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown vehicle condition: {0}")]
pub struct UnknownCondition(pub String);

impl FromStr for Condition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USED" => Ok(Condition::Used),
            "NEW" => Ok(Condition::New),
            other => Err(UnknownCondition(other.to_string())),
        }
    }
}

/// Vehicle manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub code: i32,
    pub name: String,
}

impl Manufacturer {
    pub fn new(code: i32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// Descriptive attributes of a vehicle (make, model, year, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    pub body: String,
    pub model: String,
    pub manufacturer: Manufacturer,
    #[serde(default)]
    pub number_of_doors: Option<i32>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub mileage: Option<i32>,
    #[serde(default)]
    pub model_year: Option<i32>,
    #[serde(default)]
    pub production_year: Option<i32>,
    #[serde(default)]
    pub external_color: Option<String>,
}

impl Details {
    /// Creates details with only the required attributes set.
    pub fn new(
        body: impl Into<String>,
        model: impl Into<String>,
        manufacturer: Manufacturer,
    ) -> Self {
        Self {
            body: body.into(),
            model: model.into(),
            manufacturer,
            number_of_doors: None,
            fuel_type: None,
            engine: None,
            mileage: None,
            model_year: None,
            production_year: None,
            external_color: None,
        }
    }

    pub fn with_model_year(mut self, year: i32) -> Self {
        self.model_year = Some(year);
        self
    }

    pub fn with_mileage(mut self, mileage: i32) -> Self {
        self.mileage = Some(mileage);
        self
    }

    pub fn with_external_color(mut self, color: impl Into<String>) -> Self {
        self.external_color = Some(color.into());
        self
    }
}
