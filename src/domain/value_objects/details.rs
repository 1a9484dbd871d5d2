//! # Vehicle Details
//!
//! Static descriptive attributes of a vehicle. The service layer treats
//! [`Details`] as opaque and only carries it between caller and store.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Condition of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    /// Never owned.
    New,
    /// Previously owned.
    #[default]
    Used,
}

impl Condition {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Used => "USED",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "USED" => Ok(Self::Used),
            _ => Err(DomainError::InvalidCondition(s.to_string())),
        }
    }
}

/// Vehicle manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Manufacturer {
    /// Manufacturer code.
    pub code: u32,
    /// Display name.
    pub name: String,
}

impl Manufacturer {
    /// Creates a manufacturer.
    #[must_use]
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// Descriptive attributes of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    /// Manufacturer.
    pub manufacturer: Manufacturer,
    /// Model name.
    pub model: String,
    /// Body style (sedan, SUV, ...).
    #[serde(default)]
    pub body: Option<String>,
    /// Odometer reading.
    #[serde(default)]
    pub mileage: Option<u32>,
    /// Exterior color.
    #[serde(default)]
    pub exterior_color: Option<String>,
    /// Engine description.
    #[serde(default)]
    pub engine: Option<String>,
    /// Fuel type.
    #[serde(default)]
    pub fuel_type: Option<String>,
    /// Number of doors.
    #[serde(default)]
    pub number_of_doors: Option<u8>,
    /// Model year.
    #[serde(default)]
    pub model_year: Option<i32>,
    /// Production year.
    #[serde(default)]
    pub production_year: Option<i32>,
}

impl Details {
    /// Creates details with only the required fields set.
    #[must_use]
    pub fn new(manufacturer: Manufacturer, model: impl Into<String>) -> Self {
        Self {
            manufacturer,
            model: model.into(),
            body: None,
            mileage: None,
            exterior_color: None,
            engine: None,
            fuel_type: None,
            number_of_doors: None,
            model_year: None,
            production_year: None,
        }
    }

    /// Sets the body style.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the mileage.
    #[must_use]
    pub fn with_mileage(mut self, mileage: u32) -> Self {
        self.mileage = Some(mileage);
        self
    }

    /// Sets the model year.
    #[must_use]
    pub fn with_model_year(mut self, year: i32) -> Self {
        self.model_year = Some(year);
        self
    }

    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDetails` if the model or the
    /// manufacturer name is blank.
    pub fn validate(&self) -> DomainResult<()> {
        if self.model.trim().is_empty() {
            return Err(DomainError::invalid_details("model must not be blank"));
        }
        if self.manufacturer.name.trim().is_empty() {
            return Err(DomainError::invalid_details(
                "manufacturer name must not be blank",
            ));
        }
        Ok(())
    }
}
