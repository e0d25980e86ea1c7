//! Drawing unit handling
//!
//! Maps the DXF `$INSUNITS` header code to a length unit and provides the
//! factor that converts drawing units to millimetres. Programs are always
//! emitted in millimetres, so every coordinate read from a drawing passes
//! through [`DrawingUnit::to_mm_factor`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit declared by a drawing's `$INSUNITS` header variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingUnit {
    /// No unit declared; read as millimetres.
    #[default]
    Unitless,
    Inches,
    Feet,
    Miles,
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Microinches,
    Mils,
    Yards,
    Angstroms,
    Nanometers,
    Microns,
    Decimeters,
    Decameters,
    Hectometers,
    Gigameters,
    AstronomicalUnits,
    LightYears,
    Parsecs,
}

impl DrawingUnit {
    /// Resolve an `$INSUNITS` code. Returns `None` for codes outside the
    /// standard 0..=20 range.
    pub fn from_code(code: i32) -> Option<Self> {
        let unit = match code {
            0 => Self::Unitless,
            1 => Self::Inches,
            2 => Self::Feet,
            3 => Self::Miles,
            4 => Self::Millimeters,
            5 => Self::Centimeters,
            6 => Self::Meters,
            7 => Self::Kilometers,
            8 => Self::Microinches,
            9 => Self::Mils,
            10 => Self::Yards,
            11 => Self::Angstroms,
            12 => Self::Nanometers,
            13 => Self::Microns,
            14 => Self::Decimeters,
            15 => Self::Decameters,
            16 => Self::Hectometers,
            17 => Self::Gigameters,
            18 => Self::AstronomicalUnits,
            19 => Self::LightYears,
            20 => Self::Parsecs,
            _ => return None,
        };
        Some(unit)
    }

    /// Multiplier from this unit to millimetres.
    pub fn to_mm_factor(self) -> f64 {
        match self {
            Self::Unitless | Self::Millimeters => 1.0,
            Self::Inches => 25.4,
            Self::Feet => 304.8,
            Self::Miles => 1_609_344.0,
            Self::Centimeters => 10.0,
            Self::Meters => 1_000.0,
            Self::Kilometers => 1_000_000.0,
            Self::Microinches => 25.4e-6,
            Self::Mils => 0.0254,
            Self::Yards => 914.4,
            Self::Angstroms => 1e-7,
            Self::Nanometers => 1e-6,
            Self::Microns => 1e-3,
            Self::Decimeters => 100.0,
            Self::Decameters => 10_000.0,
            Self::Hectometers => 100_000.0,
            Self::Gigameters => 1e12,
            Self::AstronomicalUnits => 1.495_978_707e14,
            Self::LightYears => 9.460_730_472_580_8e18,
            Self::Parsecs => 3.085_677_581_49e19,
        }
    }

    /// Short unit label used in program comments.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unitless => "unitless",
            Self::Inches => "in",
            Self::Feet => "ft",
            Self::Miles => "mi",
            Self::Millimeters => "mm",
            Self::Centimeters => "cm",
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Microinches => "uin",
            Self::Mils => "mil",
            Self::Yards => "yd",
            Self::Angstroms => "A",
            Self::Nanometers => "nm",
            Self::Microns => "um",
            Self::Decimeters => "dm",
            Self::Decameters => "dam",
            Self::Hectometers => "hm",
            Self::Gigameters => "Gm",
            Self::AstronomicalUnits => "AU",
            Self::LightYears => "ly",
            Self::Parsecs => "pc",
        }
    }
}

impl fmt::Display for DrawingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DrawingUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mm" | "millimeters" | "millimetres" => Ok(Self::Millimeters),
            "cm" | "centimeters" | "centimetres" => Ok(Self::Centimeters),
            "m" | "meters" | "metres" => Ok(Self::Meters),
            "in" | "inch" | "inches" => Ok(Self::Inches),
            "ft" | "feet" => Ok(Self::Feet),
            "unitless" | "none" => Ok(Self::Unitless),
            _ => Err(format!("Unknown drawing unit: {}", s)),
        }
    }
}
