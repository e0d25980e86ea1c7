//! dxf2gcode Settings Crate
//!
//! Loads, validates and saves the converter's configuration file and turns
//! it into a [`dxf2gcode_camtools::ProgramConfig`].

pub mod config;
pub mod error;

pub use config::{Config, LaserSettings, OutputSettings, TemplateSettings};
pub use error::{Result, SettingsError};
