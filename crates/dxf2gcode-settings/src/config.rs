//! Configuration management.
//!
//! A config file is TOML or JSON, chosen by extension, with three optional
//! sections:
//!
//! ```toml
//! [laser]
//! power = 800
//! feed_rate = 3000.0
//! rapid_rate = 6000.0
//! mode = "constant"
//!
//! [output]
//! precision = 3
//! ordering = "nearest"
//! annotate = false
//! fallback_unit = "in"
//!
//! [templates]
//! header = "start.gcode"
//! footer = "end.gcode"
//! ```
//!
//! Missing keys take their defaults. Relative template paths are resolved
//! against the directory of the config file.

use crate::error::{Result, SettingsError};
use dxf2gcode_camtools::laser_cutter::MAX_PRECISION;
use dxf2gcode_camtools::{load_template, ProgramConfig};
use dxf2gcode_core::{DrawingUnit, TemplateKind};
use dxf2gcode_designer::{LaserMode, PathOrdering};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Laser settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    /// Power while cutting (S word)
    pub power: u32,
    /// Cutting feed rate in mm/min
    pub feed_rate: f64,
    /// Rapid travel rate in mm/min
    pub rapid_rate: f64,
    /// `dynamic` (M4) or `constant` (M3)
    pub mode: LaserMode,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            power: 1000,
            feed_rate: 6000.0,
            rapid_rate: 6000.0,
            mode: LaserMode::Dynamic,
        }
    }
}

/// Program output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Decimal places for coordinates and rates
    pub precision: usize,
    /// Path ordering policy
    pub ordering: PathOrdering,
    /// Whether to write `;` comments
    pub annotate: bool,
    /// Unit for drawings without `$INSUNITS` (e.g. "mm", "in")
    pub fallback_unit: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            precision: 4,
            ordering: PathOrdering::FileOrder,
            annotate: true,
            fallback_unit: "mm".to_string(),
        }
    }
}

impl OutputSettings {
    pub fn fallback_unit(&self) -> Result<DrawingUnit> {
        self.fallback_unit
            .parse()
            .map_err(|e: String| SettingsError::invalid("output.fallback_unit", e))
    }
}

/// Header and footer template settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// G-code file placed before the program body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<PathBuf>,
    /// G-code file placed after the program body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<PathBuf>,
    /// Ignore the configured header
    pub no_header: bool,
    /// Ignore the configured footer
    pub no_footer: bool,
}

impl TemplateSettings {
    /// Header path, unless suppressed.
    pub fn active_header(&self) -> Option<&Path> {
        self.header.as_deref().filter(|_| !self.no_header)
    }

    /// Footer path, unless suppressed.
    pub fn active_footer(&self) -> Option<&Path> {
        self.footer.as_deref().filter(|_| !self.no_footer)
    }

    fn rebase(&mut self, dir: &Path) {
        for path in [&mut self.header, &mut self.footer].into_iter().flatten() {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}

/// Complete converter configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub laser: LaserSettings,
    pub output: OutputSettings,
    pub templates: TemplateSettings,
}

#[derive(Clone, Copy)]
enum Format {
    Toml,
    Json,
}

fn format_of(path: &Path) -> Result<Format> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(SettingsError::UnsupportedFormat(path.to_path_buf())),
    }
}

impl Config {
    /// Per-user config file location, e.g. `~/.config/dxf2gcode/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dxf2gcode").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    ///
    /// Values are not validated here so that command-line overrides can
    /// still replace them; [`Config::to_program_config`] validates.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        if let Some(dir) = path.parent() {
            config.templates.rebase(dir);
        }

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.laser.feed_rate.is_finite() && self.laser.feed_rate > 0.0) {
            return Err(SettingsError::invalid("laser.feed_rate", "must be > 0"));
        }
        if !(self.laser.rapid_rate.is_finite() && self.laser.rapid_rate > 0.0) {
            return Err(SettingsError::invalid("laser.rapid_rate", "must be > 0"));
        }
        if self.output.precision > MAX_PRECISION {
            return Err(SettingsError::invalid(
                "output.precision",
                format!("must be at most {}", MAX_PRECISION),
            ));
        }
        self.output.fallback_unit()?;
        Ok(())
    }

    /// Read the active header and footer templates.
    ///
    /// A configured, unsuppressed template that cannot be read is an error.
    pub fn resolve_templates(&self) -> dxf2gcode_core::Result<(Option<String>, Option<String>)> {
        let header = self
            .templates
            .active_header()
            .map(|p| load_template(TemplateKind::Header, p))
            .transpose()?;
        let footer = self
            .templates
            .active_footer()
            .map(|p| load_template(TemplateKind::Footer, p))
            .transpose()?;
        Ok((header, footer))
    }

    /// Build the program parameters, reading templates from disk.
    pub fn to_program_config(&self) -> Result<ProgramConfig> {
        self.validate()?;
        let (header, footer) = self.resolve_templates()?;
        Ok(ProgramConfig {
            power: self.laser.power,
            feed_rate: self.laser.feed_rate,
            rapid_rate: self.laser.rapid_rate,
            precision: self.output.precision,
            laser_mode: self.laser.mode,
            ordering: self.output.ordering,
            annotate: self.output.annotate,
            fallback_unit: self.output.fallback_unit()?,
            header,
            footer,
        })
    }
}
