//! Header and footer templates.
//!
//! Template text is opaque: it is copied into the program byte for byte and
//! never parsed.

use dxf2gcode_core::{Error, Result, TemplateKind};
use std::path::Path;

/// Reads a template file.
pub fn load_template(kind: TemplateKind, path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| {
        tracing::error!(%kind, path = %path.display(), error = %source, "cannot read template");
        Error::TemplateUnreadable {
            kind,
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Brackets a program body with optional header and footer text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSplicer<'a> {
    header: Option<&'a str>,
    footer: Option<&'a str>,
}

impl<'a> TemplateSplicer<'a> {
    pub fn new(header: Option<&'a str>, footer: Option<&'a str>) -> Self {
        Self { header, footer }
    }

    /// Header, body, footer. A header without a trailing newline gets one
    /// so the body starts on its own line.
    pub fn splice(&self, body: &str) -> String {
        let capacity =
            self.header.map_or(0, str::len) + body.len() + self.footer.map_or(0, str::len) + 1;
        let mut program = String::with_capacity(capacity);

        if let Some(header) = self.header {
            program.push_str(header);
            if !header.is_empty() && !header.ends_with('\n') {
                program.push('\n');
            }
        }
        program.push_str(body);
        if let Some(footer) = self.footer {
            program.push_str(footer);
        }
        program
    }
}
