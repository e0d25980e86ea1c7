//! # DXF Parser
//!
//! Reads ASCII DXF: a stream of `(group code, value)` line pairs. Only the
//! HEADER (for `$INSUNITS`) and ENTITIES sections are interpreted; other
//! sections are skipped.
//!
//! Each entity is decoded by type. LINE, CIRCLE, ARC and LWPOLYLINE must
//! carry their mandatory groups or the whole parse fails; other entity
//! types are skipped with a diagnostic. Geometry is returned in
//! millimetres, in file order.

use crate::entity::{Arc, Circle, Entity, Line, Polyline, SourceEntity};
use dxf2gcode_core::{
    ArcDirection, Diagnostic, DrawingError, DrawingUnit, EntityLocator, Point,
};

const BINARY_SENTINEL: &[u8] = b"AutoCAD Binary DXF";

/// Options controlling how a drawing is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserOptions {
    /// Unit assumed when the header declares none (or "unitless").
    pub fallback_unit: DrawingUnit,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            fallback_unit: DrawingUnit::Millimeters,
        }
    }
}

/// The entities of a drawing, scaled to millimetres.
#[derive(Debug, Clone, Default)]
pub struct DxfDrawing {
    /// Unit the drawing was authored in (after applying the fallback).
    pub unit: DrawingUnit,
    /// Supported entities in file order.
    pub entities: Vec<SourceEntity>,
    /// Entities that were skipped.
    pub diagnostics: Vec<Diagnostic>,
}


#[derive(Debug, Clone, Copy)]
struct Group<'a> {
    code: i32,
    value: &'a str,
    /// 1-based line of the group code.
    line: usize,
}

impl Group<'_> {
    fn is_marker(&self, name: &str) -> bool {
        self.code == 0 && self.value == name
    }
}

/// DXF group-code decoder.
pub struct DxfParser;

impl DxfParser {
    /// Parse a drawing with default options.
    pub fn parse(content: &str) -> Result<DxfDrawing, DrawingError> {
        Self::parse_with(content, &ParserOptions::default())
    }

    /// Parse raw file bytes. Rejects binary DXF; other bytes are read as
    /// text with invalid UTF-8 replaced.
    pub fn parse_bytes(bytes: &[u8], options: &ParserOptions) -> Result<DxfDrawing, DrawingError> {
        if bytes.starts_with(BINARY_SENTINEL) {
            return Err(DrawingError::BinaryFormat);
        }
        Self::parse_with(&String::from_utf8_lossy(bytes), options)
    }

    /// Parse a drawing.
    pub fn parse_with(content: &str, options: &ParserOptions) -> Result<DxfDrawing, DrawingError> {
        if content.as_bytes().starts_with(BINARY_SENTINEL) {
            return Err(DrawingError::BinaryFormat);
        }

        let groups = read_groups(content)?;
        let mut header_unit = None;
        let mut entities = Vec::new();
        let mut diagnostics = Vec::new();

        let mut i = 0;
        while i < groups.len() {
            let g = groups[i];
            if g.is_marker("EOF") {
                break;
            }
            if !g.is_marker("SECTION") {
                i += 1;
                continue;
            }

            let name = groups
                .get(i + 1)
                .filter(|n| n.code == 2)
                .map(|n| n.value)
                .unwrap_or("");
            let body_start = if name.is_empty() { i + 1 } else { i + 2 };

            match name {
                "HEADER" => {
                    let end = section_end(&groups, body_start);
                    header_unit = read_insunits(&groups[body_start..end]);
                    i = end + 1;
                }
                "ENTITIES" => {
                    i = read_entities(
                        &groups,
                        body_start,
                        g.line,
                        &mut entities,
                        &mut diagnostics,
                    )?;
                }
                _ => {
                    i = section_end(&groups, body_start) + 1;
                }
            }
        }

        let unit = match header_unit {
            Some(DrawingUnit::Unitless) | None => options.fallback_unit,
            Some(unit) => unit,
        };
        let factor = unit.to_mm_factor();
        if (factor - 1.0).abs() > f64::EPSILON {
            tracing::debug!(%unit, factor, "scaling drawing to millimetres");
            for e in &mut entities {
                e.entity = e.entity.scaled(factor);
            }
        }

        tracing::debug!(
            entities = entities.len(),
            skipped = diagnostics.len(),
            %unit,
            "parsed DXF drawing"
        );

        Ok(DxfDrawing {
            unit,
            entities,
            diagnostics,
        })
    }
}

fn read_groups(content: &str) -> Result<Vec<Group<'_>>, DrawingError> {
    let lines: Vec<&str> = content.lines().collect();
    let mut groups = Vec::with_capacity(lines.len() / 2);

    let mut i = 0;
    while i < lines.len() {
        let raw = lines[i].trim();
        if raw.is_empty() && lines[i..].iter().all(|l| l.trim().is_empty()) {
            break;
        }
        let code: i32 = raw.parse().map_err(|_| DrawingError::InvalidGroupCode {
            raw: raw.to_string(),
            line: i + 1,
        })?;
        let value = lines
            .get(i + 1)
            .ok_or(DrawingError::DanglingGroupCode { code, line: i + 1 })?
            .trim();
        if code != 999 {
            groups.push(Group {
                code,
                value,
                line: i + 1,
            });
        }
        i += 2;
    }
    Ok(groups)
}

/// Index of the section's ENDSEC, or `groups.len()` if it never closes.
fn section_end(groups: &[Group<'_>], from: usize) -> usize {
    groups[from.min(groups.len())..]
        .iter()
        .position(|g| g.is_marker("ENDSEC"))
        .map(|p| from + p)
        .unwrap_or(groups.len())
}

fn read_insunits(header: &[Group<'_>]) -> Option<DrawingUnit> {
    let idx = header
        .iter()
        .position(|g| g.code == 9 && g.value == "$INSUNITS")?;
    let value = header.get(idx + 1).filter(|g| g.code == 70)?;
    match value.value.parse::<i32>().ok().and_then(DrawingUnit::from_code) {
        Some(unit) => Some(unit),
        None => {
            tracing::warn!(
                value = value.value,
                line = value.line,
                "unrecognised $INSUNITS value, assuming unitless"
            );
            None
        }
    }
}

/// Decode the ENTITIES section starting at `start`. Returns the index after
/// its ENDSEC.
fn read_entities(
    groups: &[Group<'_>],
    start: usize,
    section_line: usize,
    entities: &mut Vec<SourceEntity>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<usize, DrawingError> {
    let mut i = start;
    let mut last_opened = EntityLocator::new("ENTITIES", None, section_line);

    loop {
        let Some(marker) = groups.get(i) else {
            return Err(DrawingError::UnterminatedEntity {
                entity: last_opened,
            });
        };

        if marker.is_marker("ENDSEC") {
            return Ok(i + 1);
        }
        if marker.is_marker("EOF") || marker.is_marker("SECTION") {
            return Err(DrawingError::UnterminatedEntity {
                entity: last_opened,
            });
        }
        if marker.code != 0 {
            // Stray group before the first entity marker.
            i += 1;
            continue;
        }

        let body_end = groups[i + 1..]
            .iter()
            .position(|g| g.code == 0)
            .map(|p| i + 1 + p)
            .unwrap_or(groups.len());
        let body = &groups[i + 1..body_end];

        let handle = body.iter().find(|g| g.code == 5).map(|g| g.value.to_string());
        let layer = body
            .iter()
            .find(|g| g.code == 8)
            .map(|g| g.value)
            .unwrap_or("0");
        let locator = EntityLocator::new(marker.value, handle, marker.line);
        last_opened = locator.clone();

        if body_end == groups.len() {
            return Err(DrawingError::UnterminatedEntity { entity: locator });
        }

        let fields = EntityGroups {
            locator: &locator,
            groups: body,
        };
        let entity = match marker.value {
            "LINE" => Some(decode_line(&fields)?),
            "CIRCLE" => Some(decode_circle(&fields)?),
            "ARC" => Some(decode_arc(&fields)?),
            "LWPOLYLINE" => Some(decode_lwpolyline(&fields)?),
            // Owned by a preceding POLYLINE or INSERT, reported there.
            "VERTEX" | "SEQEND" | "ATTRIB" => None,
            _ => {
                tracing::warn!(entity = %locator, "skipping unsupported entity");
                diagnostics.push(Diagnostic::unsupported(locator.clone()));
                None
            }
        };

        if let Some(entity) = entity {
            entities.push(SourceEntity::new(entity, locator, layer));
        }
        i = body_end;
    }
}

/// The groups of one entity, with typed accessors.
struct EntityGroups<'a> {
    locator: &'a EntityLocator,
    groups: &'a [Group<'a>],
}

impl EntityGroups<'_> {
    fn parse_f64(&self, group: &Group<'_>) -> Result<f64, DrawingError> {
        group
            .value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DrawingError::InvalidValue {
                entity: self.locator.clone(),
                code: group.code,
                raw: group.value.to_string(),
            })
    }

    fn find(&self, code: i32) -> Option<&Group<'_>> {
        self.groups.iter().find(|g| g.code == code)
    }

    fn required_f64(&self, code: i32) -> Result<f64, DrawingError> {
        let group = self.find(code).ok_or_else(|| DrawingError::MissingGroup {
            entity: self.locator.clone(),
            code,
        })?;
        self.parse_f64(group)
    }

    fn optional_f64(&self, code: i32, default: f64) -> Result<f64, DrawingError> {
        match self.find(code) {
            Some(group) => self.parse_f64(group),
            None => Ok(default),
        }
    }

    fn optional_i64(&self, code: i32) -> Result<Option<i64>, DrawingError> {
        self.find(code)
            .map(|group| {
                group
                    .value
                    .parse::<i64>()
                    .map_err(|_| DrawingError::InvalidValue {
                        entity: self.locator.clone(),
                        code,
                        raw: group.value.to_string(),
                    })
            })
            .transpose()
    }

    fn point(&self, x_code: i32, y_code: i32) -> Result<Point, DrawingError> {
        Ok(Point::new(
            self.required_f64(x_code)?,
            self.required_f64(y_code)?,
        ))
    }

    /// Whether the extrusion direction (group 230) points down, mirroring
    /// the object coordinate system in X.
    fn is_mirrored(&self) -> Result<bool, DrawingError> {
        Ok(self.optional_f64(230, 1.0)? < 0.0)
    }
}

fn mirror_x(p: Point) -> Point {
    Point::new(-p.x, p.y)
}

fn decode_line(fields: &EntityGroups<'_>) -> Result<Entity, DrawingError> {
    let start = fields.point(10, 20)?;
    let end = fields.point(11, 21)?;
    Ok(Entity::Line(Line::new(start, end)))
}

fn decode_circle(fields: &EntityGroups<'_>) -> Result<Entity, DrawingError> {
    let mut center = fields.point(10, 20)?;
    let radius = fields.required_f64(40)?;
    if fields.is_mirrored()? {
        center = mirror_x(center);
    }
    Ok(Entity::Circle(Circle::new(center, radius)))
}

fn decode_arc(fields: &EntityGroups<'_>) -> Result<Entity, DrawingError> {
    let center = fields.point(10, 20)?;
    let radius = fields.required_f64(40)?;
    let start_angle = fields.required_f64(50)?;
    let end_angle = fields.required_f64(51)?;

    let arc = if fields.is_mirrored()? {
        Arc::new(
            mirror_x(center),
            radius,
            180.0 - start_angle,
            180.0 - end_angle,
            ArcDirection::Clockwise,
        )
    } else {
        Arc::new(
            center,
            radius,
            start_angle,
            end_angle,
            ArcDirection::CounterClockwise,
        )
    };
    Ok(Entity::Arc(arc))
}

fn decode_lwpolyline(fields: &EntityGroups<'_>) -> Result<Entity, DrawingError> {
    let mut vertices = Vec::new();
    let mut bulges: Vec<f64> = Vec::new();
    let mut pending_x: Option<f64> = None;

    for group in fields.groups {
        match group.code {
            10 => {
                if pending_x.is_some() {
                    return Err(DrawingError::MissingGroup {
                        entity: fields.locator.clone(),
                        code: 20,
                    });
                }
                pending_x = Some(fields.parse_f64(group)?);
            }
            20 => {
                let x = pending_x.take().ok_or_else(|| DrawingError::MissingGroup {
                    entity: fields.locator.clone(),
                    code: 10,
                })?;
                vertices.push(Point::new(x, fields.parse_f64(group)?));
                bulges.push(0.0);
            }
            42 => {
                let bulge = fields.parse_f64(group)?;
                if let Some(last) = bulges.last_mut() {
                    *last = bulge;
                }
            }
            _ => {}
        }
    }

    if pending_x.is_some() {
        return Err(DrawingError::MissingGroup {
            entity: fields.locator.clone(),
            code: 20,
        });
    }

    if let Some(declared) = fields.optional_i64(90)? {
        if declared < 0 || declared as usize != vertices.len() {
            return Err(DrawingError::VertexCountMismatch {
                entity: fields.locator.clone(),
                declared: declared.max(0) as usize,
                found: vertices.len(),
            });
        }
    }

    let flags = fields.optional_i64(70)?.unwrap_or(0);
    let closed = flags & 1 != 0;

    if fields.is_mirrored()? {
        vertices = vertices.into_iter().map(mirror_x).collect();
        bulges = bulges.into_iter().map(|b| -b).collect();
    }

    Ok(Entity::Polyline(Polyline::with_bulges(vertices, bulges, closed)))
}
