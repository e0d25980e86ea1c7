use dxf2gcode_core::{DiagnosticKind, DrawingError, DrawingUnit};
use dxf2gcode_designer::dxf_parser::{DxfParser, ParserOptions};
use dxf2gcode_designer::{Entity, Point};

fn dxf(entities: &str) -> String {
    format!("0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n", entities)
}

const LINE: &str = "0\nLINE\n8\n0\n10\n0\n20\n0\n11\n10\n21\n0\n";
const TEXT: &str = "0\nTEXT\n5\n2A\n8\n0\n10\n1\n20\n1\n40\n2.5\n1\nhello\n";
const CIRCLE: &str = "0\nCIRCLE\n8\n0\n10\n0\n20\n0\n40\n5\n";

#[test]
fn test_all_supported_entities_in_file_order() {
    let content = dxf(&format!(
        "{}{}0\nARC\n10\n0\n20\n0\n40\n1\n50\n0\n51\n90\n0\nLWPOLYLINE\n90\n2\n70\n0\n10\n0\n20\n0\n10\n1\n20\n1\n",
        LINE, CIRCLE
    ));
    let drawing = DxfParser::parse(&content).unwrap();
    let types: Vec<_> = drawing
        .entities
        .iter()
        .map(|e| e.entity.type_name())
        .collect();
    assert_eq!(types, vec!["LINE", "CIRCLE", "ARC", "LWPOLYLINE"]);
    assert!(drawing.diagnostics.is_empty());
}

#[test]
fn test_unsupported_entity_is_reported_not_fatal() {
    let content = dxf(&format!("{}{}{}", LINE, TEXT, CIRCLE));
    let drawing = DxfParser::parse(&content).unwrap();

    assert_eq!(drawing.entities.len(), 2);
    assert_eq!(drawing.diagnostics.len(), 1);
    let d = &drawing.diagnostics[0];
    assert_eq!(d.kind, DiagnosticKind::UnsupportedEntity);
    assert_eq!(d.entity.entity_type, "TEXT");
    assert_eq!(d.entity.handle.as_deref(), Some("2A"));
    assert_eq!(d.entity.line, 17);
}

#[test]
fn test_crlf_line_endings() {
    let content = dxf(LINE).replace('\n', "\r\n");
    let drawing = DxfParser::parse(&content).unwrap();
    assert_eq!(
        drawing.entities[0].entity,
        Entity::Line(dxf2gcode_designer::Line::new(
            Point::origin(),
            Point::new(10.0, 0.0)
        ))
    );
}

#[test]
fn test_drawing_without_entities_section_is_empty() {
    let content = "0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1015\n0\nENDSEC\n0\nEOF\n";
    let drawing = DxfParser::parse(content).unwrap();
    assert_eq!(drawing.entities.len(), 0);
    assert_eq!(drawing.unit, DrawingUnit::Millimeters);
}

#[test]
fn test_non_integer_group_code() {
    let err = DxfParser::parse("0\nSECTION\n2\nENTITIES\nX\nLINE\n").unwrap_err();
    assert_eq!(
        err,
        DrawingError::InvalidGroupCode {
            raw: "X".to_string(),
            line: 5
        }
    );
}

#[test]
fn test_missing_mandatory_group_names_entity() {
    let content = dxf("0\nLINE\n5\n1F\n10\n0\n20\n0\n11\n10\n");
    let err = DxfParser::parse(&content).unwrap_err();
    match err {
        DrawingError::MissingGroup { entity, code } => {
            assert_eq!(code, 21);
            assert_eq!(entity.entity_type, "LINE");
            assert_eq!(entity.handle.as_deref(), Some("1F"));
        }
        other => panic!("expected missing group, got {:?}", other),
    }
}

#[test]
fn test_unparsable_coordinate() {
    let content = dxf("0\nCIRCLE\n10\nabc\n20\n0\n40\n1\n");
    let err = DxfParser::parse(&content).unwrap_err();
    assert!(matches!(
        err,
        DrawingError::InvalidValue { code: 10, ref raw, .. } if raw == "abc"
    ));
}

#[test]
fn test_lwpolyline_x_without_y() {
    let content = dxf("0\nLWPOLYLINE\n10\n0\n10\n1\n20\n1\n");
    let err = DxfParser::parse(&content).unwrap_err();
    assert!(matches!(err, DrawingError::MissingGroup { code: 20, .. }));
}

#[test]
fn test_unterminated_entities_section() {
    let content = format!("0\nSECTION\n2\nENTITIES\n{}0\nEOF\n", LINE);
    let err = DxfParser::parse(&content).unwrap_err();
    match err {
        DrawingError::UnterminatedEntity { entity } => assert_eq!(entity.entity_type, "LINE"),
        other => panic!("expected unterminated entity, got {:?}", other),
    }

    let truncated = format!("0\nSECTION\n2\nENTITIES\n{}", LINE);
    assert!(matches!(
        DxfParser::parse(&truncated),
        Err(DrawingError::UnterminatedEntity { .. })
    ));
}

#[test]
fn test_binary_dxf_is_rejected() {
    let mut bytes = b"AutoCAD Binary DXF\r\n\x1a\x00".to_vec();
    bytes.extend_from_slice(&[0x00, 0x00, 0x07]);
    let err = DxfParser::parse_bytes(&bytes, &ParserOptions::default()).unwrap_err();
    assert_eq!(err, DrawingError::BinaryFormat);
}

#[test]
fn test_unitless_header_uses_fallback() {
    let content = "0\nSECTION\n2\nHEADER\n9\n$INSUNITS\n70\n0\n0\nENDSEC\n\
                   0\nSECTION\n2\nENTITIES\n0\nCIRCLE\n10\n0\n20\n0\n40\n1\n0\nENDSEC\n0\nEOF\n";
    let options = ParserOptions {
        fallback_unit: DrawingUnit::Inches,
    };
    let drawing = DxfParser::parse_with(content, &options).unwrap();
    assert_eq!(drawing.unit, DrawingUnit::Inches);
    assert_eq!(drawing.entities[0].entity.radius(), Some(25.4));
}

#[test]
fn test_comments_are_ignored() {
    let content = dxf(&format!("999\nexported by hand\n{}", LINE));
    let drawing = DxfParser::parse(&content).unwrap();
    assert_eq!(drawing.entities.len(), 1);
}
