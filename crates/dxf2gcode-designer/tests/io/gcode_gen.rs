use dxf2gcode_designer::{
    DxfParser, EmitterOptions, GcodeEmitter, PathOrdering, PathPlanner, Segment,
};

fn dxf(entities: &str) -> String {
    format!("0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n", entities)
}

fn convert(entities: &str, ordering: PathOrdering) -> String {
    let drawing = DxfParser::parse(&dxf(entities)).unwrap();
    let planned = PathPlanner::new(ordering).plan(&drawing.entities);
    GcodeEmitter::new(EmitterOptions {
        annotate: false,
        ..EmitterOptions::default()
    })
    .emit(&planned.paths)
}

fn cutting_moves(gcode: &str) -> Vec<&str> {
    gcode
        .lines()
        .filter(|l| l.starts_with("G1 ") || l.starts_with("G2 ") || l.starts_with("G3 "))
        .collect()
}

#[test]
fn test_single_line_program() {
    let gcode = convert(
        "0\nLINE\n10\n0\n20\n0\n11\n10\n21\n0\n",
        PathOrdering::FileOrder,
    );
    assert_eq!(cutting_moves(&gcode), vec!["G1 X10.0000 Y0.0000 F6000.0000"]);
    let lines: Vec<_> = gcode.lines().collect();
    let rapid = lines.iter().position(|l| l.starts_with("G0 ")).unwrap();
    assert_eq!(lines[rapid], "G0 X0.0000 Y0.0000 F6000.0000 S0");
    assert_eq!(lines[rapid + 1], "M4 S1000");
    assert_eq!(lines[rapid + 3], "M5");
    assert_eq!(lines[0], "G21");
    assert_eq!(lines[1], "G90");
    assert_eq!(*lines.last().unwrap(), "M30");
}

#[test]
fn test_circle_program_is_one_closed_arc() {
    let gcode = convert("0\nCIRCLE\n10\n0\n20\n0\n40\n5\n", PathOrdering::FileOrder);
    assert!(gcode.contains("G0 X5.0000 Y0.0000 F6000.0000 S0\n"));
    assert_eq!(
        cutting_moves(&gcode),
        vec!["G2 X5.0000 Y0.0000 I-5.0000 J0.0000 F6000.0000"]
    );
}

#[test]
fn test_bulged_polyline_emits_semicircle() {
    let drawing = DxfParser::parse(&dxf(
        "0\nLWPOLYLINE\n90\n2\n10\n0\n20\n0\n42\n1.0\n10\n10\n20\n0\n",
    ))
    .unwrap();
    let planned = PathPlanner::default().plan(&drawing.entities);
    match planned.paths[0].segments[0] {
        Segment::Arc { sweep, .. } => {
            assert!((sweep.to_degrees() - 180.0).abs() < 1e-9)
        }
        other => panic!("expected arc, got {:?}", other),
    }

    let gcode = GcodeEmitter::default().emit(&planned.paths);
    assert!(gcode.contains("G3 X10.0000 Y0.0000 I5.0000 J0.0000 F6000.0000\n"));
}

#[test]
fn test_unsupported_entity_does_not_change_neighbours() {
    let line = "0\nLINE\n10\n0\n20\n0\n11\n10\n21\n0\n";
    let circle = "0\nCIRCLE\n10\n20\n20\n20\n40\n2\n";
    let text = "0\nTEXT\n10\n1\n20\n1\n40\n2.5\n1\nskip me\n";

    let without = convert(&format!("{}{}", line, circle), PathOrdering::FileOrder);
    let with = convert(&format!("{}{}{}", line, text, circle), PathOrdering::FileOrder);
    assert_eq!(without, with);
}

#[test]
fn test_nearest_neighbor_only_reorders() {
    let entities = "0\nLINE\n10\n100\n20\n0\n11\n110\n21\n0\n\
                    0\nLINE\n10\n0\n20\n0\n11\n10\n21\n0\n\
                    0\nCIRCLE\n10\n50\n20\n0\n40\n5\n";
    let file = convert(entities, PathOrdering::FileOrder);
    let nearest = convert(entities, PathOrdering::NearestNeighbor);
    assert_ne!(file, nearest);

    let mut a = cutting_moves(&file);
    let mut b = cutting_moves(&nearest);
    a.sort();
    b.sort();
    assert_eq!(a, b);

    assert_eq!(nearest, convert(entities, PathOrdering::NearestNeighbor));
    assert_eq!(
        cutting_moves(&nearest)[0],
        "G1 X10.0000 Y0.0000 F6000.0000"
    );
}

#[test]
fn test_arc_below_precision_is_not_written_as_full_circle() {
    let gcode = convert(
        "0\nARC\n5\nA1\n10\n0\n20\n0\n40\n10\n50\n0\n51\n0.00001\n",
        PathOrdering::FileOrder,
    );
    assert!(cutting_moves(&gcode).is_empty());
    assert!(!gcode.contains("G0 "));
}

#[test]
fn test_tiny_bulged_polyline_is_not_written_as_zero_radius_arc() {
    let gcode = convert(
        "0\nLWPOLYLINE\n90\n2\n10\n0\n20\n0\n42\n1.0\n10\n0.00004\n20\n0\n",
        PathOrdering::FileOrder,
    );
    assert!(cutting_moves(&gcode).is_empty());
    assert!(!gcode.contains("I0.0000 J0.0000"));
}

#[test]
fn test_mirrored_bulged_polyline_cuts_clockwise() {
    let gcode = convert(
        "0\nLWPOLYLINE\n90\n2\n10\n0\n20\n0\n42\n1.0\n10\n10\n20\n0\n230\n-1\n",
        PathOrdering::FileOrder,
    );
    assert!(gcode.contains("G0 X0.0000 Y0.0000 F6000.0000 S0\n"));
    assert_eq!(
        cutting_moves(&gcode),
        vec!["G2 X-10.0000 Y0.0000 I-5.0000 J0.0000 F6000.0000"]
    );
}

#[test]
fn test_mirrored_circle_program() {
    let gcode = convert(
        "0\nCIRCLE\n10\n3\n20\n0\n40\n1\n230\n-1\n",
        PathOrdering::FileOrder,
    );
    assert!(gcode.contains("G0 X-2.0000 Y0.0000 F6000.0000 S0\n"));
    assert_eq!(
        cutting_moves(&gcode),
        vec!["G2 X-2.0000 Y0.0000 I-1.0000 J0.0000 F6000.0000"]
    );
}
