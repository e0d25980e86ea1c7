use dxf2gcode_camtools::{convert_batch, BatchJob, LaserCutter};

const LINE: &str = "0\nSECTION\n2\nENTITIES\n0\nLINE\n10\n0\n20\n0\n11\n10\n21\n0\n0\nENDSEC\n0\nEOF\n";
const BROKEN: &str = "0\nSECTION\n2\nENTITIES\n0\nLINE\n10\n0\n20\n0\n";

#[test]
fn test_batch_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = dir.path().join("a.dxf");
    let broken = dir.path().join("broken.dxf");
    let good_b = dir.path().join("b.dxf");
    let missing = dir.path().join("missing.dxf");
    std::fs::write(&good_a, LINE).unwrap();
    std::fs::write(&broken, BROKEN).unwrap();
    std::fs::write(&good_b, LINE).unwrap();

    let jobs = vec![
        BatchJob::beside(&good_a),
        BatchJob::beside(&broken),
        BatchJob::beside(&good_b),
        BatchJob::beside(&missing),
    ];
    let outcomes = convert_batch(&LaserCutter::default(), jobs);

    assert_eq!(outcomes.len(), 4);
    let ok: Vec<bool> = outcomes.iter().map(|o| o.is_ok()).collect();
    assert_eq!(ok, vec![true, false, true, false]);

    assert!(outcomes[1].result.as_ref().unwrap_err().is_malformed_input());
    assert!(!dir.path().join("broken.gcode").exists());

    let a = std::fs::read_to_string(dir.path().join("a.gcode")).unwrap();
    let b = std::fs::read_to_string(dir.path().join("b.gcode")).unwrap();
    assert_eq!(a, b);
    assert!(a.contains("G1 X10.0000 Y0.0000 F6000.0000\n"));
}

#[test]
fn test_batch_explicit_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.dxf");
    std::fs::write(&input, LINE).unwrap();
    let out_dir = dir.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();

    let outcomes = convert_batch(
        &LaserCutter::default(),
        vec![BatchJob::new(&input, out_dir.join("cut.nc"))],
    );
    let report = outcomes[0].result.as_ref().unwrap();
    assert_eq!(report.paths, 1);
    assert!(out_dir.join("cut.nc").exists());
}

#[test]
fn test_empty_batch() {
    assert!(convert_batch(&LaserCutter::default(), Vec::new()).is_empty());
}
