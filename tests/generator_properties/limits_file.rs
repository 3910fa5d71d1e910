//! Limits loaded from a file drive generation

use crate::*;
use std::io::Write;

#[test]
fn test_limits_file_applied() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "recursion_max_depth": 1, "compound_max_members": 2, "max_dim_size": 3 }}"#
    )
    .unwrap();

    let limits = voltest::load_limits(file.path()).unwrap();
    assert_eq!(limits.recursion_max_depth, 1);
    assert_eq!(limits.enum_max_members, Limits::default().enum_max_members);

    let mut src = source(8, limits.clone());
    for _ in 0..200 {
        let ty = src.generate_type(None).unwrap();
        assert!(ty.depth() <= 1);
        assert_legal(&ty, &limits);
    }
    let shape = src.generate_shape(4, None).unwrap();
    assert!(shape.extents.iter().all(|&e| e <= 3));
}

#[test]
fn test_invalid_limits_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("limits.json");
    std::fs::write(&path, r#"{ "max_rank": 64 }"#).unwrap();

    let err = voltest::load_limits(&path).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("max_rank"), "{}", err);
}

#[test]
fn test_round_trip_through_json() {
    let limits = Limits::stress();
    let text = serde_json::to_string(&limits).unwrap();
    assert_eq!(Limits::from_json(&text).unwrap(), limits);
}
