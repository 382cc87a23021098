use engine::loader::{load_dives, load_or_synthesize, LoadError};
use engine::synth::SynthParams;

#[test]
fn loads_well_formed_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dives.json");
    let json = r#"[
        {
            "id": 1,
            "path": [
                {"x": 0.0, "depth": 0.0, "z": 0.0},
                {"x": 1.0, "depth": 5.0, "z": 0.5}
            ],
            "twistiness": [0.1, 0.9],
            "maxDepth": 5.0,
            "duration": 42.0,
            "startTime": "2024-03-01T12:00:00Z"
        }
    ]"#;
    std::fs::write(&path, json).expect("write fixture");

    let dives = load_dives(&path).expect("load");
    assert_eq!(dives.len(), 1);
    assert_eq!(dives[0].id, 1);
    assert_eq!(dives[0].path.len(), 2);
    assert_eq!(dives[0].max_depth_m, 5.0);
    assert_eq!(dives[0].duration_s, 42.0);
    assert_eq!(dives[0].start_time, "2024-03-01T12:00:00Z");
}

#[test]
fn summary_fields_are_optional() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dives.json");
    let json = r#"[{"id": 2, "path": [{"x":0,"depth":0,"z":0},{"x":1,"depth":1,"z":0}], "twistiness": [0,1]}]"#;
    std::fs::write(&path, json).expect("write fixture");
    let dives = load_dives(&path).expect("load");
    assert_eq!(dives[0].max_depth_m, 0.0);
    assert!(dives[0].start_time.is_empty());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_dives(&dir.path().join("absent.json")).expect_err("no file");
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn malformed_json_is_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not dives }").expect("write fixture");
    let err = load_dives(&path).expect_err("bad json");
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn fallback_synthesizes_and_caches() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.json");
    let cache = dir.path().join("cache.json");
    let params = SynthParams { count: 6, seed: 7 };

    let dives = load_or_synthesize(&missing, Some(&cache), params);
    assert_eq!(dives.len(), 6);
    assert!(cache.exists());

    // Second run reuses the cache rather than resynthesizing
    let again = load_or_synthesize(&missing, Some(&cache), SynthParams { count: 99, seed: 1 });
    assert_eq!(again.len(), 6);
}

#[test]
fn fallback_without_cache_path_still_renders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dives =
        load_or_synthesize(&dir.path().join("absent.json"), None, SynthParams { count: 3, seed: 0 });
    assert_eq!(dives.len(), 3);
}
