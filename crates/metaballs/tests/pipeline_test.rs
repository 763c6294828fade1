#![allow(clippy::cast_precision_loss)]
//! Integration tests for the staged `Metaballs` session and its configuration.

use metaballs::*;

fn options() -> Options {
    Options::from_json_str(
        r#"{
            "isolevel": 0.5,
            "radius": 1.0,
            "half_extent": 3.0,
            "resolution": 20
        }"#,
    )
    .expect("valid options")
}

#[test]
fn test_session_matches_free_functions() {
    init_logging();
    let options = options();
    let mut session = Metaballs::new(options.clone()).unwrap();

    let mut field = build_grid(options.origin, options.half_extent, options.resolution).unwrap();
    for source in orbit_sources(0.0, options.origin, options.radius) {
        add_source(&mut field, source.center, source.radius);
    }

    assert_eq!(session.field().values(), field.values());
    assert_eq!(session.mesh(), &extract_surface(&field, options.isolevel));
}

#[test]
fn test_animation_frames() {
    let mut session = Metaballs::new(Options {
        animate: true,
        ..options()
    })
    .unwrap();

    let mut previous = session.mesh().clone();
    for frame in 1..=5 {
        let t = frame as f32 * 0.25;
        assert!(session.advance(t));
        assert!(session.mesh_dirty());

        let mesh = session.mesh().clone();
        assert!(!mesh.is_empty(), "frame {frame}");
        assert_ne!(mesh, previous, "frame {frame} did not move");

        let mut field = build_grid(Vec3::ZERO, 3.0, 20).unwrap();
        for source in orbit_sources(t, Vec3::ZERO, 1.0) {
            add_source(&mut field, source.center, source.radius);
        }
        assert_eq!(mesh, extract_surface(&field, 0.5), "frame {frame}");
        previous = mesh;
    }
}

#[test]
fn test_explicit_sources_and_kernel() {
    let sources = vec![
        Source::new(Vec3::new(-0.5, 0.0, 0.0), 1.0),
        Source::new(Vec3::new(0.5, 0.0, 0.0), 1.0),
    ];
    let mut session = Metaballs::with_sources(options(), sources.clone()).unwrap();
    session.set_kernel(KernelKind::LinearShell).set_isolevel(0.7);

    let mut field = build_grid(Vec3::ZERO, 3.0, 20).unwrap();
    for source in &sources {
        add_source_with(&mut field, source.center, source.radius, &LinearShell);
    }
    let expected = extract_surface(&field, 0.7);
    assert_eq!(session.mesh(), &expected);

    let welded = expected.weld();
    assert!(welded.is_closed());
    assert_eq!(welded.num_components(), 1);
}

#[test]
fn test_mesh_export() {
    let mut session = Metaballs::new(options()).unwrap();
    let welded = session.mesh().weld();
    assert!(!welded.is_empty());

    let vertices = welded.vertex_buffer();
    assert_eq!(vertices.len(), welded.vertices.len());
    for vertex in &vertices {
        let n = Vec3::from_array(vertex.normal);
        assert!((n.length() - 1.0).abs() < 1e-3);
    }

    let mut obj = Vec::new();
    welded.write_obj(&mut obj).unwrap();
    let text = String::from_utf8(obj).unwrap();
    let faces = text.lines().filter(|line| line.starts_with("f ")).count();
    assert_eq!(faces, welded.num_triangles());
}

#[test]
fn test_options_file_roundtrip() {
    let options = Options {
        kernel: KernelKind::LinearShell,
        isolevel: 0.7,
        ..options()
    };
    let path = std::env::temp_dir().join(format!("metaballs-options-{}.json", std::process::id()));
    std::fs::write(&path, options.to_json().unwrap()).unwrap();
    let loaded = Options::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, options);
}
