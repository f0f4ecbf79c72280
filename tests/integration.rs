use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use robtarget_gen::classify::axis_config_label;
use robtarget_gen::output::{FileKind, OutputLayout, write_outputs};
use robtarget_gen::parse::robtarget::parse_str;
use robtarget_gen::sampler::{SamplerOptions, SamplingLimits, find_violation};
use robtarget_gen::{ALIGN_TARGETS, generate};

const ALIGN_1: &str = "CONST robtarget Align_1:=[[2232.99,-1063.35,1475.78],[0.61087,-0.631826,0.409222,-0.245299],[-1,-2,0,1],[9E+9,9E+9,9E+9,9E+9,9E+9,9E+9]];";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("robtarget_gen_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn single_seed_collapses_to_its_position() {
    let mut rng = StdRng::seed_from_u64(9);
    let options = SamplerOptions {
        limits: SamplingLimits {
            deadzone: 40.0,
            max_radius: 18530.0,
            min_distance: 0.0,
        },
        num_points: 1,
        ..SamplerOptions::default()
    };
    let generation = generate(ALIGN_1, options, &mut rng).expect("generate");

    assert_eq!(generation.bounds.min, generation.bounds.max);
    assert_eq!(generation.points.len(), 1);
    assert!(generation.failures.is_empty());

    let point = &generation.points[0];
    assert_eq!(point.position, [2232.99, -1063.35, 1475.78]);
    assert_eq!(point.orientation, [0.61087, -0.631826, 0.409222, -0.245299]);
    assert_eq!(point.config, [-1, -2, 0, 1]);
    assert_eq!(point.extra, vec!["9.0000E+09"; 6]);
}

#[test]
fn deadzone_beyond_reach_terminates_with_failures() {
    let mut rng = StdRng::seed_from_u64(1);
    let max_radius = 1653.0;
    let options = SamplerOptions {
        limits: SamplingLimits {
            deadzone: max_radius / 3f64.sqrt() + 1.0,
            max_radius,
            min_distance: 100.0,
        },
        num_points: 5,
        ..SamplerOptions::default()
    };
    let generation = generate(ALIGN_TARGETS, options, &mut rng).expect("generate");

    assert!(generation.points.is_empty());
    assert_eq!(generation.failures.len(), 5);
    for (idx, failure) in generation.failures.iter().enumerate() {
        assert_eq!(failure.index, idx + 1);
        assert_eq!(failure.attempts, options.max_attempts);
    }
}

#[test]
fn separation_beyond_diagonal_keeps_only_first_point() {
    let mut rng = StdRng::seed_from_u64(2);
    let seeds = parse_str(ALIGN_TARGETS).expect("parse");
    let diagonal = robtarget_gen::geom::Bounds::from_poses(seeds.iter().map(|s| &s.pose))
        .expect("bounds")
        .position_diagonal();
    let options = SamplerOptions {
        limits: SamplingLimits {
            deadzone: 0.0,
            max_radius: 1e6,
            min_distance: diagonal * 1.01,
        },
        num_points: 4,
        ..SamplerOptions::default()
    };
    let generation = generate(ALIGN_TARGETS, options, &mut rng).expect("generate");

    assert_eq!(generation.points.len(), 1);
    let indices: Vec<_> = generation.failures.iter().map(|f| f.index).collect();
    assert_eq!(indices, [2, 3, 4]);
}

#[test]
fn default_run_satisfies_geometric_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let limits = SamplingLimits {
        deadzone: 40.0,
        max_radius: 1853.0,
        min_distance: 100.0,
    };
    let generation = generate(ALIGN_TARGETS, SamplerOptions::with_limits(limits), &mut rng)
        .expect("generate");

    assert!(!generation.points.is_empty());
    assert_eq!(find_violation(&generation.points, &limits), None);
    for group in &generation.groups {
        for point in &group.points {
            assert_eq!(axis_config_label(&point.config), group.label);
        }
    }
}

#[test]
fn writes_grouped_summary_and_flat_files() {
    let dir = scratch_dir("outputs");
    let mut rng = StdRng::seed_from_u64(77);
    let limits = SamplingLimits {
        deadzone: 40.0,
        max_radius: 3000.0,
        min_distance: 100.0,
    };
    let options = SamplerOptions {
        limits,
        num_points: 40,
        ..SamplerOptions::default()
    };
    let generation = generate(ALIGN_TARGETS, options, &mut rng).expect("generate");
    assert!(!generation.points.is_empty());

    let layout = OutputLayout::new(&dir);
    let written = write_outputs(&layout, &generation.points, &generation.groups).expect("write");
    assert_eq!(written.len(), generation.groups.len() + 2);

    for group in &generation.groups {
        let text = fs::read_to_string(layout.group_file_path(&group.label)).expect("group file");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), group.points.len());
        assert!(lines[0].starts_with("CONST robtarget Calib_1:=[["));

        let reparsed = parse_str(&text).expect("reparse group");
        assert_eq!(reparsed.len(), group.points.len());
        for seed in &reparsed {
            assert_eq!(axis_config_label(&seed.config), group.label);
        }
    }

    let summary = fs::read_to_string(layout.summary_path()).expect("summary");
    for group in &generation.groups {
        assert!(summary.contains(&format!("{}: {} points", group.label, group.points.len())));
    }

    let flat = fs::read_to_string(layout.flat_path()).expect("flat file");
    let reparsed = parse_str(&flat).expect("reparse flat");
    assert_eq!(reparsed.len(), generation.points.len());
    for (idx, (seed, point)) in reparsed.iter().zip(&generation.points).enumerate() {
        assert_eq!(seed.name, format!("Calib_{}", idx + 1));
        assert_eq!(seed.config, point.config);
        for (got, want) in seed.position().iter().zip(point.position) {
            assert!((got - want).abs() <= want.abs() * 1e-4);
        }
        for (got, want) in seed.orientation().iter().zip(point.orientation) {
            assert!((got - want).abs() <= 5e-7);
        }
    }

    let flat_entry = written
        .iter()
        .find(|file| file.kind == FileKind::Flat)
        .expect("flat entry");
    assert_eq!(flat_entry.points, generation.points.len());

    // tweede run in dezelfde map: de groepmap bestaat al
    write_outputs(&layout, &generation.points, &generation.groups).expect("rewrite");

    let _ = fs::remove_dir_all(&dir);
}

fn single_seed_run(seed_text: &str, limits: SamplingLimits) -> (usize, usize) {
    let mut rng = StdRng::seed_from_u64(4);
    let options = SamplerOptions {
        limits,
        num_points: 1,
        max_attempts: 5,
    };
    let generation = generate(seed_text, options, &mut rng).expect("generate");
    (generation.points.len(), generation.failures.len())
}

#[test]
fn axis_on_deadzone_edge_is_rejected() {
    let seed = "edge_1:=[[40,50,50],[1,0,0,0],[0,0,0,0],[9E+9]];";
    let limits = SamplingLimits {
        deadzone: 40.0,
        max_radius: 1e6,
        min_distance: 0.0,
    };
    assert_eq!(single_seed_run(seed, limits), (0, 1));
}

#[test]
fn norm_on_radius_edge_is_accepted() {
    // |(2, 3, 6)| == 7
    let seed = "edge_2:=[[2,3,6],[1,0,0,0],[0,0,0,0],[9E+9]];";
    let limits = SamplingLimits {
        deadzone: 1.0,
        max_radius: 7.0,
        min_distance: 0.0,
    };
    assert_eq!(single_seed_run(seed, limits), (1, 0));
}
