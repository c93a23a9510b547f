//! Integration tests for ASF skeleton parsing

use glam::Vec3;
use mocap_asf::{AngleUnit, AsfError, DofChannel, Skeleton, parse_asf, parse_asf_file};
use pretty_assertions::assert_eq;
use std::io::Write;
use test_case::test_case;

const WALKER: &str = include_str!("data/walker.asf");

const TWO_ROOTS: &str = "\
:units
  angle deg
:root
  order TX TY TZ RX RY RZ
  axis XYZ
  position 0 0 0
  orientation 0 0 0
:bonedata
  begin
    id 1
    name A
    direction 1 0 0
    length 1
    axis 0 0 0 XYZ
  end
  begin
    id 2
    name B
    direction 0 1 0
    length 2
    axis 0 0 0 XYZ
    dof rz
    limits (-10 10)
  end
  begin
    id 3
    name A1
    direction 0 0 1
    length 3
    axis 0 0 0 XYZ
  end
:hierarchy
  begin
    root A B
    A A1
  end
";

fn names(skeleton: &Skeleton, ids: &[mocap_asf::BoneId]) -> Vec<String> {
    ids.iter()
        .map(|id| skeleton.bone(*id).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_tree_shape() {
    let skeleton = parse_asf(TWO_ROOTS).unwrap();

    assert_eq!(names(&skeleton, skeleton.root_bones()), vec!["A", "B"]);

    let a = skeleton.bone_id("A").unwrap();
    assert_eq!(names(&skeleton, skeleton.children(a)), vec!["A1"]);

    let mut table: Vec<&str> = skeleton.names().collect();
    table.sort_unstable();
    assert_eq!(table, vec!["A", "A1", "B"]);
    assert_eq!(skeleton.len(), 3);
}

#[test]
fn test_bone_missing_from_hierarchy_is_detached() {
    let _ = env_logger::builder().is_test(true).try_init();
    let content = TWO_ROOTS.replace("    A A1\n", "");
    let skeleton = parse_asf(&content).unwrap();

    let a1 = skeleton.bone_id("A1").unwrap();
    assert_eq!(skeleton.detached(), vec![a1]);
    assert_eq!(names(&skeleton, &skeleton.depth_first()), vec!["A", "B"]);
}

#[test]
fn test_walker_skeleton() {
    let skeleton = parse_asf(WALKER).unwrap();

    assert_eq!(skeleton.name, "VICON");
    assert_eq!(skeleton.units.angle, AngleUnit::Degrees);
    assert!((skeleton.units.length - 0.45).abs() < 1e-6);
    assert_eq!(skeleton.len(), 6);
    assert_eq!(
        names(&skeleton, skeleton.root_bones()),
        vec!["lhipjoint", "rhipjoint", "lowerback"]
    );
    assert_eq!(
        names(&skeleton, &skeleton.depth_first()),
        vec!["lhipjoint", "lfemur", "ltibia", "rhipjoint", "rfemur", "lowerback"]
    );
    // 3 + 1 + 3 + 3
    assert_eq!(skeleton.dof_count(), 10);

    let tibia = skeleton.find("ltibia").unwrap();
    assert_eq!(tibia.channels(), &[DofChannel::Rx]);
    assert_eq!(tibia.rotation_bounds().dofs, 1);
    assert!((tibia.rotation_bounds().max_rx - 170f32.to_radians()).abs() < 1e-6);
    assert!((tibia.direction().length() - 1.0).abs() < 1e-5);
    assert!((tibia.axis().z - 20f32.to_radians()).abs() < 1e-6);
}

#[test]
fn test_unknown_child_in_hierarchy() {
    let content = TWO_ROOTS.replace("A A1", "A A2");
    match parse_asf(&content) {
        Err(AsfError::UnknownBone { name, .. }) => assert_eq!(name, "A2"),
        other => panic!("expected UnknownBone, got {other:?}"),
    }
}

#[test]
fn test_unknown_parent_in_hierarchy() {
    let content = TWO_ROOTS.replace("A A1", "Z A1");
    assert!(matches!(
        parse_asf(&content),
        Err(AsfError::UnknownBone { .. })
    ));
}

#[test]
fn test_bone_attached_twice() {
    let content = TWO_ROOTS.replace("A A1", "A A1\n    B A1");
    assert!(matches!(
        parse_asf(&content),
        Err(AsfError::MultipleParents { .. })
    ));
}

#[test_case(":bonedata\n begin\n id 1\n name A\n length 1\n" ; "bone without end")]
#[test_case(":hierarchy\n begin\n root A\n" ; "hierarchy without end")]
fn test_truncated_file(content: &str) {
    assert!(matches!(
        parse_asf(content),
        Err(AsfError::UnexpectedEof { .. })
    ));
}

#[test]
fn test_truncated_limits() {
    let cut = WALKER.find("(-70.0 70.0)").unwrap();
    assert!(matches!(
        parse_asf(&WALKER[..cut]),
        Err(AsfError::UnexpectedEof { section: "bonedata" })
    ));
}

#[test_case("length 1", "length one" ; "length")]
#[test_case("direction 0 1 0", "direction 0 y 0" ; "direction")]
#[test_case("limits (-10 10)", "limits (-10 ten)" ; "limits")]
fn test_non_numeric_field(from: &str, to: &str) {
    let content = TWO_ROOTS.replacen(from, to, 1);
    assert!(matches!(
        parse_asf(&content),
        Err(AsfError::InvalidNumber { .. })
    ));
}

#[test]
fn test_rest_pose_endpoint() {
    let skeleton = parse_asf(TWO_ROOTS).unwrap();
    let b = skeleton.find("B").unwrap();
    assert_eq!(b.bone_vector(), Vec3::new(0.0, 2.0, 0.0));
    let end = b.local_transform().transform_point3(Vec3::ZERO);
    assert!(end.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-6));
}

#[test]
fn test_parse_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TWO_ROOTS.as_bytes()).unwrap();

    let skeleton = parse_asf_file(file.path()).unwrap();
    assert_eq!(skeleton.len(), 3);
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        parse_asf_file("/nonexistent/skeleton.asf"),
        Err(AsfError::Io(_))
    ));
}
