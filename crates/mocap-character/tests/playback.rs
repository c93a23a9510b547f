//! Playback and forward-kinematics tests

use glam::{Mat4, Vec3};
use mocap_amc::{AmcError, AmcOptions, BoneSample, Motion, MotionFrame, parse_amc};
use mocap_asf::{AngleUnit, Bone, BoneId, Skeleton, parse_asf};
use mocap_character::{Character, CharacterConfig, CharacterError, PoseVisitor};
#[macro_use]
extern crate pretty_assertions;
use proptest::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use test_case::test_case;

const ARM_ASF: &str = include_str!("data/arm.asf");
const ARM_AMC: &str = include_str!("data/arm.amc");

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn arm_skeleton() -> Skeleton {
    parse_asf(ARM_ASF).unwrap()
}

fn arm_character(config: CharacterConfig) -> Character {
    let skeleton = arm_skeleton();
    let motion = parse_amc(ARM_AMC, &AmcOptions::for_skeleton(&skeleton)).unwrap();
    Character::new(skeleton, Some(motion), config)
}

/// 240 frames: root slides along X one unit per frame, upperarm bends slowly
fn long_motion() -> Motion {
    Motion {
        frames: (0..240u32)
            .map(|k| MotionFrame {
                index: k + 1,
                root: vec![k as f32, 0.0, 0.0, 0.0, 0.0, 0.0],
                bones: vec![BoneSample {
                    name: "upperarm".to_string(),
                    values: vec![k as f32 * 0.001, 0.0],
                }],
            })
            .collect(),
        angle_unit: AngleUnit::Radians,
        fully_specified: true,
    }
}

fn upperarm_rx(character: &Character) -> f32 {
    character.bone("upperarm").unwrap().current_rotation().x
}

#[test]
fn test_upperarm_scenario() {
    let mut character = arm_character(CharacterConfig::default());
    character.advance(1.0 / 120.0);

    assert_eq!(character.animation_frame(), 0);
    assert!((upperarm_rx(&character) - 30f32.to_radians()).abs() < 1e-6);
    assert_eq!(
        character.bone("upperarm").unwrap().bone_vector(),
        Vec3::new(0.0, 0.0, 1.0)
    );
}

#[test]
fn test_first_frame_applied_on_construction() {
    let character = arm_character(CharacterConfig::default());
    assert!(character.has_animation());
    assert_eq!(character.frame_count(), 3);
    assert_eq!(character.time(), 0.0);
    assert!((upperarm_rx(&character) - 30f32.to_radians()).abs() < 1e-6);
}

#[test]
fn test_holds_last_frame() {
    let mut character = arm_character(CharacterConfig::default());
    character.advance(10.0);

    assert_eq!(character.animation_frame(), 2);
    let rotation = character.bone("upperarm").unwrap().current_rotation();
    // 120 degrees clamps to the 90 degree limit
    assert!((rotation.x - 90f32.to_radians()).abs() < 1e-6);
    assert!((rotation.y - 45f32.to_radians()).abs() < 1e-6);
    assert_eq!(character.current_position(), Vec3::new(2.0, 0.0, 0.0));
}

#[test_case(0.004 => 0 ; "under half a tick")]
#[test_case(1.0 / 120.0 => 0 ; "one tick")]
#[test_case(0.02 => 1 ; "two ticks")]
#[test_case(0.021 => 2 ; "rounds up to three ticks")]
#[test_case(1.0 => 2 ; "past the end")]
fn test_frame_after_single_step(dt: f64) -> usize {
    let mut character = arm_character(CharacterConfig::default());
    character.advance(dt);
    character.animation_frame()
}

#[test_case(1e9 ; "huge step")]
#[test_case(f64::INFINITY ; "infinite step")]
fn test_huge_step_is_bounded(dt: f64) {
    let mut character = Character::new(
        arm_skeleton(),
        Some(long_motion()),
        CharacterConfig::default(),
    );
    let start = Instant::now();
    character.advance(dt);
    character.advance(dt);

    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(character.animation_frame(), character.frame_count() - 1);
    assert_eq!(character.current_position(), Vec3::new(239.0, 0.0, 0.0));
}

#[test]
fn test_frame_never_decreases() {
    let mut character = Character::new(
        arm_skeleton(),
        Some(long_motion()),
        CharacterConfig::default(),
    );
    let mut previous = character.animation_frame();

    for _ in 0..2000 {
        character.advance(0.003);
        let frame = character.animation_frame();
        assert!(frame >= previous);
        assert!(frame < character.frame_count());
        previous = frame;
    }
    assert_eq!(previous, 239);
}

proptest! {
    #[test]
    fn prop_split_steps_match_single_step(steps in prop::collection::vec(0.0f64..0.05, 1..20)) {
        let config = CharacterConfig::default();
        let mut chunked = Character::new(arm_skeleton(), Some(long_motion()), config);
        let mut single = Character::new(arm_skeleton(), Some(long_motion()), config);

        for dt in &steps {
            chunked.advance(*dt);
        }
        single.advance(steps.iter().sum());

        let a = chunked.animation_frame();
        let b = single.animation_frame();
        prop_assert!(a.abs_diff(b) <= 1, "chunked {a} vs single {b}");
        if a == b {
            prop_assert_eq!(upperarm_rx(&chunked), upperarm_rx(&single));
            prop_assert_eq!(chunked.current_position(), single.current_position());
        }
    }
}

#[test]
fn test_base_position_and_velocity() {
    let config = CharacterConfig::default()
        .with_base_position(Vec3::new(0.0, 5.0, 0.0))
        .with_base_velocity(Vec3::new(120.0, 0.0, 0.0))
        .with_length_scale(0.5);
    let mut character = Character::new(arm_skeleton(), Some(long_motion()), config);

    character.apply_frame(2);
    // 2 * 0.5 from the root, 120 * 2/120 from the drift
    assert!(
        character
            .current_position()
            .abs_diff_eq(Vec3::new(3.0, 5.0, 0.0), 1e-5)
    );
    assert_eq!(character.animation_frame(), 2);
}

#[test]
fn test_root_frame_is_zyx() {
    let skeleton = arm_skeleton();
    let motion = parse_amc(
        ":RADIANS\n1\nroot 1 2 3 0.3 0.5 0.7\n",
        &AmcOptions::for_skeleton(&skeleton),
    )
    .unwrap();
    let character = Character::new(skeleton, Some(motion), CharacterConfig::default());

    let expected = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
        * Mat4::from_rotation_z(0.7)
        * Mat4::from_rotation_y(0.5)
        * Mat4::from_rotation_x(0.3);
    assert!(character.current_coordinate_frame().abs_diff_eq(expected, 1e-6));

    let xyz = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
        * Mat4::from_rotation_x(0.3)
        * Mat4::from_rotation_y(0.5)
        * Mat4::from_rotation_z(0.7);
    assert!(!character.current_coordinate_frame().abs_diff_eq(xyz, 1e-3));
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl PoseVisitor for Recorder {
    fn enter_bone(&mut self, _id: BoneId, bone: &Bone, _start: &Mat4, _end: &Mat4) {
        self.events.push(format!("enter {}", bone.name()));
    }

    fn leave_bone(&mut self, _id: BoneId, bone: &Bone) {
        self.events.push(format!("leave {}", bone.name()));
    }
}

#[test]
fn test_draw_is_depth_first() {
    let character = arm_character(CharacterConfig::default());
    let mut recorder = Recorder::default();
    character.draw(&mut recorder);

    assert_eq!(
        recorder.events,
        vec![
            "enter upperarm",
            "enter forearm",
            "leave forearm",
            "leave upperarm"
        ]
    );
}

#[test]
fn test_rest_pose_joints() {
    let character = Character::new(arm_skeleton(), None, CharacterConfig::default());
    let joints = character.joint_positions();

    assert_eq!(joints.len(), 2);
    assert!(joints[0].1.abs_diff_eq(Vec3::ZERO, 1e-6));
    assert!(joints[0].2.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
    assert!(joints[1].1.abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
    assert!(joints[1].2.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
}

#[test]
fn test_posed_joints() {
    let mut character = arm_character(CharacterConfig::default().with_length_scale(2.0));
    character.apply_frame(1);

    let joints = character.joint_positions();
    let upperarm = character.skeleton().bone_id("upperarm").unwrap();
    assert_eq!(joints[0].0, upperarm);

    // root at x = 2 after scaling; a 90 degree bend about X swings +Z onto -Y
    assert!(joints[0].1.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
    assert!(joints[0].2.abs_diff_eq(Vec3::new(2.0, -2.0, 0.0), 1e-5));
    assert!(joints[1].1.abs_diff_eq(joints[0].2, 1e-5));

    let bend = 100f32.to_radians();
    let forearm_end = Vec3::new(2.0, -2.0 - 2.0 * bend.sin(), 2.0 * bend.cos());
    assert!(joints[1].2.abs_diff_eq(forearm_end, 1e-5));
}

#[test]
fn test_reset_rewinds() {
    let mut character = arm_character(CharacterConfig::default());
    character.advance(1.0);
    assert_eq!(character.animation_frame(), 2);

    character.reset();
    assert_eq!(character.time(), 0.0);
    assert_eq!(character.animation_frame(), 0);
    assert!((upperarm_rx(&character) - 30f32.to_radians()).abs() < 1e-6);
}

#[test]
fn test_load_from_disk() {
    let character = Character::load(
        data_path("arm.asf"),
        data_path("arm.amc"),
        CharacterConfig::default(),
    );
    assert!(character.has_skeleton());
    assert!(character.has_animation());
    assert!(character.load_errors().is_empty());
    assert_eq!(character.root_bones().len(), 1);
}

#[test]
fn test_missing_motion_keeps_rest_pose() {
    let mut character = Character::load(
        data_path("arm.asf"),
        data_path("missing.amc"),
        CharacterConfig::default(),
    );
    assert!(character.has_skeleton());
    assert!(!character.has_animation());
    assert_eq!(character.load_errors().len(), 1);

    character.advance(0.5);
    assert_eq!(character.animation_frame(), 0);
    assert_eq!(upperarm_rx(&character), 0.0);
    assert_eq!(character.joint_positions().len(), 2);
}

#[test]
fn test_bad_skeleton_is_empty() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ARM_ASF.replace("upperarm forearm", "upperarm hand").as_bytes())
        .unwrap();

    let character = Character::load(file.path(), data_path("arm.amc"), CharacterConfig::default());
    assert!(!character.has_skeleton());
    assert!(!character.has_animation());
    assert_eq!(character.load_errors().len(), 1);
    assert!(character.joint_positions().is_empty());
}

#[test]
fn test_try_load_rejects_mismatch() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ARM_AMC.replace("forearm 10", "forearm 10 5").as_bytes())
        .unwrap();

    match Character::try_load(data_path("arm.asf"), file.path(), CharacterConfig::default()) {
        Err(CharacterError::Motion(AmcError::ChannelMismatch { bone, .. })) => {
            assert_eq!(bone, "forearm");
        }
        other => panic!("expected ChannelMismatch, got {other:?}"),
    }
}

#[test]
fn test_mismatched_sample_is_tolerated() {
    let _ = env_logger::builder().is_test(true).try_init();
    let skeleton = arm_skeleton();
    let content = ARM_AMC.replace("upperarm 30 0", "upperarm 30 0 7\nelbow 5");
    let motion = parse_amc(&content, &AmcOptions::for_skeleton(&skeleton)).unwrap();
    let character = Character::new(skeleton, Some(motion), CharacterConfig::default());

    assert!((upperarm_rx(&character) - 30f32.to_radians()).abs() < 1e-6);
}
