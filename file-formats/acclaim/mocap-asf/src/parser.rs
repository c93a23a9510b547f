//! ASF skeleton parser
//!
//! The file is read in one pass into raw records, then converted into a
//! [`Skeleton`]. Angles are turned into radians only during that conversion,
//! so each stored angle is converted exactly once no matter where the
//! `:units` section appears.

use glam::Vec3;
use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::bone::Bone;
use crate::dof::{AxisOrder, DofChannel, RotationBounds};
use crate::error::{AsfError, Result};
use crate::reader::{Line, Lines, parse_f32, parse_vec3};
use crate::skeleton::{RootSpec, Skeleton};
use crate::units::{AngleUnit, Units};

/// Name of the distinguished root entry in the `:hierarchy` section
pub const ROOT_NAME: &str = "root";

/// Parser configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct AsfOptions {
    /// Overrides the angle unit declared in `:units`
    pub angle_unit: Option<AngleUnit>,
}

/// Parse ASF content with default options
pub fn parse_asf(content: &str) -> Result<Skeleton> {
    AsfParser::default().parse(content)
}

/// Read and parse an ASF file with default options
pub fn parse_asf_file<P: AsRef<Path>>(path: P) -> Result<Skeleton> {
    AsfParser::default().parse_file(path)
}

#[derive(Debug, Default)]
struct BoneRecord {
    line: usize,
    id: u32,
    name: Option<String>,
    direction: Vec3,
    length: f32,
    axis: Vec3,
    axis_order: AxisOrder,
    channels: Vec<DofChannel>,
    limits: Vec<(f32, f32)>,
}

#[derive(Debug)]
struct HierarchyRecord {
    line: usize,
    parent: String,
    children: Vec<String>,
}

/// Everything read from the file before unit conversion
#[derive(Debug, Default)]
struct RawSkeleton {
    name: String,
    version: String,
    units: Units,
    root: RootSpec,
    bones: Vec<BoneRecord>,
    hierarchy: Vec<HierarchyRecord>,
}

/// ASF skeleton parser
#[derive(Debug, Clone, Copy, Default)]
pub struct AsfParser {
    options: AsfOptions,
}

impl AsfParser {
    pub fn new(options: AsfOptions) -> Self {
        Self { options }
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Skeleton> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<Skeleton> {
        let raw = read_sections(content)?;
        let unit = self.options.angle_unit.unwrap_or(raw.units.angle);
        build_skeleton(raw, unit)
    }
}

fn read_sections(content: &str) -> Result<RawSkeleton> {
    let mut lines = Lines::new(content);
    let mut raw = RawSkeleton::default();

    while let Some(line) = lines.next_line() {
        if !line.is_section() {
            return Err(AsfError::syntax(
                line.number,
                format!("expected a section keyword, found '{}'", line.text),
            ));
        }

        match line.keyword().as_str() {
            ":version" => raw.version = line.rest().to_string(),
            ":name" => raw.name = line.rest().to_string(),
            ":units" => raw.units = read_units(&mut lines)?,
            ":root" => raw.root = read_root(&mut lines)?,
            ":bonedata" => raw.bones = read_bonedata(&mut lines)?,
            ":hierarchy" => raw.hierarchy = read_hierarchy(&mut lines)?,
            ":documentation" => {
                lines.skip_section();
            }
            other => {
                let skipped = lines.skip_section();
                debug!("Skipping unknown section {other} ({skipped} lines)");
            }
        }
    }

    Ok(raw)
}

fn read_units(lines: &mut Lines<'_>) -> Result<Units> {
    let mut units = Units::default();
    while let Some(line) = lines.next_in_section() {
        let value = line.rest();
        match line.keyword().as_str() {
            "mass" => units.mass = parse_f32(value, line.number)?,
            "length" => units.length = parse_f32(value, line.number)?,
            "angle" => {
                units.angle = value
                    .parse()
                    .map_err(|e: String| AsfError::syntax(line.number, e))?;
            }
            other => debug!("Ignoring unit '{other}'"),
        }
    }
    Ok(units)
}

fn read_root(lines: &mut Lines<'_>) -> Result<RootSpec> {
    let mut root = RootSpec::default();
    while let Some(line) = lines.next_in_section() {
        let mut tokens = line.tokens().skip(1);
        match line.keyword().as_str() {
            "order" => root.order = parse_channels(line)?,
            "axis" => {
                let order = tokens
                    .next()
                    .ok_or_else(|| AsfError::syntax(line.number, "missing axis order"))?;
                root.axis = order
                    .parse()
                    .map_err(|e: String| AsfError::syntax(line.number, e))?;
            }
            "position" => root.position = parse_vec3(&mut tokens, line.number)?,
            "orientation" => root.orientation = parse_vec3(&mut tokens, line.number)?,
            other => debug!("Ignoring root field '{other}'"),
        }
    }
    Ok(root)
}

fn parse_channels(line: Line<'_>) -> Result<Vec<DofChannel>> {
    line.tokens()
        .skip(1)
        .map(|token| {
            token
                .parse()
                .map_err(|e: String| AsfError::syntax(line.number, e))
        })
        .collect()
}

fn read_bonedata(lines: &mut Lines<'_>) -> Result<Vec<BoneRecord>> {
    let mut bones = Vec::new();
    while let Some(line) = lines.next_in_section() {
        if line.keyword() != "begin" {
            return Err(AsfError::syntax(
                line.number,
                format!("expected 'begin', found '{}'", line.text),
            ));
        }
        bones.push(read_bone(lines, line.number)?);
    }
    Ok(bones)
}

fn read_bone(lines: &mut Lines<'_>, begin_line: usize) -> Result<BoneRecord> {
    let mut record = BoneRecord {
        line: begin_line,
        ..Default::default()
    };

    loop {
        let line = lines.next_in_section().ok_or(AsfError::UnexpectedEof {
            section: "bonedata",
        })?;
        let mut tokens = line.tokens().skip(1);

        match line.keyword().as_str() {
            "end" => return Ok(record),
            "id" => {
                record.id = line.rest().parse().map_err(|_| AsfError::InvalidNumber {
                    line: line.number,
                    token: line.rest().to_string(),
                })?;
            }
            "name" => {
                let name = tokens
                    .next()
                    .ok_or_else(|| AsfError::syntax(line.number, "missing bone name"))?;
                record.name = Some(name.to_string());
            }
            "direction" => record.direction = parse_vec3(&mut tokens, line.number)?,
            "length" => record.length = parse_f32(line.rest(), line.number)?,
            "axis" => {
                record.axis = parse_vec3(&mut tokens, line.number)?;
                if let Some(order) = tokens.next() {
                    record.axis_order = order
                        .parse()
                        .map_err(|e: String| AsfError::syntax(line.number, e))?;
                }
            }
            "dof" => record.channels = parse_channels(line)?,
            "limits" => {
                record.limits = read_limits(lines, line, record.channels.len())?;
            }
            other => debug!("Ignoring bone field '{other}' on line {}", line.number),
        }
    }
}

/// Read one `(min max)` pair per channel, possibly spread over several lines
fn read_limits(lines: &mut Lines<'_>, first: Line<'_>, count: usize) -> Result<Vec<(f32, f32)>> {
    let mut values = Vec::with_capacity(count * 2);
    push_limit_values(first.rest(), first.number, &mut values)?;

    while values.len() < count * 2 {
        match lines.peek() {
            Some(line) if line.text.starts_with('(') => {
                lines.next_line();
                push_limit_values(line.text, line.number, &mut values)?;
            }
            Some(_) => break,
            None => {
                return Err(AsfError::UnexpectedEof {
                    section: "bonedata",
                });
            }
        }
    }

    if values.len() != count * 2 {
        return Err(AsfError::syntax(
            first.number,
            format!(
                "expected {count} limit pairs, found {} values",
                values.len()
            ),
        ));
    }

    Ok(values.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

fn push_limit_values(text: &str, line: usize, values: &mut Vec<f32>) -> Result<()> {
    for token in text
        .split(|c: char| c == '(' || c == ')' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        values.push(parse_f32(token, line)?);
    }
    Ok(())
}

fn read_hierarchy(lines: &mut Lines<'_>) -> Result<Vec<HierarchyRecord>> {
    let mut records = Vec::new();

    let Some(begin) = lines.next_in_section() else {
        return Ok(records);
    };
    if begin.keyword() != "begin" {
        return Err(AsfError::syntax(
            begin.number,
            format!("expected 'begin', found '{}'", begin.text),
        ));
    }

    loop {
        let line = lines.next_in_section().ok_or(AsfError::UnexpectedEof {
            section: "hierarchy",
        })?;
        if line.keyword() == "end" {
            return Ok(records);
        }

        let mut tokens = line.tokens();
        let parent = tokens.next().unwrap_or_default().to_string();
        records.push(HierarchyRecord {
            line: line.number,
            parent,
            children: tokens.map(str::to_string).collect(),
        });
    }
}

fn build_skeleton(raw: RawSkeleton, unit: AngleUnit) -> Result<Skeleton> {
    let mut root = raw.root;
    root.orientation = root.orientation.map(|a| unit.to_radians(a));

    let mut skeleton = Skeleton::new(raw.units, root);
    skeleton.name = raw.name;
    skeleton.version = raw.version;

    for record in raw.bones {
        skeleton.add_bone(bone_from_record(record, unit)?)?;
    }

    for entry in raw.hierarchy {
        let parent = if entry.parent.eq_ignore_ascii_case(ROOT_NAME) {
            None
        } else {
            Some(
                skeleton
                    .bone_id(&entry.parent)
                    .ok_or_else(|| AsfError::UnknownBone {
                        line: entry.line,
                        name: entry.parent.clone(),
                    })?,
            )
        };

        for child in &entry.children {
            let child_id = skeleton
                .bone_id(child)
                .ok_or_else(|| AsfError::UnknownBone {
                    line: entry.line,
                    name: child.clone(),
                })?;
            skeleton.attach(parent, child_id, entry.line)?;
        }
    }

    let detached = skeleton.detached();
    if !detached.is_empty() {
        warn!(
            "{} bone(s) are not reachable from the root hierarchy",
            detached.len()
        );
    }

    debug!(
        "Parsed skeleton '{}' with {} bones ({} root bones)",
        skeleton.name,
        skeleton.len(),
        skeleton.root_bones().len()
    );

    Ok(skeleton)
}

fn bone_from_record(record: BoneRecord, unit: AngleUnit) -> Result<Bone> {
    let name = record.name.ok_or(AsfError::MissingField {
        bone: record.id,
        field: "name",
    })?;

    if !record.limits.is_empty() && record.limits.len() != record.channels.len() {
        return Err(AsfError::syntax(
            record.line,
            format!(
                "bone '{name}' has {} limits for {} channels",
                record.limits.len(),
                record.channels.len()
            ),
        ));
    }

    let mut bounds = RotationBounds::new();
    bounds.set_dof(
        record.channels.contains(&DofChannel::Rx),
        record.channels.contains(&DofChannel::Ry),
        record.channels.contains(&DofChannel::Rz),
    );
    for (channel, (min, max)) in record.channels.iter().zip(&record.limits) {
        if let Some(axis) = channel.rotation_axis() {
            bounds.set_range(axis, unit.to_radians(*min), unit.to_radians(*max));
        }
    }

    Ok(Bone::new(
        record.id,
        name,
        record.length,
        record.direction,
        record.axis.map(|a| unit.to_radians(a)),
        record.axis_order,
        record.channels,
        bounds,
    ))
}
