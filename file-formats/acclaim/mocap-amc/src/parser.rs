//! AMC motion parser
//!
//! Values are collected as written, then the rotation channels are converted
//! to radians once the whole header is known.

use log::{debug, warn};
use mocap_asf::AngleUnit;
use std::fs;
use std::path::Path;

use crate::error::{AmcError, Result};
use crate::layout::{ChannelLayout, ROOT_SEGMENT};
use crate::motion::{BoneSample, Motion, MotionFrame};

/// Parser configuration
#[derive(Debug, Clone, Default)]
pub struct AmcOptions {
    /// Unit assumed when the file has neither `:DEGREES` nor `:RADIANS`
    pub default_angle_unit: AngleUnit,
    /// Channel kinds used to decide which values are angles
    pub layout: ChannelLayout,
}

impl AmcOptions {
    /// Options matching a parsed skeleton's channels and declared unit
    pub fn for_skeleton(skeleton: &mocap_asf::Skeleton) -> Self {
        Self {
            default_angle_unit: skeleton.units.angle,
            layout: ChannelLayout::from_skeleton(skeleton),
        }
    }
}

pub fn parse_amc(content: &str, options: &AmcOptions) -> Result<Motion> {
    MotionParser::new(options).parse(content)
}

pub fn parse_amc_file<P: AsRef<Path>>(path: P, options: &AmcOptions) -> Result<Motion> {
    MotionParser::new(options).parse_file(path)
}

/// AMC motion parser
#[derive(Debug, Clone, Copy)]
pub struct MotionParser<'a> {
    options: &'a AmcOptions,
}

impl<'a> MotionParser<'a> {
    pub fn new(options: &'a AmcOptions) -> Self {
        Self { options }
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Motion> {
        let path = path.as_ref();
        debug!("Reading motion {}", path.display());
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<Motion> {
        let mut declared_unit = None;
        let mut fully_specified = false;
        let mut frames: Vec<MotionFrame> = Vec::new();

        for (i, raw) in content.lines().enumerate() {
            let number = i + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            if text.starts_with(':') {
                match text.to_ascii_uppercase().as_str() {
                    ":FULLY-SPECIFIED" => fully_specified = true,
                    ":DEGREES" => declared_unit = Some(AngleUnit::Degrees),
                    ":RADIANS" => declared_unit = Some(AngleUnit::Radians),
                    other => debug!("Ignoring header keyword {other}"),
                }
                continue;
            }

            if text.bytes().all(|b| b.is_ascii_digit()) {
                let index = text.parse().map_err(|_| AmcError::InvalidNumber {
                    line: number,
                    token: text.to_string(),
                })?;
                frames.push(MotionFrame::new(index));
                continue;
            }

            let frame = frames
                .last_mut()
                .ok_or(AmcError::SampleBeforeFrame { line: number })?;
            let mut tokens = text.split_whitespace();
            let name = tokens.next().unwrap_or_default();
            let values = tokens
                .map(|token| {
                    token.parse::<f32>().map_err(|_| AmcError::InvalidNumber {
                        line: number,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            if name.eq_ignore_ascii_case(ROOT_SEGMENT) {
                if !frame.root.is_empty() {
                    warn!("frame {}: second root line, keeping the last", frame.index);
                }
                frame.root = values;
            } else {
                frame.bones.push(BoneSample {
                    name: name.to_string(),
                    values,
                });
            }
        }

        if frames.is_empty() {
            return Err(AmcError::Empty);
        }

        let angle_unit = declared_unit.unwrap_or(self.options.default_angle_unit);
        let layout = &self.options.layout;
        for frame in &mut frames {
            layout.convert(ROOT_SEGMENT, &mut frame.root, angle_unit);
            for sample in &mut frame.bones {
                layout.convert(&sample.name, &mut sample.values, angle_unit);
            }
        }

        debug!(
            "Parsed {} frames ({angle_unit}, fully specified: {fully_specified})",
            frames.len()
        );

        Ok(Motion {
            frames,
            angle_unit,
            fully_specified,
        })
    }
}
