//! Global units declared by the `:units` section

use std::fmt;
use std::str::FromStr;

/// Unit used for every angle stored in an ASF or AMC file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum AngleUnit {
    /// Angles are in degrees (the Acclaim default)
    #[default]
    Degrees,
    /// Angles are already in radians
    Radians,
}

impl AngleUnit {
    /// Convert a value expressed in this unit to radians
    pub fn to_radians(self, value: f32) -> f32 {
        match self {
            Self::Degrees => value.to_radians(),
            Self::Radians => value,
        }
    }
}

impl FromStr for AngleUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            other => Err(format!("unknown angle unit '{other}'")),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees => write!(f, "deg"),
            Self::Radians => write!(f, "rad"),
        }
    }
}

/// Contents of the `:units` section
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Units {
    pub mass: f32,
    /// Length multiplier applied by the capture software
    pub length: f32,
    pub angle: AngleUnit,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            mass: 1.0,
            length: 1.0,
            angle: AngleUnit::Degrees,
        }
    }
}

impl Units {
    /// Meters per file length unit, following the CMU database convention
    /// (lengths are inches divided by the `length` multiplier).
    pub fn meters_per_unit(&self) -> f32 {
        if self.length == 0.0 {
            return 0.0254;
        }
        (1.0 / self.length) * 0.0254
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_unit_parse() {
        assert_eq!("deg".parse::<AngleUnit>(), Ok(AngleUnit::Degrees));
        assert_eq!("RAD".parse::<AngleUnit>(), Ok(AngleUnit::Radians));
        assert!("grad".parse::<AngleUnit>().is_err());
    }

    #[test]
    fn test_to_radians() {
        let r = AngleUnit::Degrees.to_radians(180.0);
        assert!((r - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(AngleUnit::Radians.to_radians(1.5), 1.5);
    }

    #[test]
    fn test_meters_per_unit() {
        let units = Units {
            length: 0.45,
            ..Default::default()
        };
        assert!((units.meters_per_unit() - 0.056_444).abs() < 1e-5);
    }
}
