//! Formatting and argument parsing helpers

use glam::Vec3;

/// Format a vector with a fixed number of decimals
pub fn format_vec3(v: Vec3) -> String {
    // adding zero turns -0.0 into 0.0
    let v = v + Vec3::ZERO;
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

/// Format seconds as `1.234s`
pub fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.3}s")
}

/// Parse `x,y,z` for clap arguments
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let &[x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got '{s}'"));
    };
    let component = |c: &str| {
        c.parse::<f32>()
            .map_err(|_| format!("'{c}' is not a number"))
    };
    Ok(Vec3::new(component(x)?, component(y)?, component(z)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vec3() {
        assert_eq!(format_vec3(Vec3::new(1.0, -0.5, 0.0)), "(1.000, -0.500, 0.000)");
        assert_eq!(format_vec3(Vec3::new(-0.0, 0.0, -0.0)), "(0.000, 0.000, 0.000)");
        assert_eq!(format_seconds(0.5), "0.500s");
    }

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, 2.5,-3"), Ok(Vec3::new(1.0, 2.5, -3.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,two,3").is_err());
    }
}
