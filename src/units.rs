use nom::character::complete::{alpha0, space0};
use nom::combinator::all_consuming;
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;
use phf::phf_map;

use crate::error::*;

/// User units per inch, following CSS.
pub const USER_UNITS_PER_INCH: f64 = 96.0;

static UNITS: phf::Map<&'static str, f64> = phf_map! {
    "uu" => 1.0,
    "px" => 1.0,
    "pt" => USER_UNITS_PER_INCH / 72.0,
    "pc" => USER_UNITS_PER_INCH / 6.0,
    "mm" => USER_UNITS_PER_INCH / 25.4,
    "cm" => USER_UNITS_PER_INCH / 2.54,
    "m" => USER_UNITS_PER_INCH / 0.0254,
    "in" => USER_UNITS_PER_INCH,
    "ft" => USER_UNITS_PER_INCH * 12.0,
    "yd" => USER_UNITS_PER_INCH * 36.0,
};

fn length(input: &str) -> IResult<&str, (f64, &str)> {
    all_consuming(delimited(
        space0,
        pair(double, preceded(space0, alpha0)),
        space0,
    ))(input)
}

/// Converts a length such as `6cm` or `12.5` into user units.
pub fn to_user_units(value: &str) -> Result<f64> {
    let (_, (number, unit)) = length(value)
        .map_err(|_| Error::new(ErrorKind::LengthParse, &format!("'{}'", value)))?;

    if !number.is_finite() {
        return Err(Error::new(
            ErrorKind::LengthParse,
            &format!("'{}' is not a finite number", value),
        ));
    }

    let factor = if unit.is_empty() {
        1.0
    } else {
        *UNITS.get(unit.to_ascii_lowercase().as_str()).ok_or_else(|| {
            Error::new(
                ErrorKind::LengthParse,
                &format!("unknown unit '{}' in '{}'", unit, value),
            )
        })?
    };

    Ok(number * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plain_numbers_are_user_units() {
        assert_relative_eq!(to_user_units("12").unwrap(), 12.0);
        assert_relative_eq!(to_user_units(" 7.5 ").unwrap(), 7.5);
    }

    #[test]
    fn metric_and_imperial_lengths() {
        assert_relative_eq!(to_user_units("1in").unwrap(), 96.0);
        assert_relative_eq!(to_user_units("2.54cm").unwrap(), 96.0, epsilon = 1e-9);
        assert_relative_eq!(to_user_units("25.4 mm").unwrap(), 96.0, epsilon = 1e-9);
        assert_relative_eq!(to_user_units("72pt").unwrap(), 96.0, epsilon = 1e-9);
        assert_relative_eq!(to_user_units("6pc").unwrap(), 96.0, epsilon = 1e-9);
        assert_relative_eq!(to_user_units("10px").unwrap(), 10.0);
        assert_relative_eq!(to_user_units("1CM").unwrap(), 96.0 / 2.54, epsilon = 1e-9);
    }

    #[test]
    fn rejects_unknown_units_and_garbage() {
        assert!(matches!(
            to_user_units("10furlong").unwrap_err().kind,
            ErrorKind::LengthParse
        ));
        assert!(to_user_units("100%").is_err());
        assert!(to_user_units("cm").is_err());
        assert!(to_user_units("").is_err());
    }
}
