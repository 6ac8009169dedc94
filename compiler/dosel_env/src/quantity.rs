use std::fmt;
use std::str::FromStr;

use dosel_type::ExecutionError;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map_res, opt, recognize};
use nom::sequence::{pair, tuple};
use nom::IResult;

/// A number with an optional unit suffix, as written in a parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    /// The suffix exactly as written (`kg`, `MG`, `mg/kg/day`, ...)
    pub unit: Option<String>,
}

fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        f64::from_str,
    )(input)
}

fn unit_suffix(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic() || c == '/')(input)
}

impl Quantity {
    /// Parses `digits(.digits)?` followed by an optional run of letters and
    /// slashes. Anything else, including a sign or embedded spaces, is an
    /// [`ExecutionError::InvalidNumber`].
    pub fn parse(text: &str) -> Result<Self, ExecutionError> {
        let parsed: IResult<&str, (f64, Option<&str>)> =
            all_consuming(tuple((number, opt(unit_suffix))))(text);
        match parsed {
            Ok((_, (value, unit))) => Ok(Quantity {
                value,
                unit: unit.map(str::to_string),
            }),
            Err(_) => Err(ExecutionError::InvalidNumber {
                value: text.to_string(),
            }),
        }
    }

    /// True when the unit is absent or equals `expected`, ignoring case
    pub fn unit_is(&self, expected: &str) -> bool {
        self.unit
            .as_deref()
            .map_or(true, |u| u.eq_ignore_ascii_case(expected))
    }
}

impl FromStr for Quantity {
    type Err = ExecutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::parse(s)
    }
}

/// Units a prescribed dose may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoseUnit {
    Mg,
    Mcg,
    G,
}

impl DoseUnit {
    /// Case-insensitive lookup
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "mg" => Some(DoseUnit::Mg),
            "mcg" => Some(DoseUnit::Mcg),
            "g" => Some(DoseUnit::G),
            _ => None,
        }
    }

    /// Multiplier that converts this unit to milligrams
    pub fn mg_factor(&self) -> f64 {
        match self {
            DoseUnit::Mg => 1.0,
            DoseUnit::Mcg => 0.001,
            DoseUnit::G => 1000.0,
        }
    }

    pub fn to_mg(&self, value: f64) -> f64 {
        value * self.mg_factor()
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DoseUnit::Mg => "mg",
            DoseUnit::Mcg => "mcg",
            DoseUnit::G => "g",
        })
    }
}
