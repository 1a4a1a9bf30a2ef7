use std::str::FromStr;

use itertools::Itertools;
use nom::{
    bytes::complete::take_till,
    character::complete::digit1,
    combinator::{cut, peek, rest},
    multi::many_m_n,
    sequence::{preceded, terminated},
    IResult,
};
use nom_supreme::error::ErrorTree;
use thiserror::Error;
use util::{parse_nice, parse_number, Span};

/// `move <count> from <from> to <to>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub count: usize,
    pub from: u32,
    pub to: u32,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Invalid number when parsing into Move:\n{0}")]
    InvalidNumber(String),

    #[error("Stack label out of range when parsing into Move")]
    CastToU32Error(#[from] std::num::TryFromIntError),

    #[error("Wrong number of numbers when parsing into Move: found {0}, expected 3")]
    WrongNumberCount(usize),
}

/// Skips to the next run of digits and parses it. Once a run is found a bad
/// number is a hard failure rather than the end of the list.
fn next_number(i: Span) -> IResult<Span, usize, ErrorTree<Span>> {
    preceded(
        take_till(|c: char| c.is_ascii_digit()),
        preceded(peek(digit1), cut(parse_number)),
    )(i)
}

/// The first three digit runs of a line, anything around them ignored.
fn move_numbers(i: Span) -> IResult<Span, Vec<usize>, ErrorTree<Span>> {
    terminated(many_m_n(0, 3, next_number), rest)(i)
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbers = parse_nice(s, move_numbers).map_err(MoveParseError::InvalidNumber)?;
        let found = numbers.len();

        let (count, from, to) = numbers
            .into_iter()
            .collect_tuple()
            .ok_or(MoveParseError::WrongNumberCount(found))?;

        Ok(Self {
            count,
            from: u32::try_from(from)?,
            to: u32::try_from(to)?,
        })
    }
}
