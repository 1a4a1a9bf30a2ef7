use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use anyhow::{Context, Result};
use miette::GraphicalReportHandler;
use nom::{
    character::complete::digit1,
    combinator::map_res,
    error::{FromExternalError, ParseError},
    IResult, Parser,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

pub type Span<'a> = LocatedSpan<&'a str>;

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input")]
struct BadInput<'a> {
    #[source_code]
    src: &'a str,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: String,
}

/// Renders a graphical report of `src` with `kind` attached at byte `offset`.
pub fn render_bad_input(src: &str, offset: usize, kind: impl Display) -> String {
    let err = BadInput {
        src,
        bad_bit: miette::SourceSpan::new(offset.into(), 0.into()),
        kind: kind.to_string(),
    };

    let mut s = String::new();
    match GraphicalReportHandler::new().render_report(&mut s, &err) {
        Ok(()) => s,
        Err(_) => format!("{err}: {} at offset {offset}", err.kind),
    }
}

/// Unsigned decimal number, converted with the target type's `FromStr`.
pub fn parse_number<'a, N, E>(i: Span<'a>) -> IResult<Span<'a>, N, E>
where
    N: FromStr,
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, N::Err>,
{
    map_res(digit1, |s: Span<'a>| s.fragment().parse::<N>())(i)
}

fn furthest_base<'a>(e: ErrorTree<Span<'a>>) -> Option<(Span<'a>, String)> {
    match e {
        GenericErrorTree::Base { location, kind } => Some((location, kind.to_string())),
        GenericErrorTree::Stack { base, .. } => furthest_base(*base),
        GenericErrorTree::Alt(siblings) => siblings
            .into_iter()
            .filter_map(furthest_base)
            .max_by_key(|(location, _)| location.location_offset()),
    }
}

/// Runs `parse_fun` over the whole of `l`. On failure the error is rendered
/// as a report pointing at the furthest position the parser reached.
pub fn parse_nice<'a, T, F>(l: &'a str, parse_fun: F) -> Result<T, String>
where
    F: Parser<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(l);
    let line: Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);

    line.map_err(|e| match furthest_base(e) {
        Some((location, kind)) => render_bad_input(l, location.location_offset(), kind),
        None => render_bad_input(l, 0, "unparseable input"),
    })
}

pub fn read_input_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open input file {}", path.display()))?;

    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read input file {}", path.display()))
}

/// Logs go to stderr; the filter comes from `RUST_LOG` and defaults to `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7", 7, "")]
    #[case("123 from", 123, " from")]
    #[case("0042x", 42, "x")]
    fn parse_number_ok(#[case] input: &str, #[case] expected: u32, #[case] remaining: &str) {
        let res = parse_number::<u32, ErrorTree<Span>>(Span::new(input));
        assert!(res.is_ok());

        let (rest, n) = res.unwrap();
        assert_eq!(n, expected);
        assert_eq!(*rest.fragment(), remaining);
    }

    #[rstest]
    #[case("")]
    #[case("move")]
    #[case("99999999999")]
    fn parse_number_err(#[case] input: &str) {
        assert!(parse_number::<u32, ErrorTree<Span>>(Span::new(input)).is_err());
    }

    #[test]
    fn parse_nice_ok() {
        let res = parse_nice("31", parse_number::<u8, _>);
        assert_eq!(res, Ok(31));
    }

    #[test]
    fn parse_nice_reports_bad_input() {
        let res = parse_nice("300", parse_number::<u8, _>);
        assert!(res.is_err());
        assert!(res.unwrap_err().contains("bad input"));
    }

    #[test]
    fn parse_nice_rejects_trailing_input() {
        assert!(parse_nice("12 crates", parse_number::<u8, _>).is_err());
    }

    #[test]
    fn read_input_lines_missing_file() {
        let res = read_input_lines("this/file/does/not/exist.txt");
        assert!(res.is_err());
        assert!(format!("{:#}", res.unwrap_err()).contains("Failed to open input file"));
    }
}
