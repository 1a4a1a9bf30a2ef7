use anyhow::{Context, Result};

mod moves;
mod stacks;

pub use moves::{Move, MoveParseError};
pub use stacks::{CraneModel, MoveError, Stacks, StacksParseError};

/// Separates the stacks diagram from the move instructions. Blank lines are dropped.
pub fn split_input(
    input: impl IntoIterator<Item = impl Into<String>>,
) -> (Vec<String>, Vec<String>) {
    input
        .into_iter()
        .map(Into::<String>::into)
        .filter(|line: &String| !line.is_empty())
        .partition(|line| !line.contains("move"))
}

pub fn get_stacks_and_moves(
    input: impl IntoIterator<Item = impl Into<String>>,
) -> Result<(Stacks, Vec<Move>)> {
    let (diagram, instructions) = split_input(input);

    let stacks = Stacks::from_diagram(&diagram)?;

    let moves = instructions
        .iter()
        .map(|line| {
            line.parse::<Move>()
                .with_context(|| format!("Unable to parse move {line:?}"))
        })
        .collect::<Result<Vec<Move>>>()?;

    Ok((stacks, moves))
}

/// Runs every move with `crane` on freshly built stacks and reads off the top crates.
pub fn solve(
    input: impl IntoIterator<Item = impl Into<String>>,
    crane: CraneModel,
) -> Result<String> {
    let (mut stacks, moves) = get_stacks_and_moves(input)?;

    for (i, mv) in moves.iter().enumerate() {
        stacks
            .apply(mv, crane)
            .with_context(|| format!("Unable to apply move #{} {mv:?}", i + 1))?;
    }

    Ok(stacks.take_top_crates())
}

pub fn solve_part1(input: impl IntoIterator<Item = impl Into<String>>) -> Result<String> {
    solve(input, CraneModel::CrateMover9000)
}

pub fn solve_part2(input: impl IntoIterator<Item = impl Into<String>>) -> Result<String> {
    solve(input, CraneModel::CrateMover9001)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TEST_INPUT: &str = include_str!("../data/test_input");

    #[test]
    fn split_input_ok() {
        let (diagram, instructions) = split_input(TEST_INPUT.lines());

        assert_eq!(diagram.len(), 4);
        assert_eq!(diagram.last().map(String::as_str), Some(" 1   2   3 "));
        assert_eq!(instructions.len(), 4);
        assert!(instructions.iter().all(|l| l.starts_with("move")));
    }

    #[test]
    fn get_stacks_and_moves_ok() {
        let res = get_stacks_and_moves(TEST_INPUT.lines());
        assert!(res.is_ok());

        let (stacks, moves) = res.unwrap();
        assert_eq!(stacks.len(), 3);
        assert_eq!(stacks.get(2), Some(&['M', 'C', 'D'][..]));
        assert_eq!(
            moves.first(),
            Some(&Move {
                count: 1,
                from: 2,
                to: 1
            })
        );
    }

    #[test]
    fn solve_part1_ok() {
        let top = solve_part1(TEST_INPUT.lines());

        assert!(top.is_ok());

        assert_eq!(top.unwrap(), "CMZ".to_string());
    }

    #[test]
    fn solve_part2_ok() {
        let top = solve_part2(TEST_INPUT.lines());

        assert!(top.is_ok());

        assert_eq!(top.unwrap(), "MCD".to_string());
    }

    #[rstest]
    #[case(false, "CMZ")]
    #[case(true, "MCD")]
    fn solve_with_preserve_order_flag(#[case] preserve_order: bool, #[case] expected: &str) {
        let top = solve(TEST_INPUT.lines(), preserve_order.into());
        assert_eq!(top.unwrap(), expected);
    }

    #[test]
    fn solve_parts_do_not_share_stacks() {
        let lines = TEST_INPUT.lines().collect::<Vec<_>>();

        assert_eq!(solve_part1(lines.clone()).unwrap(), "CMZ");
        assert_eq!(solve_part2(lines.clone()).unwrap(), "MCD");
        assert_eq!(solve_part1(lines).unwrap(), "CMZ");
    }

    #[rstest]
    #[case(CraneModel::CrateMover9000)]
    #[case(CraneModel::CrateMover9001)]
    fn solve_huge_move_count_is_truncated(#[case] crane: CraneModel) {
        let input = format!("[A]    \n 1   2 \n\nmove {} from 1 to 2", usize::MAX);

        assert_eq!(solve(input.lines(), crane).unwrap(), "A");
    }

    #[rstest]
    #[case(CraneModel::CrateMover9000)]
    #[case(CraneModel::CrateMover9001)]
    fn solve_move_onto_same_stack_keeps_it(#[case] crane: CraneModel) {
        let input = "[A]    \n[B]    \n[C]    \n[D] [X]\n 1   2 \n\nmove 3 from 1 to 1";

        assert_eq!(solve(input.lines(), crane).unwrap(), "AX");
    }

    #[rstest]
    #[case("    [D]\n[N] [C]\n[Z] [M] [P]\n 1   2   3 \n\nmove 1 from 2 to 1")]
    #[case("[A]\n 1 \n\nmove 1 from 1 to 4")]
    #[case("[A]\n 1 \n\nmove 1 from 1")]
    #[case("[A]\n a \n\nmove 1 from 1 to 1")]
    #[case("")]
    fn solve_malformed_input(#[case] input: &str) {
        assert!(solve_part1(input.lines()).is_err());
        assert!(solve_part2(input.lines()).is_err());
    }
}
