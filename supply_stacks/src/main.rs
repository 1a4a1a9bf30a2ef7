use anyhow::Result;
use supply_stacks::{solve_part1, solve_part2};
use util::{init_tracing, read_input_lines};

const INPUT_PATH: &str = "input.txt";

fn main() -> Result<()> {
    init_tracing();

    let lines = read_input_lines(INPUT_PATH)?;

    // Each part rebuilds its own stacks; reading the tops empties them.
    let part1 = solve_part1(lines.iter().map(String::as_str))?;
    println!("Solution for part 1 is {part1}");

    let part2 = solve_part2(lines)?;
    println!("Solution for part 2 is {part2}");

    Ok(())
}
