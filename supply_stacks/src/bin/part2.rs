use anyhow::Result;
use supply_stacks::solve_part2;
use util::{init_tracing, read_input_lines};

const INPUT_PATH: &str = "input.txt";

fn main() -> Result<()> {
    init_tracing();

    let top = solve_part2(read_input_lines(INPUT_PATH)?)?;

    println!("{top}");

    Ok(())
}
