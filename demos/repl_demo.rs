//! Demonstrates [`Repl`] wired to stdin with an [`EchoExecutor`], the way
//! the teacher's own `examples/repl_float.rs` wires `prebaked::read_and`
//! to a line-processing closure.

use pyrepl_engine::{Arena, EchoExecutor, Repl, ReplConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ReplConfig::default();
    let input_arena = Arena::new(config.input_arena_capacity);
    let history_arena = Arena::new(config.history_arena_capacity);

    let mut repl = Repl::new(std::io::stdin(), &input_arena, &history_arena, config, EchoExecutor);
    repl.run()?;
    Ok(())
}
