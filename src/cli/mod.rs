use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mipsgen")]
#[command(about = "Generates pseudo-random MIPS test programs for simulator and assembler testing")]
pub struct Cli {
    /// Upper bound on budget-counted instructions
    #[clap(short, long, default_value_t = 400)]
    pub max_instr: usize,

    /// Seed for reproducible output; omit for a fresh program each run
    #[clap(short, long)]
    pub seed: Option<u64>,

    /// Complexity level (1-3), drives the number of generated loops
    #[clap(short, long, default_value_t = 2)]
    pub level: u32,

    /// Write the program to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn parse() -> Self {
        Parser::parse()
    }
}
