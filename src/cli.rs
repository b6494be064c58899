use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub file: PathBuf,

    /// Sentence to recognise (repeatable)
    #[arg(short, long = "input", value_name = "SENTENCE")]
    pub inputs: Vec<String>,

    /// Print the CYK table of every sentence
    #[arg(short, long)]
    pub table: bool,

    /// Print the grammar as loaded
    #[arg(long)]
    pub show_original: bool,

    /// Print the grammar after conversion to CNF
    #[arg(long)]
    pub show_cnf: bool,

    /// Amount of random sentences to generate and recognise
    #[arg(short = 'n', long, value_name = "AMOUNT")]
    pub sample: Option<u32>,

    /// Seed for the sentence generator (default: random)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
