mod cli;

use std::process::ExitCode;

use clap::Parser;
use rand::prelude::*;
use tracing::{info, Level};

use chomsky::cnf::convert_to_cnf;
use chomsky::cyk::{Cyk, ParseResult};
use chomsky::error_handling::ToolError;
use chomsky::generator::Sampler;
use chomsky::grammar::Grammar;
use chomsky::parser::{self, input::tokenize};
use cli::Cli;

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn print_grammar(title: &str, grammar: &Grammar) {
    println!("== {} (start: {}) ==", title, grammar.start());
    print!("{}", grammar);
    println!();
}

fn print_result(sentence: &str, tokens: &[String], result: &ParseResult, show_table: bool) {
    let verdict = if result.accepted { "accepted" } else { "rejected" };
    println!("{:?}: {} in {:?}", sentence, verdict, result.elapsed);

    if let Some(tree) = result.derivation() {
        println!("{}", tree.bracketed());
        print!("{}", tree);
    }
    if show_table {
        println!("tokens: {}", tokens.join(" "));
        print!("{}", result.table);
    }
    println!();
}

fn run(cli: &Cli) -> Result<(), ToolError> {
    info!("reading grammar from {}", cli.file.display());
    let original = parser::parse_file(&cli.file)?;
    if cli.show_original {
        print_grammar("Original grammar", &original);
    }

    let cnf = convert_to_cnf(&original);
    if cli.show_cnf {
        print_grammar("Chomsky Normal Form", &cnf);
    }
    info!(
        "{} -> {} productions, {} -> {} nonterminals",
        original.production_count(),
        cnf.production_count(),
        original.nonterminal_count(),
        cnf.nonterminal_count()
    );

    let cyk = Cyk::new(&cnf)?;
    for sentence in &cli.inputs {
        let tokens = tokenize(sentence);
        info!("tokens: {:?}", tokens);
        let result = cyk.parse(&tokens)?;
        print_result(sentence, &tokens, &result, cli.table);
    }

    if let Some(amount) = cli.sample {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sampler = Sampler::new(&original);
        for _ in 0..amount {
            let tokens = sampler.sample(&mut rng)?;
            let sentence = tokens.join(" ");
            if tokens.is_empty() {
                let verdict = if cnf.has_start_epsilon() { "accepted" } else { "rejected" };
                println!("\"\": {} (the empty sentence)", verdict);
                continue;
            }
            let result = cyk.parse(&tokens)?;
            print_result(&sentence, &tokens, &result, cli.table);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .try_init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
