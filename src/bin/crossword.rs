//! Fill a crossword structure with words from a word list.
//!
//! Usage:
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- tests/data/structure0.txt tests/data/words0.txt [output.txt]
//! ```

use crossword_csp::{Crossword, Dictionary, Puzzle};
use std::{fs, process};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!("Usage: crossword structure words [output]");
        process::exit(1);
    }

    let crossword = Crossword::load(&args[1]).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1);
    });
    let dictionary = Dictionary::load(&args[2]).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1);
    });

    let mut solver = crossword.solver(&dictionary);
    let Some(solution) = solver.solve() else {
        println!("No solution.");
        return;
    };
    log::info!("Filled grid with [{:?}].", solver.statistics());

    let rendered = crossword.render(&solution).to_string();
    print!("{}", rendered);

    if let Some(output) = args.get(3) {
        if let Err(err) = fs::write(output, &rendered) {
            eprintln!("unable to write [{}]: {}", output, err);
            process::exit(1);
        }
    }
}
