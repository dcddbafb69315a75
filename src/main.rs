//! Style Object Compiler Binary

use stylec::EnhancedCli;
use std::process;

fn main() {
    let mut cli = EnhancedCli::new();

    if let Err(e) = cli.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
