use clap::Parser;

use jsondb_cli::{Args, Config};

fn main() {
    let args = Args::parse();

    let config = match Config::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    match jsondb_cli::run(&config, &args.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
