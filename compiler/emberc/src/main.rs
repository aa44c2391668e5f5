//! Ember CLI
//!
//! Tokenize, parse and compile JavaScript through the Ember pipeline.

use emberc::commands::{build_files, lex_file, parse_build_args, parse_file, BuildArgs};

fn main() {
    emberc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "build" => {
            let parsed = parse_args_or_exit(&args[2..]);
            if parsed.files.is_empty() {
                eprintln!("Usage: emberc build <files..> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --module              Parse as an ES module");
                eprintln!("  --plugins <a,b>       Syntax plugins to enable (`*` for all)");
                eprintln!("  --transforms <list>   Transforms to run: name[:key=value]*, comma separated");
                eprintln!("  --out-dir <dir>       Write output files into <dir>");
                eprintln!("  --compact             Omit optional whitespace");
                std::process::exit(1);
            }
            if !build_files(&parsed) {
                std::process::exit(1);
            }
        }
        "parse" => {
            let parsed = parse_args_or_exit(&args[2..]);
            let [path] = parsed.files.as_slice() else {
                eprintln!("Usage: emberc parse <file> [--module] [--plugins a,b]");
                std::process::exit(1);
            };
            parse_file(path, &parsed);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: emberc lex <file>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("Ember {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_args_or_exit(args: &[String]) -> BuildArgs {
    match parse_build_args(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Ember JavaScript pipeline");
    println!();
    println!("Usage: emberc <command> [options]");
    println!();
    println!("Commands:");
    println!("  build <files..>      Compile files (see `emberc build` for options)");
    println!("  parse <file>         Parse and display a summary of the tree");
    println!("  lex <file>           Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=<filter>    Enable tracing output, e.g. RUST_LOG=ember_parse=debug");
    println!("  EMBER_LOG_TREE=1     Print tracing spans as a tree");
}
