//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = mealwise_cli::run() {
        eprintln!("mealwise: {err}");
        std::process::exit(1);
    }
}
