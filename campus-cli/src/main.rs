//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = campus_cli::run() {
        eprintln!("campus: {err}");
        std::process::exit(1);
    }
}
