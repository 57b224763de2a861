//! Command-line surface: a single positional source-string argument.
//!
//! Argument parsing beyond this one positional is explicitly out of scope;
//! `--version`/`--help` are provided by `clap` for free.

use clap::Parser;

/// Compiles a small C subset to x86-64 assembly.
#[derive(Parser, Debug)]
#[command(name = "subcc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles a small C subset to x86-64 assembly", long_about = None)]
pub struct Cli {
    /// The entire program, as a single source string.
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_source_positional() {
        let cli = Cli::parse_from(["subcc", "int main(){ return 0; }"]);
        assert_eq!(cli.source, "int main(){ return 0; }");
    }
}
