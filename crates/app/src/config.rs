//! Configuration for the grin command-line tool.
//!
//! Parses `grin <encode|decode> <infile> <outfile> [OPTIONS]`. Parsing never
//! touches the file system, so a malformed invocation leaves both files
//! alone.

use std::path::PathBuf;

use tracing::Level;

/// Which direction to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Encode,
    Decode,
}

/// How much diagnostic output goes to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Encode or decode
    pub command: Command,

    /// File to read
    pub input_file: PathBuf,

    /// File to write (only created once the transform succeeded)
    pub output_file: PathBuf,

    /// Read/write a bare archive without the magic-number header
    pub raw: bool,

    /// Whether to print the metrics summary
    pub print_stats: bool,

    /// Log level selection
    pub verbosity: Verbosity,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn from_args(args: &[String]) -> Result<Option<Self>, String> {
        let mut positional: Vec<&str> = Vec::new();
        let mut raw = false;
        let mut print_stats = false;
        let mut verbosity = Verbosity::Normal;

        for arg in args {
            match arg.as_str() {
                "--raw" => raw = true,
                "--stats" => print_stats = true,
                "--verbose" | "-v" => verbosity = Verbosity::Verbose,
                "--quiet" | "-q" => verbosity = Verbosity::Quiet,
                "--help" | "-h" => return Ok(None),
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(format!("unknown argument: {}", flag));
                }
                value => positional.push(value),
            }
        }

        let (command, input, output) = match positional.as_slice() {
            [command, input, output] => (*command, *input, *output),
            _ => {
                return Err(format!(
                    "expected 3 arguments (command, input, output), got {}",
                    positional.len()
                ))
            }
        };

        let command = match command {
            "encode" => Command::Encode,
            "decode" => Command::Decode,
            other => return Err(format!("unknown command: {}", other)),
        };

        Ok(Some(Config {
            command,
            input_file: PathBuf::from(input),
            output_file: PathBuf::from(output),
            raw,
            print_stats,
            verbosity,
        }))
    }

    /// Level forced by `-q`/`-v`, overriding any global `RUST_LOG` level.
    ///
    /// `None` leaves filtering to `RUST_LOG`, or [`DEFAULT_LOG_FILTER`].
    pub fn log_level(&self) -> Option<Level> {
        match self.verbosity {
            Verbosity::Quiet => Some(Level::ERROR),
            Verbosity::Normal => None,
            Verbosity::Verbose => Some(Level::DEBUG),
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Command:     {:?}", self.command);
        println!("Input file:  {}", self.input_file.display());
        println!("Output file: {}", self.output_file.display());
        println!("Format:      {}", if self.raw { "bare archive" } else { "grin container" });
        println!();
    }
}

/// Log filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Usage text, printed on malformed invocations and with `--help`.
pub const USAGE: &str = "\
USAGE:
    grin <encode|decode> <infile> <outfile> [OPTIONS]

OPTIONS:
    --raw             Read/write a bare archive (no magic-number header)
    --stats           Print compression statistics
    --verbose, -v     Debug logging on stderr
    --quiet, -q       Only log errors
    --help, -h        Print this help

Set RUST_LOG for finer-grained log filtering.
";

pub fn print_help() {
    println!("grin: Huffman file compressor");
    println!();
    print!("{}", USAGE);
    println!();
    println!("EXAMPLES:");
    println!("    grin encode notes.txt notes.grin");
    println!("    grin decode notes.grin notes.txt --stats");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode() {
        let config = Config::from_args(&args(&["encode", "in.txt", "out.grin"]))
            .unwrap()
            .unwrap();
        assert_eq!(config.command, Command::Encode);
        assert_eq!(config.input_file, PathBuf::from("in.txt"));
        assert_eq!(config.output_file, PathBuf::from("out.grin"));
        assert!(!config.raw);
        assert!(!config.print_stats);
        assert_eq!(config.log_level(), None);
    }

    #[test]
    fn test_decode_with_flags_anywhere() {
        let config = Config::from_args(&args(&["--raw", "decode", "a", "-v", "b", "--stats"]))
            .unwrap()
            .unwrap();
        assert_eq!(config.command, Command::Decode);
        assert!(config.raw);
        assert!(config.print_stats);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.log_level(), Some(Level::DEBUG));
    }

    #[test]
    fn test_quiet_forces_error_level() {
        let config = Config::from_args(&args(&["encode", "a", "b", "-q"])).unwrap().unwrap();
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(config.log_level(), Some(Level::ERROR));
    }

    #[test]
    fn test_help() {
        assert!(Config::from_args(&args(&["-h"])).unwrap().is_none());
        assert!(Config::from_args(&args(&["encode", "--help"])).unwrap().is_none());
    }

    #[test]
    fn test_wrong_arity() {
        assert!(Config::from_args(&args(&[])).is_err());
        assert!(Config::from_args(&args(&["encode", "in"])).is_err());
        assert!(Config::from_args(&args(&["encode", "in", "out", "extra"])).is_err());
    }

    #[test]
    fn test_unknown_command_and_flag() {
        let err = Config::from_args(&args(&["squash", "in", "out"])).unwrap_err();
        assert_eq!(err, "unknown command: squash");

        let err = Config::from_args(&args(&["encode", "in", "out", "--fast"])).unwrap_err();
        assert_eq!(err, "unknown argument: --fast");
    }

    #[test]
    fn test_dash_is_a_path() {
        let config = Config::from_args(&args(&["encode", "-", "out"])).unwrap().unwrap();
        assert_eq!(config.input_file, PathBuf::from("-"));
    }
}
