use std::fmt;

use clap::Args;
use log::LevelFilter;

/// The verbosity flags, flatten into the command line arguments of a tool.
#[derive(Args, Debug)]
pub struct VerbosityFlag {
    #[arg(short, long, global = true, default_value_t = false, help = "Only print errors and results")]
    quiet: bool,

    #[arg(
        short,
        long,
        global = true,
        default_value_t = false,
        help = "Print progress information (default)"
    )]
    verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        default_value_t = false,
        help = "Also print the steps of the algorithms"
    )]
    debug: bool,

    #[arg(long, global = true, default_value_t = false, help = "Also print per state information")]
    trace: bool,
}

impl VerbosityFlag {
    /// Returns the verbosity selected by the flags, where the quietest flag wins.
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.trace {
            Verbosity::Trace
        } else if self.debug {
            Verbosity::Debug
        } else {
            Verbosity::Verbose
        }
    }

    /// Initialises the global logger for the selected verbosity. The
    /// `RUST_LOG` environment variable overrides the flags.
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbosity().log_level_filter())
            .format_timestamp(None)
            .parse_default_env()
            .init();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Verbose,
    Debug,
    Trace,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Quiet => write!(f, "quiet"),
            Verbosity::Verbose => write!(f, "verbose"),
            Verbosity::Debug => write!(f, "debug"),
            Verbosity::Trace => write!(f, "trace"),
        }
    }
}

impl Verbosity {
    /// Returns the log filter level corresponding to this verbosity.
    pub fn log_level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}
