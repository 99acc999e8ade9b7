use std::fs::File;
use std::io::Write;
use std::io::stdout;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use log::info;

use automin_automaton::Automaton;
use automin_automaton::Layout;
use automin_automaton::read_fa;
use automin_automaton::write_fa;
use automin_tools::VerbosityFlag;
use automin_tools::Version;
use automin_tools::VersionFlag;
use automin_utilities::AutominError;
use automin_utilities::Timing;

#[derive(clap::Parser, Debug)]
#[command(
    about = "A command line tool for minimising finite automata",
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    version: VersionFlag,

    #[command(flatten)]
    verbosity: VerbosityFlag,

    #[command(subcommand)]
    commands: Option<Commands>,

    #[arg(long, global = true)]
    timings: bool,
}

/// Defines the subcommands for this tool.
#[derive(Debug, Subcommand)]
enum Commands {
    Minimize(MinimizeArgs),
    Check(CheckArgs),
    Compare(CompareArgs),
    Info(InfoArgs),
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints every step of the minimisation and saves the normalized automaton")]
struct MinimizeArgs {
    /// Specify the input automaton.
    filename: PathBuf,

    /// Specify the file to which the normalized automaton is written.
    #[arg(default_value = "output.txt")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = Layout::Aligned, help = "The layout of the printed steps")]
    layout: Layout,
}

#[derive(clap::Args, Debug)]
#[command(about = "Checks whether the words are accepted, every character is a symbol")]
struct CheckArgs {
    /// Specify the input automaton.
    filename: PathBuf,

    #[arg(required = true)]
    words: Vec<String>,
}

#[derive(clap::Args, Debug)]
#[command(about = "Checks whether two automata accept the same language")]
struct CompareArgs {
    /// Specify the first automaton.
    left_filename: PathBuf,

    /// Specify the second automaton.
    right_filename: PathBuf,
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints information related to the given automaton")]
struct InfoArgs {
    filename: PathBuf,
}

fn main() -> Result<ExitCode, AutominError> {
    let cli = Cli::parse();

    cli.verbosity.init_logger();

    if cli.version.into() {
        eprintln!("{}", Version);
        return Ok(ExitCode::SUCCESS);
    }

    let mut timing = Timing::new();

    if let Some(command) = &cli.commands {
        match command {
            Commands::Minimize(args) => {
                handle_minimize(args, &mut timing)?;
            }
            Commands::Check(args) => {
                handle_check(args, &mut timing)?;
            }
            Commands::Compare(args) => {
                handle_compare(args, &mut timing)?;
            }
            Commands::Info(args) => {
                handle_info(args, &mut timing)?;
            }
        }
    }

    if cli.timings {
        timing.print();
    }

    Ok(ExitCode::SUCCESS)
}

/// Reads the automaton from the given file.
fn read_automaton(path: &Path, timing: &mut Timing) -> Result<Automaton, AutominError> {
    let file = File::open(path).map_err(|error| format!("Cannot open {}: {error}", path.display()))?;

    let mut time = timing.start("read");
    let automaton = read_fa(file)?;
    time.finish();

    Ok(automaton)
}

/// Prints the automaton under the given title.
fn print_step(writer: &mut impl Write, title: &str, automaton: &Automaton, layout: Layout) -> Result<(), AutominError> {
    writeln!(writer, "{title}:")?;
    write!(writer, "{}", automaton.display(layout))?;
    writeln!(writer)?;
    Ok(())
}

/// Runs the transformations one by one, printing the automaton after each of them.
fn handle_minimize(args: &MinimizeArgs, timing: &mut Timing) -> Result<(), AutominError> {
    let mut writer = stdout().lock();

    let automaton = read_automaton(&args.filename, timing)?;
    print_step(&mut writer, "Source", &automaton, args.layout)?;

    let mut time = timing.start("remove epsilon");
    let automaton = automaton.remove_epsilon()?;
    time.finish();
    print_step(&mut writer, "Epsilon removed", &automaton, args.layout)?;

    let mut time = timing.start("determinize");
    let automaton = automaton.determinize()?;
    time.finish();
    print_step(&mut writer, "Determinized", &automaton, args.layout)?;

    let mut time = timing.start("minimize");
    let automaton = automaton.minimize()?;
    time.finish();
    print_step(&mut writer, "Minimized", &automaton, args.layout)?;

    let mut time = timing.start("normalize");
    let automaton = automaton.normalize()?;
    time.finish();
    print_step(&mut writer, "Normalized", &automaton, args.layout)?;

    let mut file = File::create(&args.output)?;
    write_fa(&mut file, &automaton, Layout::Compact)?;
    info!("Saved the normalized automaton to {}", args.output.display());

    Ok(())
}

/// Prints for every word whether it is accepted.
fn handle_check(args: &CheckArgs, timing: &mut Timing) -> Result<(), AutominError> {
    let automaton = read_automaton(&args.filename, timing)?;

    let mut time = timing.start("normalize");
    let automaton = automaton.normalize()?;
    time.finish();

    let mut writer = stdout().lock();
    for word in &args.words {
        writeln!(writer, "{word}: {}", automaton.accepts(word)?)?;
    }

    Ok(())
}

/// Prints whether the normalized automata are equal.
fn handle_compare(args: &CompareArgs, timing: &mut Timing) -> Result<(), AutominError> {
    let left = read_automaton(&args.left_filename, timing)?;
    let right = read_automaton(&args.right_filename, timing)?;

    let mut time = timing.start("normalize");
    let left = left.normalize()?;
    let right = right.normalize()?;
    time.finish();

    println!("{}", left.to_string() == right.to_string());
    Ok(())
}

/// Display information about the given automaton.
fn handle_info(args: &InfoArgs, timing: &mut Timing) -> Result<(), AutominError> {
    let automaton = read_automaton(&args.filename, timing)?;

    println!("Kind: {}", automaton.kind());
    println!("Alphabet: {}", automaton.alphabet().join(" "));
    println!("Number of states: {}", automaton.num_of_states());
    println!("Number of transitions: {}", automaton.num_of_transitions());
    println!("Initial states: {}", automaton.initials().len());
    println!("Final states: {}", automaton.finals().len());

    Ok(())
}
