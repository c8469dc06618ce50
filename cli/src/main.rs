use std::io::Write;

use anyhow::Error;

use clap::{ArgAction, Parser, Subcommand};

mod check;
use check::Check;

mod diag;
use diag::Diag;

mod relayout;
use relayout::Relayout;

const NAME: &str = env!("CARGO_BIN_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validate HDF5 dataset creation options and rework arrays stored as NPY files.
///
/// Dataset options are checked without touching any file: 'check' reports every missing field
/// and every conflict between dimensions, chunking, layout and compression in one go. Arrays are
/// read from and written to NPY files holding 64-bit floats.
#[derive(Debug, Parser)]
#[clap(name = NAME, version = VERSION)]
#[clap(subcommand_required = true)]
#[command(about, long_about)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Turn off all log messages, warnings included.
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log more details to stderr.
    ///
    /// Warnings are always logged unless '--quiet' is set. Repeat the flag to log progressively
    /// more: '-v' for info, '-vv' for debug and '-vvv' for trace messages.
    #[clap(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Dump the parsed arguments to stderr before running.
    #[clap(long, hide = true, global = true)]
    debug: bool,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => log::LevelFilter::Off,
            (false, 0) => log::LevelFilter::Warn,
            (false, 1) => log::LevelFilter::Info,
            (false, 2) => log::LevelFilter::Debug,
            (false, _) => log::LevelFilter::Trace,
        }
    }

    pub fn run(self) -> Result<(), Error> {
        if self.debug {
            eprintln!("{self:#?}");
        }

        init_logger(self.log_level());

        self.command.run()
    }
}

/// Installs a stderr logger tagging each message with the tool name and level.
fn init_logger(level: log::LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let level = record.level().as_str().to_lowercase();
            writeln!(buf, "[{NAME} {level:>5}] {}", record.args())
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("{NAME}: could not install logger: {e}");
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Check(Check),
    Diag(Diag),
    #[command(visible_alias = "layout")]
    Relayout(Relayout),
}

impl Command {
    fn run(self) -> Result<(), Error> {
        match self {
            Command::Check(check) => check.run(),
            Command::Diag(diag) => diag.run(),
            Command::Relayout(relayout) => relayout.run(),
        }
    }
}

macro_rules! impl_try_from_command {
    ($variant:ident) => {
        impl TryFrom<Command> for $variant {
            type Error = Command;

            fn try_from(command: Command) -> Result<Self, Self::Error> {
                match command {
                    Command::$variant(cmd) => Ok(cmd),
                    command => Err(command),
                }
            }
        }
    };
}

impl_try_from_command!(Check);
impl_try_from_command!(Diag);
impl_try_from_command!(Relayout);

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
