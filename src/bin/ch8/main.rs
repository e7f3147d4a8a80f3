// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! ch8: A Chip-8 interpreter for the terminal
//!
//! Run with a ROM path, or with none to pick from the ROMs in the current directory.

mod ui;

use ch8::{error::Result, io::Runner, rom, Chip8};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use ui::Terminal;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on ch8.", free)]
    pub file: Option<PathBuf>,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Log every instruction as it runs.")]
    pub debug: bool,
}

pub fn main() {
    let options = Arguments::parse_args_default_or_exit();
    init_logger(options.debug);
    if let Err(e) = run(options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
}

fn run(options: Arguments) -> Result<()> {
    let path = match options.file {
        Some(path) => path,
        None => rom::select_rom(".", &mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };
    let mut ch8 = Chip8::new();
    if let Err(e) = ch8.load_program(&path) {
        println!("Couldn't load {}", path.display());
        return Err(e);
    }
    // the terminal is restored when the runner is dropped
    Runner::new(ch8, Terminal::new()?).run()
}

fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Trace);
    }
    builder.init();
}
