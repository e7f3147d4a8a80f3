// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Writes a mnemonic listing of a Chip-8 ROM
//!
//! The listing lands beside the ROM as `<name>.chip8`, unless `--output` says otherwise.

use ch8::{
    cpu::{
        instruction::disassembler::{listing, scan},
        mem::PROGRAM_START,
    },
    error::Result,
    Dis,
};
use gumdrop::*;
use log::info;
use owo_colors::OwoColorize;
use std::{fs, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Write the listing here, instead of beside the ROM", meta = "PATH")]
    pub output: Option<PathBuf>,
    #[options(help = "Also print an annotated listing to stdout")]
    pub print: bool,
    #[options(help = "Enable debug logging")]
    pub debug: bool,
}

fn main() {
    let options = Arguments::parse_args_default_or_exit();
    init_logger(options.debug);
    if let Err(e) = run(&options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
}

fn run(options: &Arguments) -> Result<()> {
    let rom = fs::read(&options.file)?;
    let text = listing(&rom)?;
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| options.file.with_extension("chip8"));
    fs::write(&output, &text)?;
    info!("wrote {} lines to {}", text.lines().count(), output.display());

    if options.print {
        let dis = Dis::default();
        for line in scan(&rom) {
            println!("{}", dis.annotated(&line, PROGRAM_START as usize));
        }
    }
    Ok(())
}

fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Trace);
    }
    builder.init();
}
