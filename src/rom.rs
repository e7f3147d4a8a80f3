// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Finds a ROM to run, when none was named on the command line
//!
//! Prompts read from any [BufRead] and write to any [Write], so the
//! frontends hand in stdin/stdout and the tests hand in byte slices.

use crate::error::Result;
use log::debug;
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

/// File extensions recognized as Chip-8 ROMs
pub const EXTENSIONS: [&str; 2] = ["ch8", "c8"];

/// Returns true if the path has one of the [EXTENSIONS]
/// # Examples
/// ```rust
/// # use ch8::rom::is_rom;
/// assert!(is_rom("games/PONG.ch8"));
/// assert!(is_rom("tetris.c8"));
/// assert!(!is_rom("notes.txt"));
/// ```
pub fn is_rom(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| EXTENSIONS.contains(&ext))
}

/// Lists the ROMs in a directory, sorted by name
pub fn find_roms(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut roms = vec![];
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_rom(&path) {
            roms.push(path);
        }
    }
    roms.sort();
    Ok(roms)
}

/// Asks for a path until one names an existing file
pub fn prompt_path(input: &mut impl BufRead, output: &mut impl Write) -> Result<PathBuf> {
    write!(output, "Enter game path: ")?;
    output.flush()?;
    loop {
        let line = read_line(input)?;
        let path = PathBuf::from(line.trim());
        if path.is_file() {
            return Ok(path);
        }
        writeln!(output, "{} doesn't exist", path.display())?;
    }
}

/// Lists `roms`, and asks for one by number.
/// Anything other than a listed number falls back to [prompt_path].
pub fn choose_rom(
    roms: &[PathBuf],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<PathBuf> {
    writeln!(output, "Games found:")?;
    for (number, rom) in roms.iter().enumerate() {
        let name = rom.file_name().map_or(rom.as_os_str(), |name| name);
        writeln!(output, "{}. {}", number + 1, name.to_string_lossy())?;
    }
    writeln!(
        output,
        "Choose a game (1 - {}) or press enter to input a game path",
        roms.len()
    )?;
    output.flush()?;
    let choice = read_line(input)?;
    match choice.trim().parse::<usize>() {
        Ok(number) if (1..=roms.len()).contains(&number) => Ok(roms[number - 1].clone()),
        _ => prompt_path(input, output),
    }
}

/// Finds a ROM in `dir`, asking the user to pick one
pub fn select_rom(
    dir: impl AsRef<Path>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<PathBuf> {
    writeln!(output, "Searching for games...")?;
    let roms = match find_roms(&dir) {
        Ok(roms) => roms,
        Err(e) => {
            debug!("couldn't scan {}: {e}", dir.as_ref().display());
            writeln!(output, "Couldn't search the current directory")?;
            return prompt_path(input, output);
        }
    };
    if roms.is_empty() {
        writeln!(output, "No games found")?;
        return prompt_path(input, output);
    }
    choose_rom(&roms, input, output)
}

/// Reads one line, treating end of input as an error
fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input").into());
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Makes a fresh scratch directory containing the named files
    fn scratch(name: &str, files: &[&str]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ch8-rom-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), [0x00, 0xe0]).unwrap();
        }
        dir
    }

    #[test]
    fn finds_roms_by_extension() {
        let dir = scratch("find", &["b.ch8", "a.c8", "readme.txt", "c.CH8x"]);
        let roms = find_roms(&dir).unwrap();
        assert_eq!(vec![dir.join("a.c8"), dir.join("b.ch8")], roms);
    }

    #[test]
    fn choose_by_number() {
        let dir = scratch("choose", &["one.ch8", "two.ch8"]);
        let roms = find_roms(&dir).unwrap();
        let mut output = vec![];
        let chosen = choose_rom(&roms, &mut &b"2\n"[..], &mut output).unwrap();
        assert_eq!(dir.join("two.ch8"), chosen);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("1. one.ch8"));
        assert!(output.contains("2. two.ch8"));
        assert!(output.contains("(1 - 2)"));
    }

    #[test]
    fn out_of_range_choice_prompts_for_path() {
        let dir = scratch("fallback", &["one.ch8", "other.c8"]);
        let roms = find_roms(&dir).unwrap();
        let other = dir.join("other.c8");
        let input = format!("7\n{}\n", other.display());
        let chosen = choose_rom(&roms[..1], &mut input.as_bytes(), &mut Vec::<u8>::new()).unwrap();
        assert_eq!(other, chosen);
    }

    #[test]
    fn prompt_repeats_until_file_exists() {
        let dir = scratch("prompt", &["game.ch8"]);
        let game = dir.join("game.ch8");
        let input = format!("{0}/missing.ch8\n\n{1}\n", dir.display(), game.display());
        let mut output = vec![];
        let chosen = prompt_path(&mut input.as_bytes(), &mut output).unwrap();
        assert_eq!(game, chosen);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("missing.ch8 doesn't exist"));
    }

    #[test]
    fn prompt_fails_at_end_of_input() {
        let mut output: Vec<u8> = vec![];
        let err = prompt_path(&mut &b"/definitely/not/here.ch8\n"[..], &mut output)
            .expect_err("input ran out");
        assert!(matches!(err, crate::error::Error::IoError(_)));
    }

    #[test]
    fn select_with_no_roms_prompts() {
        let dir = scratch("empty", &["readme.txt"]);
        let readme = dir.join("readme.txt");
        let input = format!("{}\n", readme.display());
        let mut output = vec![];
        let chosen = select_rom(&dir, &mut input.as_bytes(), &mut output).unwrap();
        assert_eq!(readme, chosen);
        assert!(String::from_utf8(output).unwrap().contains("No games found"));
    }

    #[test]
    fn select_from_missing_directory_prompts() {
        let dir = scratch("missing", &["game.ch8"]);
        let game = dir.join("game.ch8");
        let input = format!("{}\n", game.display());
        let mut output = vec![];
        let chosen = select_rom(dir.join("nope"), &mut input.as_bytes(), &mut output).unwrap();
        assert_eq!(game, chosen);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Couldn't search the current directory"));
    }
}
