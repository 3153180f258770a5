use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use ini::{Config, Section};
use log::debug;

/// Decode an INI file and print its sections.
///
/// Set the RUST_LOG environment variable to control logging level.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the INI file; reads standard input when omitted.
    path: Option<PathBuf>,

    /// Only print this section. Use an empty string for the default section.
    #[arg(short, long)]
    section: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match &cli.path {
        Some(path) => {
            debug!("decoding {}", path.display());
            ini::from_reader(fs::File::open(path)?)?
        }
        None => ini::from_reader(io::stdin().lock())?,
    };

    render(config.as_ref(), cli.section.as_deref(), &mut io::stdout().lock())
}

/// Write every section, or only `only` when given. Asking for a section that is not there is an
/// error, including when the input held no config at all.
fn render<W: Write>(
    config: Option<&Config>,
    only: Option<&str>,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    if let Some(name) = only {
        let section = config
            .and_then(|config| config.section(name))
            .ok_or_else(|| format!("section not found: {name:?}"))?;
        return Ok(write_section(section, out)?);
    }

    if let Some(config) = config {
        for section in sorted_sections(config) {
            write_section(section, out)?;
        }
    }

    Ok(())
}

/// Sorted by name, which puts the default section first.
fn sorted_sections(config: &Config) -> Vec<&Section> {
    let mut sections = config.sections().collect::<Vec<&Section>>();
    sections.sort_by(|a, b| a.name().cmp(b.name()));
    sections
}

fn write_section<W: Write>(section: &Section, out: &mut W) -> io::Result<()> {
    writeln!(out, "[{}]", section.name())?;

    let mut entries = section.entries().collect::<Vec<(&str, &str)>>();
    entries.sort_unstable();

    for (key, value) in entries {
        writeln!(out, "{key} = \"{value}\"")?;
    }

    writeln!(out)
}
