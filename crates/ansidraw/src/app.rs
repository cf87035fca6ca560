//! Command-line application

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use ansidraw_canvas::EditBuffer;
use ansidraw_codec::{read_ansi, read_binary, write_ansi};

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "ANSI art tool - inspect and convert drawings")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Edit buffer width in columns
    #[arg(short = 'c', long, global = true, default_value = "80")]
    columns: usize,

    /// Edit buffer height in rows
    #[arg(short = 'r', long, global = true, default_value = "1000")]
    rows: usize,

    /// Log level
    #[arg(long, value_enum, global = true, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report the dimensions and used rows of an art file
    Info {
        /// Art file to load (.bin raster or escape-sequence text)
        file: PathBuf,
    },

    /// Re-encode an art file as an escape-sequence stream
    Convert {
        /// Art file to load
        input: PathBuf,

        /// Destination for the escape-sequence stream
        output: PathBuf,
    },
}

/// Binary raster files are selected by extension; everything else goes
/// through the escape-sequence decoder.
pub fn is_binary_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("bin"))
        .unwrap_or(false)
}

/// Load an art file into a freshly created edit buffer.
pub fn load_art(path: &Path, columns: usize, rows: usize) -> Result<EditBuffer> {
    let data =
        fs::read(path).with_context(|| format!("could not read '{}'", path.display()))?;

    let mut buf = EditBuffer::new(columns, rows)?;

    if is_binary_file(path) {
        debug!(path = %path.display(), "reading binary raster");
        let width = buf.width();
        read_binary(&data, &mut buf, width)
    } else {
        debug!(path = %path.display(), "reading escape-sequence stream");
        read_ansi(&data, &mut buf)
    }
    .with_context(|| format!("could not decode '{}'", path.display()))?;

    Ok(buf)
}

/// Persist a buffer as an escape-sequence stream.
pub fn save_art(path: &Path, buf: &EditBuffer) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("could not open '{}' for writing", path.display()))?;

    let mut out = BufWriter::new(file);
    write_ansi(&mut out, buf)
        .with_context(|| format!("could not encode '{}'", path.display()))?;
    out.flush()
        .with_context(|| format!("could not write '{}'", path.display()))?;

    Ok(())
}

fn cmd_info(file: &Path, columns: usize, rows: usize) -> Result<()> {
    let buf = load_art(file, columns, rows)?;

    println!(
        "{}: {} columns, {} rows used of {} allocated",
        file.display(),
        buf.width(),
        buf.max_height(),
        buf.height(),
    );

    Ok(())
}

fn cmd_convert(input: &Path, output: &Path, columns: usize, rows: usize) -> Result<()> {
    let buf = load_art(input, columns, rows)?;
    save_art(output, &buf)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        rows = buf.max_height(),
        "converted"
    );

    Ok(())
}

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level {
        LogLevel::Trace => tracing::Level::TRACE,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .init();

    match args.command {
        Command::Info { file } => cmd_info(&file, args.columns, args.rows),
        Command::Convert { input, output } => {
            cmd_convert(&input, &output, args.columns, args.rows)
        }
    }
}
