//! ANSI escape-sequence decoder
//!
//! One-pass scanner over a byte stream that interprets the supported
//! cursor-movement and color commands and writes literal bytes into an
//! edit buffer. The cursor and attribute context lives only for the
//! duration of a single `read_ansi` call.

use ansidraw_canvas::{effective_fg, pack_attr, Cell, EditBuffer, DEFAULT_BG, DEFAULT_FG};
use tracing::debug;

use crate::CodecError;

/// Column the decoder wraps at, independent of the buffer width.
pub const MAX_COL: usize = 80;

/// Upper bound on accumulated parameter bytes in one sequence.
const MAX_PARAMS_LEN: usize = 32;

const ESC: u8 = 0x1B;
const DOS_EOF: u8 = 0x1A;
const LINE_FEED: u8 = 0x0A;

/// Cursor and attribute context while reading a stream.
///
/// The save register starts out empty; restoring from it before anything
/// was saved is a stream error, not a silent jump to (0, 0).
#[derive(Debug)]
struct CursorState {
    line: usize,
    col: usize,

    saved: Option<(usize, usize)>,

    bold: bool,
    fg: u8,
    bg: u8,
}

impl CursorState {
    fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            saved: None,
            bold: false,
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
        }
    }

    fn line_feed(&mut self) {
        self.col = 0;
        self.line += 1;
    }

    /// Packed attribute for the next literal write
    fn attr(&self) -> u8 {
        pack_attr(effective_fg(self.fg, self.bold), self.bg)
    }

    fn apply_attr(&mut self, attr: u16) -> Result<(), CodecError> {
        match attr {
            0 => {
                self.bold = false;
                self.fg = DEFAULT_FG;
                self.bg = DEFAULT_BG;
            }
            1 => self.bold = true,
            // Underline, blink, reverse and conceal have no cell
            // representation; they are accepted and dropped.
            4 | 5 | 7 | 8 => {}
            30..=37 => self.fg = (attr - 30) as u8,
            40..=47 => self.bg = (attr - 40) as u8,
            other => return Err(CodecError::UnknownAttribute(other)),
        }
        Ok(())
    }
}

/// One recognized escape sequence, parameters already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    MoveTo { line: usize, col: usize },
    Up(usize),
    Down(usize),
    Forward(usize),
    Back(usize),
    ReportPosition,
    SavePosition,
    RestorePosition,
    ClearScreen,
    Attributes(Vec<u16>),
    SetMode,
    ResetMode,
}

impl Command {
    fn parse(command: u8, params: &str) -> Result<Self, CodecError> {
        match command {
            b'H' | b'f' => {
                let (line, col) = parse_position(command, params)?;
                Ok(Self::MoveTo { line, col })
            }
            b'A' => Ok(Self::Up(parse_count(command, params)?)),
            b'B' => Ok(Self::Down(parse_count(command, params)?)),
            b'C' => Ok(Self::Forward(parse_count(command, params)?)),
            b'D' => Ok(Self::Back(parse_count(command, params)?)),
            b'R' => Ok(Self::ReportPosition),
            b's' => Ok(Self::SavePosition),
            b'u' => Ok(Self::RestorePosition),
            b'J' => {
                // Only whole-screen clears exist in the supported subset
                if params == "2" {
                    Ok(Self::ClearScreen)
                } else {
                    Err(bad_params(command, params))
                }
            }
            // Clear-to-end-of-line is not implemented
            b'K' => Err(CodecError::UnsupportedCommand('K')),
            b'm' => Ok(Self::Attributes(parse_attr_list(command, params)?)),
            b'h' => Ok(Self::SetMode),
            b'l' => Ok(Self::ResetMode),
            other => Err(CodecError::UnsupportedCommand(other as char)),
        }
    }
}

fn bad_params(command: u8, params: &str) -> CodecError {
    CodecError::BadParameters {
        command: command as char,
        params: params.to_string(),
    }
}

/// Parse the two mandatory 1-based coordinates of `H`/`f`, returning them
/// 0-based.
fn parse_position(command: u8, params: &str) -> Result<(usize, usize), CodecError> {
    let (line, col) = params
        .split_once(';')
        .ok_or_else(|| bad_params(command, params))?;

    let line: usize = line.parse().map_err(|_| bad_params(command, params))?;
    let col: usize = col.parse().map_err(|_| bad_params(command, params))?;

    // The stream is 1-based; zero has no 0-based counterpart
    if line == 0 || col == 0 {
        return Err(bad_params(command, params));
    }

    Ok((line - 1, col - 1))
}

/// Parse the optional repeat count of a cursor motion, defaulting to one.
fn parse_count(command: u8, params: &str) -> Result<usize, CodecError> {
    if params.is_empty() {
        return Ok(1);
    }
    params.parse().map_err(|_| bad_params(command, params))
}

/// Parse the `;`-separated attribute list of `m`. An empty list means a
/// full reset.
fn parse_attr_list(command: u8, params: &str) -> Result<Vec<u16>, CodecError> {
    if params.is_empty() {
        return Ok(vec![0]);
    }
    params
        .split(';')
        .map(|field| field.parse().map_err(|_| bad_params(command, params)))
        .collect()
}

fn is_param_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == b';' || byte == b'?'
}

/// Scan the parameter bytes and command byte of one sequence, the `ESC [`
/// prefix already consumed. Returns the parsed command and the position
/// just past it.
fn scan_sequence(data: &[u8], start: usize) -> Result<(Command, usize), CodecError> {
    let mut pos = start;
    while pos < data.len() && is_param_byte(data[pos]) {
        pos += 1;
        if pos - start > MAX_PARAMS_LEN {
            return Err(CodecError::ParamsOverflow(pos - start));
        }
    }

    let command = match data.get(pos) {
        None | Some(&DOS_EOF) => return Err(CodecError::CorruptSequence),
        Some(&byte) => byte,
    };

    // Parameter bytes are a pure ASCII subset
    let params = std::str::from_utf8(&data[start..pos]).map_err(|_| CodecError::CorruptSequence)?;

    Ok((Command::parse(command, params)?, pos + 1))
}

fn apply_command(
    command: Command,
    state: &mut CursorState,
    buf: &mut EditBuffer,
) -> Result<(), CodecError> {
    match command {
        Command::MoveTo { line, col } => {
            state.line = line;
            state.col = col;
        }
        Command::Up(lines) => state.line = state.line.saturating_sub(lines),
        Command::Down(lines) => state.line = state.line.saturating_add(lines),
        Command::Forward(cols) => state.col = state.col.saturating_add(cols).min(MAX_COL),
        Command::Back(cols) => state.col = state.col.saturating_sub(cols),
        Command::ReportPosition | Command::SetMode | Command::ResetMode => {}
        Command::SavePosition => state.saved = Some((state.line, state.col)),
        Command::RestorePosition => match state.saved {
            Some((line, col)) => {
                state.line = line;
                state.col = col;
            }
            None => return Err(CodecError::RestoreWithoutSave),
        },
        Command::ClearScreen => {
            buf.clear();
            state.line = 0;
            state.col = 0;
        }
        Command::Attributes(attrs) => {
            for attr in attrs {
                state.apply_attr(attr)?;
            }
        }
    }
    Ok(())
}

/// Write one literal byte at the cursor, wrapping at the fixed maximum
/// column first if needed.
fn write_literal(byte: u8, state: &mut CursorState, buf: &mut EditBuffer) -> Result<(), CodecError> {
    match byte {
        LINE_FEED => {
            state.line_feed();
            return Ok(());
        }
        // Form feed and carriage return are dropped without moving
        0x0C | 0x0D => return Ok(()),
        0x07 | 0x08 | 0x09 | 0x0B | 0x0E | 0x0F | DOS_EOF | ESC | 0x7F => {
            return Err(CodecError::IllegalByte(byte))
        }
        _ => {}
    }

    if state.col == MAX_COL {
        state.line_feed();
    }

    buf.put(state.col, state.line, Cell::new(state.attr(), byte))?;
    state.col += 1;

    Ok(())
}

/// Decode an escape-sequence stream into `buf`.
///
/// Decoding starts at (0, 0) with default attributes and runs until the
/// end of the input or a DOS end-of-file byte. Any unsupported or
/// malformed construct aborts with an error; nothing is skipped.
pub fn read_ansi(data: &[u8], buf: &mut EditBuffer) -> Result<(), CodecError> {
    let mut state = CursorState::new();
    let mut pos = 0;

    while let Some(&byte) = data.get(pos) {
        pos += 1;

        if byte == DOS_EOF {
            break;
        }

        if byte == ESC {
            if data.get(pos) != Some(&b'[') {
                return Err(CodecError::CorruptSequence);
            }
            pos += 1;

            let (command, next) = scan_sequence(data, pos)?;
            pos = next;
            apply_command(command, &mut state, buf)?;
        } else {
            write_literal(byte, &mut state, buf)?;
        }
    }

    debug!(rows = buf.max_height(), "decoded escape-sequence stream");
    Ok(())
}
