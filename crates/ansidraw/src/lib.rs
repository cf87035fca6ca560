//! ansidraw - ANSI art file tool
//!
//! Command-line glue around the edit buffer and its codecs: picks a
//! decoder by file name, ingests drawings, and writes them back out as
//! escape-sequence streams.

pub mod app;
