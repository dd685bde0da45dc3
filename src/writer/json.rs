//! Emit the parsed document, or the token stream, as pretty JSON.

use crate::processor::Document;
use crate::processor::lexer::Token;
use serde::Serialize;
use std::io::{self, Write};

pub fn emit_document<W: Write>(document: &Document, out: &mut W) -> io::Result<()> {
    emit(document, out)
}

pub fn emit_tokens<W: Write>(tokens: &[Token], out: &mut W) -> io::Result<()> {
    emit(tokens, out)
}

fn emit<T: Serialize + ?Sized, W: Write>(value: &T, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}
