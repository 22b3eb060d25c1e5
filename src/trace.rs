//! Decoding text traces.
//!
//! Each line has the form `<op> <pc> <next pc>`, with fields separated by a
//! single space. Addresses are written as decimal integers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::branch::*;
use crate::error::*;

/// Decode a single trace line. `line` is the 1-based line number used when
/// reporting errors.
pub fn parse_line(line: usize, text: &str) -> Result<BranchEvent, ParseError> {
    let err = |kind| ParseError { line, kind };

    let fields: Vec<&str> = text.trim().split(' ').collect();
    if fields.len() != 3 {
        return Err(err(ParseErrorKind::FieldCount(fields.len())));
    }

    let op = BranchOp::from_mnemonic(fields[0])
        .ok_or_else(|| err(ParseErrorKind::UnknownOp(fields[0].to_string())))?;
    let parse_addr = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| err(ParseErrorKind::BadAddress(s.to_string())))
    };
    let pc = parse_addr(fields[1])?;
    let next_pc = parse_addr(fields[2])?;

    Ok(BranchEvent::new(op, pc, next_pc))
}

/// Iterator over the events in a text trace.
///
/// Blank lines are skipped. Every other line yields either an event or the
/// error that prevented it from being decoded.
pub struct TraceReader<R: BufRead> {
    inner: R,
    buf: Vec<u8>,

    /// Number of lines consumed so far
    line: usize,
}
impl<R: BufRead> TraceReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, buf: Vec::new(), line: 0 }
    }

    /// Return the number of lines consumed so far.
    pub fn lines_read(&self) -> usize { self.line }
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let f = File::open(path)?;
        Ok(Self::new(BufReader::new(f)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchEvent, TraceError>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {},
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;

            let text = match std::str::from_utf8(&self.buf) {
                Ok(text) => text,
                Err(_) => return Some(Err(ParseError {
                    line: self.line,
                    kind: ParseErrorKind::Encoding,
                }.into())),
            };
            if text.trim().is_empty() {
                continue;
            }
            return Some(parse_line(self.line, text).map_err(Into::into));
        }
    }
}
