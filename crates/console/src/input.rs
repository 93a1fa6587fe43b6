//! Line-based operator input.
//!
//! Parsing failures are values ([`InputError::InvalidFormat`]), never panics,
//! and are kept apart from the inventory's business-rule rejections. Negative
//! numbers parse fine here; refusing them is the manager's job.

use std::io::{self, BufRead, Write};

use ims_core::{Money, ProductId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    /// Text could not be read as the expected kind of number.
    #[error("invalid {field}: `{input}`")]
    InvalidFormat { field: &'static str, input: String },

    /// The input stream ended.
    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl InputError {
    fn invalid(field: &'static str, input: &str) -> Self {
        Self::InvalidFormat {
            field,
            input: input.trim().to_string(),
        }
    }
}

pub fn parse_id(text: &str) -> Result<ProductId, InputError> {
    text.parse().map_err(|_| InputError::invalid("product id", text))
}

pub fn parse_quantity(text: &str) -> Result<i32, InputError> {
    text.trim()
        .parse()
        .map_err(|_| InputError::invalid("quantity", text))
}

/// Parse a price, tolerating a leading currency symbol and `,` separators.
pub fn parse_price(text: &str, currency_symbol: &str) -> Result<Money, InputError> {
    let trimmed = text.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest.trim_start()),
        None => ("", trimmed),
    };
    let digits = if currency_symbol.is_empty() {
        unsigned
    } else {
        unsigned.strip_prefix(currency_symbol).unwrap_or(unsigned)
    };
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();

    format!("{sign}{cleaned}")
        .parse()
        .map_err(|_| InputError::invalid("price", text))
}

/// Prompting reader/writer pair.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Next line without its terminator, or [`InputError::Closed`] at EOF.
    pub fn read_line(&mut self) -> Result<String, InputError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(line)
    }

    /// Write `label` (no newline), flush, then read the reply.
    pub fn prompt(&mut self, label: &str) -> Result<String, InputError> {
        write!(self.writer, "{label}")?;
        self.writer.flush()?;
        self.read_line()
    }

    pub fn say(&mut self, message: impl AsRef<str>) -> Result<(), InputError> {
        writeln!(self.writer, "{}", message.as_ref())?;
        Ok(())
    }
}
