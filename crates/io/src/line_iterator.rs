use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use streaming_iterator::StreamingIterator;

/// A lending iterator over the lines of a type implementing [`Read`].
///
/// Line terminators (`\n` and `\r\n`) are stripped, and the one based number
/// of the current line is available through [`LineIterator::line_number`] for
/// error reporting. A read error ends the iteration and is kept in
/// [`LineIterator::error`].
pub struct LineIterator<T: Read> {
    reader: BufReader<T>,
    buffer: String,
    line_number: usize,
    error: Option<io::Error>,
    end: bool,
}

impl<T: Read> LineIterator<T> {
    pub fn new(reader: T) -> LineIterator<T> {
        LineIterator {
            reader: BufReader::new(reader),
            buffer: String::new(),
            line_number: 0,
            error: None,
            end: false,
        }
    }

    /// Returns the number of the line returned by the last call to `next`.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Takes the I/O error that stopped the iteration, if any.
    pub fn error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<T: Read> StreamingIterator for LineIterator<T> {
    type Item = String;

    fn advance(&mut self) {
        if self.end {
            return;
        }

        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(n) if n > 0 => {
                self.line_number += 1;
                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }
            }
            Ok(_) => self.end = true,
            Err(error) => {
                self.error = Some(error);
                self.end = true;
            }
        }
    }

    fn get(&self) -> Option<&Self::Item> {
        if self.end { None } else { Some(&self.buffer) }
    }
}
