use std::io::BufRead;

use deoverlap_core::Result;
use deoverlap_core::models::Hit;
use deoverlap_core::normalize::{NormalizeOptions, normalize};

///
/// Iterator of normalized hits over a tabular search-result stream.
///
/// `#` lines and blank lines are skipped. Each data row is kept byte for byte in
/// [Hit::raw], minus the `\n` terminator (a CRLF row keeps its `\r`), and tagged with
/// its 1-based line number.
///
pub struct HitReader<R: BufRead> {
    reader: R,
    buf: String,
    line_no: usize,
    n_hits: usize,
    opts: NormalizeOptions,
    done: bool,
}

impl<R: BufRead> HitReader<R> {
    pub fn new(reader: R, opts: NormalizeOptions) -> Result<Self> {
        opts.validate()?;
        Ok(HitReader {
            reader,
            buf: String::new(),
            line_no: 0,
            n_hits: 0,
            opts,
            done: false,
        })
    }

    /// Number of lines consumed so far, comments included.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for HitReader<R> {
    type Item = Result<Hit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    log::debug!("read {} hits from {} lines", self.n_hits, self.line_no);
                    return None;
                }
                Ok(_) => self.line_no += 1,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }

            let row = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
            if row.starts_with('#') || row.trim().is_empty() {
                continue;
            }

            let hit = normalize(row, self.line_no, &self.opts);
            match hit {
                Ok(_) => self.n_hits += 1,
                Err(_) => self.done = true,
            }
            return Some(hit);
        }
    }
}
