use std::io;

use deoverlap_core::Result;
use deoverlap_core::models::Hit;
use deoverlap_core::utils::FinishWrite;
use deoverlap_overlaprs::HitSink;

///
/// Writes verdicts back out as tabular rows.
///
/// Kept rows go to the main output verbatim (or the removed rows when `invert` is set).
/// An optional second stream gets one diagnostic line per hit:
///
/// ```text
/// kept	<overlap count>	<row>
/// removed	<row>	<row of the hit that removed it>
/// ```
///
pub struct TbloutSink<W: FinishWrite, D: FinishWrite = io::Sink> {
    out: W,
    overlap_out: Option<D>,
    invert: bool,
    rows_written: usize,
}

impl<W: FinishWrite> TbloutSink<W, io::Sink> {
    pub fn new(out: W) -> Self {
        TbloutSink {
            out,
            overlap_out: None,
            invert: false,
            rows_written: 0,
        }
    }
}

impl<W: FinishWrite, D: FinishWrite> TbloutSink<W, D> {
    pub fn with_overlap_out<D2: FinishWrite>(self, overlap_out: D2) -> TbloutSink<W, D2> {
        TbloutSink {
            out: self.out,
            overlap_out: Some(overlap_out),
            invert: self.invert,
            rows_written: self.rows_written,
        }
    }

    /// Emit removed rows instead of kept rows.
    pub fn inverted(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Rows written to the main output so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_parts(self) -> (W, Option<D>) {
        (self.out, self.overlap_out)
    }

    fn write_row(&mut self, hit: &Hit) -> Result<()> {
        writeln!(self.out, "{}", hit.raw)?;
        self.rows_written += 1;
        Ok(())
    }
}

/// A CRLF row keeps its `\r` in [Hit::raw]; diagnostics put several rows on one line.
fn bare(raw: &str) -> &str {
    raw.strip_suffix('\r').unwrap_or(raw)
}

impl<W: FinishWrite, D: FinishWrite> HitSink for TbloutSink<W, D> {
    fn kept(&mut self, hit: &Hit, overlaps: usize) -> Result<()> {
        if !self.invert {
            self.write_row(hit)?;
        }
        if let Some(overlap_out) = self.overlap_out.as_mut() {
            writeln!(overlap_out, "kept\t{}\t{}", overlaps, bare(&hit.raw))?;
        }
        Ok(())
    }

    fn removed(&mut self, hit: &Hit, blocker: &Hit) -> Result<()> {
        if self.invert {
            self.write_row(hit)?;
        }
        if let Some(overlap_out) = self.overlap_out.as_mut() {
            writeln!(
                overlap_out,
                "removed\t{}\t{}",
                bare(&hit.raw),
                bare(&blocker.raw)
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.finish_write()?;
        if let Some(overlap_out) = self.overlap_out.as_mut() {
            overlap_out.finish_write()?;
        }
        log::debug!(
            "wrote {} {} rows",
            self.rows_written,
            if self.invert { "removed" } else { "kept" }
        );
        Ok(())
    }
}
