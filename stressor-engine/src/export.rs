use std::io::{self, Write};

pub const CSV_HEADER: &str = "index,latency_ms";

/// Write `samples` as CSV: a header row, then one `index,latency_ms` row per
/// sample with a 1-based index and six decimal places.
pub fn write_csv<W: Write>(mut writer: W, samples: &[f64]) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for (i, value) in samples.iter().enumerate() {
        writeln!(writer, "{},{:.6}", i + 1, value)?;
    }
    writer.flush()
}
