use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use ultraviolet::DVec3;

use crate::config::COLUMN_HEADER;
use crate::species::Species;

/// Float rendered in shortest round-trip form, keeping `.0` on integral values.
/// Exponents carry an explicit sign and at least two digits (`1e-07`, `1e+16`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decimal(pub f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:?}", self.0);
        match text.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => f.write_str(&text),
        }
    }
}

/// Parameters echoed in the leading comment line of the placement file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RunHeader {
    pub spacing: f64,
    pub upper_limit: f64,
    pub jitter_extent_fraction: f64,
    pub percent_deviation: f64,
}

impl fmt::Display for RunHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# spacing={}, upper_limit={}, FRACTIONAL_EXTENT_OF_DEVIATION={}, percent_deviation={}",
            Decimal(self.spacing),
            Decimal(self.upper_limit),
            Decimal(self.jitter_extent_fraction),
            Decimal(self.percent_deviation)
        )
    }
}

/// One placed particle: perturbed position plus species metadata.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleRecord {
    pub pos: DVec3,
    pub species: Species,
}

impl fmt::Display for ParticleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let props = self.species.props();
        write!(
            f,
            "{},{},{},{},{},{}",
            Decimal(self.pos.x),
            Decimal(self.pos.y),
            Decimal(self.pos.z),
            props.label,
            props.monomer_id,
            props.chain_index
        )
    }
}

/// Destination for generated records.
pub trait RecordSink {
    fn write_header(&mut self, header: &RunHeader) -> std::io::Result<()>;
    fn write_columns(&mut self, columns: &str) -> std::io::Result<()>;
    fn write_record(&mut self, record: &ParticleRecord) -> std::io::Result<()>;
    /// Flush and return the number of records written.
    fn finish(&mut self) -> std::io::Result<usize>;
}

/// Comma-separated placement file writer.
pub struct CsvSink<W: Write> {
    writer: W,
    records: usize,
}

impl CsvSink<BufWriter<File>> {
    /// Truncates any existing file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_header(&mut self, header: &RunHeader) -> std::io::Result<()> {
        writeln!(self.writer, "{}", header)
    }

    fn write_columns(&mut self, columns: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{}", columns)
    }

    fn write_record(&mut self, record: &ParticleRecord) -> std::io::Result<()> {
        writeln!(self.writer, "{}", record)?;
        self.records += 1;
        Ok(())
    }

    fn finish(&mut self) -> std::io::Result<usize> {
        self.writer.flush()?;
        Ok(self.records)
    }
}

/// Write both leading lines of a placement file.
pub fn write_preamble<S: RecordSink + ?Sized>(sink: &mut S, header: &RunHeader) -> std::io::Result<()> {
    sink.write_header(header)?;
    sink.write_columns(COLUMN_HEADER)
}

/// Serialize any report as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> crate::error::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_keeps_trailing_zero() {
        assert_eq!(Decimal(1.0).to_string(), "1.0");
        assert_eq!(Decimal(0.5).to_string(), "0.5");
        assert_eq!(Decimal(2.154434690031884).to_string(), "2.154434690031884");
        assert_eq!(Decimal(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn decimal_exponent_is_signed_and_padded() {
        assert_eq!(Decimal(1e-7).to_string(), "1e-07");
        assert_eq!(Decimal(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Decimal(1e16).to_string(), "1e+16");
        assert_eq!(Decimal(-2.5e-120).to_string(), "-2.5e-120");
        assert_eq!(Decimal(0.0001).to_string(), "0.0001");
    }

    #[test]
    fn header_line_format() {
        let header = RunHeader {
            spacing: 2.0,
            upper_limit: 0.5,
            jitter_extent_fraction: 1.0,
            percent_deviation: 25.0,
        };
        assert_eq!(
            header.to_string(),
            "# spacing=2.0, upper_limit=0.5, FRACTIONAL_EXTENT_OF_DEVIATION=1.0, percent_deviation=25.0"
        );
    }

    #[test]
    fn record_row_format() {
        let rec = ParticleRecord {
            pos: DVec3::new(0.5, 1.25, 9.0),
            species: Species::Pag,
        };
        assert_eq!(rec.to_string(), "0.5,1.25,9.0,PAG,5,1");

        let rec = ParticleRecord {
            pos: DVec3::new(1.0, 2.0, 3.0),
            species: Species::Tbma,
        };
        assert_eq!(rec.to_string(), "1.0,2.0,3.0,TBMA,3,1");
    }

    #[test]
    fn csv_sink_writes_preamble_and_counts_rows() {
        let header = RunHeader {
            spacing: 1.0,
            upper_limit: 0.0,
            jitter_extent_fraction: 1.0,
            percent_deviation: 0.0,
        };
        let mut sink = CsvSink::new(Vec::new());
        write_preamble(&mut sink, &header).unwrap();
        for i in 0..3 {
            let rec = ParticleRecord {
                pos: DVec3::new(i as f64, 0.0, 0.0),
                species: Species::Pag,
            };
            sink.write_record(&rec).unwrap();
        }
        assert_eq!(sink.finish().unwrap(), 3);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("# spacing=1.0"));
        assert_eq!(lines[1], COLUMN_HEADER);
        assert_eq!(lines[4], "2.0,0.0,0.0,PAG,5,1");
    }
}
