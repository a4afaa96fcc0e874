//! Tabular dataset I/O.
//!
//! RULE: Only dataset.rs touches the CSV format. Everything else works
//! with `CampaignRecord`s.

use crate::{error::GenResult, record::CampaignRecord};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

/// Serialize records with a header row and no index column.
pub fn write_records<W: Write>(writer: W, records: &[CampaignRecord]) -> GenResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv(path: &Path, records: &[CampaignRecord]) -> GenResult<()> {
    let file = File::create(path)?;
    write_records(BufWriter::new(file), records)?;
    log::info!("Wrote {} campaigns to {}", records.len(), path.display());
    Ok(())
}

pub fn read_records<R: Read>(reader: R) -> GenResult<Vec<CampaignRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: CampaignRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Reload a dataset written by [`write_csv`].
pub fn read_csv(path: &Path) -> GenResult<Vec<CampaignRecord>> {
    let records = read_records(File::open(path)?)?;
    log::debug!("Read {} campaigns from {}", records.len(), path.display());
    Ok(records)
}
