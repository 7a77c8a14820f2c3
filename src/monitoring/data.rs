use anyhow::Result;
use csv::Reader;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of the watch-list file.
#[derive(Debug, Deserialize)]
pub struct PairRow {
    pub asset_1: String,
    pub asset_2: String,
    pub upper_threshold: Decimal,
    pub lower_threshold: Decimal,
}

fn parse_rows<R: Read>(mut reader: Reader<R>) -> Vec<PairRow> {
    reader.deserialize().filter_map(|x| x.ok()).collect()
}

pub fn read_watch_list<T: AsRef<Path>>(file: T) -> Result<Vec<PairRow>> {
    Ok(parse_rows(Reader::from_path(file)?))
}
