//! CSV persistence for the roster and the wildcard ledger.
//!
//! Both files are header-less and comma-delimited, one record per line:
//! - roster: `id,name,rank,affiliation,checkIn,registeredAt,isWildcard,inTournament`
//! - ledger: `code,name,rank,affiliation,used`
//!
//! Flags are `0`/`1`. Fields are never quoted or escaped, so text containing a comma
//! cannot be stored; such a line is skipped on the next load.

use crate::models::{PlayerRecord, Roster, WildcardCoupon, WildcardLedger};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const ROSTER_FIELDS: usize = 8;
const LEDGER_FIELDS: usize = 5;

/// Failure writing one of the files.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
            StorageError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Csv(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<csv::Error> for StorageError {
    fn from(e: csv::Error) -> Self {
        StorageError::Csv(e)
    }
}

/// On-disk shape of a roster line.
#[derive(Debug, Serialize, Deserialize)]
struct PlayerRow {
    id: u32,
    name: String,
    rank: u32,
    affiliation: String,
    checked_in: Flag,
    registered_at: String,
    is_wildcard: Flag,
    in_tournament: Flag,
}

impl From<&PlayerRecord> for PlayerRow {
    fn from(p: &PlayerRecord) -> Self {
        Self {
            id: p.id(),
            name: p.name.clone(),
            rank: p.rank,
            affiliation: p.affiliation.clone(),
            checked_in: p.checked_in.into(),
            registered_at: p.registered_at().to_string(),
            is_wildcard: p.is_wildcard().into(),
            in_tournament: p.in_tournament().into(),
        }
    }
}

impl From<PlayerRow> for PlayerRecord {
    fn from(r: PlayerRow) -> Self {
        PlayerRecord::from_parts(
            r.id,
            r.name,
            r.rank,
            r.affiliation,
            r.checked_in.into(),
            r.registered_at,
            r.is_wildcard.into(),
            r.in_tournament.into(),
        )
    }
}

/// On-disk shape of a ledger line.
#[derive(Debug, Serialize, Deserialize)]
struct CouponRow {
    code: String,
    name: String,
    rank: u32,
    affiliation: String,
    used: Flag,
}

impl From<&WildcardCoupon> for CouponRow {
    fn from(c: &WildcardCoupon) -> Self {
        Self {
            code: c.code.clone(),
            name: c.name.clone(),
            rank: c.rank,
            affiliation: c.affiliation.clone(),
            used: c.used.into(),
        }
    }
}

impl From<CouponRow> for WildcardCoupon {
    fn from(r: CouponRow) -> Self {
        WildcardCoupon {
            code: r.code,
            name: r.name,
            rank: r.rank,
            affiliation: r.affiliation,
            used: r.used.into(),
        }
    }
}

/// `0`/`1` column. Any other value fails deserialization and the line is skipped.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
struct Flag(bool);

impl TryFrom<u8> for Flag {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Flag(false)),
            1 => Ok(Flag(true)),
            other => Err(format!("expected 0 or 1, got {}", other)),
        }
    }
}

impl From<Flag> for u8 {
    fn from(f: Flag) -> Self {
        u8::from(f.0)
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Flag(b)
    }
}

impl From<Flag> for bool {
    fn from(f: Flag) -> Self {
        f.0
    }
}

/// Load the roster file with the standard 12 active slots. See [`load_roster_with_capacity`].
pub fn load_roster<P: AsRef<Path>>(path: P) -> Roster {
    load_roster_with_capacity(path, crate::models::DEFAULT_ACTIVE_CAPACITY)
}

/// Load the roster file. A missing or unreadable file gives an empty roster; malformed
/// lines are skipped. The loaded roster is reordered before it is returned.
pub fn load_roster_with_capacity<P: AsRef<Path>>(path: P, capacity: usize) -> Roster {
    let records: Vec<PlayerRecord> = read_rows::<PlayerRow>(path.as_ref(), ROSTER_FIELDS)
        .into_iter()
        .map(PlayerRecord::from)
        .collect();
    log::info!("Loaded {} player(s) from {}", records.len(), path.as_ref().display());
    Roster::from_records(records, capacity)
}

/// Rewrite the roster file from scratch in current roster order.
pub fn save_roster<P: AsRef<Path>>(path: P, roster: &Roster) -> Result<(), StorageError> {
    write_rows(path.as_ref(), roster.list_all().iter().map(PlayerRow::from))
}

/// Load the ledger file. Coupons are re-inserted in rank order.
pub fn load_ledger<P: AsRef<Path>>(path: P) -> WildcardLedger {
    let mut ledger = WildcardLedger::new();
    for row in read_rows::<CouponRow>(path.as_ref(), LEDGER_FIELDS) {
        ledger.insert(row.into());
    }
    log::info!("Loaded {} wildcard(s) from {}", ledger.len(), path.as_ref().display());
    ledger
}

/// Rewrite the ledger file from scratch in ledger order.
pub fn save_ledger<P: AsRef<Path>>(path: P, ledger: &WildcardLedger) -> Result<(), StorageError> {
    write_rows(path.as_ref(), ledger.list().iter().map(CouponRow::from))
}

fn read_rows<T>(path: &Path, fields: usize) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    match File::open(path) {
        Ok(file) => parse_rows(file, fields, &path.display().to_string()).rows,
        Err(e) => {
            log::info!("No data read from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Rows that parsed, plus the physical line numbers of the ones that did not.
struct ParsedRows<T> {
    rows: Vec<T>,
    skipped_lines: Vec<u64>,
}

/// Lines are counted here rather than taken from the csv reader, which skips blank
/// lines without reporting them.
fn parse_rows<T, R>(input: R, fields: usize, source: &str) -> ParsedRows<T>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut input = BufReader::new(input);
    let mut parsed = ParsedRows {
        rows: Vec::new(),
        skipped_lines: Vec::new(),
    };
    let mut buf = Vec::new();
    let mut line: u64 = 0;
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => line += 1,
            Err(e) => {
                log::warn!("{}: stopping load: {}", source, e);
                break;
            }
        }
        match parse_line::<T>(&buf, fields) {
            Ok(Some(row)) => parsed.rows.push(row),
            Ok(None) => {}
            Err(reason) => {
                log::warn!("{}:{}: skipping {}", source, line, reason);
                parsed.skipped_lines.push(line);
            }
        }
    }
    parsed
}

/// Parse one physical line. `Ok(None)` for a blank line.
fn parse_line<T>(bytes: &[u8], fields: usize) -> Result<Option<T>, String>
where
    T: for<'de> Deserialize<'de>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(bytes);
    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => {}
        Ok(false) => return Ok(None),
        Err(e) => return Err(format!("unreadable line: {}", e)),
    }
    if record.len() != fields {
        return Err(format!(
            "line with {} field(s), expected {}",
            record.len(),
            fields
        ));
    }
    record
        .deserialize::<T>(None)
        .map(Some)
        .map_err(|e| format!("malformed line: {}", e))
}

fn write_rows<T, I>(path: &Path, rows: I) -> Result<(), StorageError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_lines_are_reported_by_physical_line() {
        let input = "OK1,A,1,Uni,0\n\n\nBAD,B,x,Uni,0\nOK2,C,2,Uni,1\n\nshort\n";
        let parsed: ParsedRows<CouponRow> = parse_rows(input.as_bytes(), LEDGER_FIELDS, "test");
        let codes: Vec<_> = parsed.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["OK1", "OK2"]);
        assert_eq!(parsed.skipped_lines, vec![4, 7]);
    }

    #[test]
    fn flags_other_than_zero_or_one_are_malformed() {
        let input = "A,A,1,Uni,2\nB,B,1,Uni,true\nC,C,1,Uni,1\n";
        let parsed: ParsedRows<CouponRow> = parse_rows(input.as_bytes(), LEDGER_FIELDS, "test");
        assert_eq!(parsed.rows.len(), 1);
        assert!(bool::from(parsed.rows[0].used));
        assert_eq!(parsed.skipped_lines, vec![1, 2]);
    }
}
