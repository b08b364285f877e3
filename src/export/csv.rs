use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::core::LedgerSnapshot;

pub const CSV_HEADER: [&str; 3] = ["JUMLAH", "NOMINAL", "SUBTOTAL"];

/// Write the ledger as `count,denomination,subtotal` rows under the
/// `JUMLAH,NOMINAL,SUBTOTAL` header, followed by a `,,total` row.
pub fn write_csv<W: Write>(snapshot: &LedgerSnapshot, writer: W) -> anyhow::Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for entry in &snapshot.entries {
        wtr.write_record([
            entry.count().to_string(),
            entry.denomination().value().to_string(),
            entry.subtotal().to_string(),
        ])?;
    }

    let total = snapshot.total.to_string();
    wtr.write_record(["", "", total.as_str()])?;
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(snapshot: &LedgerSnapshot) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_csv(snapshot, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

pub fn save_csv(snapshot: &LedgerSnapshot, path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV export {:?}", path))?;
    write_csv(snapshot, file)
}
