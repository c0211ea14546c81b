//! CSV export of evaluated panel options.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sizing::PanelOption;

/// Column header for the options export.
const HEADER: &str = "index,name,power_kw,unit_price,units,total_cost,selected";

/// Exports every evaluated option to a CSV file at the given path.
///
/// # Arguments
///
/// * `options` - Options in catalog order
/// * `selected_index` - Catalog index flagged in the `selected` column
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_options_csv(
    options: &[PanelOption],
    selected_index: usize,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_options_csv(options, selected_index, buf)
}

/// Writes evaluated options as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_options_csv(
    options: &[PanelOption],
    selected_index: usize,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for o in options {
        wtr.write_record(&[
            o.index.to_string(),
            o.name.clone(),
            format!("{:.3}", o.power_kw),
            o.unit_price.to_string(),
            o.units.to_string(),
            o.total_cost.to_string(),
            (o.index == selected_index).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
