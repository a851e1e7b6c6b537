//! File and stream plumbing around the pure parsing and export code.
//!
//! - **Uploads**: CSV inputs must use a `.csv` extension and stay under
//!   [`MAX_UPLOAD_BYTES`]; the `-` path reads stdin without those checks.
//! - **Text**: inputs are decoded as UTF-8, failing on invalid bytes.
//! - **Delivery**: exported CSV files receive a UTF-8 byte-order mark so that
//!   spreadsheet applications detect the encoding. The mark is added here and
//!   nowhere else.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow, bail};

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const UTF8_BOM: &str = "\u{feff}";

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Reads an uploaded CSV file (or stdin) as text.
pub fn read_upload(path: &Path) -> Result<String> {
    if is_dash(path) {
        return read_stdin();
    }
    if !has_csv_extension(path) {
        bail!("Please upload a CSV file");
    }
    let size = fs::metadata(path)
        .with_context(|| format!("Opening input file {path:?}"))?
        .len();
    if size > MAX_UPLOAD_BYTES {
        bail!(
            "File {path:?} is {size} bytes; uploads are limited to {} bytes",
            MAX_UPLOAD_BYTES
        );
    }
    read_text(path)
}

/// Reads any UTF-8 text input (or stdin) without upload checks.
pub fn read_text(path: &Path) -> Result<String> {
    if is_dash(path) {
        return read_stdin();
    }
    let bytes = fs::read(path).with_context(|| format!("Reading input file {path:?}"))?;
    String::from_utf8(bytes).map_err(|err| {
        anyhow!(
            "Input file {path:?} is not valid UTF-8 (error at byte {})",
            err.utf8_error().valid_up_to()
        )
    })
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut buf)
        .context("Reading from stdin")?;
    Ok(buf)
}

/// Writes `contents` to `path`, or to stdout when the path is absent or `-`.
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    let mut writer: Box<dyn Write> = match path {
        Some(p) if !is_dash(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(io::stdout().lock()),
    };
    writer.write_all(contents.as_bytes())?;
    if !contents.is_empty() && !contents.ends_with('\n') && path.is_none_or(is_dash) {
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Delivers exported CSV text. Files get a single leading byte-order mark;
/// stdout receives the bare text.
pub fn write_csv_export(path: &Path, csv: &str) -> Result<()> {
    if is_dash(path) {
        return write_output(None, csv);
    }
    let mut contents = String::with_capacity(UTF8_BOM.len() + csv.len());
    contents.push_str(UTF8_BOM);
    contents.push_str(csv);
    write_output(Some(path), &contents)
}
