use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Serializer, Value, ser::Formatter, ser::PrettyFormatter};
use tracing::{debug, info};

use crate::helpers::progress;
use crate::listing::{self, Exclusion};
use crate::net::{FetchError, Fetcher};
use crate::records::{ExtractError, Extractor};

const BANNER: &str = "# ################################## #";
const INDENT: &[u8] = b"    ";

/// Where one category comes from and where it goes.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    /// Singular display label, e.g. "Weapon".
    pub label: &'a str,
    /// Plural used in the summary line, e.g. "weapons".
    pub noun: &'a str,
    pub url: &'a str,
    pub exclusion: Exclusion<'a>,
    /// File name inside the output directory.
    pub output: &'a str,
}

/// Outcome of one finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub attempted: usize,
    pub written: usize,
    pub elapsed: Duration,
    pub output: PathBuf,
}

/// Why a single entry was skipped.
#[derive(thiserror::Error, Debug)]
pub enum ItemError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// List `target.url`, fetch and extract every entry, write the records.
///
/// Only the directory listing and the final write can fail the run; every
/// per-entry failure is logged and skipped.
pub async fn run<R: Serialize>(
    fetcher: &dyn Fetcher,
    target: &Target<'_>,
    extract: Extractor<R>,
    out_dir: &Path,
) -> Result<Report> {
    let start = Instant::now();
    println!("{BANNER}");
    println!("#     Starting {} Scraping...    #\n", target.label);

    let html = fetcher
        .fetch_text(target.url)
        .await
        .with_context(|| format!("fetch directory listing: {}", target.url))?;
    let links = listing::raw_links(&html, target.exclusion)
        .with_context(|| format!("parse directory listing: {}", target.url))?;
    info!(category = target.label, entries = links.len(), "directory listed");

    let (records, attempted) = collect(fetcher, &links, extract).await;
    let elapsed = start.elapsed();
    println!(
        "\n{} scraping took: {:.2} seconds",
        target.label,
        elapsed.as_secs_f64()
    );

    let output = out_dir.join(target.output);
    println!("\nNow saving {} data into {} file...", target.noun, target.output);
    write_records(&output, &records).await?;
    println!(
        "JSON file saved successfully with {} {} ({attempted} attempted).",
        records.len(),
        target.noun
    );
    println!("\n{BANNER}\n\n");

    Ok(Report {
        attempted,
        written: records.len(),
        elapsed,
        output,
    })
}

async fn collect<R>(fetcher: &dyn Fetcher, links: &[String], extract: Extractor<R>) -> (Vec<R>, usize) {
    let pb = progress::item_bar(links.len());
    let mut records = Vec::with_capacity(links.len());
    let mut attempted = 0;

    for link in links {
        attempted += 1;
        match fetch_item(fetcher, link, extract).await {
            Ok(record) => records.push(record),
            Err(err) => debug!(url = %link, error = %err, "skipping entry"),
        }
        pb.inc(1);
    }

    pb.finish();
    (records, attempted)
}

async fn fetch_item<R>(fetcher: &dyn Fetcher, link: &str, extract: Extractor<R>) -> Result<R, ItemError> {
    let body = fetcher.fetch_text(link).await?;
    let doc: Value = serde_json::from_str(&body)?;
    Ok(extract(&doc)?)
}

/// Serialize records as a JSON array indented by four spaces, with every
/// non-ASCII character written as a `\uXXXX` escape.
pub fn to_pretty_json<R: Serialize>(records: &[R]) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, AsciiPrettyFormatter::new());
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// `PrettyFormatter` layout with ASCII-only string contents.
struct AsciiPrettyFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl AsciiPrettyFormatter<'_> {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        for c in fragment.chars() {
            if c.is_ascii() {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Write atomically: write to a tmp file then rename.
///
/// The tmp file is removed again if the rename fails.
async fn write_records<R: Serialize>(dest: &Path, records: &[R]) -> Result<()> {
    let bytes = to_pretty_json(records).context("serialize records")?;

    let tmp = dest.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes)
        .await
        .with_context(|| format!("write file {}", tmp.display()))?;

    if let Err(err) = tokio::fs::rename(&tmp, dest).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(err).with_context(|| format!("move {} -> {}", tmp.display(), dest.display()));
    }

    Ok(())
}
