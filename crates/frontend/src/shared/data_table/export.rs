//! CSV export: backend export endpoint first, the loaded rows as a fallback.

use chrono::{DateTime, Utc};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::columns::ColumnDef;
use super::controller::ExportJob;
use super::csv::CsvBuilder;
use super::error::TableError;
use super::row::TableRow;
use crate::shared::config::AppConfig;
use crate::system::auth::gateway::{ApiGateway, BlobResponse};

const CSV_MIME: &str = "text/csv;charset=utf-8;";
const BOM: char = '\u{FEFF}';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// No rows loaded and the backend export, if any, failed with `cause`.
    #[error("{}", nothing_to_export_message(.cause.as_ref()))]
    NothingToExport { cause: Option<TableError> },

    #[error("Could not start the download: {0}")]
    Browser(String),
}

fn nothing_to_export_message(cause: Option<&TableError>) -> String {
    match cause {
        None => "There are no rows to export.".to_string(),
        Some(e) if e.is_timeout() => "The export timed out and no rows are loaded. \
             Narrow the filters and try again."
            .to_string(),
        Some(e) => format!("Server export failed ({}) and no rows are loaded.", e),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub timeout_ms: u32,
    pub chunk_rows: usize,
    pub yield_every: usize,
}

impl ExportSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            timeout_ms: config.api.export_timeout_secs.saturating_mul(1000),
            chunk_rows: config.table.csv_chunk_rows.max(1),
            yield_every: config.table.csv_yield_every,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// File produced by the backend.
    Server { filename: String },
    /// Built from the loaded rows. `cause` is why the backend path was not
    /// used (`None` when the page has no export endpoint).
    Fallback {
        filename: String,
        rows: usize,
        cause: Option<TableError>,
    },
}

impl ExportOutcome {
    /// Toast text for a finished export.
    pub fn message(&self) -> String {
        match self {
            ExportOutcome::Server { filename } => format!("Exported {}", filename),
            ExportOutcome::Fallback { rows, cause: None, .. } => {
                format!("Exported {} rows", rows)
            }
            ExportOutcome::Fallback {
                rows,
                cause: Some(e),
                ..
            } if e.is_timeout() => format!(
                "The export timed out, so only the {} loaded rows were saved. \
                 Narrow the filters to export everything.",
                rows
            ),
            ExportOutcome::Fallback {
                rows,
                cause: Some(e),
                ..
            } => format!(
                "Server export failed ({}). Saved the {} loaded rows instead.",
                e, rows
            ),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ExportOutcome::Fallback { cause: Some(_), .. })
    }
}

/// File name from a `Content-Disposition` header. `filename*=UTF-8''...`
/// wins over `filename="..."`.
pub fn parse_content_disposition(header: &str) -> Option<String> {
    let params: Vec<&str> = header.split(';').map(str::trim).collect();

    let extended = params.iter().find_map(|p| {
        let (name, value) = p.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("filename*") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        let encoded = value
            .get(..7)
            .filter(|prefix| prefix.eq_ignore_ascii_case("utf-8''"))
            .map(|_| &value[7..])
            .unwrap_or(value);
        urlencoding::decode(encoded).ok().map(|s| s.into_owned())
    });

    let plain = || {
        params.iter().find_map(|p| {
            let (name, value) = p.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("filename")
                .then(|| value.trim().trim_matches('"').to_string())
        })
    };

    extended.or_else(plain).filter(|name| !name.is_empty())
}

pub fn default_filename(stem: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.csv", stem, now.format("%Y%m%d_%H%M%S"))
}

/// Runs one export job to completion. The caller owns the re-entrancy guard.
pub async fn run_export<R: TableRow>(
    gateway: &ApiGateway,
    job: ExportJob<R>,
    settings: ExportSettings,
) -> Result<ExportOutcome, ExportError> {
    let cause = match job.endpoint {
        Some(endpoint) => {
            match export_from_server(gateway, endpoint, &job.pairs, settings.timeout_ms).await {
                Ok(file) => {
                    let filename = file
                        .content_disposition
                        .as_deref()
                        .and_then(parse_content_disposition)
                        .unwrap_or_else(|| default_filename(job.file_stem, Utc::now()));
                    let mime = file.content_type.as_deref().unwrap_or(CSV_MIME);
                    let blob = bytes_blob(&file.bytes, mime)?;
                    download_blob(&blob, &filename)?;
                    return Ok(ExportOutcome::Server { filename });
                }
                Err(e) => {
                    log::warn!("{}: server export failed, using loaded rows: {}", job.file_stem, e);
                    Some(e)
                }
            }
        }
        None => None,
    };

    if job.rows.is_empty() {
        return Err(ExportError::NothingToExport { cause });
    }
    let csv = build_csv_chunked(&job.columns, &job.rows, settings).await;
    let filename = default_filename(job.file_stem, Utc::now());
    download_blob(&text_blob(&csv)?, &filename)?;
    Ok(ExportOutcome::Fallback {
        filename,
        rows: job.rows.len(),
        cause,
    })
}

async fn export_from_server(
    gateway: &ApiGateway,
    endpoint: &str,
    pairs: &[(String, String)],
    timeout_ms: u32,
) -> Result<BlobResponse, TableError> {
    let controller = web_sys::AbortController::new()
        .map_err(|e| TableError::Transport(format!("{:?}", e)))?;
    let signal = controller.signal();
    let timer = Timeout::new(timeout_ms, move || controller.abort());
    let result = gateway.get_blob(endpoint, pairs, &signal).await;
    // dropping the handle cancels the pending abort
    drop(timer);
    result
}

/// Builds the fallback document in chunks, yielding to the event loop every
/// `yield_every` chunks so large tables do not freeze the page.
pub async fn build_csv_chunked<R: TableRow>(
    columns: &[ColumnDef],
    rows: &[R],
    settings: ExportSettings,
) -> String {
    let mut builder = CsvBuilder::new(columns);
    for (i, chunk) in rows.chunks(settings.chunk_rows.max(1)).enumerate() {
        builder.push_rows(chunk);
        if settings.yield_every > 0 && (i + 1) % settings.yield_every == 0 {
            TimeoutFuture::new(0).await;
        }
    }
    builder.finish()
}

/// CSV text as a blob, BOM-prefixed so spreadsheet apps detect UTF-8.
fn text_blob(csv: &str) -> Result<Blob, ExportError> {
    let mut content = String::with_capacity(csv.len() + 3);
    content.push(BOM);
    content.push_str(csv);

    let array = js_sys::Array::new();
    array.push(&JsValue::from_str(&content));
    let properties = BlobPropertyBag::new();
    properties.set_type(CSV_MIME);
    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| ExportError::Browser(format!("blob: {:?}", e)))
}

fn bytes_blob(bytes: &[u8], mime: &str) -> Result<Blob, ExportError> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));
    let properties = BlobPropertyBag::new();
    properties.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| ExportError::Browser(format!("blob: {:?}", e)))
}

/// Clicks a transient anchor pointing at an object URL, then revokes it.
fn download_blob(blob: &Blob, filename: &str) -> Result<(), ExportError> {
    let fail = |what: &str, e: JsValue| ExportError::Browser(format!("{}: {:?}", what, e));
    let window = web_sys::window().ok_or(ExportError::Browser("no window".into()))?;
    let document = window
        .document()
        .ok_or(ExportError::Browser("no document".into()))?;
    let body = document
        .body()
        .ok_or(ExportError::Browser("no body".into()))?;

    let url = Url::create_object_url_with_blob(blob).map_err(|e| fail("object url", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| fail("anchor", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| fail("anchor cast", e.into()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    let _ = anchor.style().set_property("display", "none");

    body.append_child(&anchor).map_err(|e| fail("append", e))?;
    anchor.click();
    let _ = body.remove_child(&anchor);

    Url::revoke_object_url(&url).map_err(|e| fail("revoke", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_extended_filename_wins() {
        let header = r#"attachment; filename="leads.csv"; filename*=UTF-8''leads%20%E2%80%93%20May.csv"#;
        assert_eq!(
            parse_content_disposition(header).as_deref(),
            Some("leads \u{2013} May.csv")
        );
    }

    #[test]
    fn test_plain_filename() {
        assert_eq!(
            parse_content_disposition(r#"attachment; filename="contacts_2024.csv""#).as_deref(),
            Some("contacts_2024.csv")
        );
        assert_eq!(
            parse_content_disposition("attachment; filename=report.csv").as_deref(),
            Some("report.csv")
        );
    }

    #[test]
    fn test_no_filename() {
        assert_eq!(parse_content_disposition("attachment"), None);
        assert_eq!(parse_content_disposition(r#"attachment; filename="""#), None);
    }

    #[test]
    fn test_default_filename() {
        let now = Utc.with_ymd_and_hms(2024, 2, 9, 14, 5, 7).unwrap();
        assert_eq!(default_filename("leads", now), "leads_20240209_140507.csv");
    }

    #[test]
    fn test_timeout_message_suggests_narrowing() {
        let outcome = ExportOutcome::Fallback {
            filename: "x.csv".into(),
            rows: 25,
            cause: Some(TableError::Timeout),
        };
        assert!(outcome.is_degraded());
        assert!(outcome.message().contains("Narrow the filters"));

        let outcome = ExportOutcome::Fallback {
            filename: "x.csv".into(),
            rows: 25,
            cause: None,
        };
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.message(), "Exported 25 rows");
    }

    #[test]
    fn test_empty_export_keeps_server_cause() {
        let timed_out = ExportError::NothingToExport {
            cause: Some(TableError::Timeout),
        };
        assert!(timed_out.to_string().contains("Narrow the filters"));

        let failed = ExportError::NothingToExport {
            cause: Some(TableError::Server {
                status: 500,
                message: "boom".into(),
            }),
        };
        assert!(failed.to_string().contains("boom"));

        let plain = ExportError::NothingToExport { cause: None };
        assert_eq!(plain.to_string(), "There are no rows to export.");
    }
}
