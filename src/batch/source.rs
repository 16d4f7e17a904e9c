//! CSV batch source.
//!
//! Columns are matched by header name, so their order does not matter and extra
//! columns are ignored. Every row is validated before any record is processed:
//! one bad row rejects the whole file.

use super::UpdateRequest;
use crate::errors::BatchSourceError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

pub const SUBSCRIPTION_ID_COLUMN: &str = "subscription_id";
pub const NEW_PRICE_COLUMN: &str = "new_delivery_price";

static PRICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("price pattern is a valid regex"));

/// Whether `price` is a non-negative decimal such as `9`, `9.9` or `9.99`.
pub fn is_valid_price(price: &str) -> bool {
    PRICE_PATTERN.is_match(price)
}

/// Read and validate every row of the batch file at `path`.
pub fn read_batch(path: &Path) -> Result<Vec<UpdateRequest>, BatchSourceError> {
    if !path.is_file() {
        return Err(BatchSourceError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let read_err = |source: csv::Error| BatchSourceError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_err)?;

    let headers = reader.headers().map_err(read_err)?.clone();
    for column in [SUBSCRIPTION_ID_COLUMN, NEW_PRICE_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(BatchSourceError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let invalid_row = |line: u64, message: String| BatchSourceError::InvalidRow {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut requests = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(source) => {
                return Err(match source.position() {
                    Some(pos) => invalid_row(pos.line(), source.to_string()),
                    None => read_err(source),
                });
            }
        }
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let request: UpdateRequest = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid_row(line, e.to_string()))?;
        validate(&request).map_err(|message| invalid_row(line, message))?;
        requests.push(request);
    }

    Ok(requests)
}

fn validate(request: &UpdateRequest) -> Result<(), String> {
    if request.subscription_id.is_empty() {
        return Err(format!("{SUBSCRIPTION_ID_COLUMN} is empty"));
    }
    if request.new_delivery_price.is_empty() {
        return Err(format!("{NEW_PRICE_COLUMN} is empty"));
    }
    if !is_valid_price(&request.new_delivery_price) {
        return Err(format!(
            "{NEW_PRICE_COLUMN} '{}' is not a decimal price",
            request.new_delivery_price
        ));
    }
    Ok(())
}
