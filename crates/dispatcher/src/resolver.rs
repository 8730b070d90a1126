//! Recipient resolution: record field -> directory lookup

use contracts::{Record, RecipientDirectory};

use crate::error::ResolveError;

/// Recipient resolved for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecipient {
    /// Name as found in the record
    pub raw_name: String,
    /// Destination channel id from the directory
    pub channel_id: String,
}

/// Extract the raw recipient name stored under `field_key`
pub fn extract_recipient<'a>(record: &'a Record, field_key: &str) -> Result<&'a str, ResolveError> {
    let value = record
        .get(field_key)
        .ok_or_else(|| ResolveError::MissingField {
            key: field_key.to_string(),
        })?;

    value
        .as_text()
        .ok_or_else(|| ResolveError::UnsupportedValueType {
            key: field_key.to_string(),
            kind: value.kind(),
        })
}

/// Resolve the record's recipient to a channel id
///
/// Pure function of its inputs. The name is matched exactly (case-sensitive,
/// no trimming).
pub fn resolve_recipient(
    record: &Record,
    field_key: &str,
    directory: &RecipientDirectory,
) -> Result<ResolvedRecipient, ResolveError> {
    let name = extract_recipient(record, field_key)?;

    let channel_id = directory
        .lookup(name)
        .ok_or_else(|| ResolveError::UnknownRecipient {
            name: name.to_string(),
        })?;

    Ok(ResolvedRecipient {
        raw_name: name.to_string(),
        channel_id: channel_id.to_string(),
    })
}
