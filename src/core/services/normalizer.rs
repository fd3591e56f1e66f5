use serde_yaml::Value;

use crate::core::errors::{DotageError, Result};
use crate::core::models::decrypt_entry::DecryptEntry;
use crate::core::models::entry_record::EntryRecord;
use crate::core::traits::logger::Logger;

/// One item of a normalized directive block.
///
/// `label` names the entry for log messages; `entry` is the decrypt task or
/// the reason this item could not become one.
#[derive(Debug)]
pub struct NormalizedEntry {
    pub label: String,
    pub entry: Result<DecryptEntry>,
}

/// Normalize an `age` directive block into decrypt entries.
///
/// Accepted shapes:
/// - `{target: source}`
/// - `{target: {source: ..., identity/recipients/binary/mode}}`
/// - `[record | source, ...]` (deprecated, warns once)
///
/// Any other top-level shape is an error and nothing is produced.
/// Per-entry problems are returned in place so the caller can keep going.
pub fn normalize(
    data: &Value,
    defaults: &EntryRecord,
    log: &dyn Logger,
) -> Result<Vec<NormalizedEntry>> {
    match data {
        Value::Mapping(mapping) => Ok(mapping
            .iter()
            .map(|(key, value)| from_mapping_item(key, value, defaults))
            .collect()),
        Value::Sequence(items) => {
            log.warning("List format is deprecated, use dictionary format instead");
            Ok(items
                .iter()
                .enumerate()
                .map(|(index, item)| from_sequence_item(index, item, defaults))
                .collect())
        }
        other => Err(DotageError::InvalidShape {
            found: kind(other).to_string(),
        }),
    }
}

fn from_mapping_item(key: &Value, value: &Value, defaults: &EntryRecord) -> NormalizedEntry {
    let label = render(key);

    let Value::String(target) = key else {
        return NormalizedEntry {
            entry: Err(DotageError::InvalidEntry {
                target: label.clone(),
                detail: format!("target must be a string, got {}", kind(key)),
            }),
            label,
        };
    };

    let record = match value {
        Value::String(source) => Ok(EntryRecord {
            source: Some(source.clone()),
            ..EntryRecord::default()
        }),
        Value::Mapping(_) => parse_record(value, &label),
        other => Err(DotageError::InvalidEntry {
            target: label.clone(),
            detail: format!("expected a source path or a mapping, got {}", kind(other)),
        }),
    };

    let entry = record.and_then(|mut record| {
        // The mapping key always names the target.
        record.target = Some(target.clone());
        record.with_defaults(defaults).into_entry(&label)
    });

    NormalizedEntry { label, entry }
}

fn from_sequence_item(index: usize, item: &Value, defaults: &EntryRecord) -> NormalizedEntry {
    match item {
        Value::String(source) => {
            let record = EntryRecord {
                source: Some(source.clone()),
                ..EntryRecord::default()
            };
            NormalizedEntry {
                label: source.clone(),
                entry: record.with_defaults(defaults).into_entry(source),
            }
        }
        Value::Mapping(_) => {
            let fallback = format!("entry #{}", index + 1);
            let label = item
                .get("target")
                .or_else(|| item.get("source"))
                .and_then(Value::as_str)
                .map_or(fallback, str::to_string);
            let entry = parse_record(item, &label)
                .and_then(|record| record.with_defaults(defaults).into_entry(&label));
            NormalizedEntry { label, entry }
        }
        other => {
            let label = render(other);
            NormalizedEntry {
                entry: Err(DotageError::InvalidEntry {
                    target: label.clone(),
                    detail: format!("expected a source path or a mapping, got {}", kind(other)),
                }),
                label,
            }
        }
    }
}

fn parse_record(value: &Value, label: &str) -> Result<EntryRecord> {
    serde_yaml::from_value(value.clone()).map_err(|e| DotageError::InvalidEntry {
        target: label.to_string(),
        detail: e.to_string(),
    })
}

/// Human-readable name of a YAML value's type.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "dictionary",
        Value::Tagged(_) => "tagged value",
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| kind(other).to_string()),
    }
}
