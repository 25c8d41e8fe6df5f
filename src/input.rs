use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use serde_json::{Map, Value};

use crate::session::SessionInput;

const LABEL_KEYS: [&str; 3] = ["respondent", "label", "name"];

#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub label: String,
    pub input: SessionInput,
}

/// Reads answer files: `.csv` holds one respondent per row, anything else is
/// JSON holding one flat answer object or an array of them.
pub fn load_inputs(path: &Path) -> anyhow::Result<Vec<LoadedInput>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let inputs = if is_csv {
        let reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        parse_csv(reader)?
    } else {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_json(&raw).with_context(|| format!("failed to parse {}", path.display()))?
    };

    if inputs.is_empty() {
        bail!("{} contains no answers", path.display());
    }
    Ok(inputs)
}

/// The first respondent in a file, for commands that work on one input.
pub fn load_single(path: &Path) -> anyhow::Result<SessionInput> {
    let mut inputs = load_inputs(path)?;
    if inputs.len() > 1 {
        tracing::warn!(
            path = %path.display(),
            count = inputs.len(),
            "file holds several respondents, using the first"
        );
    }
    Ok(inputs.swap_remove(0).input)
}

pub fn parse_json(raw: &str) -> anyhow::Result<Vec<LoadedInput>> {
    let value: Value = serde_json::from_str(raw)?;

    match value {
        Value::Object(fields) => Ok(vec![loaded(fields, 1)]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(loaded(fields, index + 1)),
                other => bail!("entry {} is not an object: {other}", index + 1),
            })
            .collect(),
        other => bail!("expected an answer object or a list of them, got {other}"),
    }
}

pub fn parse_csv<R: Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Vec<LoadedInput>> {
    let mut inputs = Vec::new();

    for (index, result) in reader.deserialize::<HashMap<String, String>>().enumerate() {
        let row = result.with_context(|| format!("invalid CSV row {}", index + 1))?;
        let fields: Map<String, Value> = row
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.trim().to_string(), Value::String(value)))
            .collect();
        inputs.push(loaded(fields, index + 1));
    }

    Ok(inputs)
}

fn loaded(fields: Map<String, Value>, position: usize) -> LoadedInput {
    let label = LABEL_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("respondent {position}"));

    LoadedInput {
        label,
        input: SessionInput::from_fields(&fields),
    }
}
