use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, None)),
        Value::Object(map) => {
            // Pages and listings carry their rows under `items`/`rows`/`recent`.
            for key in ["items", "rows", "recent"] {
                if let Some(Value::Array(items)) = map.get(key) {
                    let footer = summary_footer(&map, key);
                    return Ok(render_array_table(items, footer.as_deref()));
                }
            }
            let headers = ["key", "value"];
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
    }
}

/// The scalar fields next to a row list, e.g. `page: 1  total_pages: 4`.
fn summary_footer(map: &serde_json::Map<String, Value>, rows_key: &str) -> Option<String> {
    let parts = map
        .iter()
        .filter(|(key, value)| key.as_str() != rows_key && !value.is_array() && !value.is_object())
        .map(|(key, value)| format!("{key}: {}", value_to_cell(value)))
        .collect::<Vec<_>>();
    (!parts.is_empty()).then(|| parts.join("  "))
}

fn render_array_table(items: &[Value], footer: Option<&str>) -> String {
    let body = if items.is_empty() {
        String::from("(no rows)")
    } else if items.iter().all(Value::is_object) {
        object_rows_table(items)
    } else {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        table::render_entity_table(&headers, &rows, table_options())
    };

    match footer {
        Some(footer) => format!("{body}\n\n{footer}"),
        None => body,
    }
}

/// Columns are the union of every row's keys.
fn object_rows_table(items: &[Value]) -> String {
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
