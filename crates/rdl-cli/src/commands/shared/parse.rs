use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Convert a 1-based position from the command line to an index.
pub fn position(raw: usize, field: &str) -> anyhow::Result<usize> {
    raw.checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("{field} positions start at 1"))
}
