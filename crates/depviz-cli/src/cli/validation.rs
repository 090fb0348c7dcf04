use depviz_graph::Framework;

/// Parse a `--framework` value.
pub fn parse_framework(s: &str) -> Result<Framework, String> {
    s.parse()
}

/// Parse a `--alias PATTERN=TARGET` value.
///
/// Both sides must be non-empty. The pattern may end in `/*`, which is the
/// same as leaving it off.
pub fn parse_alias(s: &str) -> Result<(String, String), String> {
    let Some((pattern, target)) = s.split_once('=') else {
        return Err(format!("Alias must be PATTERN=TARGET: '{s}'"));
    };

    let pattern = pattern.trim().trim_end_matches("/*");
    let target = target.trim().trim_end_matches("/*");
    if pattern.is_empty() || target.is_empty() {
        return Err(format!("Alias pattern and target cannot be empty: '{s}'"));
    }

    Ok((pattern.to_string(), target.to_string()))
}
