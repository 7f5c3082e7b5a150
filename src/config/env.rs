use serde_json::Value;

/// Expand environment variable references in a string.
///
/// Supported syntaxes:
/// - `${VAR}` - replaced with env var value; error if unset
/// - `${VAR:-fallback}` - replaced with env var value, or fallback if unset or empty
/// - `$env:VAR` - same as `${VAR}`
/// - `$$` - a literal `$`, for secrets that would otherwise look like a reference
///
/// Any other `$` is copied through literally. Errors carry a human-readable detail.
pub fn expand_env_vars(input: &str) -> Result<String, String> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            result.push('$');
            rest = tail;
        } else if let Some(braced) = after.strip_prefix('{') {
            let close = braced
                .find('}')
                .ok_or_else(|| format!("Unclosed variable reference: ${{{braced}"))?;
            let expr = &braced[..close];
            match expr.split_once(":-") {
                Some((name, fallback)) => match std::env::var(name) {
                    Ok(val) if !val.is_empty() => result.push_str(&val),
                    _ => result.push_str(fallback),
                },
                None => result.push_str(&lookup(expr)?),
            }
            rest = &braced[close + 1..];
        } else if let Some(tail) = after.strip_prefix("env:") {
            let end = tail
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(tail.len());
            let name = &tail[..end];
            if name.is_empty() {
                return Err("Empty variable name in $env: reference".to_string());
            }
            result.push_str(&lookup(name)?);
            rest = &tail[end..];
        } else {
            result.push('$');
            rest = after;
        }
    }

    result.push_str(rest);
    Ok(result)
}

fn lookup(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("Environment variable '{name}' is not set"))
}

/// Expand environment references in every string inside a JSON value.
pub fn expand_json_strings(value: &mut Value) -> Result<(), String> {
    match value {
        Value::String(s) => {
            if s.contains('$') {
                *s = expand_env_vars(s)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                expand_json_strings(item)?;
            }
        }
        Value::Object(map) => {
            for (_key, item) in map.iter_mut() {
                expand_json_strings(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}
