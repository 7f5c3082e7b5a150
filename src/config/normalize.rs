use serde_json::{Map, Value};

use crate::error::ConfigError;

use super::types::Config;

/// Config fields pulled out of a recognized JSON shape, not yet validated.
#[derive(Debug)]
struct RawConfig<'a> {
    client_id: Option<&'a Value>,
    client_secret: Option<&'a Value>,
    auth_url: Option<&'a Value>,
    token_url: Option<&'a Value>,
    redirect_url: Option<&'a Value>,
    scope: Option<&'a Value>,
}

/// A recognizer for one provider's config layout. Returns `None` to decline.
struct ConfigShape {
    name: &'static str,
    extract: for<'a> fn(&'a Map<String, Value>) -> Option<RawConfig<'a>>,
}

/// Shapes are tried in order; the first one that matches wins.
const SHAPES: &[ConfigShape] = &[
    ConfigShape {
        name: "flat",
        extract: flat_shape,
    },
    ConfigShape {
        name: "web",
        extract: web_shape,
    },
];

/// Parse an arbitrary JSON value into a validated [`Config`].
pub fn normalize(json: &Value) -> Result<Config, ConfigError> {
    let obj = json.as_object().ok_or(ConfigError::InvalidShape)?;

    for shape in SHAPES {
        if let Some(raw) = (shape.extract)(obj) {
            tracing::debug!("OAuth config matched '{}' shape", shape.name);
            return validate(raw);
        }
    }

    Err(ConfigError::InvalidShape)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn flat_shape(obj: &Map<String, Value>) -> Option<RawConfig<'_>> {
    present(obj.get("client_id"))?;
    present(obj.get("client_secret"))?;
    Some(RawConfig {
        client_id: obj.get("client_id"),
        client_secret: obj.get("client_secret"),
        auth_url: obj.get("auth_url"),
        token_url: obj.get("token_url"),
        redirect_url: obj.get("redirect_url"),
        scope: obj.get("scope"),
    })
}

// Google-style client secrets file.
fn web_shape(obj: &Map<String, Value>) -> Option<RawConfig<'_>> {
    let web = obj.get("web")?.as_object()?;
    present(web.get("client_id"))?;
    Some(RawConfig {
        client_id: web.get("client_id"),
        client_secret: web.get("client_secret"),
        auth_url: web.get("auth_uri"),
        token_url: web.get("token_uri"),
        redirect_url: web
            .get("redirect_uris")
            .and_then(Value::as_array)
            .and_then(|uris| uris.first()),
        scope: web.get("scope"),
    })
}

fn validate(raw: RawConfig<'_>) -> Result<Config, ConfigError> {
    Config::new(
        string_field("client_id", raw.client_id)?,
        string_field("client_secret", raw.client_secret)?,
        string_field("auth_url", raw.auth_url)?,
        string_field("token_url", raw.token_url)?,
        string_field("redirect_url", raw.redirect_url)?,
        scope_field(raw.scope)?,
    )
}

fn string_field(field: &'static str, value: Option<&Value>) -> Result<String, ConfigError> {
    match present(value) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::invalid(field, "must be a string")),
        None => Err(ConfigError::invalid(field, "is required")),
    }
}

fn scope_field(value: Option<&Value>) -> Result<Option<Vec<String>>, ConfigError> {
    match present(value) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.split_whitespace().map(String::from).collect())),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(String::from)
                    .ok_or_else(|| ConfigError::invalid("scope", "entries must be strings"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(ConfigError::invalid(
            "scope",
            "must be a list of strings or a space-delimited string",
        )),
    }
}
