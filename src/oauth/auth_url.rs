use reqwest::Url;

use crate::config::Config;

/// Prefix of the `state` parameter; the client id is appended.
pub const STATE_PREFIX: &str = "oauth-cli:";

/// Optional overrides for [`build_auth_url`].
#[derive(Debug, Clone, Default)]
pub struct AuthUrlArgs {
    /// Used only when the config has no scope of its own.
    pub scope: Option<Vec<String>>,
    pub redirect_uri: Option<String>,
}

/// The `state` value sent with the authorization request.
///
/// It is not checked when the redirect comes back.
pub fn state_for(config: &Config) -> String {
    format!("{STATE_PREFIX}{}", config.client_id())
}

/// Build the authorization endpoint URL the user visits to grant access.
pub fn build_auth_url(config: &Config, args: &AuthUrlArgs) -> String {
    let scope = resolve_scope(config.scope(), args.scope.as_deref());
    let redirect_uri = args
        .redirect_uri
        .as_deref()
        .unwrap_or_else(|| config.redirect_url());

    // auth_url was validated when the Config was built.
    let mut url = match Url::parse(config.auth_url()) {
        Ok(url) => url,
        Err(_) => return config.auth_url().to_string(),
    };

    let mut params: Vec<(&str, String)> = vec![
        ("response_type", "code".to_string()),
        ("redirect_uri", redirect_uri.to_string()),
    ];
    if let Some(scope) = scope {
        params.push(("scope", scope));
    }
    params.push(("state", state_for(config)));
    params.push(("client_id", config.client_id().to_string()));

    set_query_params(&mut url, &params);
    url.to_string()
}

/// Config scope wins over the caller's; empty lists count as absent.
fn resolve_scope(config_scope: Option<&[String]>, arg_scope: Option<&[String]>) -> Option<String> {
    config_scope
        .filter(|s| !s.is_empty())
        .or(arg_scope.filter(|s| !s.is_empty()))
        .map(|s| s.join(" "))
}

/// Set each parameter, replacing same-named ones and keeping everything else.
fn set_query_params(url: &mut Url, params: &[(&str, String)]) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(name, _)| k == name))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    pairs.extend_pairs(kept);
    for (name, value) in params {
        pairs.append_pair(name, value);
    }
}
