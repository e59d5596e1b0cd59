pub const BACKEND_URL_ENV: &str = "MEDCHAT_BACKEND_URL";
pub const DEFAULT_BASE: &str = "/api";

/// Resolve the base URL every REST path is appended to.
///
/// No value means the relative `/api` prefix served by the development proxy.
/// A configured value loses its trailing slashes and, once, a trailing `/api`
/// segment, since call sites already build `/api`-relative paths.
pub fn resolve_base_url(configured: Option<&str>) -> String {
    let raw = match configured.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return DEFAULT_BASE.to_string(),
    };

    let trimmed = raw.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("/api").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_string()
}

/// Turn a relative base into an absolute one by prefixing the proxy origin.
pub fn absolute_base(base: &str, proxy_origin: &str) -> String {
    if base.starts_with('/') {
        format!("{}{base}", proxy_origin.trim_end_matches('/'))
    } else {
        base.to_string()
    }
}
