use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)").unwrap());

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_.]+").unwrap());

const ARCHIVE_SUFFIXES: &[&str] = &[".whl", ".tar.gz", ".tgz", ".tar.bz2", ".zip"];

/// Distribution name of a requirement such as `pandas>=2`, `uvicorn[standard]`
/// or `pkg @ https://...`.
///
/// Direct URLs, local paths and archive files carry no name and yield `None`.
pub fn requirement_name(requirement: &str) -> Option<String> {
    let trimmed = requirement.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('.')
        || trimmed.starts_with('/')
        || trimmed.starts_with('-')
    {
        return None;
    }

    // Everything before the first specifier, marker, extra or `@`.
    let head = trimmed
        .split(|c: char| "<>=!~;@[,".contains(c) || c.is_whitespace())
        .next()
        .unwrap_or(trimmed);
    let lower = head.to_lowercase();
    if head.contains(['/', '\\']) || ARCHIVE_SUFFIXES.iter().any(|s| lower.ends_with(*s)) {
        return None;
    }

    let caps = NAME_RE.captures(trimmed)?;
    let name = caps.get(1)?;
    let rest = &trimmed[name.end()..];

    // `git+https://...` and `C:\...` match a prefix but are not names.
    if rest.starts_with("://") || rest.starts_with('+') || rest.starts_with(":\\") {
        return None;
    }

    Some(name.as_str().to_string())
}

/// PEP 503 normalized form used to compare distribution names.
pub fn normalize_name(name: &str) -> String {
    SEPARATOR_RE.replace_all(&name.to_lowercase(), "-").into_owned()
}
