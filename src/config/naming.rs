//! Name casing transforms for JSON keys and environment variables.

/// Casing applied to member names before they are used as JSON paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamingConvention {
    /// Use names and annotations exactly as declared.
    Verbatim,
    /// `SomeApiKey` -> `someApiKey`, `URLValue` -> `urlValue`.
    #[default]
    CamelCase,
    /// `SomeApiKey` -> `some_api_key`.
    SnakeCase,
}

impl NamingConvention {
    /// Applies the convention to every `.`-separated segment of `path`.
    pub fn apply(self, path: &str) -> String {
        match self {
            Self::Verbatim => path.to_string(),
            Self::CamelCase => map_segments(path, to_camel_case),
            Self::SnakeCase => map_segments(path, to_snake_case),
        }
    }
}

fn map_segments(path: &str, f: fn(&str) -> String) -> String {
    path.split('.').map(f).collect::<Vec<_>>().join(".")
}

fn to_camel_case(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len());

    // Lower-case the leading run of capitals, but leave the last one alone
    // when it starts the next word ("URLValue" -> "urlValue").
    let mut lowering = true;
    for (i, &c) in chars.iter().enumerate() {
        if lowering && c.is_uppercase() {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| !n.is_uppercase());
            if i > 0 && next_is_lower {
                lowering = false;
                out.push(c);
            } else {
                out.extend(c.to_lowercase());
            }
        } else {
            lowering = false;
            out.push(c);
        }
    }
    out
}

fn to_snake_case(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts an environment variable suffix such as `MAX_RETRY_COUNT` into
/// the member name `MaxRetryCount`.
///
/// Each `_`-separated segment keeps its first character upper-cased and the
/// rest lower-cased. Empty segments contribute nothing.
pub fn screaming_snake_to_upper_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for segment in name.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}
