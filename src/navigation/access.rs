use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteConfig {
    pub pattern: &'static str,
    pub allow: Access,
}

const fn entry(pattern: &'static str, allow: Access) -> RouteConfig {
    RouteConfig { pattern, allow }
}

/// Static route-access table. Patterns use `:name` segments and an optional
/// trailing `/*` wildcard.
pub static ROUTE_ACCESS: &[RouteConfig] = &[
    entry("/", Access::Public),
    entry("/jobs", Access::Public),
    entry("/job/:id", Access::Public),
    entry("/employers", Access::Public),
    entry("/employers/post-job", Access::Authenticated),
    entry("/employers/dashboard", Access::Authenticated),
    entry("/about", Access::Public),
    entry("/contact", Access::Public),
    entry("/login", Access::Public),
    entry("/signup", Access::Public),
    entry("/callback", Access::Public),
    entry("/error", Access::Public),
    entry("/reset-password/*", Access::Public),
    entry("/prompt-password/*", Access::Public),
];

/// Looks up the access entry for `path`, which may itself be a route pattern.
/// An exact entry wins over a `:param` or wildcard match.
pub fn route_config(path: &str) -> Option<&'static RouteConfig> {
    ROUTE_ACCESS
        .iter()
        .find(|config| config.pattern == path)
        .or_else(|| {
            ROUTE_ACCESS
                .iter()
                .find(|config| pattern_matches(config.pattern, path))
        })
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern = segments(pattern);
    let path = segments(path);

    if let Some((&"*", prefix)) = pattern.split_last() {
        return path.len() >= prefix.len()
            && prefix
                .iter()
                .zip(&path)
                .all(|(expected, actual)| segment_matches(expected, actual));
    }

    pattern.len() == path.len()
        && pattern
            .iter()
            .zip(&path)
            .all(|(expected, actual)| segment_matches(expected, actual))
}

fn segment_matches(expected: &str, actual: &str) -> bool {
    expected.starts_with(':') || expected == actual
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_entries() {
        assert_eq!(route_config("/jobs").map(|c| c.allow), Some(Access::Public));
        assert_eq!(
            route_config("/employers/dashboard").map(|c| c.allow),
            Some(Access::Authenticated)
        );
    }

    #[test]
    fn param_and_wildcard_entries() {
        assert_eq!(route_config("/job/42").map(|c| c.pattern), Some("/job/:id"));
        assert_eq!(
            route_config("/reset-password/:appId/:fields").map(|c| c.pattern),
            Some("/reset-password/*")
        );
        assert_eq!(
            route_config("/prompt-password/app/a@b.c/google").map(|c| c.allow),
            Some(Access::Public)
        );
    }

    #[test]
    fn unknown_paths_have_no_entry() {
        assert!(route_config("/*").is_none());
        assert!(route_config("/employers/post-job/extra").is_none());
    }
}
