use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` and `{{ env.VAR | default("x") }}` in raw TOML
///
/// Comment lines are copied through untouched, so a commented-out
/// placeholder never requires its variable to be set.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
                .expect("must be valid regex")
        })
    }

    let mut lines = Vec::new();

    for line in input.split('\n') {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut failure = None;
        let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
            match resolve(&captures[1], captures.get(2).map(|m| m.as_str())) {
                Ok(value) => value,
                Err(e) => {
                    failure.get_or_insert(e);
                    String::new()
                }
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }

        lines.push(expanded.into_owned());
    }

    Ok(lines.join("\n"))
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_string()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}
