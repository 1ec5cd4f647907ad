//! Ambient environment detection.

const CI_VARS: &[&str] = &[
    "CONTINUOUS_INTEGRATION",
    "BUILD_NUMBER",
    "RUN_ID",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "JENKINS_URL",
    "TRAVIS",
    "CIRCLECI",
    "BUILDKITE",
    "TF_BUILD",
    "TEAMCITY_VERSION",
];

/// Whether the process runs under a CI service.
///
/// `CI=false` (or `0`) wins over every vendor variable; an empty `CI` counts
/// as unset.
pub fn is_ci() -> bool {
    is_ci_with(|name| std::env::var(name).ok())
}

pub(crate) fn is_ci_with(lookup: impl Fn(&str) -> Option<String>) -> bool {
    match lookup("CI").as_deref().map(str::trim) {
        Some("false") | Some("0") => false,
        Some(value) if !value.is_empty() => true,
        _ => CI_VARS.iter().any(|name| lookup(name).is_some()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_is_interactive() {
        assert!(!is_ci_with(env(&[])));
    }

    #[test]
    fn ci_variable() {
        assert!(is_ci_with(env(&[("CI", "true")])));
        assert!(is_ci_with(env(&[("CI", "1")])));
    }

    #[test]
    fn vendor_variables() {
        assert!(is_ci_with(env(&[("GITHUB_ACTIONS", "true")])));
        assert!(is_ci_with(env(&[("JENKINS_URL", "http://jenkins")])));
        assert!(is_ci_with(env(&[("BUILD_NUMBER", "42")])));
    }

    #[test]
    fn empty_ci_is_unset() {
        assert!(!is_ci_with(env(&[("CI", "")])));
        assert!(!is_ci_with(env(&[("CI", "  ")])));
        assert!(is_ci_with(env(&[("CI", ""), ("GITLAB_CI", "true")])));
    }

    #[test]
    fn explicit_false_overrides_vendor() {
        assert!(!is_ci_with(env(&[("CI", "false"), ("GITHUB_ACTIONS", "true")])));
        assert!(!is_ci_with(env(&[("CI", "0")])));
    }
}
