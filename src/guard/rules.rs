use crate::config::GuardConfig;

/// What the guard does with one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Cookie-based redirect rules.
///
/// Only presence of a non-empty cookie value is checked; the token itself is
/// validated by the backend on the next API call.
#[derive(Debug, Clone)]
pub struct RouteRules {
    public_paths: Vec<String>,
    auth_paths: Vec<String>,
    excluded_prefixes: Vec<String>,
    login_path: String,
    dashboard_path: String,
}

impl RouteRules {
    pub fn from_config(config: &GuardConfig) -> Self {
        RouteRules {
            public_paths: config.public_paths.clone(),
            auth_paths: config.auth_paths.clone(),
            excluded_prefixes: config.excluded_prefixes.clone(),
            login_path: config.login_path.clone(),
            dashboard_path: config.dashboard_path.clone(),
        }
    }

    /// Paths the guard never looks at: API calls and static assets.
    pub fn is_excluded(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        self.excluded_prefixes
            .iter()
            .any(|prefix| rest.starts_with(prefix.as_str()))
    }

    /// Decides a request for `path` carrying `cookie` (the auth cookie value, if any).
    ///
    /// Signed-in visitors are bounced off the login and register pages;
    /// signed-out visitors may only see public paths. Matching is exact.
    pub fn evaluate(&self, path: &str, cookie: Option<&str>) -> GuardDecision {
        if self.is_excluded(path) {
            return GuardDecision::Allow;
        }
        let signed_in = cookie.is_some_and(|value| !value.is_empty());

        if signed_in && contains(&self.auth_paths, path) {
            return GuardDecision::Redirect(self.dashboard_path.clone());
        }
        if !signed_in && !contains(&self.public_paths, path) {
            return GuardDecision::Redirect(self.login_path.clone());
        }
        GuardDecision::Allow
    }
}

impl GuardDecision {
    /// Metric label for this decision.
    pub fn outcome(&self, rules: &RouteRules) -> &'static str {
        match self {
            GuardDecision::Allow => "allow",
            GuardDecision::Redirect(to) if *to == rules.login_path => "redirect_login",
            GuardDecision::Redirect(_) => "redirect_dashboard",
        }
    }
}

fn contains(paths: &[String], path: &str) -> bool {
    paths.iter().any(|p| p == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RouteRules {
        RouteRules::from_config(&GuardConfig::default())
    }

    #[test]
    fn test_decision_table() {
        let rules = rules();
        let login = || GuardDecision::Redirect("/login".to_string());
        let dashboard = || GuardDecision::Redirect("/dashboard".to_string());

        let cases = [
            ("/dashboard", None, login()),
            ("/dashboard", Some("tok"), GuardDecision::Allow),
            ("/login", Some("tok"), dashboard()),
            ("/register", Some("tok"), dashboard()),
            ("/login", None, GuardDecision::Allow),
            ("/register", None, GuardDecision::Allow),
            ("/", None, GuardDecision::Allow),
            ("/", Some("tok"), GuardDecision::Allow),
            ("/onboarding", None, login()),
            ("/chat", Some("tok"), GuardDecision::Allow),
        ];
        for (path, cookie, expected) in cases {
            assert_eq!(rules.evaluate(path, cookie), expected, "{} {:?}", path, cookie);
        }
    }

    #[test]
    fn test_empty_cookie_counts_as_signed_out() {
        let rules = rules();
        assert_eq!(
            rules.evaluate("/dashboard", Some("")),
            GuardDecision::Redirect("/login".to_string())
        );
        assert_eq!(rules.evaluate("/login", Some("")), GuardDecision::Allow);
    }

    #[test]
    fn test_matching_is_exact() {
        let rules = rules();
        assert_eq!(
            rules.evaluate("/login/", None),
            GuardDecision::Redirect("/login".to_string())
        );
        assert_eq!(rules.evaluate("/login/", Some("tok")), GuardDecision::Allow);
    }

    #[test]
    fn test_excluded_paths_are_never_redirected() {
        let rules = rules();
        for path in [
            "/api/v1/auth/me",
            "/_next/static/chunk.js",
            "/_next/image",
            "/favicon.ico",
        ] {
            assert!(rules.is_excluded(path), "{}", path);
            assert_eq!(rules.evaluate(path, None), GuardDecision::Allow);
        }
        assert!(!rules.is_excluded("/dashboard"));
    }

    #[test]
    fn test_outcome_labels() {
        let rules = rules();
        assert_eq!(rules.evaluate("/", None).outcome(&rules), "allow");
        assert_eq!(rules.evaluate("/log", None).outcome(&rules), "redirect_login");
        assert_eq!(
            rules.evaluate("/login", Some("tok")).outcome(&rules),
            "redirect_dashboard"
        );
    }
}
