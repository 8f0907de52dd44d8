/// Whether `path` points at the login screen, which never carries the nav.
///
/// The site root and any path ending in `/` count as login screens.
#[must_use]
pub fn is_login_page(path: &str) -> bool {
    path.contains("login") || path == "/" || path.ends_with('/')
}

/// Page name reported in interaction logs: the last path segment, or `index`.
#[must_use]
pub fn page_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => "index",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_login_pages() {
        assert!(is_login_page("/"));
        assert!(is_login_page("/login"));
        assert!(is_login_page("/auth/login.html"));
        assert!(is_login_page("/main-menu/"));
    }

    #[test]
    fn other_pages_get_the_nav() {
        assert!(!is_login_page("/main-menu"));
        assert!(!is_login_page("/admin"));
        assert!(!is_login_page("/user-settings"));
        assert!(!is_login_page("/reports/weekly.html"));
    }

    #[test]
    fn page_name_is_last_segment() {
        assert_eq!(page_name("/main-menu"), "main-menu");
        assert_eq!(page_name("/reports/weekly.html"), "weekly.html");
    }

    #[test]
    fn empty_segment_is_index() {
        assert_eq!(page_name("/"), "index");
        assert_eq!(page_name(""), "index");
        assert_eq!(page_name("/reports/"), "index");
    }
}
