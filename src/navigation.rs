//! Full-page redirects triggered from the nav header.

pub const LOGOUT_PROMPT: &str = "Are you sure you want to logout?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    MainMenu,
    Logout,
    UserSettings,
    Admin,
}

impl NavTarget {
    #[must_use]
    pub fn href(self) -> &'static str {
        match self {
            Self::MainMenu => "/main-menu",
            Self::Logout => "/logout",
            Self::UserSettings => "/user-settings",
            Self::Admin => "/admin",
        }
    }
}

/// Redirect the browser to `target`. Does nothing outside the browser.
pub fn navigate(target: NavTarget) {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            leptos::logging::error!("Cannot navigate to {}: no window", target.href());
            return;
        };
        if let Err(err) = window.location().set_href(target.href()) {
            leptos::logging::error!("Error navigating to {}: {err:?}", target.href());
        }
    }

    #[cfg(not(feature = "hydrate"))]
    let _ = target;
}

/// Ask `confirm` with `prompt` and navigate only on an explicit yes.
///
/// Returns whether the redirect was issued.
pub fn confirm_and_navigate(
    target: NavTarget,
    prompt: &str,
    confirm: impl FnOnce(&str) -> bool,
    go: impl FnOnce(NavTarget),
) -> bool {
    if confirm(prompt) {
        go(target);
        true
    } else {
        false
    }
}

/// Log out after the user confirms through a browser dialog.
pub fn logout() -> bool {
    confirm_and_navigate(NavTarget::Logout, LOGOUT_PROMPT, browser_confirm, navigate)
}

fn browser_confirm(prompt: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = prompt;
        false
    }
}
