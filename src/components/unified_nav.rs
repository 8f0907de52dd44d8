use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::client;
use crate::model::{ElementRef, InteractionLog, NavIdentity};
use crate::navigation::{self, NavTarget};
use crate::page::page_name;

pub const APP_TITLE: &str = "LAILA";

/// CSS `display` value for a button that is conditionally shown.
fn display(shown: bool) -> &'static str {
    if shown {
        "inline-block"
    } else {
        "none"
    }
}

/// Fixed banner rendered at the top of every page that is not a login page.
///
/// The header renders straight away with the placeholder name; the user
/// record is loaded once the component is mounted in the browser.
#[component]
pub fn UnifiedNav() -> impl IntoView {
    let identity = RwSignal::new(NavIdentity::default());
    let pathname = use_location().pathname;

    Effect::new(move |_| client::load_user_info(identity));

    let on_nav = move |button_id: &'static str, target: NavTarget| {
        let page = pathname.with_untracked(|path| page_name(path).to_owned());
        client::log_interaction(
            InteractionLog::new("nav_click", page)
                .with_element(ElementRef::button(button_id, target.href())),
        );

        match target {
            NavTarget::Logout => {
                navigation::logout();
            }
            other => navigation::navigate(other),
        }
    };

    let is_admin = move || identity.with(|i| i.is_admin);
    let is_authenticated = move || identity.with(|i| i.authenticated);
    let user_name = move || identity.with(|i| i.label().to_owned());

    view! {
        <div class="unified-nav">
            <div class="nav-left">
                <button
                    class="nav-button back-home"
                    id="mainMenuBtn"
                    on:click=move |_| on_nav("mainMenuBtn", NavTarget::MainMenu)
                >
                    <i class="fas fa-home"></i>
                    " Main Menu"
                </button>
            </div>
            <div class="nav-center">
                <span class="app-title">{APP_TITLE}</span>
            </div>
            <div class="nav-right">
                <button
                    class="nav-button admin-btn"
                    id="adminBtn"
                    style:display=move || display(is_admin())
                    on:click=move |_| on_nav("adminBtn", NavTarget::Admin)
                >
                    <i class="fas fa-crown"></i>
                    " Admin Panel"
                </button>
                <button
                    class="nav-button settings-btn"
                    id="userInfo"
                    style:display=move || display(is_authenticated())
                    on:click=move |_| on_nav("userInfo", NavTarget::UserSettings)
                >
                    <i class="fas fa-user"></i>
                    " "
                    <span id="userName">{user_name}</span>
                </button>
                <button
                    class="nav-button logout-btn"
                    id="logoutBtn"
                    on:click=move |_| on_nav("logoutBtn", NavTarget::Logout)
                >
                    <i class="fas fa-sign-out-alt"></i>
                    " Logout"
                </button>
            </div>
        </div>
    }
}
