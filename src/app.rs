use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    hooks::use_location,
    StaticSegment,
};

use crate::client;
use crate::components::{NavStyles, UnifiedNav, APP_TITLE};
use crate::model::InteractionLog;
use crate::page::{is_login_page, page_name};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/laila-nav.css"/>
        <NavStyles/>

        <Title text=APP_TITLE/>

        <Router>
            <NavFrame/>
            <main>
                <Routes fallback=|| view! { <SectionPage title="Page not found"/> }>
                    <Route path=StaticSegment("") view=Landing/>
                    <Route path=StaticSegment("main-menu") view=|| view! { <SectionPage title="Main Menu"/> }/>
                    <Route path=StaticSegment("user-settings") view=|| view! { <SectionPage title="User Settings"/> }/>
                    <Route path=StaticSegment("admin") view=|| view! { <SectionPage title="Admin Panel"/> }/>
                </Routes>
            </main>
        </Router>
    }
}

/// Renders the nav on non-login paths and reports each page view.
#[component]
fn NavFrame() -> impl IntoView {
    let pathname = use_location().pathname;

    Effect::new(move |_| {
        let page = pathname.with(|path| page_name(path).to_owned());
        client::log_interaction(InteractionLog::page_view(page));
    });

    view! {
        <Show when=move || pathname.with(|path| !is_login_page(path))>
            <UnifiedNav/>
        </Show>
    }
}

#[component]
fn Landing() -> impl IntoView {
    view! {
        <section class="landing">
            <h1>{APP_TITLE}</h1>
            <a class="landing__login" href="/login" rel="external">"Sign in"</a>
        </section>
    }
}

#[component]
fn SectionPage(title: &'static str) -> impl IntoView {
    view! {
        <section class="section-page">
            <h1>{title}</h1>
        </section>
    }
}
