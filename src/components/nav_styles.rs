use leptos::prelude::*;
use leptos_meta::Style;

const NAV_CSS: &str = r"
.unified-nav {
    position: fixed;
    top: 0;
    left: 0;
    right: 0;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    padding: 10px 20px;
    display: flex;
    justify-content: space-between;
    align-items: center;
    z-index: 1000;
    box-shadow: 0 2px 10px rgba(0,0,0,0.1);
    font-family: 'Arial', sans-serif;
}

.nav-left, .nav-right {
    display: flex;
    align-items: center;
    gap: 15px;
}

.nav-center {
    flex: 1;
    text-align: center;
}

.app-title {
    font-size: 1.5em;
    font-weight: bold;
    text-shadow: 2px 2px 4px rgba(0,0,0,0.3);
}

.nav-button {
    background: rgba(255,255,255,0.2);
    color: white;
    border: none;
    padding: 8px 16px;
    border-radius: 20px;
    cursor: pointer;
    font-size: 0.9em;
    backdrop-filter: blur(10px);
    transition: all 0.3s ease;
    align-items: center;
    gap: 5px;
}

.nav-button:hover {
    background: rgba(255,255,255,0.3);
    transform: translateY(-2px);
}

.logout-btn {
    background: rgba(220, 53, 69, 0.8);
}

.logout-btn:hover {
    background: rgba(220, 53, 69, 1);
}

.settings-btn {
    background: rgba(40, 167, 69, 0.8);
}

.settings-btn:hover {
    background: rgba(40, 167, 69, 1);
}

.admin-btn {
    background: linear-gradient(135deg, #e74c3c, #c0392b);
    border: 2px solid rgba(255,255,255,0.3);
    font-weight: bold;
    box-shadow: 0 2px 10px rgba(231, 76, 60, 0.3);
}

.admin-btn:hover {
    background: linear-gradient(135deg, #c0392b, #a93226);
    box-shadow: 0 4px 15px rgba(231, 76, 60, 0.5);
    border-color: rgba(255,255,255,0.6);
}

body {
    padding-top: 60px !important;
}

@media (max-width: 768px) {
    .unified-nav {
        padding: 8px 15px;
        flex-wrap: wrap;
    }

    .nav-center {
        order: -1;
        width: 100%;
        margin-bottom: 10px;
    }

    .app-title {
        font-size: 1.2em;
    }

    .nav-button {
        font-size: 0.8em;
        padding: 4px 12px;
    }
}
";

/// Injects the nav stylesheet into `<head>`.
#[component]
pub fn NavStyles() -> impl IntoView {
    view! { <Style id="unified-nav">{NAV_CSS}</Style> }
}
