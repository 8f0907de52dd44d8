mod nav_styles;
mod unified_nav;

pub use nav_styles::NavStyles;
pub use unified_nav::{UnifiedNav, APP_TITLE};
