#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production, the backend serves the built site
}

pub const SUPPORT_EMAIL: &str = "hello@autoflow.studio";

pub const BOOKING_BASE_URL: &str = "https://calendly.com/autoflow-studio/strategy-call";
pub const BOOKING_WIDGET_SCRIPT: &str = "https://assets.calendly.com/assets/external/widget.js";
pub const BOOKING_WIDGET_CSS: &str = "https://assets.calendly.com/assets/external/widget.css";

// Long enough for the success message to register before the widget shows up.
pub const BOOKING_REVEAL_DELAY_MS: u32 = 1_500;
