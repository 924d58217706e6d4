//! Page configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use contact_api::DEFAULT_ENDPOINT;

/// Tunables for every page behavior.
///
/// All fields have defaults matching the live site, so a config file only
/// needs the keys it changes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sitekit::config::SiteConfig;
///
/// let config = SiteConfig::default()
///     .with_flash_lifetime(Duration::from_secs(8))
///     .with_scroll_top_threshold(500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Path of the contact endpoint.
    ///
    /// Default: `/api/contact`
    pub contact_endpoint: String,

    /// How long a flash message stays before it is removed.
    ///
    /// Default: 5 seconds
    #[serde(rename = "flash_lifetime_ms", with = "duration_ms")]
    pub flash_lifetime: Duration,

    /// Minimum intersection ratio before a card is revealed.
    ///
    /// Default: 0.1
    pub reveal_threshold: f64,

    /// CSS animation applied to revealed cards.
    pub reveal_animation: String,

    /// Scroll offset (px) past which the scroll-to-top button shows.
    ///
    /// Default: 300
    pub scroll_top_threshold: f64,

    /// Hero translation per scrolled pixel.
    ///
    /// Default: -0.5
    pub parallax_rate: f64,

    /// Default duration of a counter animation.
    ///
    /// Default: 2 seconds
    #[serde(rename = "counter_duration_ms", with = "duration_ms")]
    pub counter_duration: Duration,

    /// Length of one animation frame.
    ///
    /// Default: 16ms
    #[serde(rename = "frame_interval_ms", with = "duration_ms")]
    pub frame_interval: Duration,

    /// Storage key of the dark-mode flag.
    pub dark_mode_key: String,

    /// User-facing texts.
    pub messages: Messages,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_endpoint: DEFAULT_ENDPOINT.to_string(),
            flash_lifetime: Duration::from_millis(5000),
            reveal_threshold: 0.1,
            reveal_animation: "fadeInUp 1s ease forwards".to_string(),
            scroll_top_threshold: 300.0,
            parallax_rate: -0.5,
            counter_duration: Duration::from_millis(2000),
            frame_interval: Duration::from_millis(16),
            dark_mode_key: "darkMode".to_string(),
            messages: Messages::default(),
        }
    }
}

impl SiteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contact_endpoint(mut self, path: impl Into<String>) -> Self {
        self.contact_endpoint = path.into();
        self
    }

    pub fn with_flash_lifetime(mut self, lifetime: Duration) -> Self {
        self.flash_lifetime = lifetime;
        self
    }

    pub fn with_reveal_threshold(mut self, threshold: f64) -> Self {
        self.reveal_threshold = threshold;
        self
    }

    pub fn with_scroll_top_threshold(mut self, threshold: f64) -> Self {
        self.scroll_top_threshold = threshold;
        self
    }

    pub fn with_parallax_rate(mut self, rate: f64) -> Self {
        self.parallax_rate = rate;
        self
    }

    pub fn with_counter_duration(mut self, duration: Duration) -> Self {
        self.counter_duration = duration;
        self
    }

    pub fn with_dark_mode_key(mut self, key: impl Into<String>) -> Self {
        self.dark_mode_key = key.into();
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }
}

/// Texts shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub required: String,
    pub invalid_email: String,
    pub invalid_phone: String,
    pub missing_fields: String,
    pub submission_failed: String,
    pub copied: String,
    pub copy_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "This field is required".to_string(),
            invalid_email: "Please enter a valid email address".to_string(),
            invalid_phone: "Please enter a valid phone number".to_string(),
            missing_fields: "Please fill in all required fields.".to_string(),
            submission_failed: "An error occurred while sending the message.".to_string(),
            copied: "Text copied to clipboard!".to_string(),
            copy_failed: "Copy failed".to_string(),
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
