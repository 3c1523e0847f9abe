use std::env;
use std::time::Duration;

use url::Url;

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";
pub const DEFAULT_AMOUNT: u32 = 10;
pub const DEFAULT_QUESTION_TYPE: &str = "multiple";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Open Trivia DB refuses batches larger than this.
pub const MAX_AMOUNT: u32 = 50;

/// Where and how the question batch is requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub amount: u32,
    pub question_type: String,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            amount: DEFAULT_AMOUNT,
            question_type: DEFAULT_QUESTION_TYPE.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    /// Read `QUIZ_API_URL`, `QUIZ_AMOUNT` and `QUIZ_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unusable values fall back
    /// to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("QUIZ_API_URL").filter(|value| !value.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup("QUIZ_AMOUNT") {
            match raw.trim().parse::<u32>() {
                Ok(amount) if (1..=MAX_AMOUNT).contains(&amount) => config.amount = amount,
                _ => tracing::warn!(value = %raw, "ignoring invalid QUIZ_AMOUNT"),
            }
        }

        if let Some(raw) = lookup("QUIZ_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "ignoring invalid QUIZ_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// Set the batch size, keeping it within `1..=MAX_AMOUNT`.
    #[must_use]
    pub fn with_amount(mut self, amount: u32) -> Self {
        let clamped = amount.clamp(1, MAX_AMOUNT);
        if clamped != amount {
            tracing::warn!(requested = amount, used = clamped, "batch size out of range");
        }
        self.amount = clamped;
        self
    }

    /// The full GET url for one batch.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `base_url` is not an absolute url.
    pub fn request_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("amount", &self.amount.to_string())
            .append_pair("type", &self.question_type);
        Ok(url)
    }
}
