//! Wall-clock source for comment timestamps and trail records.

use std::fmt::{Display, Write};

use chrono::{DateTime, Local, Locale, TimeZone, Utc};

pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Display timestamp stamped on new comments.
    fn stamp(&self) -> String;
}

/// Local time formatted with a `strftime` pattern in a given locale, so `%p`
/// reads 오전/오후 under `ko_KR`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    format: String,
    locale: Locale,
}

impl SystemClock {
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            locale: Locale::ko_KR,
        }
    }

    /// Unknown locale names fall back to `ko_KR` with a warning.
    #[must_use]
    pub fn with_locale(format: impl Into<String>, locale: &str) -> Self {
        let mut clock = Self::new(format);
        match Locale::try_from(locale) {
            Ok(parsed) => clock.locale = parsed,
            Err(_) => tracing::warn!(locale, "unknown timestamp locale; using ko_KR"),
        }
        clock
    }

    fn render<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> Option<String>
    where
        Tz::Offset: Display,
    {
        let mut out = String::new();
        // chrono reports bad specifiers as a fmt error
        write!(out, "{}", at.format_localized(&self.format, self.locale))
            .ok()
            .map(|()| out)
    }
}

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn stamp(&self) -> String {
        let now = Local::now();
        self.render(&now).unwrap_or_else(|| {
            tracing::warn!(format = %self.format, "invalid timestamp format; using RFC 3339");
            now.to_rfc3339()
        })
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: DateTime<Utc>,
    stamp: String,
}

impl FixedClock {
    #[must_use]
    pub fn new(at: DateTime<Utc>, stamp: impl Into<String>) -> Self {
        Self {
            at,
            stamp: stamp.into(),
        }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.at
    }

    fn stamp(&self) -> String {
        self.stamp.clone()
    }
}
