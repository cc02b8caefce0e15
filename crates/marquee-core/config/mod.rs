//! Launch parameters and animation tuning
//!
//! Parameters arrive as a URL query string, the way the page receives them:
//!
//! | key         | meaning                | default |
//! |-------------|------------------------|---------|
//! | `character` | character id           | `hero`  |
//! | `lang`      | language code          | `en`    |
//! | `subcat`    | subcategory id         | empty   |
//! | `n`         | pixels moved per tick  | `3`     |
//! | `t`         | milliseconds per tick  | `20`    |
//!
//! Numeric values that are missing, unparsable, non-positive or non-finite
//! fall back to their defaults, as does a `t` too small to round to a
//! whole microsecond. Everything is read once at startup; the animator
//! never re-reads its configuration.

use crate::{
    catalog::Selection,
    utils::{CoreError, Result},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pixels moved per tick
pub const DEFAULT_SPEED_PER_TICK: f64 = 3.0;
/// Default tick period
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(20);
/// Default delay before re-measuring after a resize while running
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(120);

/// Fixed tuning for the scroll animator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Pixels the content moves left on each tick
    pub speed_per_tick: f64,
    /// Interval between ticks
    #[serde(with = "millis")]
    pub tick_period: Duration,
    /// Quiet period after the last resize before re-measuring
    #[serde(with = "millis")]
    pub resize_debounce: Duration,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed_per_tick: DEFAULT_SPEED_PER_TICK,
            tick_period: DEFAULT_TICK_PERIOD,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
        }
    }
}

impl MarqueeConfig {
    /// Check that the tuning can drive an animation
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for a non-positive or non-finite speed
    /// or a zero tick period.
    pub fn validate(&self) -> Result<()> {
        if !self.speed_per_tick.is_finite() || self.speed_per_tick <= 0.0 {
            return Err(CoreError::config(format!(
                "speed_per_tick must be a positive number, got {}",
                self.speed_per_tick
            )));
        }
        if self.tick_period.is_zero() {
            return Err(CoreError::config("tick_period must be non-zero"));
        }
        Ok(())
    }
}

/// Everything the page reads from its environment at load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Script to show
    pub selection: Selection,
    /// Animation tuning
    pub config: MarqueeConfig,
}

impl LaunchParams {
    /// Parse a query string such as `?character=hero&lang=en&n=4`
    ///
    /// Values are percent-decoded. Unknown keys are ignored, and a repeated
    /// key keeps its first value.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        let mut seen = Vec::new();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if seen.contains(&key) {
                continue;
            }
            match key.as_ref() {
                "character" => {
                    if !value.is_empty() {
                        params.selection.character = value.to_string();
                    }
                }
                "lang" => {
                    if !value.is_empty() {
                        params.selection.language = value.to_string();
                    }
                }
                "subcat" => params.selection.subcategory = value.to_string(),
                "n" => {
                    params.config.speed_per_tick =
                        positive_number(&value).unwrap_or(DEFAULT_SPEED_PER_TICK);
                }
                "t" => {
                    params.config.tick_period = positive_number(&value)
                        .map(duration_from_millis)
                        .filter(|period| !period.is_zero())
                        .unwrap_or(DEFAULT_TICK_PERIOD);
                }
                _ => continue,
            }
            seen.push(key);
        }

        params
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn duration_from_millis(ms: f64) -> Duration {
    Duration::from_micros((ms * 1000.0).round() as u64)
}

/// Parse like JavaScript's `Number(x) || default`: zero and NaN are unset
fn positive_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
