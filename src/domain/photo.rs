//! Photo domain model.
//!
//! A [`Photo`] is one search hit returned by the photo API. It is immutable once
//! received: the session only ever replaces or appends whole photos. Only `id`
//! and the `small`/`regular` URLs are mandatory; everything else is optional
//! metadata used by the gallery tiles and the modal viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Number of seconds in a (rounded) year.
const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

/// Image URLs at different resolutions.
///
/// `small` is used for gallery thumbnails and `regular` for the enlarged view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    /// Lower-resolution URL shown in the gallery.
    pub small: String,
    /// Higher-resolution URL shown in the modal.
    pub regular: String,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub full: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
}

/// Photographer credited for a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photographer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Photographer {
    /// Display name, preferring the full name over `@username`.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .or_else(|| self.username.as_ref().map(|u| format!("@{u}")))
    }
}

/// Links to the photo's pages on the provider's site.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhotoLinks {
    /// Public web page of the photo.
    #[serde(default)]
    pub html: Option<String>,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub urls: PhotoUrls,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Dominant colour as a hex string (e.g. `"#c0a080"`).
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<Photographer>,
    #[serde(default)]
    pub links: PhotoLinks,
}

impl Photo {
    /// Creates a photo with only the mandatory fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use zsplash::domain::Photo;
    ///
    /// let photo = Photo::new("abc", "https://img/small.jpg", "https://img/regular.jpg");
    /// assert_eq!(photo.caption(), "Untitled photo");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, small: impl Into<String>, regular: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            urls: PhotoUrls {
                small: small.into(),
                regular: regular.into(),
                thumb: None,
                full: None,
                raw: None,
            },
            description: None,
            alt_description: None,
            color: None,
            width: None,
            height: None,
            likes: None,
            created_at: None,
            user: None,
            links: PhotoLinks::default(),
        }
    }

    /// Text shown under a thumbnail.
    ///
    /// Uses the alt description first (it is what the gallery used as `alt`
    /// text), then the free-form description, then a placeholder.
    #[must_use]
    pub fn caption(&self) -> String {
        [&self.alt_description, &self.description]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map_or_else(|| "Untitled photo".to_string(), |s| capitalize(s))
    }

    /// URL opened in an external browser from the modal.
    #[must_use]
    pub fn browser_url(&self) -> &str {
        self.links
            .html
            .as_deref()
            .or(self.urls.full.as_deref())
            .unwrap_or(&self.urls.regular)
    }

    /// `"4000×3000"` when both dimensions are known.
    #[must_use]
    pub fn dimensions(&self) -> Option<String> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(format!("{w}×{h}")),
            _ => None,
        }
    }

    /// Human-readable age of the photo relative to `now`.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Less than 1 year: "Xd ago"
    /// - Otherwise: "Xy ago"
    #[must_use]
    pub fn time_ago(&self, now: DateTime<Utc>) -> Option<String> {
        let created = self.created_at?;
        let diff = (now - created).num_seconds().max(0);

        Some(if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else if diff < SECONDS_PER_YEAR {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        } else {
            format!("{}y ago", diff / SECONDS_PER_YEAR)
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
