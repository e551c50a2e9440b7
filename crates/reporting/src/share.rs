use crate::error::ReportError;
use analytics::Summary;
use core_types::WeightUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::{form_urlencoded, Url};

const EMAIL_SUBJECT: &str = "My Weight Tracking Progress";

/// Where a progress update can be shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Twitter,
    Facebook,
    Linkedin,
    Email,
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SharePlatform::Twitter => "Twitter",
            SharePlatform::Facebook => "Facebook",
            SharePlatform::Linkedin => "LinkedIn",
            SharePlatform::Email => "Email",
        };
        f.write_str(name)
    }
}

/// The handful of numbers that go into a share message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareStats {
    pub total_change: f64,
    pub percent_change: Option<f64>,
    pub entries_tracked: usize,
    pub goal_progress: Option<f64>,
}

impl ShareStats {
    /// Builds share stats from an engine summary.
    ///
    /// Returns `None` until at least two entries exist; a single reading has
    /// no progress to talk about.
    pub fn from_summary(summary: &Summary, goal_progress: Option<f64>) -> Option<Self> {
        let metrics = summary.as_tracked()?;
        if metrics.entry_count < 2 {
            return None;
        }
        Some(Self {
            total_change: metrics.change,
            percent_change: metrics.change_percent,
            entries_tracked: metrics.entry_count,
            goal_progress,
        })
    }
}

/// The human-readable progress message, with weights in `unit`.
pub fn share_text(stats: &ShareStats, unit: WeightUnit) -> String {
    let percent = stats
        .percent_change
        .map(|p| format!("{p:.1}%"))
        .unwrap_or_else(|| "n/a".to_string());

    let mut text = String::from("I've been tracking my weight with Weightwise! 💪\n\n");
    text.push_str(&format!(
        "📊 Total Change: {:.1}{} ({})\n",
        unit.from_kg(stats.total_change),
        unit.symbol(),
        percent
    ));
    text.push_str(&format!("📅 Days Tracked: {}\n", stats.entries_tracked));
    if let Some(progress) = stats.goal_progress {
        text.push_str(&format!("🎯 Goal Progress: {progress:.1}%\n"));
    }
    text.push_str("\nStart your weight tracking journey today!");
    text
}

/// Builds the share intent for `platform`.
///
/// Facebook and LinkedIn only share a page, so they need `page_url`.
pub fn share_link(
    platform: SharePlatform,
    text: &str,
    page_url: Option<&str>,
) -> Result<String, ReportError> {
    if let Some(page) = page_url {
        Url::parse(page)?;
    }

    let link = match platform {
        SharePlatform::Twitter => {
            let mut params = vec![("text", text)];
            if let Some(page) = page_url {
                params.push(("url", page));
            }
            Url::parse_with_params("https://twitter.com/intent/tweet", &params)?.to_string()
        }
        SharePlatform::Facebook => {
            let page = page_url.ok_or(ReportError::MissingShareUrl(platform))?;
            Url::parse_with_params("https://www.facebook.com/sharer/sharer.php", &[("u", page)])?
                .to_string()
        }
        SharePlatform::Linkedin => {
            let page = page_url.ok_or(ReportError::MissingShareUrl(platform))?;
            Url::parse_with_params(
                "https://www.linkedin.com/sharing/share-offsite/",
                &[("url", page)],
            )?
            .to_string()
        }
        SharePlatform::Email => {
            let body = match page_url {
                Some(page) => format!("{text}\n\n{page}"),
                None => text.to_string(),
            };
            format!(
                "mailto:?subject={}&body={}",
                mailto_encode(EMAIL_SUBJECT),
                mailto_encode(&body)
            )
        }
    };

    tracing::debug!(%platform, "Built share link.");
    Ok(link)
}

/// Percent-encodes a `mailto:` header value. Mail clients do not treat `+`
/// as a space, so spaces become `%20`.
fn mailto_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn stats() -> ShareStats {
        ShareStats {
            total_change: -4.26,
            percent_change: Some(-5.3125),
            entries_tracked: 12,
            goal_progress: Some(42.5),
        }
    }

    #[test]
    fn text_lists_change_days_and_goal() {
        assert_eq!(
            share_text(&stats(), WeightUnit::Kg),
            "I've been tracking my weight with Weightwise! 💪\n\n\
             📊 Total Change: -4.3kg (-5.3%)\n\
             📅 Days Tracked: 12\n\
             🎯 Goal Progress: 42.5%\n\
             \nStart your weight tracking journey today!"
        );
    }

    #[test]
    fn text_omits_goal_line_without_goal() {
        let mut stats = stats();
        stats.goal_progress = None;
        assert!(!share_text(&stats, WeightUnit::Lbs).contains("Goal Progress"));
        assert!(share_text(&stats, WeightUnit::Lbs).contains("lbs"));
    }

    #[test]
    fn twitter_link_encodes_text_and_url() {
        let link = share_link(
            SharePlatform::Twitter,
            "down 2 kg & happy",
            Some("https://example.org/p"),
        )
        .unwrap();
        assert_eq!(
            link,
            concat!(
                "https://twitter.com/intent/tweet",
                "?text=down+2+kg+%26+happy&url=https%3A%2F%2Fexample.org%2Fp"
            )
        );
    }

    #[test]
    fn email_link_uses_percent_twenty_for_spaces() {
        let link = share_link(SharePlatform::Email, "a+b c", None).unwrap();
        assert_eq!(
            link,
            "mailto:?subject=My%20Weight%20Tracking%20Progress&body=a%2Bb%20c"
        );
    }

    #[rstest]
    #[case(SharePlatform::Facebook)]
    #[case(SharePlatform::Linkedin)]
    fn page_only_platforms_need_url(#[case] platform: SharePlatform) {
        assert!(matches!(
            share_link(platform, "text", None),
            Err(ReportError::MissingShareUrl(p)) if p == platform
        ));
        assert!(share_link(platform, "text", Some("https://example.org")).is_ok());
    }

    #[test]
    fn malformed_page_url_is_rejected() {
        assert!(matches!(
            share_link(SharePlatform::Twitter, "text", Some("not a url")),
            Err(ReportError::InvalidUrl(_))
        ));
    }
}
