use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fixed keys of the editable text blocks on the public page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKey {
    Hero,
    Biography,
    Vision,
}

impl ContentKey {
    pub const ALL: [ContentKey; 3] = [ContentKey::Hero, ContentKey::Biography, ContentKey::Vision];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKey::Hero => "hero",
            ContentKey::Biography => "biography",
            ContentKey::Vision => "vision",
        }
    }

    /// Section label shown in the admin content editor.
    pub fn label(self) -> &'static str {
        match self {
            ContentKey::Hero => "হিরো সেকশন",
            ContentKey::Biography => "জীবনী",
            ContentKey::Vision => "ভিশন",
        }
    }
}

/// One editable text block. The row id doubles as the fixed key, so there
/// is at most one row per key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteContentBlock {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `news`; id, date and created_at come from the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewNewsItem {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGalleryImage {
    pub image_url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintStatus {
    Pending,
    Resolved,
}

impl ComplaintStatus {
    pub fn toggled(self) -> Self {
        match self {
            ComplaintStatus::Pending => ComplaintStatus::Resolved,
            ComplaintStatus::Resolved => ComplaintStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "পেন্ডিং",
            ComplaintStatus::Resolved => "সমাধান হয়েছে",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub description: String,
    pub attachment_url: Option<String>,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `complaints`; status defaults to pending in the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewComplaint {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub description: String,
    pub attachment_url: Option<String>,
}

const BN_MONTHS: [&str; 12] = [
    "জানুয়ারি",
    "ফেব্রুয়ারি",
    "মার্চ",
    "এপ্রিল",
    "মে",
    "জুন",
    "জুলাই",
    "আগস্ট",
    "সেপ্টেম্বর",
    "অক্টোবর",
    "নভেম্বর",
    "ডিসেম্বর",
];

/// "d MMMM, yyyy" with Bengali month names, the way the site prints dates.
pub fn format_date_bn(date: NaiveDate) -> String {
    let month = BN_MONTHS[date.month0() as usize];
    format!("{} {}, {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_toggle_round_trips() {
        let status = ComplaintStatus::Pending;
        assert_eq!(status.toggled(), ComplaintStatus::Resolved);
        assert_eq!(status.toggled().toggled(), status);
    }

    #[test]
    fn content_keys_serialize_as_row_ids() {
        for key in ContentKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn formats_dates_with_bengali_months() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(format_date_bn(date), "5 আগস্ট, 2026");
    }
}
