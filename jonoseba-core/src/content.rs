use chrono::{DateTime, Utc};

use crate::model::{ContentKey, NewsItem, SiteContentBlock};

/// Hardcoded copy each section falls back to when the store has no row for
/// its key yet. The strings are the launch content of the site.
pub fn fallback(key: ContentKey) -> SiteContentBlock {
    let (title, content) = match key {
        ContentKey::Hero => (
            "গণতন্ত্র মুক্তির প্রহরী: খায়রুল কবির খোকন",
            "যুগ্ম মহাসচিব, বাংলাদেশ জাতীয়তাবাদী দল (বিএনপি) ও সাবেক সংসদ সদস্য।",
        ),
        ContentKey::Biography => (
            "জীবনী",
            "ডাকসুর সাবেক জিএস এবং নব্বইয়ের ছাত্র আন্দোলনের অগ্রনায়ক খায়রুল কবির খোকন দেশ ও মানুষের অধিকার রক্ষায় সদা নিবেদিত।",
        ),
        ContentKey::Vision => (
            "ভবিষ্যৎ পরিকল্পনা",
            "নরসিংদী ও বাংলাদেশের জন্য আমার স্বপ্ন হলো একটি সমৃদ্ধ সমাজ গড়ে তোলা।",
        ),
    };
    SiteContentBlock {
        id: key.as_str().to_string(),
        title: title.to_string(),
        content: content.to_string(),
    }
}

/// What a section actually renders: the stored block when there is one, the
/// fallback otherwise.
pub fn resolve(key: ContentKey, fetched: Option<SiteContentBlock>) -> SiteContentBlock {
    fetched.unwrap_or_else(|| fallback(key))
}

/// Cards shown in the news section while the store is still empty.
pub fn placeholder_news(now: DateTime<Utc>) -> Vec<NewsItem> {
    let items = [
        (
            "নরসিংদীতে উন্নয়ন প্রকল্পের উদ্বোধন",
            "স্থানীয় জনগণের জন্য নতুন সড়ক নির্মাণ প্রকল্প শুরু হয়েছে।",
        ),
        (
            "যুব সম্মেলন ২০২৬",
            "তরুণদের জন্য কর্মসংস্থান ও দক্ষতা উন্নয়ন বিষয়ক সম্মেলন।",
        ),
        (
            "শিক্ষা প্রতিষ্ঠানে বৃত্তি প্রদান",
            "মেধাবী শিক্ষার্থীদের জন্য বিশেষ বৃত্তি কার্যক্রম।",
        ),
    ];

    items
        .iter()
        .enumerate()
        .map(|(index, (title, description))| NewsItem {
            id: format!("placeholder-{}", index + 1),
            title: title.to_string(),
            description: description.to_string(),
            image_url: None,
            date: now.date_naive(),
            created_at: now,
        })
        .collect()
}

/// Captions of the tiles the gallery shows while the store is still empty.
pub const PLACEHOLDER_GALLERY_CAPTIONS: [&str; 6] = [
    "জনসভা",
    "উন্নয়ন প্রকল্প",
    "সংসদে বক্তব্য",
    "যুব সম্মেলন",
    "শিক্ষা কার্যক্রম",
    "স্বাস্থ্য সেবা",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_resolves_to_the_hardcoded_fallback() {
        for key in ContentKey::ALL {
            let rendered = resolve(key, None);
            assert_eq!(rendered, fallback(key));
            assert!(!rendered.title.is_empty());
            assert!(!rendered.content.is_empty());
        }
    }

    #[test]
    fn stored_row_wins_over_the_fallback() {
        let stored = SiteContentBlock {
            id: "hero".to_string(),
            title: "সম্পাদিত শিরোনাম".to_string(),
            content: "সম্পাদিত বিষয়বস্তু".to_string(),
        };
        let rendered = resolve(ContentKey::Hero, Some(stored.clone()));
        assert_eq!(rendered, stored);
    }

    #[test]
    fn hero_fallback_matches_the_launch_copy() {
        assert_eq!(
            fallback(ContentKey::Hero).title,
            "গণতন্ত্র মুক্তির প্রহরী: খায়রুল কবির খোকন"
        );
    }

    #[test]
    fn placeholder_news_is_three_dated_cards() {
        let now = Utc::now();
        let cards = placeholder_news(now);
        assert_eq!(cards.len(), 3);
        for card in &cards {
            assert!(card.image_url.is_none());
            assert_eq!(card.date, now.date_naive());
        }
    }
}
