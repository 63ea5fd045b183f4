use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::model::{
    Complaint, ComplaintStatus, ContentKey, GalleryImage, NewComplaint, NewGalleryImage,
    NewNewsItem, NewsItem, SiteContentBlock,
};
use crate::store::{ListQuery, Table, TableStore};

fn decode<T: DeserializeOwned>(row: Value) -> Result<T> {
    Ok(serde_json::from_value(row)?)
}

fn decode_all<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>> {
    rows.into_iter().map(decode).collect()
}

// ---------------------------------------------------------------------------
// site_content

pub fn get_content(store: &dyn TableStore, key: ContentKey) -> Result<Option<SiteContentBlock>> {
    match store.get_by_key(Table::SiteContent, "id", key.as_str())? {
        Some(row) => Ok(Some(decode(row)?)),
        None => Ok(None),
    }
}

pub fn list_content(store: &dyn TableStore) -> Result<Vec<SiteContentBlock>> {
    decode_all(store.list(Table::SiteContent, &ListQuery::default())?)
}

/// Update the block for `key`, inserting it when the store has none yet.
/// Either way there is at most one row per key afterwards.
pub fn upsert_content(
    store: &dyn TableStore,
    key: ContentKey,
    title: &str,
    content: &str,
) -> Result<SiteContentBlock> {
    let patch = json!({ "title": title, "content": content });
    let mut updated = store.update(Table::SiteContent, key.as_str(), patch)?;
    if let Some(row) = updated.pop() {
        return decode(row);
    }

    let row = json!({ "id": key.as_str(), "title": title, "content": content });
    decode(store.insert(Table::SiteContent, row)?)
}

// ---------------------------------------------------------------------------
// news

/// Newest first by publish date; the public page passes a limit, the admin
/// list does not.
pub fn list_news(store: &dyn TableStore, limit: Option<u32>) -> Result<Vec<NewsItem>> {
    let mut query = ListQuery::default().order_desc("date");
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    decode_all(store.list(Table::News, &query)?)
}

pub fn insert_news(store: &dyn TableStore, record: &NewNewsItem) -> Result<NewsItem> {
    decode(store.insert(Table::News, serde_json::to_value(record)?)?)
}

pub fn delete_news(store: &dyn TableStore, id: &str) -> Result<()> {
    store.delete(Table::News, id)
}

// ---------------------------------------------------------------------------
// gallery

pub fn list_gallery(store: &dyn TableStore, limit: Option<u32>) -> Result<Vec<GalleryImage>> {
    let mut query = ListQuery::default().order_desc("created_at");
    if let Some(limit) = limit {
        query = query.limit(limit);
    }
    decode_all(store.list(Table::Gallery, &query)?)
}

pub fn insert_gallery(store: &dyn TableStore, record: &NewGalleryImage) -> Result<GalleryImage> {
    decode(store.insert(Table::Gallery, serde_json::to_value(record)?)?)
}

pub fn delete_gallery(store: &dyn TableStore, id: &str) -> Result<()> {
    store.delete(Table::Gallery, id)
}

// ---------------------------------------------------------------------------
// complaints

pub fn list_complaints(store: &dyn TableStore) -> Result<Vec<Complaint>> {
    let query = ListQuery::default().order_desc("created_at");
    decode_all(store.list(Table::Complaints, &query)?)
}

pub fn insert_complaint(store: &dyn TableStore, record: &NewComplaint) -> Result<Complaint> {
    decode(store.insert(Table::Complaints, serde_json::to_value(record)?)?)
}

pub fn set_complaint_status(
    store: &dyn TableStore,
    id: &str,
    status: ComplaintStatus,
) -> Result<Complaint> {
    let patch = json!({ "status": status });
    let mut updated = store.update(Table::Complaints, id, patch)?;
    match updated.pop() {
        Some(row) => decode(row),
        None => Err(Error::Transport(format!("no complaint with id {id}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ComplaintForm;
    use crate::store::memory::MemoryStore;

    fn news(title: &str) -> NewNewsItem {
        NewNewsItem {
            title: title.to_string(),
            description: "বিবরণ".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn inserted_news_appears_in_the_list_exactly_once() {
        let store = MemoryStore::new();
        let inserted = insert_news(&store, &news("উন্নয়ন প্রকল্পের উদ্বোধন")).unwrap();

        let listed = list_news(&store, None).unwrap();
        let matching: Vec<_> = listed.iter().filter(|item| item.id == inserted.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].title, "উন্নয়ন প্রকল্পের উদ্বোধন");
    }

    #[test]
    fn delete_removes_only_the_target_row() {
        let store = MemoryStore::new();
        let keep = insert_gallery(
            &store,
            &NewGalleryImage {
                image_url: "https://cdn.test/a.jpg".to_string(),
                caption: Some("জনসভা".to_string()),
            },
        )
        .unwrap();
        let drop = insert_gallery(
            &store,
            &NewGalleryImage {
                image_url: "https://cdn.test/b.jpg".to_string(),
                caption: None,
            },
        )
        .unwrap();

        delete_gallery(&store, &drop.id).unwrap();

        let listed = list_gallery(&store, None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
    }

    #[test]
    fn news_lists_newest_date_first_and_honours_the_limit() {
        let store = MemoryStore::new();
        for (id, date) in [("a", "2026-01-01"), ("b", "2026-03-01"), ("c", "2026-02-01")] {
            store
                .insert(
                    Table::News,
                    json!({
                        "id": id,
                        "title": id,
                        "description": "",
                        "image_url": null,
                        "date": date,
                    }),
                )
                .unwrap();
        }

        let listed = list_news(&store, Some(2)).unwrap();
        let ids: Vec<_> = listed.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn upsert_content_never_multiplies_the_row() {
        let store = MemoryStore::new();
        upsert_content(&store, ContentKey::Hero, "শিরোনাম", "বিষয়বস্তু").unwrap();
        let block = upsert_content(&store, ContentKey::Hero, "নতুন শিরোনাম", "নতুন বিষয়বস্তু").unwrap();

        assert_eq!(block.id, "hero");
        assert_eq!(block.title, "নতুন শিরোনাম");

        let all = list_content(&store).unwrap();
        assert_eq!(all.len(), 1);

        let fetched = get_content(&store, ContentKey::Hero).unwrap().unwrap();
        assert_eq!(fetched.content, "নতুন বিষয়বস্তু");
    }

    #[test]
    fn toggling_status_twice_restores_the_original() {
        let store = MemoryStore::new();
        let complaint = insert_complaint(
            &store,
            &ComplaintForm {
                name: "করিম".to_string(),
                phone: "01812345678".to_string(),
                address: "নরসিংদী সদর".to_string(),
                category: "শিক্ষা".to_string(),
                description: "বিদ্যালয়ের অবকাঠামো সংস্কার প্রয়োজন".to_string(),
            }
            .validate()
            .unwrap(),
        )
        .unwrap();
        assert_eq!(complaint.status, ComplaintStatus::Pending);

        let once = set_complaint_status(&store, &complaint.id, complaint.status.toggled()).unwrap();
        assert_eq!(once.status, ComplaintStatus::Resolved);

        let twice = set_complaint_status(&store, &complaint.id, once.status.toggled()).unwrap();
        assert_eq!(twice.status, complaint.status);
    }

    #[test]
    fn complaint_submission_end_to_end_without_attachment() {
        let store = MemoryStore::new();
        let form = ComplaintForm {
            name: "রহিম".to_string(),
            phone: "01712345678".to_string(),
            address: "ঢাকা".to_string(),
            category: "বিদ্যুৎ".to_string(),
            description: "দশ অক্ষরের বেশি বিবরণ".to_string(),
        };

        let record = form.validate().unwrap();
        let stored = insert_complaint(&store, &record).unwrap();

        assert_eq!(stored.status, ComplaintStatus::Pending);
        assert_eq!(stored.attachment_url, None);
        assert_eq!(stored.name, "রহিম");

        let listed = list_complaints(&store).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, stored.id);
    }

    #[test]
    fn status_update_for_a_missing_id_is_a_transport_error() {
        let store = MemoryStore::new();
        let result = set_complaint_status(&store, "nope", ComplaintStatus::Resolved);
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
