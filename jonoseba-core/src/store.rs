use serde_json::Value;

use crate::error::Result;

/// The four tables the site reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    SiteContent,
    News,
    Gallery,
    Complaints,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::SiteContent => "site_content",
            Table::News => "news",
            Table::Gallery => "gallery",
            Table::Complaints => "complaints",
        }
    }
}

/// Filter/order/limit of a list call.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: Option<(String, String)>,
    pub order: Option<(String, bool)>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filter = Some((column.to_string(), value.to_string()));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some((column.to_string(), true));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Row-level access to the remote table store. Rows travel as JSON values;
/// the typed hooks layer does the (de)serialization. Implementations do not
/// retry: a failed call surfaces as `Error::Transport` and the caller decides.
pub trait TableStore: Send + Sync {
    fn list(&self, table: Table, query: &ListQuery) -> Result<Vec<Value>>;

    /// Inserted row as stored (with id, timestamps, defaults filled in).
    fn insert(&self, table: Table, row: Value) -> Result<Value>;

    /// Updated rows; empty when no row matched the id.
    fn update(&self, table: Table, id: &str, patch: Value) -> Result<Vec<Value>>;

    fn delete(&self, table: Table, id: &str) -> Result<()>;

    fn get_by_key(&self, table: Table, key_column: &str, key: &str) -> Result<Option<Value>> {
        let query = ListQuery::default().eq(key_column, key).limit(1);
        Ok(self.list(table, &query)?.into_iter().next())
    }
}

/// Blob bucket uploads; returns the public URL of the stored object.
pub trait BlobStore: Send + Sync {
    fn put_object(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String>;
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory stand-in for the hosted store, for exercising the hooks and
    //! cache layers without a network.

    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStore {
        tables: Mutex<HashMap<Table, Vec<Value>>>,
        uploads: Mutex<Vec<String>>,
        next_id: Mutex<u64>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn uploaded_paths(&self) -> Vec<String> {
            self.uploads.lock().unwrap().clone()
        }

        fn assign_defaults(&self, table: Table, row: &mut Value) {
            let obj = row.as_object_mut().expect("row must be an object");

            if !obj.contains_key("id") {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                obj.insert("id".into(), json!(format!("row-{}", next)));
            }
            let now = Utc::now();
            obj.entry("created_at").or_insert(json!(now.to_rfc3339()));
            match table {
                Table::News => {
                    obj.entry("date")
                        .or_insert(json!(now.date_naive().to_string()));
                }
                Table::Complaints => {
                    obj.entry("status").or_insert(json!("pending"));
                }
                _ => {}
            }
        }
    }

    impl TableStore for MemoryStore {
        fn list(&self, table: Table, query: &ListQuery) -> Result<Vec<Value>> {
            let tables = self.tables.lock().unwrap();
            let mut rows: Vec<Value> = tables.get(&table).cloned().unwrap_or_default();

            if let Some((column, value)) = &query.filter {
                rows.retain(|row| row.get(column).and_then(Value::as_str) == Some(value));
            }
            if let Some((column, descending)) = &query.order {
                rows.sort_by(|a, b| {
                    let a = a.get(column).and_then(Value::as_str).unwrap_or("");
                    let b = b.get(column).and_then(Value::as_str).unwrap_or("");
                    if *descending { b.cmp(a) } else { a.cmp(b) }
                });
            }
            if let Some(limit) = query.limit {
                rows.truncate(limit as usize);
            }
            Ok(rows)
        }

        fn insert(&self, table: Table, mut row: Value) -> Result<Value> {
            self.assign_defaults(table, &mut row);
            let mut tables = self.tables.lock().unwrap();
            tables.entry(table).or_default().push(row.clone());
            Ok(row)
        }

        fn update(&self, table: Table, id: &str, patch: Value) -> Result<Vec<Value>> {
            let mut tables = self.tables.lock().unwrap();
            let rows = tables.entry(table).or_default();
            let mut updated = Vec::new();

            for row in rows.iter_mut() {
                if row.get("id").and_then(Value::as_str) == Some(id) {
                    if let (Some(obj), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
                        for (key, value) in fields {
                            obj.insert(key.clone(), value.clone());
                        }
                    }
                    updated.push(row.clone());
                }
            }
            Ok(updated)
        }

        fn delete(&self, table: Table, id: &str) -> Result<()> {
            let mut tables = self.tables.lock().unwrap();
            if let Some(rows) = tables.get_mut(&table) {
                rows.retain(|row| row.get("id").and_then(Value::as_str) != Some(id));
            }
            Ok(())
        }
    }

    impl BlobStore for MemoryStore {
        fn put_object(&self, path: &str, _bytes: &[u8], _content_type: &str) -> Result<String> {
            self.uploads.lock().unwrap().push(path.to_string());
            Ok(format!("memory://uploads/{}", path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_match_the_hosted_schema() {
        assert_eq!(Table::SiteContent.name(), "site_content");
        assert_eq!(Table::News.name(), "news");
        assert_eq!(Table::Gallery.name(), "gallery");
        assert_eq!(Table::Complaints.name(), "complaints");
    }

    #[test]
    fn get_by_key_returns_first_match_only() {
        let store = memory::MemoryStore::new();
        store
            .insert(Table::SiteContent, serde_json::json!({"id": "hero", "title": "t"}))
            .unwrap();

        let row = store.get_by_key(Table::SiteContent, "id", "hero").unwrap();
        assert_eq!(row.unwrap()["title"], "t");
        assert!(store.get_by_key(Table::SiteContent, "id", "vision").unwrap().is_none());
    }
}
