use log::debug;
use serde_json::Value;

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::store::{BlobStore, ListQuery, Table, TableStore};

/// Client for the hosted row store and its blob buckets, speaking the
/// PostgREST-compatible `/rest/v1` API and the `/storage/v1` object API.
/// One call per operation, no retries.
pub struct RestStore {
    base_url: String,
    api_key: String,
    bucket: String,
}

impl RestStore {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bucket: config.uploads_bucket.clone(),
        }
    }

    fn rest_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.name())
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    /// Publicly resolvable URL of an uploaded object.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    fn authed(&self, request: attohttpc::RequestBuilder) -> attohttpc::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }
}

/// `?select=*&<col>=eq.<v>&order=<col>.desc&limit=<n>` pairs for a list call.
fn query_params(query: &ListQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    if let Some((column, value)) = &query.filter {
        params.push((column.clone(), format!("eq.{}", value)));
    }
    if let Some((column, descending)) = &query.order {
        let direction = if *descending { "desc" } else { "asc" };
        params.push(("order".to_string(), format!("{}.{}", column, direction)));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

fn ensure_success(response: attohttpc::Response) -> Result<attohttpc::Response> {
    if response.is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        Err(Error::Transport(format!("HTTP {}: {}", status, body)))
    }
}

impl TableStore for RestStore {
    fn list(&self, table: Table, query: &ListQuery) -> Result<Vec<Value>> {
        let mut request = self.authed(attohttpc::get(self.rest_url(table)));
        for (key, value) in query_params(query) {
            request = request.param(key.as_str(), value);
        }

        let response = ensure_success(request.send()?)?;
        let rows: Vec<Value> = response.json()?;
        debug!("Listed {} rows from {}", rows.len(), table.name());
        Ok(rows)
    }

    fn insert(&self, table: Table, row: Value) -> Result<Value> {
        let response = self
            .authed(attohttpc::post(self.rest_url(table)))
            .header("Prefer", "return=representation")
            .json(&row)?
            .send()?;

        let mut rows: Vec<Value> = ensure_success(response)?.json()?;
        if rows.is_empty() {
            return Err(Error::Transport("insert returned no row".to_string()));
        }
        debug!("Inserted row into {}", table.name());
        Ok(rows.remove(0))
    }

    fn update(&self, table: Table, id: &str, patch: Value) -> Result<Vec<Value>> {
        let response = self
            .authed(attohttpc::patch(self.rest_url(table)))
            .param("id", format!("eq.{}", id))
            .header("Prefer", "return=representation")
            .json(&patch)?
            .send()?;

        let rows: Vec<Value> = ensure_success(response)?.json()?;
        debug!("Updated {} row(s) in {}", rows.len(), table.name());
        Ok(rows)
    }

    fn delete(&self, table: Table, id: &str) -> Result<()> {
        let response = self
            .authed(attohttpc::delete(self.rest_url(table)))
            .param("id", format!("eq.{}", id))
            .send()?;

        ensure_success(response)?;
        debug!("Deleted row {} from {}", id, table.name());
        Ok(())
    }
}

impl BlobStore for RestStore {
    fn put_object(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        let response = self
            .authed(attohttpc::post(self.object_url(path)))
            .header("Content-Type", content_type)
            .bytes(bytes)
            .send()?;

        ensure_success(response)?;
        Ok(self.public_url(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RestStore {
        let config = SiteConfig {
            api_url: "https://example.supabase.co/".to_string(),
            ..SiteConfig::default()
        };
        RestStore::new(&config)
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        assert_eq!(
            store().rest_url(Table::News),
            "https://example.supabase.co/rest/v1/news"
        );
    }

    #[test]
    fn builds_postgrest_query_params() {
        let query = ListQuery::default().eq("id", "hero").order_desc("date").limit(6);
        let params = query_params(&query);
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("id".to_string(), "eq.hero".to_string()),
                ("order".to_string(), "date.desc".to_string()),
                ("limit".to_string(), "6".to_string()),
            ]
        );
    }

    #[test]
    fn public_url_points_into_the_uploads_bucket() {
        assert_eq!(
            store().public_url("news/1700000000000.jpg"),
            "https://example.supabase.co/storage/v1/object/public/uploads/news/1700000000000.jpg"
        );
    }
}
