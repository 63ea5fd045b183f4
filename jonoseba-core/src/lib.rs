//! Core of the jonoseba site client: remote table/blob store access, the
//! query cache with its invalidation table, form validation, the upload
//! helper and the admin session gate. No UI in here; the GUI crate drives
//! everything through these types.

pub mod cache;
pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod forms;
pub mod hooks;
pub mod model;
pub mod session;
pub mod store;
pub mod upload;

pub use cache::{invalidations, Mutation, Query, QueryCache, QueryKey, QueryState};
pub use client::RestStore;
pub use config::SiteConfig;
pub use error::{Error, Result};
pub use forms::{ComplaintForm, FieldErrors, GalleryForm, NewsForm, COMPLAINT_CATEGORIES};
pub use model::{
    format_date_bn, Complaint, ComplaintStatus, ContentKey, GalleryImage, NewComplaint,
    NewGalleryImage, NewNewsItem, NewsItem, SiteContentBlock,
};
pub use session::AdminSession;
pub use store::{BlobStore, ListQuery, Table, TableStore};
pub use upload::{UploadError, UploadKind};
