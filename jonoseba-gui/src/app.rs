use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use egui::{Align2, Color32};
use log::warn;
use poll_promise::Promise;

use jonoseba_core::{
    hooks, AdminSession, Complaint, ContentKey, GalleryImage, NewsItem, Query, QueryCache,
    RestStore, SiteConfig, SiteContentBlock,
};

use crate::admin::AdminState;
use crate::complaint::ComplaintDialog;
use crate::home::HomeState;

/// Background calls resolve to the data or a display-ready message.
pub type Fetched<T> = Result<T, String>;

/// A file the user dropped onto the window, read into memory.
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PickedFile {
    pub fn from_dropped(file: &egui::DroppedFile) -> Option<Self> {
        if let Some(bytes) = &file.bytes {
            let name = if file.name.is_empty() {
                "attachment.bin".to_string()
            } else {
                file.name.clone()
            };
            return Some(Self {
                name,
                bytes: bytes.to_vec(),
            });
        }

        let path = file.path.as_ref()?;
        let name = path.file_name()?.to_string_lossy().into_owned();
        match std::fs::read(path) {
            Ok(bytes) => Some(Self { name, bytes }),
            Err(e) => {
                warn!("Failed to read dropped file {:?}: {}", path, e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    AdminLogin,
    AdminDashboard,
}

struct Toast {
    message: String,
    is_error: bool,
    shown_at: f64,
}

/// Short-lived notifications in the bottom-right corner; every mutation
/// outcome lands here.
#[derive(Default)]
pub struct Toasts {
    entries: Vec<Toast>,
    now: f64,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message.into(), false);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message.into(), true);
    }

    fn push(&mut self, message: String, is_error: bool) {
        self.entries.push(Toast {
            message,
            is_error,
            shown_at: self.now,
        });
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        self.now = ctx.input(|i| i.time);
        let now = self.now;
        self.entries.retain(|toast| now - toast.shown_at < 4.0);
        if self.entries.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .show(ctx, |ui| {
                for toast in &self.entries {
                    let fill = if toast.is_error {
                        Color32::from_rgb(170, 40, 40)
                    } else {
                        Color32::from_rgb(25, 110, 60)
                    };
                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(egui::CornerRadius::same(6))
                        .inner_margin(egui::Margin::same(10))
                        .show(ui, |ui| {
                            ui.colored_label(Color32::WHITE, &toast.message);
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

/// In-flight fetches, one slot per query identity.
#[derive(Default)]
pub struct PendingQueries {
    pub content: HashMap<ContentKey, Promise<Fetched<Option<SiteContentBlock>>>>,
    pub admin_content: Option<Promise<Fetched<Vec<SiteContentBlock>>>>,
    pub news: Option<Promise<Fetched<Vec<NewsItem>>>>,
    pub admin_news: Option<Promise<Fetched<Vec<NewsItem>>>>,
    pub gallery: Option<Promise<Fetched<Vec<GalleryImage>>>>,
    pub admin_gallery: Option<Promise<Fetched<Vec<GalleryImage>>>>,
    pub admin_complaints: Option<Promise<Fetched<Vec<Complaint>>>>,
}

impl PendingQueries {
    fn any(&self) -> bool {
        !self.content.is_empty()
            || self.admin_content.is_some()
            || self.news.is_some()
            || self.admin_news.is_some()
            || self.gallery.is_some()
            || self.admin_gallery.is_some()
            || self.admin_complaints.is_some()
    }
}

fn poll_slot<T: Send + 'static>(slot: &mut Option<Promise<Fetched<T>>>, query: &mut Query<T>) {
    if let Some(promise) = slot.take() {
        match promise.try_take() {
            Ok(result) => query.resolve(result),
            Err(promise) => *slot = Some(promise),
        }
    }
}

pub struct SiteApp {
    pub store: Arc<RestStore>,
    pub cache: QueryCache,
    pub session: AdminSession,
    pub route: Route,
    pub pending: PendingQueries,
    pub toasts: Toasts,
    pub home: HomeState,
    pub complaint: ComplaintDialog,
    pub admin: AdminState,
}

impl SiteApp {
    pub fn new(config: SiteConfig) -> Self {
        let session = AdminSession::from_config(&config);
        Self {
            store: Arc::new(RestStore::new(&config)),
            cache: QueryCache::new(),
            session,
            route: Route::Home,
            pending: PendingQueries::default(),
            toasts: Toasts::default(),
            home: HomeState::default(),
            complaint: ComplaintDialog::default(),
            admin: AdminState::default(),
        }
    }

    /// Kick off every query the public page needs and is missing. Queries
    /// race independently; each resolves into its own cache slot.
    pub fn ensure_home_queries(&mut self) {
        for key in ContentKey::ALL {
            let query = self.cache.content_query(key);
            if query.needs_fetch() {
                query.begin();
                let store = self.store.clone();
                self.pending.content.insert(
                    key,
                    Promise::spawn_thread("fetch-content", move || {
                        hooks::get_content(store.as_ref(), key).map_err(|e| e.to_string())
                    }),
                );
            }
        }

        if self.cache.news.needs_fetch() {
            self.cache.news.begin();
            let store = self.store.clone();
            self.pending.news = Some(Promise::spawn_thread("fetch-news", move || {
                hooks::list_news(store.as_ref(), Some(6)).map_err(|e| e.to_string())
            }));
        }

        if self.cache.gallery.needs_fetch() {
            self.cache.gallery.begin();
            let store = self.store.clone();
            self.pending.gallery = Some(Promise::spawn_thread("fetch-gallery", move || {
                hooks::list_gallery(store.as_ref(), Some(8)).map_err(|e| e.to_string())
            }));
        }
    }

    pub fn ensure_admin_queries(&mut self) {
        if self.cache.admin_content.needs_fetch() {
            self.cache.admin_content.begin();
            let store = self.store.clone();
            self.pending.admin_content = Some(Promise::spawn_thread("fetch-admin-content", move || {
                hooks::list_content(store.as_ref()).map_err(|e| e.to_string())
            }));
        }

        if self.cache.admin_news.needs_fetch() {
            self.cache.admin_news.begin();
            let store = self.store.clone();
            self.pending.admin_news = Some(Promise::spawn_thread("fetch-admin-news", move || {
                hooks::list_news(store.as_ref(), None).map_err(|e| e.to_string())
            }));
        }

        if self.cache.admin_gallery.needs_fetch() {
            self.cache.admin_gallery.begin();
            let store = self.store.clone();
            self.pending.admin_gallery = Some(Promise::spawn_thread("fetch-admin-gallery", move || {
                hooks::list_gallery(store.as_ref(), None).map_err(|e| e.to_string())
            }));
        }

        if self.cache.admin_complaints.needs_fetch() {
            self.cache.admin_complaints.begin();
            let store = self.store.clone();
            self.pending.admin_complaints =
                Some(Promise::spawn_thread("fetch-admin-complaints", move || {
                    hooks::list_complaints(store.as_ref()).map_err(|e| e.to_string())
                }));
        }
    }

    fn poll_queries(&mut self) {
        let keys: Vec<ContentKey> = self.pending.content.keys().copied().collect();
        for key in keys {
            if let Some(promise) = self.pending.content.remove(&key) {
                match promise.try_take() {
                    Ok(result) => self.cache.content_query(key).resolve(result),
                    Err(promise) => {
                        self.pending.content.insert(key, promise);
                    }
                }
            }
        }

        poll_slot(&mut self.pending.admin_content, &mut self.cache.admin_content);
        poll_slot(&mut self.pending.news, &mut self.cache.news);
        poll_slot(&mut self.pending.admin_news, &mut self.cache.admin_news);
        poll_slot(&mut self.pending.gallery, &mut self.cache.gallery);
        poll_slot(&mut self.pending.admin_gallery, &mut self.cache.admin_gallery);
        poll_slot(
            &mut self.pending.admin_complaints,
            &mut self.cache.admin_complaints,
        );
    }

    /// Dropped files land in whichever picker is visible right now.
    fn deliver_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        for file in &dropped {
            let Some(picked) = PickedFile::from_dropped(file) else {
                continue;
            };
            if self.complaint.is_open() {
                self.complaint.receive_file(picked, &mut self.toasts);
            } else if self.route == Route::AdminDashboard {
                self.admin.receive_file(picked, &mut self.toasts);
            }
        }
    }
}

impl eframe::App for SiteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_queries();
        self.deliver_dropped_files(ctx);

        // Expired or missing session sends any admin view back to login.
        if self.route == Route::AdminDashboard && !self.session.is_active(Utc::now()) {
            self.route = Route::AdminLogin;
        }

        match self.route {
            Route::Home => {
                self.ensure_home_queries();
                crate::home::show(self, ctx);
                crate::complaint::show(self, ctx);
            }
            Route::AdminLogin => crate::admin::show_login(self, ctx),
            Route::AdminDashboard => {
                self.ensure_admin_queries();
                crate::admin::show_dashboard(self, ctx);
            }
        }

        self.toasts.ui(ctx);

        if self.pending.any() || self.complaint.busy() || self.admin.busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
