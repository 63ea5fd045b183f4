//! Admin login and dashboard: content editor, news manager, gallery manager
//! and the complaints viewer. Every view here checks the session each frame
//! and falls back to the login window when it is gone.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use egui::{Color32, CornerRadius, Margin, RichText, Vec2};
use log::warn;
use poll_promise::Promise;

use jonoseba_core::{
    format_date_bn, hooks, upload, Complaint, ComplaintStatus, ContentKey, FieldErrors,
    GalleryForm, GalleryImage, Mutation, NewsForm, NewsItem, QueryState, RestStore,
    SiteContentBlock, UploadKind,
};

use crate::app::{Fetched, PickedFile, Route, SiteApp, Toasts};

const PENDING_YELLOW: Color32 = Color32::from_rgb(180, 130, 20);
const RESOLVED_GREEN: Color32 = Color32::from_rgb(25, 110, 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Content,
    News,
    Gallery,
    Complaints,
}

#[derive(Default, Clone)]
struct ContentEdit {
    title: String,
    content: String,
}

#[derive(Default)]
pub struct AdminState {
    tab: AdminTab,
    password_input: String,
    show_password: bool,

    content_edits: HashMap<ContentKey, ContentEdit>,
    edits_seeded: bool,
    saving: Option<(ContentKey, Promise<Fetched<SiteContentBlock>>)>,

    news_form: NewsForm,
    news_file: Option<PickedFile>,
    news_errors: FieldErrors,
    adding_news: Option<Promise<Fetched<NewsItem>>>,
    deleting_news: Option<(String, Promise<Fetched<()>>)>,

    gallery_form: GalleryForm,
    gallery_file: Option<PickedFile>,
    gallery_errors: FieldErrors,
    adding_gallery: Option<Promise<Fetched<GalleryImage>>>,
    deleting_gallery: Option<(String, Promise<Fetched<()>>)>,

    toggling: Option<(String, Promise<Fetched<Complaint>>)>,
}

impl AdminState {
    pub fn busy(&self) -> bool {
        self.saving.is_some()
            || self.adding_news.is_some()
            || self.deleting_news.is_some()
            || self.adding_gallery.is_some()
            || self.deleting_gallery.is_some()
            || self.toggling.is_some()
    }

    /// Dropped files go to the picker of the tab that is showing.
    pub fn receive_file(&mut self, file: PickedFile, toasts: &mut Toasts) {
        let (kind, slot) = match self.tab {
            AdminTab::News => (UploadKind::NewsImage, &mut self.news_file),
            AdminTab::Gallery => (UploadKind::GalleryImage, &mut self.gallery_file),
            _ => return,
        };
        match upload::check_file(kind, &file.name, file.bytes.len() as u64) {
            Ok(()) => *slot = Some(file),
            Err(e) => toasts.error(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// login

pub fn show_login(app: &mut SiteApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            if ui.link("← মূল পাতায় ফিরুন").clicked() {
                app.route = Route::Home;
                app.admin.password_input.clear();
            }
            ui.add_space(30.0);
            ui.label(RichText::new("🔒").size(36.0));
            ui.heading(RichText::new("অ্যাডমিন লগইন").size(24.0).strong());
            ui.label(RichText::new("ড্যাশবোর্ডে প্রবেশ করতে পাসওয়ার্ড দিন").weak());
            ui.add_space(20.0);

            ui.scope(|ui| {
                ui.set_max_width(320.0);
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut app.admin.password_input)
                            .password(!app.admin.show_password)
                            .hint_text("পাসওয়ার্ড লিখুন"),
                    );
                    let eye = if app.admin.show_password { "🙈" } else { "👁" };
                    if ui.small_button(eye).clicked() {
                        app.admin.show_password = !app.admin.show_password;
                    }
                });
                ui.add_space(10.0);

                if ui.button("প্রবেশ করুন").clicked() {
                    match app.session.login(&app.admin.password_input, Utc::now()) {
                        Ok(()) => {
                            app.admin.password_input.clear();
                            app.toasts.success("অ্যাডমিন প্যানেলে স্বাগতম");
                            app.route = Route::AdminDashboard;
                        }
                        Err(e) => app.toasts.error(e.to_string()),
                    }
                }
            });
        });
    });
}

// ---------------------------------------------------------------------------
// dashboard

pub fn show_dashboard(app: &mut SiteApp, ctx: &egui::Context) {
    resolve_mutations(app);

    egui::TopBottomPanel::top("admin_header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("অ্যাডমিন ড্যাশবোর্ড").size(16.0).strong());
            ui.label(RichText::new("কন্টেন্ট ম্যানেজমেন্ট").size(12.0).weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("লগআউট").clicked() {
                    app.session.logout();
                    app.route = Route::AdminLogin;
                }
            });
        });
    });

    // Data snapshots keep the cache free for invalidation mid-frame.
    let admin_content = app.cache.admin_content.state.clone();
    let admin_news = app.cache.admin_news.state.clone();
    let admin_gallery = app.cache.admin_gallery.state.clone();
    let admin_complaints = app.cache.admin_complaints.state.clone();

    let store = app.store.clone();
    let admin = &mut app.admin;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            for (label, tab) in [
                ("কন্টেন্ট", AdminTab::Content),
                ("সংবাদ", AdminTab::News),
                ("গ্যালারি", AdminTab::Gallery),
                ("অভিযোগ", AdminTab::Complaints),
            ] {
                if ui.selectable_label(admin.tab == tab, label).clicked() {
                    admin.tab = tab;
                }
            }
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match admin.tab {
                AdminTab::Content => content_tab(ui, admin, &store, &admin_content),
                AdminTab::News => news_tab(ui, admin, &store, &admin_news),
                AdminTab::Gallery => gallery_tab(ui, admin, &store, &admin_gallery),
                AdminTab::Complaints => complaints_tab(ui, admin, &store, &admin_complaints),
            });
    });
}

/// Finish any completed mutation: invalidate its queries synchronously and
/// toast the outcome.
fn resolve_mutations(app: &mut SiteApp) {
    if let Some((key, promise)) = app.admin.saving.take() {
        match promise.try_take() {
            Ok(Ok(_)) => {
                app.cache.apply(Mutation::ContentUpsert);
                app.toasts.success("কন্টেন্ট আপডেট করা হয়েছে");
            }
            Ok(Err(message)) => {
                warn!("Content save failed: {}", message);
                app.toasts.error("আপডেট করতে সমস্যা হয়েছে");
            }
            Err(promise) => app.admin.saving = Some((key, promise)),
        }
    }

    if let Some(promise) = app.admin.adding_news.take() {
        match promise.try_take() {
            Ok(Ok(_)) => {
                app.cache.apply(Mutation::NewsInsert);
                app.toasts.success("সংবাদ যোগ করা হয়েছে");
                app.admin.news_form = NewsForm::default();
                app.admin.news_file = None;
            }
            Ok(Err(message)) => {
                warn!("News insert failed: {}", message);
                app.toasts.error("সংবাদ যোগ করতে সমস্যা হয়েছে");
            }
            Err(promise) => app.admin.adding_news = Some(promise),
        }
    }

    if let Some((id, promise)) = app.admin.deleting_news.take() {
        match promise.try_take() {
            Ok(Ok(())) => {
                app.cache.apply(Mutation::NewsDelete);
                app.toasts.success("সংবাদ মুছে ফেলা হয়েছে");
            }
            Ok(Err(message)) => {
                warn!("News delete failed: {}", message);
                app.toasts.error("মুছে ফেলতে সমস্যা হয়েছে");
            }
            Err(promise) => app.admin.deleting_news = Some((id, promise)),
        }
    }

    if let Some(promise) = app.admin.adding_gallery.take() {
        match promise.try_take() {
            Ok(Ok(_)) => {
                app.cache.apply(Mutation::GalleryInsert);
                app.toasts.success("ছবি যোগ করা হয়েছে");
                app.admin.gallery_form = GalleryForm::default();
                app.admin.gallery_file = None;
            }
            Ok(Err(message)) => {
                warn!("Gallery insert failed: {}", message);
                app.toasts.error("ছবি যোগ করতে সমস্যা হয়েছে");
            }
            Err(promise) => app.admin.adding_gallery = Some(promise),
        }
    }

    if let Some((id, promise)) = app.admin.deleting_gallery.take() {
        match promise.try_take() {
            Ok(Ok(())) => {
                app.cache.apply(Mutation::GalleryDelete);
                app.toasts.success("ছবি মুছে ফেলা হয়েছে");
            }
            Ok(Err(message)) => {
                warn!("Gallery delete failed: {}", message);
                app.toasts.error("মুছে ফেলতে সমস্যা হয়েছে");
            }
            Err(promise) => app.admin.deleting_gallery = Some((id, promise)),
        }
    }

    if let Some((id, promise)) = app.admin.toggling.take() {
        match promise.try_take() {
            Ok(Ok(_)) => {
                app.cache.apply(Mutation::ComplaintStatusUpdate);
                app.toasts.success("স্ট্যাটাস আপডেট করা হয়েছে");
            }
            Ok(Err(message)) => {
                warn!("Status update failed: {}", message);
                app.toasts.error("আপডেট করতে সমস্যা হয়েছে");
            }
            Err(promise) => app.admin.toggling = Some((id, promise)),
        }
    }
}

fn group_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(14))
}

fn loading_row(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(RichText::new("লোড হচ্ছে...").weak());
    });
}

fn status_chip(ui: &mut egui::Ui, status: ComplaintStatus) {
    let (color, icon) = match status {
        ComplaintStatus::Pending => (PENDING_YELLOW, "⏳"),
        ComplaintStatus::Resolved => (RESOLVED_GREEN, "✔"),
    };
    ui.label(
        RichText::new(format!("{} {}", icon, status.label()))
            .size(13.0)
            .color(color),
    );
}

fn file_picker_row(ui: &mut egui::Ui, slot: &mut Option<PickedFile>, hint: &str) {
    let mut clear = false;
    ui.horizontal(|ui| match &*slot {
        Some(file) => {
            ui.label(RichText::new(&file.name).size(13.0));
            if ui.small_button("✖").clicked() {
                clear = true;
            }
        }
        None => {
            ui.label(RichText::new(hint).size(13.0).weak());
        }
    });
    if clear {
        *slot = None;
    }
}

// ---------------------------------------------------------------------------
// tabs

fn content_tab(
    ui: &mut egui::Ui,
    admin: &mut AdminState,
    store: &Arc<RestStore>,
    query: &QueryState<Vec<SiteContentBlock>>,
) {
    ui.heading("কন্টেন্ট এডিটর");
    ui.add_space(6.0);

    let blocks = match query {
        QueryState::Loading | QueryState::NotAsked => {
            loading_row(ui);
            return;
        }
        state => state.data().cloned().unwrap_or_default(),
    };

    // Seed the editors once from whatever the store has.
    if !admin.edits_seeded {
        for key in ContentKey::ALL {
            let stored = blocks.iter().find(|block| block.id == key.as_str());
            admin.content_edits.insert(
                key,
                ContentEdit {
                    title: stored.map(|b| b.title.clone()).unwrap_or_default(),
                    content: stored.map(|b| b.content.clone()).unwrap_or_default(),
                },
            );
        }
        admin.edits_seeded = true;
    }

    for key in ContentKey::ALL {
        let saving = admin.saving.is_some();
        let edit = admin.content_edits.entry(key).or_default();

        group_frame(ui).show(ui, |ui| {
            ui.label(RichText::new(key.label()).strong());
            ui.add_space(4.0);
            ui.label(RichText::new("শিরোনাম").size(13.0));
            ui.text_edit_singleline(&mut edit.title);
            ui.label(RichText::new("বিষয়বস্তু").size(13.0));
            ui.add(egui::TextEdit::multiline(&mut edit.content).desired_rows(4));
            ui.add_space(6.0);

            if ui
                .add_enabled(!saving, egui::Button::new("সংরক্ষণ করুন"))
                .clicked()
            {
                let store = store.clone();
                let title = edit.title.clone();
                let content = edit.content.clone();
                admin.saving = Some((
                    key,
                    Promise::spawn_thread("save-content", move || {
                        hooks::upsert_content(store.as_ref(), key, &title, &content)
                            .map_err(|e| e.to_string())
                    }),
                ));
            }
        });
        ui.add_space(8.0);
    }
}

fn news_tab(
    ui: &mut egui::Ui,
    admin: &mut AdminState,
    store: &Arc<RestStore>,
    query: &QueryState<Vec<NewsItem>>,
) {
    ui.heading("সংবাদ ম্যানেজার");
    ui.add_space(6.0);

    group_frame(ui).show(ui, |ui| {
        ui.label(RichText::new("নতুন সংবাদ যোগ করুন").strong());
        ui.add(egui::TextEdit::singleline(&mut admin.news_form.title).hint_text("শিরোনাম"));
        if let Some(message) = admin.news_errors.get("title") {
            ui.label(RichText::new(message).size(12.0).color(ui.visuals().error_fg_color));
        }
        ui.add(
            egui::TextEdit::multiline(&mut admin.news_form.description)
                .desired_rows(3)
                .hint_text("বিবরণ"),
        );
        file_picker_row(
            ui,
            &mut admin.news_file,
            "ছবি উইন্ডোতে টেনে এনে ছাড়ুন (ঐচ্ছিক)",
        );
        ui.add_space(6.0);

        let uploading = admin.adding_news.is_some();
        let label = if uploading { "আপলোড হচ্ছে..." } else { "যোগ করুন" };
        if ui.add_enabled(!uploading, egui::Button::new(label)).clicked() {
            match admin.news_form.validate() {
                Err(errors) => admin.news_errors = errors,
                Ok(()) => {
                    admin.news_errors = FieldErrors::default();
                    let form = admin.news_form.clone();
                    let file = admin.news_file.take();
                    let store = store.clone();
                    admin.adding_news = Some(Promise::spawn_thread("add-news", move || {
                        // The item still goes in with no image if the
                        // upload is refused.
                        let image_url = file.and_then(|file| {
                            match upload::upload_file(
                                store.as_ref(),
                                UploadKind::NewsImage,
                                &file.name,
                                &file.bytes,
                                Utc::now(),
                            ) {
                                Ok(url) => Some(url),
                                Err(e) => {
                                    warn!("News image upload failed: {}", e);
                                    None
                                }
                            }
                        });
                        hooks::insert_news(store.as_ref(), &form.to_record(image_url))
                            .map_err(|e| e.to_string())
                    }));
                }
            }
        }
    });
    ui.add_space(10.0);

    match query {
        QueryState::Loading | QueryState::NotAsked => loading_row(ui),
        state => {
            for item in state.data().cloned().unwrap_or_default() {
                let deleting = admin.deleting_news.is_some();
                group_frame(ui).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if let Some(url) = &item.image_url {
                            ui.add(
                                egui::Image::from_uri(url)
                                    .fit_to_exact_size(Vec2::new(72.0, 72.0))
                                    .corner_radius(CornerRadius::same(6)),
                            );
                        }
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&item.title).strong());
                            ui.label(RichText::new(&item.description).size(13.0).weak());
                            ui.label(
                                RichText::new(format_date_bn(item.date)).size(12.0).weak(),
                            );
                        });
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                if ui
                                    .add_enabled(!deleting, egui::Button::new("🗑"))
                                    .clicked()
                                {
                                    let store = store.clone();
                                    let id = item.id.clone();
                                    let thread_id = id.clone();
                                    admin.deleting_news = Some((
                                        id,
                                        Promise::spawn_thread("delete-news", move || {
                                            hooks::delete_news(store.as_ref(), &thread_id)
                                                .map_err(|e| e.to_string())
                                        }),
                                    ));
                                }
                            },
                        );
                    });
                });
                ui.add_space(6.0);
            }
        }
    }
}

fn gallery_tab(
    ui: &mut egui::Ui,
    admin: &mut AdminState,
    store: &Arc<RestStore>,
    query: &QueryState<Vec<GalleryImage>>,
) {
    ui.heading("গ্যালারি ম্যানেজার");
    ui.add_space(6.0);

    group_frame(ui).show(ui, |ui| {
        ui.label(RichText::new("নতুন ছবি যোগ করুন").strong());
        file_picker_row(
            ui,
            &mut admin.gallery_file,
            "ছবি উইন্ডোতে টেনে এনে ছাড়ুন",
        );
        if let Some(message) = admin.gallery_errors.get("file") {
            ui.label(RichText::new(message).size(12.0).color(ui.visuals().error_fg_color));
        }
        ui.add(
            egui::TextEdit::singleline(&mut admin.gallery_form.caption)
                .hint_text("ক্যাপশন (ঐচ্ছিক)"),
        );
        ui.add_space(6.0);

        let uploading = admin.adding_gallery.is_some();
        let label = if uploading { "আপলোড হচ্ছে..." } else { "যোগ করুন" };
        if ui.add_enabled(!uploading, egui::Button::new(label)).clicked() {
            match admin.gallery_form.validate(admin.gallery_file.is_some()) {
                Err(errors) => admin.gallery_errors = errors,
                Ok(()) => {
                    admin.gallery_errors = FieldErrors::default();
                    let form = admin.gallery_form.clone();
                    // validate() just confirmed the file is there.
                    if let Some(file) = admin.gallery_file.take() {
                        let store = store.clone();
                        admin.adding_gallery =
                            Some(Promise::spawn_thread("add-gallery", move || {
                                // No image, no row: the upload must succeed
                                // before anything is inserted.
                                let url = upload::upload_file(
                                    store.as_ref(),
                                    UploadKind::GalleryImage,
                                    &file.name,
                                    &file.bytes,
                                    Utc::now(),
                                )
                                .map_err(|e| e.to_string())?;
                                hooks::insert_gallery(store.as_ref(), &form.to_record(url))
                                    .map_err(|e| e.to_string())
                            }));
                    }
                }
            }
        }
    });
    ui.add_space(10.0);

    match query {
        QueryState::Loading | QueryState::NotAsked => loading_row(ui),
        state => {
            ui.horizontal_wrapped(|ui| {
                for image in state.data().cloned().unwrap_or_default() {
                    let deleting = admin.deleting_gallery.is_some();
                    group_frame(ui).show(ui, |ui| {
                        ui.set_width(160.0);
                        ui.add(
                            egui::Image::from_uri(&image.image_url)
                                .fit_to_exact_size(Vec2::new(150.0, 150.0))
                                .corner_radius(CornerRadius::same(6)),
                        );
                        if let Some(caption) = &image.caption {
                            ui.label(RichText::new(caption).size(12.0).weak());
                        }
                        if ui
                            .add_enabled(!deleting, egui::Button::new("🗑"))
                            .clicked()
                        {
                            let store = store.clone();
                            let id = image.id.clone();
                            let thread_id = id.clone();
                            admin.deleting_gallery = Some((
                                id,
                                Promise::spawn_thread("delete-gallery", move || {
                                    hooks::delete_gallery(store.as_ref(), &thread_id)
                                        .map_err(|e| e.to_string())
                                }),
                            ));
                        }
                    });
                }
            });
        }
    }
}

fn complaints_tab(
    ui: &mut egui::Ui,
    admin: &mut AdminState,
    store: &Arc<RestStore>,
    query: &QueryState<Vec<Complaint>>,
) {
    ui.heading("অভিযোগ / পরামর্শ");

    let complaints = match query {
        QueryState::Loading | QueryState::NotAsked => {
            loading_row(ui);
            return;
        }
        state => state.data().cloned().unwrap_or_default(),
    };

    let pending = complaints
        .iter()
        .filter(|c| c.status == ComplaintStatus::Pending)
        .count();
    let resolved = complaints.len() - pending;
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("⏳ পেন্ডিং: {pending}")).color(PENDING_YELLOW));
        ui.label(RichText::new(format!("✔ সমাধান: {resolved}")).color(RESOLVED_GREEN));
    });
    ui.add_space(8.0);

    if complaints.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(RichText::new("কোনো অভিযোগ পাওয়া যায়নি").weak());
        });
        return;
    }

    for complaint in &complaints {
        group_frame(ui).show(ui, |ui| {
            ui.horizontal(|ui| {
                status_chip(ui, complaint.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut resolved = complaint.status == ComplaintStatus::Resolved;
                    let free = admin.toggling.is_none();
                    if ui
                        .add_enabled(free, egui::Checkbox::new(&mut resolved, "সমাধান"))
                        .changed()
                    {
                        let store = store.clone();
                        let id = complaint.id.clone();
                        let thread_id = id.clone();
                        let next = complaint.status.toggled();
                        admin.toggling = Some((
                            id,
                            Promise::spawn_thread("toggle-status", move || {
                                hooks::set_complaint_status(store.as_ref(), &thread_id, next)
                                    .map_err(|e| e.to_string())
                            }),
                        ));
                    }
                });
            });
            ui.separator();

            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(format!("👤 {}", complaint.name)).strong());
                ui.label(format!("📞 {}", complaint.phone));
                ui.label(format!("📍 {}", complaint.address));
                ui.label(
                    RichText::new(format!(
                        "📅 {}",
                        format_date_bn(complaint.created_at.date_naive())
                    ))
                    .weak(),
                );
            });
            ui.label(RichText::new(&complaint.category).size(12.0).color(RESOLVED_GREEN));
            ui.add_space(4.0);
            ui.label(&complaint.description);

            if let Some(url) = &complaint.attachment_url {
                ui.add_space(4.0);
                ui.hyperlink_to("👁 সংযুক্তি দেখুন", url);
            }
        });
        ui.add_space(6.0);
    }
}
