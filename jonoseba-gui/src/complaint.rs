//! The public complaint/suggestion dialog. Validation runs on submit; the
//! attachment upload and the insert run on one background thread while the
//! submit button stays disabled.

use chrono::Utc;
use egui::RichText;
use log::warn;
use poll_promise::Promise;

use jonoseba_core::{
    hooks, upload, Complaint, ComplaintForm, FieldErrors, Mutation, UploadKind,
    COMPLAINT_CATEGORIES,
};

use crate::app::{Fetched, PickedFile, SiteApp, Toasts};

#[derive(Default)]
pub struct ComplaintDialog {
    open: bool,
    form: ComplaintForm,
    errors: FieldErrors,
    file: Option<PickedFile>,
    submitting: Option<Promise<Fetched<Complaint>>>,
}

impl ComplaintDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn busy(&self) -> bool {
        self.submitting.is_some()
    }

    /// Attachment checks run at pick time, like the original form.
    pub fn receive_file(&mut self, file: PickedFile, toasts: &mut Toasts) {
        match upload::check_file(
            UploadKind::ComplaintAttachment,
            &file.name,
            file.bytes.len() as u64,
        ) {
            Ok(()) => self.file = Some(file),
            Err(e) => toasts.error(e.to_string()),
        }
    }

    fn reset(&mut self) {
        self.form = ComplaintForm::default();
        self.errors = FieldErrors::default();
        self.file = None;
        self.open = false;
    }
}

fn field_error(ui: &mut egui::Ui, errors: &FieldErrors, field: &str) {
    if let Some(message) = errors.get(field) {
        ui.label(RichText::new(message).size(12.0).color(ui.visuals().error_fg_color));
    }
}

pub fn show(app: &mut SiteApp, ctx: &egui::Context) {
    // Resolve an in-flight submission first so the cache invalidation runs
    // in the same frame the mutation completes.
    if let Some(promise) = app.complaint.submitting.take() {
        match promise.try_take() {
            Ok(Ok(_)) => {
                app.cache.apply(Mutation::ComplaintInsert);
                app.toasts
                    .success("সফলভাবে জমা হয়েছে। আপনার অভিযোগ/পরামর্শ গ্রহণ করা হয়েছে। শীঘ্রই যোগাযোগ করা হবে।");
                app.complaint.reset();
            }
            Ok(Err(message)) => {
                warn!("Complaint submission failed: {}", message);
                app.toasts.error("জমা দিতে সমস্যা হয়েছে। আবার চেষ্টা করুন।");
            }
            Err(promise) => app.complaint.submitting = Some(promise),
        }
    }

    if !app.complaint.open {
        return;
    }

    let store = app.store.clone();
    let dialog = &mut app.complaint;
    let mut keep_open = true;

    egui::Window::new("অভিযোগ / পরামর্শ ফর্ম")
        .open(&mut keep_open)
        .collapsible(false)
        .default_width(420.0)
        .show(ctx, |ui| {
            ui.label("নাম");
            ui.text_edit_singleline(&mut dialog.form.name);
            field_error(ui, &dialog.errors, "name");

            ui.label("মোবাইল নম্বর");
            ui.add(
                egui::TextEdit::singleline(&mut dialog.form.phone).hint_text("01XXXXXXXXX"),
            );
            field_error(ui, &dialog.errors, "phone");

            ui.label("ঠিকানা");
            ui.add(
                egui::TextEdit::singleline(&mut dialog.form.address)
                    .hint_text("গ্রাম, উপজেলা, জেলা"),
            );
            field_error(ui, &dialog.errors, "address");

            ui.label("বিভাগ");
            egui::ComboBox::from_id_salt("complaint_category")
                .selected_text(if dialog.form.category.is_empty() {
                    "বিভাগ নির্বাচন করুন"
                } else {
                    dialog.form.category.as_str()
                })
                .show_ui(ui, |ui| {
                    for category in COMPLAINT_CATEGORIES {
                        ui.selectable_value(
                            &mut dialog.form.category,
                            category.to_string(),
                            category,
                        );
                    }
                });
            field_error(ui, &dialog.errors, "category");

            ui.label("বিস্তারিত বিবরণ");
            ui.add(
                egui::TextEdit::multiline(&mut dialog.form.description)
                    .desired_rows(4)
                    .hint_text("আপনার সমস্যা বা পরামর্শ বিস্তারিত লিখুন..."),
            );
            field_error(ui, &dialog.errors, "description");

            ui.add_space(6.0);
            ui.label(RichText::new("সংযুক্তি (ছবি/পিডিএফ)").size(13.0));
            let mut clear_file = false;
            ui.horizontal(|ui| match &dialog.file {
                Some(file) => {
                    ui.label(RichText::new(&file.name).size(13.0));
                    if ui.small_button("✖").clicked() {
                        clear_file = true;
                    }
                }
                None => {
                    ui.label(
                        RichText::new("ফাইল উইন্ডোতে টেনে এনে ছাড়ুন (সর্বোচ্চ 5 MB)")
                            .size(13.0)
                            .weak(),
                    );
                }
            });
            if clear_file {
                dialog.file = None;
            }

            ui.add_space(10.0);
            let submitting = dialog.submitting.is_some();
            let label = if submitting { "জমা হচ্ছে..." } else { "জমা দিন" };
            if ui
                .add_enabled(!submitting, egui::Button::new(label))
                .clicked()
            {
                match dialog.form.validate() {
                    Err(errors) => dialog.errors = errors,
                    Ok(record) => {
                        dialog.errors = FieldErrors::default();
                        let file = dialog.file.take();
                        let store = store.clone();
                        dialog.submitting =
                            Some(Promise::spawn_thread("submit-complaint", move || {
                                let mut record = record;
                                if let Some(file) = file {
                                    // A failed upload does not block the
                                    // complaint; it goes in without the
                                    // attachment.
                                    match upload::upload_file(
                                        store.as_ref(),
                                        UploadKind::ComplaintAttachment,
                                        &file.name,
                                        &file.bytes,
                                        Utc::now(),
                                    ) {
                                        Ok(url) => record.attachment_url = Some(url),
                                        Err(e) => {
                                            warn!("Attachment upload failed, submitting without it: {}", e)
                                        }
                                    }
                                }
                                hooks::insert_complaint(store.as_ref(), &record)
                                    .map_err(|e| e.to_string())
                            }));
                    }
                }
            }
        });

    if !keep_open && !app.complaint.busy() {
        app.complaint.reset();
    }
}
