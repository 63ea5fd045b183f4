//! The public page: hero, biography, vision, news and gallery sections in
//! one scroll, with header navigation and the complaint call-to-action.

use chrono::Utc;
use egui::{Color32, CornerRadius, Margin, RichText, Vec2};

use jonoseba_core::{content, format_date_bn, ContentKey, QueryState};

use crate::app::{Route, SiteApp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Home,
    Biography,
    Vision,
    News,
    Gallery,
}

pub const NAV_LINKS: [(&str, SectionId); 5] = [
    ("হোম", SectionId::Home),
    ("জীবনী", SectionId::Biography),
    ("ভিশন", SectionId::Vision),
    ("সংবাদ", SectionId::News),
    ("গ্যালারি", SectionId::Gallery),
];

const HERO_GREEN: Color32 = Color32::from_rgb(0, 84, 48);
const ACCENT_RED: Color32 = Color32::from_rgb(198, 40, 40);

#[derive(Default)]
pub struct HomeState {
    scroll_target: Option<SectionId>,
    lightbox: Option<String>,
}

fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(Margin::same(12))
}

fn skeleton(ui: &mut egui::Ui, size: Vec2) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, CornerRadius::same(8), ui.visuals().faint_bg_color);
}

fn anchor(ui: &mut egui::Ui, state: &mut HomeState, id: SectionId) {
    let response = ui.allocate_response(Vec2::ZERO, egui::Sense::hover());
    if state.scroll_target == Some(id) {
        response.scroll_to_me(Some(egui::Align::Min));
        state.scroll_target = None;
    }
}

pub fn show(app: &mut SiteApp, ctx: &egui::Context) {
    header(app, ctx);

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                hero_section(app, ui);
                ui.add_space(24.0);
                biography_section(app, ui);
                ui.add_space(24.0);
                vision_section(app, ui);
                ui.add_space(24.0);
                news_section(app, ui);
                ui.add_space(24.0);
                gallery_section(app, ui);
                ui.add_space(24.0);
                footer(app, ui);
            });
    });

    lightbox(app, ctx);
}

fn header(app: &mut SiteApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("site_header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("খ").size(20.0).strong().color(HERO_GREEN));
            ui.label(RichText::new("খায়রুল কবির খোকন").size(16.0).strong());
            ui.separator();

            for (label, id) in NAV_LINKS {
                if ui.link(label).clicked() {
                    app.home.scroll_target = Some(id);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let cta = egui::Button::new(
                    RichText::new("অভিযোগ / যোগাযোগ").color(Color32::WHITE),
                )
                .fill(ACCENT_RED);
                if ui.add(cta).clicked() {
                    app.complaint.open();
                }
            });
        });
    });
}

fn hero_section(app: &mut SiteApp, ui: &mut egui::Ui) {
    anchor(ui, &mut app.home, SectionId::Home);

    let block = content::resolve(
        ContentKey::Hero,
        app.cache
            .content_query(ContentKey::Hero)
            .state
            .data()
            .cloned()
            .flatten(),
    );

    egui::Frame::new()
        .fill(HERO_GREEN)
        .inner_margin(Margin::same(40))
        .corner_radius(CornerRadius::same(12))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("যুগ্ম মহাসচিব, বিএনপি")
                        .size(13.0)
                        .color(Color32::from_gray(220)),
                );
                ui.add_space(10.0);
                ui.label(
                    RichText::new(&block.title)
                        .size(34.0)
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.add_space(8.0);
                ui.label(
                    RichText::new(&block.content)
                        .size(20.0)
                        .color(Color32::from_gray(230)),
                );
                ui.add_space(8.0);
                ui.label(
                    RichText::new("ডাকসু সাবেক জিএস থেকে জাতীয় নেতৃত্ব — জনগণের সেবায় নিবেদিত এক জীবন")
                        .size(15.0)
                        .color(Color32::from_gray(200)),
                );
                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    ui.add_space(ui.available_width() / 2.0 - 140.0);
                    if ui.button("আমার সম্পর্কে জানুন").clicked() {
                        app.home.scroll_target = Some(SectionId::Biography);
                    }
                    if ui.button("ভিশন দেখুন").clicked() {
                        app.home.scroll_target = Some(SectionId::Vision);
                    }
                });
            });
        });
}

fn biography_section(app: &mut SiteApp, ui: &mut egui::Ui) {
    anchor(ui, &mut app.home, SectionId::Biography);

    let block = content::resolve(
        ContentKey::Biography,
        app.cache
            .content_query(ContentKey::Biography)
            .state
            .data()
            .cloned()
            .flatten(),
    );

    ui.label(RichText::new("পরিচিতি").size(13.0).color(HERO_GREEN));
    ui.heading(RichText::new(&block.title).size(26.0).strong());
    ui.add_space(6.0);
    ui.label(RichText::new(&block.content).size(16.0));
    ui.add_space(12.0);

    let milestones = [
        ("ডাকসু জিএস", "ছাত্র নেতৃত্বের শুরু"),
        ("জনসেবক", "সমাজ সেবায় নিবেদিত"),
        ("সংসদ সদস্য", "জাতীয় সংসদে প্রতিনিধিত্ব"),
        ("গণতন্ত্রের প্রহরী", "জনগণের অধিকার রক্ষা"),
    ];
    ui.horizontal_wrapped(|ui| {
        for (title, description) in milestones {
            card_frame(ui).show(ui, |ui| {
                ui.set_width(200.0);
                ui.label(RichText::new(title).strong());
                ui.label(RichText::new(description).size(13.0).weak());
            });
        }
    });
}

fn vision_section(app: &mut SiteApp, ui: &mut egui::Ui) {
    anchor(ui, &mut app.home, SectionId::Vision);

    let block = content::resolve(
        ContentKey::Vision,
        app.cache
            .content_query(ContentKey::Vision)
            .state
            .data()
            .cloned()
            .flatten(),
    );

    ui.label(RichText::new("আমাদের লক্ষ্য").size(13.0).color(ACCENT_RED));
    ui.heading(RichText::new(&block.title).size(26.0).strong());
    ui.add_space(6.0);
    ui.label(RichText::new(&block.content).size(16.0));
    ui.add_space(12.0);

    let points = [
        ("শিক্ষা ও দক্ষতা", "যুবসমাজের জন্য আধুনিক শিক্ষা ও কারিগরি প্রশিক্ষণ"),
        ("স্বাস্থ্যসেবা", "সবার জন্য মানসম্মত ও সাশ্রয়ী স্বাস্থ্যসেবা নিশ্চিতকরণ"),
        ("অর্থনৈতিক উন্নয়ন", "কর্মসংস্থান সৃষ্টি ও ক্ষুদ্র উদ্যোক্তাদের সহায়তা"),
        ("অবকাঠামো", "আধুনিক যোগাযোগ ব্যবস্থা ও ডিজিটাল সুবিধা"),
    ];
    ui.horizontal_wrapped(|ui| {
        for (title, description) in points {
            card_frame(ui).show(ui, |ui| {
                ui.set_width(230.0);
                ui.label(RichText::new(title).strong());
                ui.label(RichText::new(description).size(13.0).weak());
            });
        }
    });

    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("\"গণতন্ত্র ও সুশাসন প্রতিষ্ঠার মাধ্যমে একটি উন্নত বাংলাদেশ গড়তে প্রতিশ্রুতিবদ্ধ\"")
                .size(17.0)
                .italics(),
        );
        ui.label(RichText::new("— খায়রুল কবির খোকন").weak());
    });
}

fn news_section(app: &mut SiteApp, ui: &mut egui::Ui) {
    anchor(ui, &mut app.home, SectionId::News);

    ui.label(RichText::new("সর্বশেষ খবর").size(13.0).color(HERO_GREEN));
    ui.heading(RichText::new("সংবাদ ও কার্যক্রম").size(26.0).strong());
    ui.label(RichText::new("সাম্প্রতিক কার্যক্রম ও উন্নয়ন প্রকল্পসমূহ").weak());
    ui.add_space(8.0);

    match &app.cache.news.state {
        QueryState::Loading | QueryState::NotAsked => {
            ui.horizontal(|ui| {
                for _ in 0..3 {
                    skeleton(ui, Vec2::new(300.0, 180.0));
                }
            });
        }
        state => {
            let items = match state.data() {
                Some(items) if !items.is_empty() => items.clone(),
                _ => content::placeholder_news(Utc::now()),
            };
            ui.horizontal_wrapped(|ui| {
                for item in &items {
                    card_frame(ui).show(ui, |ui| {
                        ui.set_width(300.0);
                        match &item.image_url {
                            Some(url) => {
                                ui.add(
                                    egui::Image::from_uri(url)
                                        .fit_to_exact_size(Vec2::new(300.0, 160.0))
                                        .corner_radius(CornerRadius::same(8)),
                                );
                            }
                            None => {
                                ui.vertical_centered(|ui| {
                                    ui.label(RichText::new("📰").size(40.0));
                                });
                            }
                        }
                        ui.label(RichText::new(format_date_bn(item.date)).size(12.0).weak());
                        ui.label(RichText::new(&item.title).strong());
                        ui.label(RichText::new(&item.description).size(13.0).weak());
                    });
                }
            });
        }
    }
}

fn gallery_section(app: &mut SiteApp, ui: &mut egui::Ui) {
    anchor(ui, &mut app.home, SectionId::Gallery);

    ui.label(RichText::new("ফটো গ্যালারি").size(13.0).color(ACCENT_RED));
    ui.heading(RichText::new("কার্যক্রমের চিত্র").size(26.0).strong());
    ui.label(RichText::new("বিভিন্ন কর্মসূচি ও জনসম্পৃক্ততার কিছু মুহূর্ত").weak());
    ui.add_space(8.0);

    match &app.cache.gallery.state {
        QueryState::Loading | QueryState::NotAsked => {
            ui.horizontal(|ui| {
                for _ in 0..6 {
                    skeleton(ui, Vec2::new(150.0, 150.0));
                }
            });
        }
        state => {
            let images = state.data().cloned().unwrap_or_default();
            if images.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for caption in content::PLACEHOLDER_GALLERY_CAPTIONS {
                        card_frame(ui).show(ui, |ui| {
                            ui.set_width(150.0);
                            ui.set_height(130.0);
                            ui.centered_and_justified(|ui| {
                                ui.label(RichText::new(caption).strong());
                            });
                        });
                    }
                });
            } else {
                let mut open_image = None;
                ui.horizontal_wrapped(|ui| {
                    for image in &images {
                        let widget = egui::ImageButton::new(
                            egui::Image::from_uri(&image.image_url)
                                .fit_to_exact_size(Vec2::new(150.0, 150.0)),
                        );
                        let response = ui.add(widget);
                        let response = match &image.caption {
                            Some(caption) => response.on_hover_text(caption),
                            None => response,
                        };
                        if response.clicked() {
                            open_image = Some(image.image_url.clone());
                        }
                    }
                });
                if open_image.is_some() {
                    app.home.lightbox = open_image;
                }
            }
        }
    }
}

fn footer(app: &mut SiteApp, ui: &mut egui::Ui) {
    ui.separator();
    ui.horizontal_wrapped(|ui| {
        ui.vertical(|ui| {
            ui.set_width(300.0);
            ui.label(RichText::new("খায়রুল কবির খোকন").strong());
            ui.label(RichText::new("সংসদ সদস্য, নরসিংদী").size(12.0).weak());
            ui.label(
                RichText::new("গণতন্ত্র ও জনগণের অধিকার রক্ষায় নিবেদিত। আপনার কণ্ঠস্বর হতে পেরে গর্বিত।")
                    .size(12.0),
            );
        });
        ui.vertical(|ui| {
            ui.label(RichText::new("দ্রুত লিংক").strong());
            for (label, id) in NAV_LINKS {
                if ui.link(RichText::new(label).size(13.0)).clicked() {
                    app.home.scroll_target = Some(id);
                }
            }
        });
        ui.vertical(|ui| {
            ui.label(RichText::new("যোগাযোগ").strong());
            ui.label(RichText::new("নরসিংদী, বাংলাদেশ").size(13.0));
            if ui.link(RichText::new("🔒 অ্যাডমিন").size(13.0)).clicked() {
                app.route = Route::AdminLogin;
            }
        });
    });
}

fn lightbox(app: &mut SiteApp, ctx: &egui::Context) {
    let Some(url) = app.home.lightbox.clone() else {
        return;
    };

    let mut open = true;
    egui::Window::new("গ্যালারি")
        .open(&mut open)
        .collapsible(false)
        .default_size(Vec2::new(760.0, 560.0))
        .show(ctx, |ui| {
            ui.add(egui::Image::from_uri(&url).max_size(Vec2::new(720.0, 520.0)));
        });
    if !open {
        app.home.lightbox = None;
    }
}
