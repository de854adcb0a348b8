use eframe::egui;
use image::imageops::FilterType;
use image::RgbaImage;
use log::{error, info};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use crate::catalog::Filter;
use crate::preview::{PreviewEvent, PreviewPipeline};
use crate::thumbnails::{self, ThumbnailEvent};

/// Longest side of the copy handed to the thumbnail pipeline.
const THUMBNAIL_MAX_SIDE: u32 = 256;
/// Largest preview texture uploaded to the GPU.
const PREVIEW_MAX_SIDE: u32 = 2048;
const THUMBNAIL_CELL: f32 = 88.0;

pub struct FilterApp {
    source_image: Option<Arc<RgbaImage>>,
    preview: Option<PreviewPipeline>,
    preview_image: Option<RgbaImage>,
    selected_filter: Filter,
    intensity: f32,
    thumbnails: HashMap<String, RgbaImage>,
    thumbnail_textures: HashMap<String, egui::TextureHandle>,
    thumbnail_receiver: Option<mpsc::Receiver<ThumbnailEvent>>,
    cached_preview: Option<egui::TextureHandle>,
    file_dialog_receiver: Option<mpsc::Receiver<Option<PathBuf>>>,
    save_dialog_receiver: Option<mpsc::Receiver<Option<String>>>,
    status_message: Option<(String, egui::Color32)>,
}

impl Default for FilterApp {
    fn default() -> Self {
        Self {
            source_image: None,
            preview: None,
            preview_image: None,
            selected_filter: Filter::NoFilters,
            intensity: 0.0,
            thumbnails: HashMap::new(),
            thumbnail_textures: HashMap::new(),
            thumbnail_receiver: None,
            cached_preview: None,
            file_dialog_receiver: None,
            save_dialog_receiver: None,
            status_message: None,
        }
    }
}

impl FilterApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::default()
    }

    fn load_image(&mut self, path: &str) {
        match image::open(path) {
            Ok(img) => {
                info!("loaded {path}");
                self.start_session(img.to_rgba8());
            }
            Err(e) => {
                error!("failed to load {path}: {e}");
                self.status_message =
                    Some((format!("Failed to load image: {e}"), egui::Color32::RED));
            }
        }
    }

    /// A freshly picked image starts a new edit session: original preview,
    /// empty thumbnail map, the whole catalog fanned out in the background.
    fn start_session(&mut self, image: RgbaImage) {
        let source = Arc::new(image);

        self.preview_image = Some((*source).clone());
        self.preview = Some(PreviewPipeline::new(Arc::clone(&source)));
        self.selected_filter = Filter::NoFilters;
        self.intensity = 0.0;
        self.cached_preview = None;
        self.status_message = None;

        self.thumbnails.clear();
        self.thumbnail_textures.clear();
        let strip_source = Arc::new(downscale(&source, THUMBNAIL_MAX_SIDE));
        self.thumbnail_receiver = Some(thumbnails::generate_all(&strip_source));

        self.source_image = Some(source);
    }

    fn select_filter(&mut self, filter: Filter) {
        self.selected_filter = filter;
        self.intensity = 0.0;
        if let Some(pipeline) = &mut self.preview {
            pipeline.select_filter(filter);
        }
    }

    fn check_file_dialog_result(&mut self) {
        if let Some(receiver) = &self.file_dialog_receiver {
            if let Ok(path_option) = receiver.try_recv() {
                self.file_dialog_receiver = None;
                if let Some(path) = path_option {
                    if let Some(path_str) = path.to_str() {
                        let path_str = path_str.to_string();
                        self.load_image(&path_str);
                    }
                }
            }
        }
    }

    fn check_save_dialog_result(&mut self) {
        if let Some(receiver) = &self.save_dialog_receiver {
            if let Ok(outcome) = receiver.try_recv() {
                self.save_dialog_receiver = None;
                self.status_message = Some(match outcome {
                    Some(err) => (err, egui::Color32::RED),
                    None => (
                        "✓ Image saved!".to_string(),
                        egui::Color32::from_rgb(100, 200, 100),
                    ),
                });
            }
        }
    }

    fn check_thumbnail_events(&mut self) {
        let Some(receiver) = &self.thumbnail_receiver else {
            return;
        };
        let mut completed = false;
        for event in receiver.try_iter() {
            match event {
                ThumbnailEvent::Ready { filter, image } => {
                    let name = filter.display_name();
                    self.thumbnail_textures.remove(&name);
                    self.thumbnails.insert(name, image);
                }
                // Already logged in the pipeline; the cell simply stays empty.
                ThumbnailEvent::Failed { .. } => {}
                ThumbnailEvent::Completed => completed = true,
            }
        }
        if completed {
            info!("thumbnail strip complete");
            self.thumbnail_receiver = None;
        }
    }

    fn check_preview_events(&mut self) {
        let Some(pipeline) = &mut self.preview else {
            return;
        };
        match pipeline.poll() {
            Some(PreviewEvent::Updated(image)) => {
                self.preview_image = Some(image);
                self.cached_preview = None;
            }
            Some(PreviewEvent::Failed(err)) => {
                // The last good preview stays up.
                error!("preview render failed: {err}");
                self.status_message =
                    Some((format!("Preview failed: {err}"), egui::Color32::RED));
            }
            None => {}
        }
    }

    fn open_image_dialog(&mut self) {
        let (sender, receiver) = mpsc::channel();
        self.file_dialog_receiver = Some(receiver);
        thread::spawn(move || {
            let result = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
                .pick_file();
            let _ = sender.send(result);
        });
    }

    fn save_preview_dialog(&mut self) {
        let Some(image) = self.preview_image.clone() else {
            return;
        };
        let (sender, receiver) = mpsc::channel();
        self.save_dialog_receiver = Some(receiver);
        thread::spawn(move || {
            let mut outcome = None;
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("PNG", &["png"])
                .add_filter("JPEG", &["jpg", "jpeg"])
                .set_file_name("filtered.png")
                .save_file()
            {
                if let Err(e) = image.save(&path) {
                    outcome = Some(format!("Failed to save: {e}"));
                }
            }
            let _ = sender.send(outcome);
        });
    }

    fn ensure_thumbnail_textures(&mut self, ctx: &egui::Context) {
        for filter in Filter::ALL {
            let name = filter.display_name();
            if self.thumbnail_textures.contains_key(&name) {
                continue;
            }
            if let Some(image) = self.thumbnails.get(&name) {
                let size = [image.width() as usize, image.height() as usize];
                let pixels = image.as_flat_samples();
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
                let texture = ctx.load_texture(
                    format!("thumb_{name}"),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                self.thumbnail_textures.insert(name, texture);
            }
        }
    }

    fn thumbnail_strip(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::horizontal()
            .id_salt("thumbnail_strip")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let mut clicked = None;
                    for filter in Filter::ALL {
                        let name = filter.display_name();
                        ui.vertical(|ui| {
                            ui.set_width(THUMBNAIL_CELL);
                            match self.thumbnail_textures.get(&name) {
                                Some(texture) => {
                                    let size = fit_size(texture.size_vec2(), THUMBNAIL_CELL);
                                    let button = egui::ImageButton::new(
                                        egui::load::SizedTexture::new(texture.id(), size),
                                    )
                                    .selected(self.selected_filter == filter);
                                    if ui.add(button).clicked() {
                                        clicked = Some(filter);
                                    }
                                }
                                None => {
                                    ui.add_sized(
                                        [THUMBNAIL_CELL, THUMBNAIL_CELL],
                                        egui::Spinner::new(),
                                    );
                                }
                            }
                            ui.label(egui::RichText::new(name.as_str()).size(11.0));
                        });
                    }
                    if let Some(filter) = clicked {
                        self.select_filter(filter);
                    }
                });
            });
    }
}

impl eframe::App for FilterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_dialog_result();
        self.check_save_dialog_result();
        self.check_thumbnail_events();
        self.check_preview_events();
        self.ensure_thumbnail_textures(ctx);

        let preview_settled = self.preview.as_ref().map_or(true, |p| p.is_settled());

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("📁 Open").clicked() && self.file_dialog_receiver.is_none() {
                        self.open_image_dialog();
                        ui.close_menu();
                    }

                    let can_save = self.preview_image.is_some()
                        && self.save_dialog_receiver.is_none()
                        && preview_settled;
                    if ui
                        .add_enabled(can_save, egui::Button::new("💾 Save Image"))
                        .clicked()
                    {
                        self.save_preview_dialog();
                        ui.close_menu();
                    }
                });

                ui.separator();
                if self.file_dialog_receiver.is_some() {
                    ui.spinner();
                    ui.label("Opening...");
                }
                if self.save_dialog_receiver.is_some() {
                    ui.spinner();
                    ui.label("Saving...");
                }
                if self.thumbnail_receiver.is_some() {
                    ui.spinner();
                    ui.label("Building thumbnails...");
                }
                if !preview_settled {
                    ui.spinner();
                    ui.label("Rendering...");
                }
                if let Some((message, color)) = &self.status_message {
                    ui.colored_label(*color, message);
                }
                if let Some(source) = &self.source_image {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!("📏 {} x {} px", source.width(), source.height()));
                    });
                }
            });
        });

        if self.source_image.is_some() {
            egui::TopBottomPanel::bottom("thumbnail_panel").show(ctx, |ui| {
                if self.selected_filter.has_tunable_parameter() {
                    ui.add_space(4.0);
                    let slider = egui::Slider::new(&mut self.intensity, 0.0..=1.0)
                        .text("intensity")
                        .step_by(0.01);
                    if ui.add(slider).changed() {
                        if let Some(pipeline) = &mut self.preview {
                            pipeline.set_intensity(self.intensity);
                        }
                    }
                }
                ui.add_space(4.0);
                self.thumbnail_strip(ui);
                ui.add_space(4.0);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.source_image.is_none() {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 2.0 - 50.0);
                    ui.heading("📸 Open an image to begin");
                    ui.label("File → Open");
                    ui.label("Supported: PNG, JPG, BMP, GIF, WebP");
                });
                return;
            }

            if self.cached_preview.is_none() {
                if let Some(preview) = &self.preview_image {
                    let display = downscale(preview, PREVIEW_MAX_SIDE);
                    let size = [display.width() as usize, display.height() as usize];
                    let pixels = display.as_flat_samples();
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
                    self.cached_preview = Some(ui.ctx().load_texture(
                        "preview_image",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
            }
            if let Some(texture) = &self.cached_preview {
                ui.vertical_centered(|ui| {
                    let available = ui.available_size();
                    let texture_size = texture.size_vec2();
                    let scale = (available.x / texture_size.x)
                        .min(available.y / texture_size.y)
                        .min(2.0)
                        .max(0.1);
                    ui.image(egui::load::SizedTexture::new(
                        texture.id(),
                        texture_size * scale,
                    ));
                });
            }
        });

        if self.file_dialog_receiver.is_some()
            || self.save_dialog_receiver.is_some()
            || self.thumbnail_receiver.is_some()
            || !preview_settled
        {
            ctx.request_repaint();
        }
    }
}

fn downscale(image: &RgbaImage, max_side: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let longest = width.max(height);
    if longest <= max_side {
        return image.clone();
    }
    let scale = max_side as f32 / longest as f32;
    let new_w = ((width as f32 * scale).round() as u32).max(1);
    let new_h = ((height as f32 * scale).round() as u32).max(1);
    image::imageops::resize(image, new_w, new_h, FilterType::Triangle)
}

fn fit_size(texture_size: egui::Vec2, cell: f32) -> egui::Vec2 {
    let scale = (cell / texture_size.x).min(cell / texture_size.y);
    texture_size * scale
}
