use std::path::{Path, PathBuf};

use eframe::egui;
use image::DynamicImage;
use uuid::Uuid;

use crate::config::{Config, UiSettings};
use crate::crop::{self, AspectPreset, CropController, Handle};
use crate::history::{VersionHistory, VersionOrigin};
use crate::io::{self, IMAGE_EXTENSIONS};

const HANDLE_SIZE: f32 = 10.0;

pub struct ImageCropper {
    config: Config,
    history: VersionHistory,
    /// Texture of the current version, keyed by version id
    texture: Option<(Uuid, egui::TextureHandle)>,
    original_texture: Option<egui::TextureHandle>,
    /// Present while the crop tool is open
    crop: Option<CropController>,
    show_original: bool,
    status: Option<String>,
}

impl ImageCropper {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, initial: Option<PathBuf>) -> Self {
        let mut app = Self {
            config,
            history: VersionHistory::new(),
            texture: None,
            original_texture: None,
            crop: None,
            show_original: false,
            status: None,
        };
        if let Some(path) = initial {
            app.open_path(&path);
        }
        app
    }

    fn open_path(&mut self, path: &Path) {
        match io::open_image(path) {
            Ok(image) => {
                self.history.ingest(image);
                self.texture = None;
                self.original_texture = None;
                self.close_crop_tool();
                self.status = Some(format!("Opened {}", path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to open image");
                self.status = Some(e.to_string());
            }
        }
    }

    fn load_texture(ctx: &egui::Context, name: &str, image: &DynamicImage) -> egui::TextureHandle {
        let size = [image.width() as _, image.height() as _];
        let image_buffer = image.to_rgba8();
        let pixels = image_buffer.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
        ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
    }

    /// Uploads textures for the current and original images when they changed.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let Some(current) = self.history.current() else {
            self.texture = None;
            self.original_texture = None;
            return;
        };
        if self.texture.as_ref().map(|(id, _)| *id) != Some(current.id) {
            let handle = Self::load_texture(ctx, "current", &current.image);
            self.texture = Some((current.id, handle));
        }
        if self.original_texture.is_none() {
            if let Some(original) = self.history.original() {
                self.original_texture = Some(Self::load_texture(ctx, "original", original));
            }
        }
    }

    fn open_crop_tool(&mut self) {
        if self.history.current().is_some() {
            self.crop = Some(CropController::new(self.config.crop.default_preset));
        }
    }

    fn close_crop_tool(&mut self) {
        if let Some(crop) = self.crop.as_mut() {
            crop.cancel();
        }
        self.crop = None;
    }

    fn apply_crop(&mut self) {
        let Some(crop) = self.crop.as_mut() else {
            return;
        };
        let source = self.history.current().map(|v| &v.image);
        if let Some(cropped) = crop.commit(source) {
            self.status = Some(format!("Cropped to {}x{}", cropped.width(), cropped.height()));
            self.history.push(cropped, VersionOrigin::Crop);
            self.close_crop_tool();
        }
    }

    fn export_current(&mut self) {
        let Some(current) = self.history.current() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .set_file_name(&self.config.export.file_name)
            .save_file()
        else {
            return;
        };
        self.status = Some(match io::save_image(&current.image, &path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                tracing::error!(error = %e, "failed to save image");
                e.to_string()
            }
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open Image").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Image", IMAGE_EXTENSIONS)
                    .pick_file()
                {
                    self.open_path(&path);
                }
            }

            let has_image = self.history.current().is_some();
            ui.add_enabled_ui(has_image, |ui| {
                if self.crop.is_some() {
                    ui.separator();
                    ui.label("Aspect Ratio:");
                    let current = self.crop.as_ref().map(CropController::preset);
                    for preset in AspectPreset::ALL {
                        if ui
                            .selectable_label(current == Some(preset), preset.to_string())
                            .clicked()
                        {
                            if let Some(crop) = self.crop.as_mut() {
                                crop.set_preset(preset);
                            }
                        }
                    }
                    ui.separator();
                    if ui.button("Cancel").clicked() {
                        self.close_crop_tool();
                    }
                    if ui.button("Apply Crop").clicked() {
                        self.apply_crop();
                    }
                } else {
                    if ui.button("Crop").clicked() {
                        self.open_crop_tool();
                    }
                    if ui.button("Export").clicked() {
                        self.export_current();
                    }
                }
            });
        });
    }

    fn history_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!("History ({})", self.history.len()));
        ui.separator();
        let current = self.history.current_index();
        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, version) in self.history.iter().enumerate() {
                let text = format!(
                    "{}  {}x{}\n{}",
                    version.origin,
                    version.image.width(),
                    version.image.height(),
                    version.timestamp.format("%H:%M:%S"),
                );
                if ui.selectable_label(current == Some(index), text).clicked() {
                    clicked = Some(index);
                }
            }
        });
        if let Some(index) = clicked {
            self.close_crop_tool();
            self.history.select(index);
        }
    }

    fn preview(&mut self, ui: &mut egui::Ui) {
        let texture = if self.show_original {
            self.original_texture.as_ref()
        } else {
            self.texture.as_ref().map(|(_, t)| t)
        };
        let Some(texture) = texture else {
            self.show_original = false;
            ui.centered_and_justified(|ui| {
                ui.label("Open an image or drop one here");
            });
            return;
        };

        let compare = ui.button("Hold to compare");
        let layout = fit_image(ui, texture.size_vec2(), self.config.ui.padding);
        ui.allocate_rect(layout.target, egui::Sense::hover());
        ui.painter_at(layout.target).image(
            texture.id(),
            layout.image,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        self.show_original = compare.is_pointer_button_down_on();
    }
}

/// Screen placement of the image: `target` includes the padding, `image` is the
/// area the picture (and the normalized crop space) covers.
struct ImageLayout {
    target: egui::Rect,
    image: egui::Rect,
}

fn fit_image(ui: &egui::Ui, image_size: egui::Vec2, padding: f32) -> ImageLayout {
    let available_size = ui.available_size();
    let max_size = available_size - egui::vec2(padding * 2.0, padding * 2.0);

    // Fit within available space while keeping the image's aspect ratio
    let scale = (max_size.x / image_size.x)
        .min(max_size.y / image_size.y)
        .max(0.0);
    let display_size = image_size * scale;
    let total_display_size = display_size + egui::vec2(padding * 2.0, padding * 2.0);

    let x_offset = (available_size.x - total_display_size.x) / 2.0;
    let y_offset = (available_size.y - total_display_size.y) / 2.0;
    let start_pos = ui.cursor().min + egui::vec2(x_offset.max(0.0), y_offset.max(0.0));

    let target = egui::Rect::from_min_size(start_pos, total_display_size);
    let image = egui::Rect::from_min_size(target.min + egui::vec2(padding, padding), display_size);
    ImageLayout { target, image }
}

fn crop_canvas(
    ui: &mut egui::Ui,
    texture: &egui::TextureHandle,
    crop: &mut CropController,
    settings: &UiSettings,
    tolerance: f32,
) {
    let layout = fit_image(ui, texture.size_vec2(), settings.padding);
    let response = ui.allocate_rect(layout.target, egui::Sense::drag());
    let painter = ui.painter_at(layout.target);
    let image_rect = layout.image;

    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            let screen = crop.rect().to_screen(image_rect);
            if let Some(handle) = crop::hit_test(pos, screen, tolerance) {
                crop.pointer_down(handle, pos, image_rect);
            }
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            crop.pointer_move(pos, image_rect);
        }
    }
    if response.drag_stopped() {
        crop.pointer_up();
    }

    let screen_crop_rect = crop.rect().to_screen(image_rect);
    let cursor_handle = crop.active_handle().or_else(|| {
        response
            .hover_pos()
            .and_then(|pos| crop::hit_test(pos, screen_crop_rect, tolerance))
    });
    if let Some(handle) = cursor_handle {
        ui.ctx().set_cursor_icon(handle.cursor());
    }

    // Dim everything outside the crop
    let overlay_color = egui::Color32::from_black_alpha(settings.overlay_alpha);
    let dimmed = [
        egui::Rect::from_min_max(
            image_rect.min,
            egui::pos2(image_rect.max.x, screen_crop_rect.min.y),
        ),
        egui::Rect::from_min_max(
            egui::pos2(image_rect.min.x, screen_crop_rect.max.y),
            image_rect.max,
        ),
        egui::Rect::from_min_max(
            egui::pos2(image_rect.min.x, screen_crop_rect.min.y),
            egui::pos2(screen_crop_rect.min.x, screen_crop_rect.max.y),
        ),
        egui::Rect::from_min_max(
            egui::pos2(screen_crop_rect.max.x, screen_crop_rect.min.y),
            egui::pos2(image_rect.max.x, screen_crop_rect.max.y),
        ),
    ];
    for rect in dimmed {
        painter.rect_filled(rect, 0.0, overlay_color);
    }

    if settings.show_grid {
        let grid_stroke = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(50));
        for i in 1..3 {
            let t = i as f32 / 3.0;
            let x = screen_crop_rect.min.x + screen_crop_rect.width() * t;
            let y = screen_crop_rect.min.y + screen_crop_rect.height() * t;
            painter.line_segment(
                [
                    egui::pos2(x, screen_crop_rect.min.y),
                    egui::pos2(x, screen_crop_rect.max.y),
                ],
                grid_stroke,
            );
            painter.line_segment(
                [
                    egui::pos2(screen_crop_rect.min.x, y),
                    egui::pos2(screen_crop_rect.max.x, y),
                ],
                grid_stroke,
            );
        }
    }

    painter.rect_stroke(
        screen_crop_rect,
        0.0,
        egui::Stroke::new(2.0, egui::Color32::WHITE),
    );

    let handle_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
    for handle in Handle::CORNERS {
        let center = handle.anchor_on(screen_crop_rect);
        let square = egui::Rect::from_center_size(center, egui::vec2(HANDLE_SIZE, HANDLE_SIZE));
        painter.rect_filled(square, 0.0, egui::Color32::WHITE);
        painter.rect_stroke(square, 0.0, handle_stroke);
    }
}

impl eframe::App for ImageCropper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle dropped files
        if !ctx.input(|i| i.raw.dropped_files.is_empty()) {
            let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
            if let Some(path) = dropped_files.first().and_then(|f| f.path.clone()) {
                self.open_path(&path);
            }
        }

        self.sync_textures(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let text = match (&self.status, self.crop.as_ref()) {
                (_, Some(crop)) => {
                    let r = crop.rect();
                    format!(
                        "Crop {:.0}%, {:.0}%  {:.0}% x {:.0}%",
                        r.x() * 100.0,
                        r.y() * 100.0,
                        r.width() * 100.0,
                        r.height() * 100.0
                    )
                }
                (Some(status), None) => status.clone(),
                (None, None) => String::new(),
            };
            ui.label(text);
        });

        if !self.history.is_empty() {
            egui::SidePanel::right("history")
                .default_width(200.0)
                .show(ctx, |ui| {
                    self.history_panel(ui);
                });
        }

        // History selection may have changed the current version
        self.sync_textures(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            match (self.crop.as_mut(), self.texture.as_ref()) {
                (Some(crop), Some((_, texture))) => {
                    crop_canvas(
                        ui,
                        texture,
                        crop,
                        &self.config.ui,
                        self.config.crop.handle_tolerance,
                    );
                }
                _ => self.preview(ui),
            }
        });
    }
}
