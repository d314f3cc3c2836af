use client_core::{EditTarget, RemoteCommand};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Category, CategoryId, DraftField};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, CardImage, GuiState};
use crate::ui::widgets;

const CARD_COLUMNS: usize = 3;
const CARD_IMAGE_HEIGHT: f32 = 160.0;

/// Everything a frame's widgets asked for, applied after rendering.
enum CardAction {
    DraftField(DraftField, String),
    Submit,
    BeginEdit(Category),
    Delete(CategoryId),
    FetchImage(String),
}

pub struct CategoryAdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: GuiState,
}

impl CategoryAdminApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: GuiState {
                status: "Loading categories".to_string(),
                ..GuiState::default()
            },
        };
        if let Some(cmd) = app.state.categories.initialize() {
            app.dispatch_remote(cmd);
        }
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reduce(&mut self.state, event);
        }
    }

    fn dispatch_remote(&mut self, cmd: RemoteCommand) {
        let mut status = String::new();
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Remote(cmd.clone()),
            &mut status,
        ) {
            self.state.categories.apply(cmd.unavailable(status.clone()));
            reduce(
                &mut self.state,
                UiEvent::Error(UiError::from_message(UiErrorContext::General, status)),
            );
        }
    }

    fn apply_action(&mut self, action: CardAction) {
        match action {
            CardAction::DraftField(field, value) => {
                self.state.categories.update_draft_field(field, value);
            }
            CardAction::Submit => match self.state.categories.submit_draft() {
                Ok(cmd) => self.dispatch_remote(cmd),
                Err(err) => self.state.status = err.to_string(),
            },
            CardAction::BeginEdit(category) => {
                self.state.categories.begin_edit(&category);
            }
            CardAction::Delete(id) => {
                let cmd = self.state.categories.delete_category(id);
                self.dispatch_remote(cmd);
            }
            CardAction::FetchImage(url) => {
                if self.state.claim_image_fetch(&url)
                    && !dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::FetchCardImage { url: url.clone() },
                        &mut self.state.status,
                    )
                {
                    self.state.release_image_fetch(&url);
                }
            }
        }
    }

    fn show_startup_error(&self, ui: &mut egui::Ui) {
        if let Some(err) = &self.state.startup_error {
            egui::Frame::NONE
                .fill(ui.visuals().extreme_bg_color)
                .stroke(egui::Stroke::new(1.0, ui.visuals().error_fg_color))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.colored_label(ui.visuals().error_fg_color, err.message());
                });
            ui.add_space(8.0);
        }
    }

    fn show_new_category_form(&self, ui: &mut egui::Ui, actions: &mut Vec<CardAction>) {
        let editing = self.state.categories.edit_target() != EditTarget::NoEdit;
        let draft = self.state.categories.new_draft();

        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                // Input goes to the open edit form while one exists.
                ui.add_enabled_ui(!editing, |ui| {
                    for (field, value) in widgets::category_fields(ui, "new", draft) {
                        actions.push(CardAction::DraftField(field, value));
                    }
                    ui.add_space(4.0);
                    let complete = draft.first_missing().is_none();
                    if ui
                        .add_enabled(complete, egui::Button::new("Add Category"))
                        .clicked()
                    {
                        actions.push(CardAction::Submit);
                    }
                });
                if editing {
                    ui.weak("Save the open edit to add a new category.");
                }
            });
    }

    fn show_cards(&mut self, ui: &mut egui::Ui, actions: &mut Vec<CardAction>) {
        let GuiState {
            categories, images, ..
        } = &mut self.state;
        let categories = &*categories;

        if categories.categories().is_empty() {
            ui.weak("No categories.");
            return;
        }

        for row in categories.categories().chunks(CARD_COLUMNS) {
            ui.columns(CARD_COLUMNS, |columns| {
                for (column, category) in columns.iter_mut().zip(row) {
                    egui::Frame::group(column.style())
                        .inner_margin(egui::Margin::same(10))
                        .show(column, |ui| {
                            ui.set_width(ui.available_width());
                            card_image(ui, category, images, actions);
                            ui.add_space(6.0);
                            if categories.is_editing(category.id) {
                                card_edit_form(ui, category.id, categories, actions);
                            } else {
                                card_summary(ui, category, actions);
                            }
                        });
                }
            });
            ui.add_space(8.0);
        }
    }
}

fn card_image(
    ui: &mut egui::Ui,
    category: &Category,
    images: &mut std::collections::HashMap<String, CardImage>,
    actions: &mut Vec<CardAction>,
) {
    let size = egui::vec2(ui.available_width(), CARD_IMAGE_HEIGHT);
    match images.get_mut(&category.image) {
        None => {
            actions.push(CardAction::FetchImage(category.image.clone()));
            ui.allocate_ui(size, |ui| ui.spinner());
        }
        Some(CardImage::Loading) => {
            ui.allocate_ui(size, |ui| ui.spinner());
        }
        Some(CardImage::Failed(_)) => {
            ui.allocate_ui(size, |ui| ui.weak(format!("No preview for {}", category.name)));
        }
        Some(CardImage::Ready { image, texture }) => {
            let texture = texture.get_or_insert_with(|| {
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
                ui.ctx().load_texture(
                    format!("category-image:{}", category.image),
                    color_image,
                    egui::TextureOptions::LINEAR,
                )
            });
            ui.add(
                egui::Image::new(&*texture)
                    .max_size(size)
                    .maintain_aspect_ratio(true),
            );
        }
    }
}

fn card_summary(ui: &mut egui::Ui, category: &Category, actions: &mut Vec<CardAction>) {
    ui.heading(&category.name);
    ui.horizontal(|ui| {
        if ui.button("Edit").clicked() {
            actions.push(CardAction::BeginEdit(category.clone()));
        }
        if ui.button("Delete").clicked() {
            actions.push(CardAction::Delete(category.id));
        }
    });
}

fn card_edit_form(
    ui: &mut egui::Ui,
    id: CategoryId,
    categories: &client_core::CategoryListState,
    actions: &mut Vec<CardAction>,
) {
    let fields = categories.active_fields();
    for (field, value) in widgets::category_fields(ui, &format!("edit-{id}"), fields) {
        actions.push(CardAction::DraftField(field, value));
    }
    ui.add_space(4.0);
    if ui
        .add_enabled(fields.first_missing().is_none(), egui::Button::new("Save"))
        .clicked()
    {
        actions.push(CardAction::Submit);
    }
}

impl eframe::App for CategoryAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(&self.state.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("{} categories", self.state.categories.categories().len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Categories");
                    ui.add_space(8.0);
                    self.show_startup_error(ui);
                    if let Some(notice) = self.state.categories.notice() {
                        widgets::notice_banner(ui, notice);
                        ui.add_space(8.0);
                    }
                    self.show_new_category_form(ui, &mut actions);
                    ui.add_space(12.0);
                    self.show_cards(ui, &mut actions);
                });
        });

        for action in actions {
            self.apply_action(action);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
