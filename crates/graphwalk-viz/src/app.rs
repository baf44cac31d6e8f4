//! Main application state and rendering logic.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use eframe::{App, CreationContext};
use egui::{Align, Align2, Context, FontId, Layout, Painter, Pos2, RichText};
use graphwalk_core::Position;
use graphwalk_engine::{input, AlgorithmKind, ClickOutcome, Mode, Session, VisualizerConfig};
use tracing::{debug, info, warn};

use crate::dialog::{Prompt, PromptAction, PromptKind};
use crate::render::{
    edge_stroke, to_canvas, to_screen, vertex_fill, vertex_label_color, weight_label_anchor,
    weight_label_color, PANEL_COLOR, RESULT_ACTIVE_COLOR, RESULT_TEXT_COLOR, STATUS_TEXT_COLOR,
};
use crate::settings::SettingsStyle;
use crate::status::{StatusBoard, StatusListener};

/// Entries of the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    New,
    Exit,
    Mode(Mode),
    Algorithm(AlgorithmKind),
}

/// The visualizer application.
pub struct GraphWalkApp {
    /// Graph, mode and algorithm state
    session: Session,
    /// Status and result lines, updated by session notifications
    board: Rc<RefCell<StatusBoard>>,
    /// Open label/weight prompt
    prompt: Option<Prompt>,
    /// Canvas sizes
    style: SettingsStyle,
}

impl GraphWalkApp {
    /// Create the app inside an eframe window.
    pub fn new(cc: &CreationContext<'_>, config: VisualizerConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::with_config(config)
    }

    /// Create the app state without a window.
    pub fn with_config(config: VisualizerConfig) -> Self {
        let style = SettingsStyle::from_config(&config);
        let mut session = Session::new(config);
        let listener = StatusListener::default();
        let board = Rc::clone(&listener.0);
        session.register_listener(Box::new(listener));

        Self {
            session,
            board,
            prompt: None,
            style,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Snapshot of the status and result lines.
    pub fn board(&self) -> StatusBoard {
        self.board.borrow().clone()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Apply a menu entry. Returns `true` when the app should close.
    pub fn apply_command(&mut self, command: MenuCommand) -> bool {
        info!(?command, "menu_command");
        self.prompt = None;
        match command {
            MenuCommand::New => self.session.request_reset(),
            MenuCommand::Exit => return true,
            MenuCommand::Mode(mode) => self.session.set_mode(mode),
            MenuCommand::Algorithm(kind) => self.session.start_algorithm(kind),
        }
        false
    }

    /// Route a click on the canvas (canvas coordinates) to the session.
    pub fn handle_canvas_click(&mut self, position: Position, now: Instant) {
        match self.session.click(position, now) {
            Ok(ClickOutcome::LabelRequested(position)) => {
                self.prompt = Some(Prompt::new(PromptKind::Label { position }));
            }
            Ok(ClickOutcome::WeightRequested { from, to }) => {
                self.prompt = Some(Prompt::new(PromptKind::Weight { from, to }));
            }
            Ok(outcome) => debug!(?outcome, "canvas_click"),
            Err(e) => warn!(error = %e, %position, "canvas_click_failed"),
        }
    }

    /// Act on the open prompt. Invalid input keeps the prompt open.
    pub fn handle_prompt_action(&mut self, action: PromptAction) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        match (action, prompt.kind) {
            (PromptAction::Cancel, PromptKind::Label { .. }) => self.prompt = None,
            (PromptAction::Cancel, PromptKind::Weight { .. }) => {
                self.session.cancel_edge();
                self.prompt = None;
            }
            (PromptAction::Submit(text), PromptKind::Label { position }) => {
                match input::parse_vertex_label(&text) {
                    Ok(label) => {
                        if let Err(e) = self.session.add_vertex(label, position) {
                            warn!(error = %e, "vertex_rejected");
                        }
                        self.prompt = None;
                    }
                    Err(e) => prompt.reject(e.to_string()),
                }
            }
            (PromptAction::Submit(text), PromptKind::Weight { from, to }) => {
                match input::parse_edge_weight(&text) {
                    Ok(weight) => {
                        if let Err(e) = self.session.add_edge(weight, from, to) {
                            warn!(error = %e, "connection_rejected");
                        }
                        self.prompt = None;
                    }
                    Err(e) => prompt.reject(e.to_string()),
                }
            }
        }
    }

    fn ui_menu(&self, ui: &mut egui::Ui) -> Option<MenuCommand> {
        let mut command = None;

        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    command = Some(MenuCommand::New);
                    ui.close();
                }
                if ui.button("Exit").clicked() {
                    command = Some(MenuCommand::Exit);
                    ui.close();
                }
            });
            ui.menu_button("Mode", |ui| {
                for mode in Mode::EDIT_MODES {
                    if ui.button(mode.name()).clicked() {
                        command = Some(MenuCommand::Mode(mode));
                        ui.close();
                    }
                }
            });
            ui.menu_button("Algorithms", |ui| {
                for kind in AlgorithmKind::ALL {
                    if ui.button(kind.name()).clicked() {
                        command = Some(MenuCommand::Algorithm(kind));
                        ui.close();
                    }
                }
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(&self.board.borrow().mode_text)
                        .size(self.style.status_text_size)
                        .color(STATUS_TEXT_COLOR),
                );
            });
        });

        command
    }

    fn paint_graph(&self, painter: &Painter, origin: Pos2) {
        let graph = self.session.graph();

        let connections: Vec<_> = graph
            .connections()
            .filter_map(|edge| {
                let start = graph.vertex(edge.start)?.position;
                let end = graph.vertex(edge.end)?.position;
                Some((edge, start, end))
            })
            .collect();

        for (edge, start, end) in &connections {
            painter.line_segment(
                [to_screen(origin, *start), to_screen(origin, *end)],
                edge_stroke(edge.selected, &self.style),
            );
        }
        for (edge, start, end) in &connections {
            let anchor = weight_label_anchor(*start, *end, &self.style);
            painter.text(
                to_screen(origin, anchor),
                Align2::LEFT_TOP,
                edge.weight.to_string(),
                FontId::proportional(self.style.weight_label_size),
                weight_label_color(),
            );
        }

        for vertex in graph.vertices() {
            let center = to_screen(origin, vertex.position);
            painter.circle_filled(center, self.style.vertex_radius(), vertex_fill(vertex.selected));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                vertex.label.as_str(),
                FontId::proportional(self.style.vertex_label_size),
                vertex_label_color(),
            );
        }
    }
}

impl App for GraphWalkApp {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        let now = Instant::now();
        self.session.advance(now);
        if let Some(wait) = self.session.time_until_next_step(now) {
            ctx.request_repaint_after(wait);
        }

        let menu_frame = egui::Frame {
            inner_margin: egui::Margin::symmetric(8, 4),
            fill: PANEL_COLOR,
            ..Default::default()
        };
        let command = egui::TopBottomPanel::top("menu_bar")
            .frame(menu_frame)
            .show(ctx, |ui| self.ui_menu(ui))
            .inner;
        if let Some(command) = command {
            if self.apply_command(command) {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        let board = self.board();
        let result_frame = egui::Frame {
            inner_margin: egui::Margin::symmetric(12, 6),
            fill: if board.result_highlighted {
                RESULT_ACTIVE_COLOR
            } else {
                PANEL_COLOR
            },
            ..Default::default()
        };
        egui::TopBottomPanel::bottom("result_line")
            .frame(result_frame)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(&board.result_text)
                            .size(self.style.status_text_size)
                            .color(RESULT_TEXT_COLOR),
                    );
                });
            });

        let canvas_frame = egui::Frame {
            fill: PANEL_COLOR,
            ..Default::default()
        };
        let mut clicked = None;
        egui::CentralPanel::default()
            .frame(canvas_frame)
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click());
                let origin = response.rect.min;

                if self.prompt.is_none() && response.clicked() {
                    clicked = response
                        .interact_pointer_pos()
                        .map(|pointer| to_canvas(origin, pointer));
                }
                self.paint_graph(&painter, origin);
            });
        if let Some(position) = clicked {
            self.handle_canvas_click(position, now);
        }

        if let Some(prompt) = self.prompt.as_mut() {
            if let Some(action) = prompt.show(ctx) {
                self.handle_prompt_action(action);
            }
        }
    }
}
