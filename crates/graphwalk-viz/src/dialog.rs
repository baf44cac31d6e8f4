//! Modal prompt for vertex labels and connection weights.

use egui::{Align2, Context, Key, RichText};
use graphwalk_core::{Position, VertexId};

/// What the prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Label of a new vertex at `position`.
    Label { position: Position },
    /// Weight of a new connection.
    Weight { from: VertexId, to: VertexId },
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::Label { .. } => "Vertex",
            PromptKind::Weight { .. } => "Edge",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            PromptKind::Label { .. } => "Enter the Vertex ID (Should be 1 char):",
            PromptKind::Weight { .. } => "Enter Weight:",
        }
    }
}

/// User action on an open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    Submit(String),
    Cancel,
}

/// An open prompt. Stays open until the caller closes it, so invalid input
/// can be re-asked with an error line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
    pub error: Option<String>,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
            error: None,
        }
    }

    /// Keep the prompt open, clear the input and show `message`.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.input.clear();
        self.error = Some(message.into());
    }

    /// Draw the prompt window; returns the action taken this frame.
    pub fn show(&mut self, ctx: &Context) -> Option<PromptAction> {
        let mut action = None;

        egui::Window::new(self.kind.title())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(self.kind.question());
                let edit = ui.text_edit_singleline(&mut self.input);
                edit.request_focus();

                if let Some(error) = &self.error {
                    ui.label(RichText::new(error).color(egui::Color32::from_rgb(255, 68, 102)));
                }

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        action = Some(PromptAction::Submit(self.input.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(PromptAction::Cancel);
                    }
                });
            });

        if action.is_none() {
            ctx.input(|i| {
                if i.key_pressed(Key::Enter) {
                    action = Some(PromptAction::Submit(self.input.clone()));
                } else if i.key_pressed(Key::Escape) {
                    action = Some(PromptAction::Cancel);
                }
            });
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_keeps_prompt_open() {
        let mut prompt = Prompt::new(PromptKind::Label {
            position: Position::new(1, 2),
        });
        prompt.input = "AB".into();

        prompt.reject("one character please");

        assert!(prompt.input.is_empty());
        assert_eq!(prompt.error.as_deref(), Some("one character please"));
        assert_eq!(prompt.kind.title(), "Vertex");
    }
}
