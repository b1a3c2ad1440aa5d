// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transient notices (toasts) shown in the bottom-right corner.

use egui::{Align2, Color32, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub expires_at: f64,
}

/// Queue of notices, each living for a fixed number of seconds.
#[derive(Debug)]
pub struct Notices {
    items: Vec<Notice>,
    lifetime: f64,
}

impl Notices {
    pub fn new(lifetime: f64) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
        }
    }

    pub fn info(&mut self, now: f64, title: &str, description: impl Into<String>) {
        let description = description.into();
        log::info!("{}: {}", title, description);
        self.push(now, title, description, Severity::Info);
    }

    pub fn error(&mut self, now: f64, title: &str, description: impl Into<String>) {
        let description = description.into();
        log::error!("{}: {}", title, description);
        self.push(now, title, description, Severity::Error);
    }

    fn push(&mut self, now: f64, title: &str, description: String, severity: Severity) {
        let expires_at = now + self.lifetime;
        // Repeats refresh the existing notice instead of stacking up
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|n| n.title == title && n.description == description)
        {
            existing.expires_at = expires_at;
            return;
        }
        self.items.push(Notice {
            title: title.to_string(),
            description,
            severity,
            expires_at,
        });
    }

    pub fn prune(&mut self, now: f64) {
        self.items.retain(|n| n.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Draw the live notices, dropping expired ones first.
    pub fn show(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.prune(now);
        if self.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                for notice in &self.items {
                    let accent = match notice.severity {
                        Severity::Info => ui.visuals().text_color(),
                        Severity::Error => Color32::from_rgb(220, 60, 60),
                    };
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.label(RichText::new(&notice.title).strong().color(accent));
                        ui.label(notice.description.as_str());
                    });
                    ui.add_space(6.0);
                }
            });

        // Keep repainting so notices disappear on time
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
