use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::reference::CropNames;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::view::{ActiveView, UiAction, ViewController};
use crate::ui::{dashboard, entry_form};

pub struct AdvisorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewController,
}

impl AdvisorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        crop_names: CropNames,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ViewController::new(crop_names),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.view.on_event(event);
        }
    }

    fn apply(&mut self, action: UiAction) {
        let cmd_tx = &self.cmd_tx;
        self.view
            .apply(action, |cmd| dispatch_backend_command(cmd_tx, cmd));
    }
}

impl eframe::App for AdvisorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut actions = Vec::new();
        let mut busy = false;
        egui::CentralPanel::default().show(ctx, |ui| match self.view.view() {
            ActiveView::Entry(entry) => {
                busy = entry.busy;
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(720.0);
                        actions = entry_form::show(ui, &entry);
                    });
                });
            }
            ActiveView::Dashboard(view) => {
                actions.extend(dashboard::show(ui, &view));
            }
        });

        for action in actions {
            self.apply(action);
        }

        // Completions arrive from the worker thread; keep polling while one is due.
        if busy {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
