// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business permit upload zone in MVU style: picker, drag-and-drop, and the
//! single accepted file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui;
use tracing::{debug, info, warn};

use crate::error::UploadRejection;
use crate::models::upload::{UploadedFile, check_constraints};

/// MVU state for the permit upload zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadModel {
    file: Option<UploadedFile>,
    drag_over: bool,
    /// Ticket of the inspection whose result will be accepted.
    pending: Option<u64>,
    last_ticket: u64,
}

/// Messages emitted by the upload view or returned by its commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadMsg {
    RequestPick,
    Picked(Option<PathBuf>),
    Dropped(PathBuf),
    DragHover(bool),
    Inspected {
        ticket: u64,
        result: Result<UploadedFile, UploadRejection>,
    },
    Remove,
}

/// Side effects requested by the upload component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadCommand {
    PickFile,
    Inspect { ticket: u64, path: PathBuf },
}

/// Outcomes the parent needs to react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadEvent {
    Accepted { name: String },
    Rejected(UploadRejection),
    Removed,
    PickCancelled,
}

impl UploadModel {
    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub fn is_inspecting(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the file and forget any inspection in flight.
    pub fn clear(&mut self) {
        self.file = None;
        self.drag_over = false;
        self.pending = None;
    }

    fn issue_ticket(&mut self) -> u64 {
        self.last_ticket += 1;
        self.pending = Some(self.last_ticket);
        self.last_ticket
    }
}

/// Accept `candidate` as the current upload when it satisfies the type and size rules.
///
/// A rejected candidate leaves any previously accepted file in place.
pub fn select_file(model: &mut UploadModel, candidate: UploadedFile) -> Result<(), UploadRejection> {
    check_constraints(&candidate)?;
    model.file = Some(candidate);
    Ok(())
}

/// Apply a message to the upload model. Returns an event when the parent should react.
pub fn update(
    model: &mut UploadModel,
    msg: UploadMsg,
    cmds: &mut Vec<UploadCommand>,
) -> Option<UploadEvent> {
    match msg {
        UploadMsg::RequestPick => {
            cmds.push(UploadCommand::PickFile);
            None
        }
        UploadMsg::Picked(None) => Some(UploadEvent::PickCancelled),
        UploadMsg::Picked(Some(path)) | UploadMsg::Dropped(path) => {
            model.drag_over = false;
            let ticket = model.issue_ticket();
            cmds.push(UploadCommand::Inspect { ticket, path });
            None
        }
        UploadMsg::DragHover(hovering) => {
            model.drag_over = hovering;
            None
        }
        UploadMsg::Inspected { ticket, result } => {
            // Only the latest selection counts; older or cleared ones are dropped.
            if model.pending != Some(ticket) {
                debug!(ticket, "ignoring stale inspection result");
                return None;
            }
            model.pending = None;
            let outcome = result.and_then(|candidate| {
                let name = candidate.name.clone();
                select_file(model, candidate).map(|()| name)
            });
            match outcome {
                Ok(name) => {
                    info!(file = %name, "permit accepted");
                    Some(UploadEvent::Accepted { name })
                }
                Err(rejection) => {
                    warn!(%rejection, "permit rejected");
                    Some(UploadEvent::Rejected(rejection))
                }
            }
        }
        UploadMsg::Remove => model.file.take().map(|_| UploadEvent::Removed),
    }
}

/// Read size, MIME type, and digest for a candidate file.
///
/// Type and size are checked from metadata alone, so a refused file is never
/// read in full.
pub(crate) fn inspect_file(path: &Path) -> Result<UploadedFile, UploadRejection> {
    inspect_with(path, crate::utils::hash_file)
}

fn inspect_with(
    path: &Path,
    hash: impl FnOnce(&Path) -> Result<String>,
) -> Result<UploadedFile, UploadRejection> {
    let size_bytes = regular_file_len(path).map_err(unreadable)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "permit".to_string());
    let mut candidate =
        UploadedFile::new(path.to_path_buf(), name, size_bytes, guess_mime(path), String::new());
    check_constraints(&candidate)?;

    candidate.sha256 = hash(path).map_err(unreadable)?;
    Ok(candidate)
}

fn regular_file_len(path: &Path) -> Result<u64> {
    let meta = path
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {:?}", path))?;
    if !meta.is_file() {
        anyhow::bail!("Not a regular file: {:?}", path);
    }
    Ok(meta.len())
}

fn unreadable(err: anyhow::Error) -> UploadRejection {
    UploadRejection::Unreadable(format!("{err:#}"))
}

pub(crate) fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

fn drop_zone_id() -> egui::Id {
    egui::Id::new("permit_drop_zone")
}

/// Whether a drag at `pointer` targets the drop zone.
///
/// Platforms that report no pointer position during a native drag, and the
/// first frame before the zone is laid out, fall back to the whole window.
pub(crate) fn targets_zone(pointer: Option<egui::Pos2>, zone: Option<egui::Rect>) -> bool {
    match (pointer, zone) {
        (Some(pos), Some(rect)) => rect.contains(pos),
        _ => true,
    }
}

/// Translate drag-and-drop state over the drop zone into upload messages.
pub fn collect_drops(ctx: &egui::Context, model: &UploadModel) -> Vec<UploadMsg> {
    let zone = ctx.data(|d| d.get_temp::<egui::Rect>(drop_zone_id()));
    let (hovering, dropped, pointer) = ctx.input(|inp| {
        (
            !inp.raw.hovered_files.is_empty(),
            inp.raw.dropped_files.first().and_then(|f| f.path.clone()),
            inp.pointer.hover_pos(),
        )
    });
    let on_zone = targets_zone(pointer, zone);

    let mut msgs = Vec::new();
    if let Some(path) = dropped {
        if on_zone {
            msgs.push(UploadMsg::Dropped(path));
        } else {
            debug!(?path, "ignoring file dropped outside the upload zone");
            if model.is_drag_over() {
                msgs.push(UploadMsg::DragHover(false));
            }
        }
    } else if (hovering && on_zone) != model.is_drag_over() {
        msgs.push(UploadMsg::DragHover(hovering && on_zone));
    }
    msgs
}

/// Render the drop zone and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &UploadModel, error: Option<&str>) -> Vec<UploadMsg> {
    let mut msgs = Vec::new();
    let visuals = ui.visuals().clone();

    let stroke_color = if model.drag_over {
        visuals.selection.stroke.color
    } else if error.is_some() {
        visuals.error_fg_color
    } else if model.file.is_some() {
        egui::Color32::from_rgb(39, 174, 96)
    } else {
        visuals.widgets.noninteractive.bg_stroke.color
    };

    let frame = egui::Frame::new()
        .fill(if model.drag_over {
            visuals.selection.bg_fill.gamma_multiply(0.3)
        } else {
            visuals.panel_fill
        })
        .stroke(egui::Stroke::new(1.5, stroke_color))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(egui_phosphor::regular::UPLOAD_SIMPLE).size(28.0));
                let (headline, detail) = match (&model.file, model.drag_over) {
                    (_, true) => ("Drop file to upload".to_string(), String::new()),
                    (Some(file), false) => (format!("Selected: {}", file.name), file.size_label()),
                    (None, false) => (
                        "Click to upload file".to_string(),
                        "PDF, JPG, PNG (Max 10MB)".to_string(),
                    ),
                };
                ui.label(egui::RichText::new(headline).strong());
                if !detail.is_empty() {
                    ui.label(
                        egui::RichText::new(detail)
                            .small()
                            .color(egui::Color32::from_gray(110)),
                    );
                }
                if model.is_inspecting() {
                    ui.add(egui::Spinner::new().size(14.0));
                }
            });
        });

    let rect = frame.response.rect;
    ui.ctx().data_mut(|d| d.insert_temp(drop_zone_id(), rect));
    let zone = ui.interact(rect, drop_zone_id(), egui::Sense::click());
    if zone
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .on_hover_text("Click to browse, or drop a file here")
        .clicked()
    {
        msgs.push(UploadMsg::RequestPick);
    }

    if model.file.is_some()
        && ui
            .button(format!("{} Remove file", egui_phosphor::regular::TRASH_SIMPLE))
            .clicked()
    {
        msgs.push(UploadMsg::Remove);
    }

    if let Some(message) = error {
        ui.label(
            egui::RichText::new(message)
                .small()
                .color(visuals.error_fg_color),
        );
    }

    msgs
}
