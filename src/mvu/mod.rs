// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel: the registration controller, its messages,
//! and the commands it hands to worker threads.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{FormIssue, RegistrationError};
use crate::logic::cancel::{CancelScope, CancelToken};
use crate::logic::hints;
use crate::logic::progress::Progress;
use crate::logic::simulator::{SubmissionOutcome, SubmissionSimulator, Submitter};
use crate::logic::validation;
use crate::models::field::{FieldId, FieldKind, FieldRegistry, Validity};
use crate::models::payload::RegistrationPayload;
use crate::models::upload::check_constraints;
use crate::ui::components::categories::{self, CategoriesModel, CategoriesMsg};
use crate::ui::components::upload::{self, UploadCommand, UploadEvent, UploadModel, UploadMsg};

/// Delay between a successful submission and the confirmation screen.
pub const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_millis(3000);
/// How long a page-level error banner stays visible.
pub const DEFAULT_BANNER_TTL: Duration = Duration::from_millis(5000);

pub const SUCCESS_MESSAGE: &str = "Registration submitted successfully! We'll review your application and get back to you within 2-3 business days.";

/// UI-side delays owned by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub confirm_delay: Duration,
    pub banner_ttl: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            confirm_delay: DEFAULT_CONFIRM_DELAY,
            banner_ttl: DEFAULT_BANNER_TTL,
        }
    }
}

/// Submission pipeline state. `Validating` only lasts for one `update` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Which top-level view is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Form,
    Confirmation,
}

/// Page-level error banner; `id` ties it to its auto-hide timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub message: String,
}

/// Registration controller state.
pub struct RegistrationModel {
    /// Field definitions, values, and validity markers.
    pub fields: FieldRegistry,
    pub categories: CategoriesModel,
    pub upload: UploadModel,
    pub phase: Phase,
    pub screen: Screen,
    pub error_banner: Option<Banner>,
    pub success_banner: Option<String>,
    /// Latest status line for the bottom bar.
    pub status: Option<String>,
    /// Count of commands handed to workers and not yet answered.
    pub pending_commands: usize,
    submitter: Arc<dyn Submitter>,
    timings: Timings,
    scope: CancelScope,
    next_id: u64,
    active_submission: Option<u64>,
    pending_confirmation: Option<u64>,
}

impl RegistrationModel {
    pub fn new(fields: FieldRegistry, submitter: Arc<dyn Submitter>, timings: Timings) -> Self {
        Self {
            fields,
            categories: CategoriesModel::default(),
            upload: UploadModel::default(),
            phase: Phase::Idle,
            screen: Screen::Form,
            error_banner: None,
            success_banner: None,
            status: None,
            pending_commands: 0,
            submitter,
            timings,
            scope: CancelScope::new(),
            next_id: 0,
            active_submission: None,
            pending_confirmation: None,
        }
    }

    /// Whether the submit control (button or shortcut) is live.
    pub fn submit_enabled(&self) -> bool {
        self.phase == Phase::Idle && self.screen == Screen::Form
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(&self.fields, !self.categories.is_empty())
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Clear values, markers, selections, and the upload.
    fn clear_form(&mut self) {
        self.fields.reset();
        self.categories.clear();
        self.upload.clear();
        self.error_banner = None;
    }
}

impl Default for RegistrationModel {
    fn default() -> Self {
        Self::new(
            FieldRegistry::seller_form(),
            Arc::new(SubmissionSimulator::default()),
            Timings::default(),
        )
    }
}

/// Application messages routed through the update function.
#[derive(Debug, PartialEq)]
pub enum Msg {
    FieldInput { id: FieldId, value: String },
    FieldBlurred(FieldId),
    TermsToggled(bool),
    Categories(CategoriesMsg),
    Upload(UploadMsg),
    SubmitRequested,
    SubmissionResolved { ticket: u64, outcome: SubmissionOutcome },
    ShowConfirmation { ticket: u64 },
    BannerExpired { id: u64 },
    DismissError,
    StartOver,
    /// A delayed command woke up after its scope was cancelled.
    Cancelled,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    PickPermit,
    InspectPermit {
        ticket: u64,
        path: PathBuf,
    },
    Submit {
        ticket: u64,
        payload: RegistrationPayload,
        submitter: Arc<dyn Submitter>,
        cancel: CancelToken,
    },
    /// Deliver `msg` after `after` unless `cancel` fires first.
    Schedule {
        after: Duration,
        cancel: CancelToken,
        msg: Box<Msg>,
    },
}

impl Command {
    /// Delayed commands get their own thread so they never starve the pool.
    pub fn is_timer(&self) -> bool {
        matches!(self, Self::Schedule { .. })
    }
}

/// Update the controller and enqueue commands.
pub fn update(model: &mut RegistrationModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::FieldInput { id, value } => edit_field(model, id, value),
        Msg::FieldBlurred(id) => {
            if let Some(field) = model.fields.get_mut(id)
                && field.kind.is_input()
            {
                let _ = validation::apply(field);
            }
        }
        Msg::TermsToggled(checked) => {
            let value = if checked { "on" } else { "" };
            edit_field(model, FieldId::AgreeTerms, value.to_string());
        }
        Msg::Categories(m) => categories::update(&mut model.categories, m),
        Msg::Upload(m) => {
            let mut upload_cmds = Vec::new();
            let event = upload::update(&mut model.upload, m, &mut upload_cmds);
            for c in upload_cmds {
                match c {
                    UploadCommand::PickFile => cmds.push(Command::PickPermit),
                    UploadCommand::Inspect { ticket, path } => {
                        cmds.push(Command::InspectPermit { ticket, path })
                    }
                }
            }
            if let Some(event) = event {
                handle_upload_event(model, event, cmds);
            }
        }
        Msg::SubmitRequested => request_submit(model, cmds),
        Msg::SubmissionResolved { ticket, outcome } => {
            if model.active_submission != Some(ticket) {
                debug!(ticket, "ignoring stale submission result");
                return;
            }
            model.active_submission = None;
            model.phase = Phase::Idle;
            match outcome {
                SubmissionOutcome::Success => {
                    model.clear_form();
                    model.success_banner = Some(SUCCESS_MESSAGE.to_string());
                    model.status = Some("Registration submitted.".to_string());
                    let ticket = model.next_id();
                    model.pending_confirmation = Some(ticket);
                    schedule(
                        model,
                        model.timings.confirm_delay,
                        Msg::ShowConfirmation { ticket },
                        cmds,
                    );
                }
                SubmissionOutcome::Failure(reason) => {
                    let err = RegistrationError::Submission(reason);
                    surface_error(model, err.to_string(), cmds);
                }
            }
        }
        Msg::ShowConfirmation { ticket } => {
            if model.pending_confirmation == Some(ticket) {
                model.pending_confirmation = None;
                model.success_banner = None;
                model.screen = Screen::Confirmation;
            }
        }
        Msg::BannerExpired { id } => {
            if model.error_banner.as_ref().is_some_and(|b| b.id == id) {
                model.error_banner = None;
            }
        }
        Msg::DismissError => model.error_banner = None,
        Msg::StartOver => {
            // Drops every token handed out so far.
            std::mem::take(&mut model.scope).cancel();
            model.clear_form();
            model.phase = Phase::Idle;
            model.screen = Screen::Form;
            model.success_banner = None;
            model.status = None;
            model.active_submission = None;
            model.pending_confirmation = None;
        }
        Msg::Cancelled => debug!("delayed command cancelled"),
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::PickPermit => {
            let file = rfd::FileDialog::new()
                .set_title("Select business permit or valid ID")
                .add_filter("PDF, JPG, PNG", &["pdf", "jpg", "jpeg", "png"])
                .pick_file();
            Msg::Upload(UploadMsg::Picked(file))
        }
        Command::InspectPermit { ticket, path } => Msg::Upload(UploadMsg::Inspected {
            ticket,
            result: upload::inspect_file(&path),
        }),
        Command::Submit {
            ticket,
            payload,
            submitter,
            cancel,
        } => match submitter.submit(&payload, &cancel) {
            Some(outcome) => Msg::SubmissionResolved { ticket, outcome },
            None => Msg::Cancelled,
        },
        Command::Schedule { after, cancel, msg } => {
            if cancel.sleep(after) {
                *msg
            } else {
                Msg::Cancelled
            }
        }
    }
}

/// Apply a typed value with the lazy-then-eager policy: an invalid field is
/// re-validated live, any other field drops back to unvalidated.
fn edit_field(model: &mut RegistrationModel, id: FieldId, value: String) {
    let Some(field) = model.fields.get_mut(id) else {
        return;
    };
    field.value = match field.kind {
        FieldKind::Tel => hints::normalize_phone_input(&value),
        _ => value,
    };
    if field.validity == Validity::Invalid {
        let _ = validation::apply(field);
    } else {
        field.clear_marker();
    }

    if id == FieldId::StoreName {
        let store = model.fields.value(FieldId::StoreName);
        if let Some(suggested) = hints::suggest_business_type(&store)
            && let Some(business_type) = model.fields.get_mut(FieldId::BusinessType)
            && business_type.value.is_empty()
        {
            business_type.value = suggested.to_string();
            business_type.clear_marker();
        }
    }
}

fn handle_upload_event(model: &mut RegistrationModel, event: UploadEvent, cmds: &mut Vec<Command>) {
    match event {
        UploadEvent::Accepted { name } => {
            if let Some(field) = model.fields.get_mut(FieldId::BusinessPermit) {
                field.value = name.clone();
                field.clear_marker();
            }
            model.status = Some(format!("Selected: {name}"));
        }
        UploadEvent::Rejected(rejection) => surface_error(model, rejection.to_string(), cmds),
        UploadEvent::Removed => {
            if let Some(field) = model.fields.get_mut(FieldId::BusinessPermit) {
                field.value.clear();
                field.clear_marker();
            }
            model.status = Some("File removed.".to_string());
        }
        UploadEvent::PickCancelled => {
            model.status = Some("File selection cancelled.".to_string());
        }
    }
}

fn request_submit(model: &mut RegistrationModel, cmds: &mut Vec<Command>) {
    if !model.submit_enabled() {
        debug!(phase = ?model.phase, "submit ignored while busy");
        return;
    }

    model.phase = Phase::Validating;
    match validate_for_submit(model) {
        Ok(payload) => {
            let ticket = model.next_id();
            info!(submission_id = %payload.submission_id, ticket, "submitting registration");
            model.phase = Phase::Submitting;
            model.active_submission = Some(ticket);
            model.error_banner = None;
            model.status = Some("Submitting registration...".to_string());
            cmds.push(Command::Submit {
                ticket,
                payload,
                submitter: Arc::clone(&model.submitter),
                cancel: model.scope.token(),
            });
        }
        Err(errors) => {
            model.phase = Phase::Idle;
            warn!(problems = errors.len(), "registration failed validation");
            let page_level: Vec<String> = errors
                .iter()
                .filter(|e| e.is_page_level())
                .map(|e| e.to_string())
                .collect();
            if page_level.is_empty() {
                model.status = Some("Please fix the highlighted fields.".to_string());
            } else {
                surface_error(model, page_level.join("\n"), cmds);
            }
        }
    }
}

/// Run every check without stopping at the first failure, marking fields as
/// it goes, and build the payload only when all of them pass.
fn validate_for_submit(
    model: &mut RegistrationModel,
) -> Result<RegistrationPayload, Vec<RegistrationError>> {
    let mut errors = Vec::new();

    for field in model.fields.fields_mut() {
        let checked = field.required || field.kind == FieldKind::Email;
        if !checked || !field.kind.is_input() {
            continue;
        }
        if let Err(issue) = validation::apply(field) {
            errors.push(RegistrationError::Field {
                field: field.id,
                issue,
            });
        }
    }

    if model.categories.is_empty() {
        errors.push(FormIssue::NoCategory.into());
    }

    let terms_accepted = model
        .fields
        .get(FieldId::AgreeTerms)
        .is_some_and(|f| f.is_filled());
    if !terms_accepted {
        mark_invalid(model, FieldId::AgreeTerms, FormIssue::TermsNotAccepted);
        errors.push(FormIssue::TermsNotAccepted.into());
    }

    let permit = model.upload.file().cloned();
    match &permit {
        None => {
            mark_invalid(model, FieldId::BusinessPermit, FormIssue::MissingPermit);
            errors.push(FormIssue::MissingPermit.into());
        }
        Some(file) => {
            if let Err(rejection) = check_constraints(file) {
                errors.push(rejection.into());
            }
        }
    }

    match permit {
        Some(business_permit) if errors.is_empty() => {
            let fields = &model.fields;
            Ok(RegistrationPayload {
                submission_id: Uuid::new_v4(),
                submitted_at: chrono::Utc::now().to_rfc3339(),
                seller_name: fields.value(FieldId::SellerName),
                store_name: fields.value(FieldId::StoreName),
                email_address: fields.value(FieldId::EmailAddress),
                contact_number: fields.value(FieldId::ContactNumber),
                business_address: fields.value(FieldId::BusinessAddress),
                business_type: fields.value(FieldId::BusinessType),
                paypal_email: fields.value(FieldId::PaypalEmail),
                product_categories: model.categories.selected().to_vec(),
                business_permit,
                agree_terms: terms_accepted,
            })
        }
        _ => Err(errors),
    }
}

fn mark_invalid(model: &mut RegistrationModel, id: FieldId, issue: FormIssue) {
    if let Some(field) = model.fields.get_mut(id) {
        field.validity = Validity::Invalid;
        field.error = Some(issue.to_string());
    }
}

fn schedule(model: &RegistrationModel, after: Duration, msg: Msg, cmds: &mut Vec<Command>) {
    cmds.push(Command::Schedule {
        after,
        cancel: model.scope.token(),
        msg: Box::new(msg),
    });
}

/// Show a page-level error and arm its auto-hide timer.
fn surface_error(model: &mut RegistrationModel, message: String, cmds: &mut Vec<Command>) {
    let id = model.next_id();
    model.error_banner = Some(Banner {
        id,
        message: message.clone(),
    });
    model.status = Some(message);
    schedule(model, model.timings.banner_ttl, Msg::BannerExpired { id }, cmds);
}
