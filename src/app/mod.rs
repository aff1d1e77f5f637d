// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the registration UI.

use std::sync::Arc;

use eframe::egui;
use egui_phosphor::Variant;
use tracing::info;

use crate::config::AppConfig;
use crate::logic::simulator::SubmissionSimulator;
use crate::models::field::FieldRegistry;
use crate::mvu::RegistrationModel;
use crate::ui::SellerRegistrationApp;

/// Build the controller from `config` and run the main egui event loop.
pub fn run(config: AppConfig) -> eframe::Result<()> {
    info!(
        submit_delay_ms = config.simulator.delay.as_millis() as u64,
        success_rate = config.simulator.success_rate,
        seeded = config.simulator.seed.is_some(),
        confirm_delay_ms = config.timings.confirm_delay.as_millis() as u64,
        banner_ms = config.timings.banner_ttl.as_millis() as u64,
        "starting seller registration"
    );

    let submitter = Arc::new(SubmissionSimulator::new(&config.simulator));
    let model = RegistrationModel::new(FieldRegistry::seller_form(), submitter, config.timings);

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 900.0])
            .with_min_inner_size([520.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "TECHORA Seller Registration",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(SellerRegistrationApp::new(model)))
        }),
    )
}
