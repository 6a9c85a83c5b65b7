//! Interactive Health-E intake kiosk.
//!
//! ## Purpose
//! Drives the intake form and report lookup controllers over a terminal
//! session against a configured backend.
//!
//! ## Environment Variables
//! - `HEALTHE_API_URL`: backend base URL (default: "http://localhost:8000")
//! - `HEALTHE_HTTP_TIMEOUT_SECS`: per-request timeout (default: 30)

use std::io::Write;
use std::sync::Arc;

use healthe_client::HttpIntakeBackend;
use healthe_core::config::request_timeout_from_env_value;
use healthe_core::terms::OverlayClick;
use healthe_core::{
    CoreConfig, DEFAULT_API_BASE_URL, Field, IntakeFormController, Notice, ReportLookupController,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const TERMS_TEXT: &str = "\
Health-E is a prototype. Output is informational only and not a medical \
diagnosis. If symptoms are severe or worsening, seek emergency care.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("healthe_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url =
        std::env::var("HEALTHE_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
    let timeout = request_timeout_from_env_value(std::env::var("HEALTHE_HTTP_TIMEOUT_SECS").ok())?;
    let cfg = Arc::new(CoreConfig::new(api_url, timeout)?);

    tracing::info!("-- Health-E kiosk talking to {}", cfg.api_base_url());

    loop {
        println!();
        println!("[1] New intake  [2] Find my report  [q] Quit");
        match prompt("> ")?.as_str() {
            "1" => run_intake(cfg.clone()).await?,
            "2" => run_lookup(cfg.clone())?,
            "q" | "Q" => break,
            other => println!("Unknown choice: {other}"),
        }
    }

    Ok(())
}

/// One pass through the intake form, event by event, until the draft
/// validates and the submission resolves.
async fn run_intake(cfg: Arc<CoreConfig>) -> anyhow::Result<()> {
    let mut controller = IntakeFormController::new();
    let backend = HttpIntakeBackend::new(cfg)?;

    loop {
        let raw = prompt("Patient name: ")?;
        controller.input_name(&raw);
        if controller.draft().name != raw {
            // Mirror of the field's sanitize-and-write-back behaviour.
            println!("  (cleaned to: {})", controller.draft().name);
        }
        if !controller.field_error_visible(Field::Name) && !controller.draft().name.is_empty() {
            break;
        }
        println!("  Name must be at least two letters, letters and spaces only.");
    }

    loop {
        controller.input_age(&prompt("Age: ")?);
        if !controller.field_error_visible(Field::Age) && !controller.draft().age.is_empty() {
            break;
        }
        println!("  Age must be a whole number between 0 and 120.");
    }

    loop {
        controller.select_sex(&prompt("Sex (Male/Female): ")?);
        if !controller.field_error_visible(Field::Sex) && !controller.draft().sex.is_empty() {
            break;
        }
        println!("  Please enter exactly Male or Female.");
    }

    // Terms overlay: shown, read, then dismissed by the backdrop click the
    // terminal stands in for.
    controller.open_terms();
    println!();
    println!("--- Terms and Conditions ---");
    println!("{TERMS_TEXT}");
    println!("----------------------------");
    prompt("Press Enter to close the terms")?;
    controller.overlay_click(OverlayClick::Backdrop);

    let accepted = prompt("Accept the terms and conditions? (yes/no): ")?;
    controller.set_accepted_terms(accepted.eq_ignore_ascii_case("yes"));
    if controller.field_error_visible(Field::Terms) {
        println!("Terms were not accepted; intake cancelled.");
        return Ok(());
    }

    if !controller.submit_enabled() {
        println!("The form is not complete; intake cancelled.");
        return Ok(());
    }

    println!("{}", healthe_core::intake::SUBMIT_BUSY_LABEL);
    controller.submit(&backend).await;

    match controller.take_notice() {
        Some(Notice::Confirmation {
            ref_id,
            report_pdf_url,
        }) => {
            println!();
            println!("Intake recorded. Your reference ID is: {ref_id}");
            if let Some(url) = report_pdf_url {
                println!("Report PDF: {url}");
            }
            println!("Keep the reference ID to retrieve your report later.");
        }
        Some(Notice::Error(message)) => {
            println!();
            println!("Submission failed: {message}");
        }
        None => {}
    }

    Ok(())
}

fn run_lookup(cfg: Arc<CoreConfig>) -> anyhow::Result<()> {
    let mut controller = ReportLookupController::new(cfg);

    let raw = prompt("Reference ID (or paste a report link query): ")?;
    if raw.contains("ref=") {
        controller.prefill_from_query(raw.trim_start_matches(['?', '#']));
    } else {
        controller.input_ref(&raw);
    }

    match controller.lookup() {
        Some(url) => println!("Open your report at: {url}"),
        None => {
            if let Some(message) = controller.validation_message() {
                println!("{message}");
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}
