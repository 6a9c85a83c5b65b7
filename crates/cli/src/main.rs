use clap::{Parser, Subcommand};
use healthe_client::HttpIntakeBackend;
use healthe_core::config::request_timeout_from_env_value;
use healthe_core::{
    CoreConfig, Field, IntakeFormController, Notice, ReportLookupController, DEFAULT_API_BASE_URL,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "healthe")]
#[command(about = "Health-E intake kiosk CLI")]
struct Cli {
    /// Backend base URL (defaults to HEALTHE_API_URL or http://localhost:8000)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an intake and print the returned reference ID
    Submit {
        /// Patient name
        name: String,
        /// Patient age in years (0-120)
        age: String,
        /// Patient sex (Male or Female)
        sex: String,
        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },
    /// Print the report PDF URL for a reference ID
    Lookup {
        /// 20-character reference ID (normalized before use)
        reference: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let api_url = cli
        .api_url
        .or_else(|| std::env::var("HEALTHE_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
    let timeout = request_timeout_from_env_value(std::env::var("HEALTHE_HTTP_TIMEOUT_SECS").ok())?;
    let cfg = Arc::new(CoreConfig::new(api_url, timeout)?);

    match cli.command {
        Some(Commands::Submit {
            name,
            age,
            sex,
            accept_terms,
        }) => {
            let mut controller = IntakeFormController::new();
            controller.input_name(&name);
            controller.input_age(&age);
            controller.select_sex(&sex);
            controller.set_accepted_terms(accept_terms);

            if !controller.submit_enabled() {
                report_field_errors(&controller);
                return Ok(());
            }

            let backend = HttpIntakeBackend::new(cfg)?;
            controller.submit(&backend).await;
            match controller.take_notice() {
                Some(Notice::Confirmation {
                    ref_id,
                    report_pdf_url,
                }) => {
                    println!("Reference ID: {}", ref_id);
                    if let Some(url) = report_pdf_url {
                        println!("Report PDF: {}", url);
                    }
                }
                Some(Notice::Error(message)) => eprintln!("Submission failed: {}", message),
                None => eprintln!("Submission produced no result"),
            }
        }
        Some(Commands::Lookup { reference }) => {
            let mut controller = ReportLookupController::new(cfg);
            controller.input_ref(&reference);
            match controller.lookup() {
                Some(url) => println!("Report PDF: {}", url),
                None => {
                    if let Some(message) = controller.validation_message() {
                        eprintln!("{}", message);
                    }
                }
            }
        }
        None => {
            println!("Use 'healthe --help' for commands");
        }
    }

    Ok(())
}

fn report_field_errors(controller: &IntakeFormController) {
    if controller.field_error_visible(Field::Name) || controller.draft().name.is_empty() {
        eprintln!("Invalid name: at least two letters, letters and spaces only");
    }
    if controller.field_error_visible(Field::Age) || controller.draft().age.is_empty() {
        eprintln!("Invalid age: must be a whole number between 0 and 120");
    }
    if controller.field_error_visible(Field::Sex) || controller.draft().sex.is_empty() {
        eprintln!("Invalid sex: must be Male or Female");
    }
    if controller.field_error_visible(Field::Terms) {
        eprintln!("Terms must be accepted (pass --accept-terms)");
    }
}
