use std::{
    fmt::{self, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Result;
use clap::Parser;
use client_core::{
    load_settings,
    presentation::{confidence_bar, health_badge, input_summary, prediction_headline},
    HttpPredictionGateway, SessionController, SubmitOutcome,
};
use shared::{domain::FormField, error::PREDICTION_FAILED_MESSAGE, protocol::PredictionResult};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Submit clinical measurements to the diabetes risk service")]
struct Args {
    /// Overrides the backend url from predictor.toml / APP__BACKEND_URL.
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Only report backend health.
    #[arg(long)]
    health_only: bool,
    /// Print the raw prediction result as JSON.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    pregnancies: Option<String>,
    #[arg(long)]
    glucose: Option<String>,
    #[arg(long)]
    blood_pressure: Option<String>,
    #[arg(long)]
    skin_thickness: Option<String>,
    #[arg(long)]
    insulin: Option<String>,
    #[arg(long)]
    bmi: Option<String>,
    #[arg(long)]
    diabetes_pedigree_function: Option<String>,
    #[arg(long)]
    age: Option<String>,
}

impl Args {
    fn field_values(&self) -> [(FormField, Option<&str>); 8] {
        [
            (FormField::Pregnancies, self.pregnancies.as_deref()),
            (FormField::Glucose, self.glucose.as_deref()),
            (FormField::BloodPressure, self.blood_pressure.as_deref()),
            (FormField::SkinThickness, self.skin_thickness.as_deref()),
            (FormField::Insulin, self.insulin.as_deref()),
            (FormField::Bmi, self.bmi.as_deref()),
            (
                FormField::DiabetesPedigreeFunction,
                self.diabetes_pedigree_function.as_deref(),
            ),
            (FormField::Age, self.age.as_deref()),
        ]
    }
}

fn render_results(result: &PredictionResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Analysis Complete")?;
    writeln!(out, "  Prediction:     {}", prediction_headline(result))?;
    writeln!(out, "  Risk level:     {}", result.risk_level)?;
    if let Some(bar) = confidence_bar(result) {
        writeln!(out, "  Confidence:     {}", bar.label())?;
    }
    writeln!(out, "  Recommendation: {}", result.recommendation)?;
    let summary = input_summary(result);
    if !summary.is_empty() {
        writeln!(out, "  Input summary:")?;
        for (key, value) in summary {
            writeln!(out, "    {key}: {value}")?;
        }
    }
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?.with_backend_url(args.backend_url.clone());
    tracing::debug!(
        backend_url = %settings.backend_url,
        timeout_secs = settings.request_timeout_secs,
        "resolved gateway settings"
    );
    let gateway = HttpPredictionGateway::from_settings(&settings)?;
    let mut session = SessionController::new();

    let health = session.check_health(&gateway).await;
    println!("Backend {}: {}", gateway.base_url(), health_badge(health));
    if args.health_only {
        return Ok(if health.is_healthy() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    for (field, value) in args.field_values() {
        if let Some(value) = value {
            session.edit_field(field, value);
        }
    }

    match session.submit(&gateway).await {
        SubmitOutcome::Succeeded => {
            let Some(result) = session.view().result() else {
                return Ok(ExitCode::FAILURE);
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print!("{}", render_results(result)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Failed | SubmitOutcome::Stale => {
            let message = session.view().error().unwrap_or(PREDICTION_FAILED_MESSAGE);
            eprintln!("error: {message}");
            Ok(ExitCode::FAILURE)
        }
    }
}
