use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, render, AdvisoryClient, FormField, IgnoreReason, Settings,
    SubmissionController, SubmitDecision,
};
use shared::{domain::District, reference::CropNames};
use tracing_subscriber::EnvFilter;

/// Ask the recommendation service for a crop and fertilizer advisory.
#[derive(Parser, Debug)]
#[command(name = "agri-advisor")]
struct Args {
    /// Recommendation endpoint; overrides advisor.toml and APP__ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long, default_value = "Ariyalur")]
    district: String,
    /// Nitrogen
    #[arg(long, required_unless_present = "list_districts")]
    n: Option<String>,
    /// Phosphorus
    #[arg(long, required_unless_present = "list_districts")]
    p: Option<String>,
    /// Potassium
    #[arg(long, required_unless_present = "list_districts")]
    k: Option<String>,
    /// Soil pH; 6.5 when omitted.
    #[arg(long)]
    ph: Option<String>,
    /// Loamy, Sandy, Clayey, Red or Black.
    #[arg(long, default_value = "Loamy")]
    soil_type: String,
    /// Print the raw service response as JSON instead of the dashboard.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    no_local_names: bool,
    #[arg(long)]
    list_districts: bool,
}

impl Args {
    fn settings(&self, mut settings: Settings) -> Settings {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(secs) = self.timeout_secs {
            settings.request_timeout_secs = secs;
        }
        if self.no_local_names {
            settings.show_local_names = false;
        }
        settings
    }

    fn fill(&self, controller: &mut SubmissionController) -> Result<()> {
        let fields = [
            (FormField::District, Some(self.district.as_str())),
            (FormField::N, self.n.as_deref()),
            (FormField::P, self.p.as_deref()),
            (FormField::K, self.k.as_deref()),
            (FormField::Ph, self.ph.as_deref()),
            (FormField::SoilType, Some(self.soil_type.as_str())),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                controller
                    .set_field(field, value)
                    .with_context(|| format!("invalid --{}", field.wire_name().replace('_', "-")))?;
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if args.list_districts {
        for district in District::all() {
            println!("{district}");
        }
        return Ok(());
    }

    let settings = args.settings(load_settings());
    let client = AdvisoryClient::from_settings(&settings)?;
    tracing::info!(endpoint = %client.endpoint(), "using recommendation endpoint");

    let mut controller = SubmissionController::new();
    args.fill(&mut controller)?;

    match controller.submit_with(&client).await {
        SubmitDecision::Dispatched(_) => {}
        SubmitDecision::Invalid(err) => bail!("invalid input: {err}"),
        SubmitDecision::Ignored(IgnoreReason::InFlight | IgnoreReason::ResultShown) => {
            bail!("submission was not sent")
        }
    }

    let snapshot = controller.snapshot();
    if let Some(err) = snapshot.error() {
        bail!("{err}");
    }
    let Some(result) = snapshot.result() else {
        bail!("no recommendation received");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&**result)?);
    } else {
        let crop_names = if settings.show_local_names {
            CropNames::tamil()
        } else {
            CropNames::empty()
        };
        print!("{}", render::text(&render::dashboard(result, &crop_names)));
    }
    Ok(())
}
