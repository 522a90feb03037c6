//! cineadmin - cinema catalog administration CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_access_token, resolve_config_path};
use cineadmin_api::cinema::{
    AccessToken, CategoryRef, CinemaClient, DirectorId, ReferenceKind, ReferenceRecord,
    load_reference_data,
};
use cineadmin_api::movie::{DirectorChoice, MovieForm, SubmitError, ValidationErrors, submit_form};
use cineadmin_api::pages::PaymentSuccessPage;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Config directory (default: $CINEADMIN_CONFIG_DIR, then ~/.config/cineadmin).
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Override the backend base URL from the config file.
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List catalog reference data.
    Reference(ReferenceArgs),
    /// Manage movies.
    Movie(MovieCommand),
    /// Show the payment confirmation page.
    PaymentSuccess,
    /// Inspect or edit the config file.
    Config(ConfigCommand),
}

/// Reference lists selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum ReferenceTarget {
    /// Every list.
    All,
    /// Actors.
    Actors,
    /// Cities.
    Cities,
    /// Categories.
    Categories,
    /// Directors.
    Directors,
}

impl ReferenceTarget {
    fn includes(self, kind: ReferenceKind) -> bool {
        match self {
            Self::All => true,
            Self::Actors => kind == ReferenceKind::Actors,
            Self::Cities => kind == ReferenceKind::Cities,
            Self::Categories => kind == ReferenceKind::Categories,
            Self::Directors => kind == ReferenceKind::Directors,
        }
    }
}

/// Arguments for the `reference` subcommand.
#[derive(clap::Args)]
struct ReferenceArgs {
    /// Which list to show.
    #[arg(value_enum, default_value = "all")]
    target: ReferenceTarget,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieCommand {
    /// Movie subcommand to run.
    #[command(subcommand)]
    command: MovieSubcommands,
}

/// Available movie subcommands.
#[derive(Subcommand)]
enum MovieSubcommands {
    /// Add a movie, creating its director first if needed.
    Add(MovieAddArgs),
}

/// Arguments for the `movie add` subcommand.
#[derive(clap::Args)]
struct MovieAddArgs {
    /// Movie title.
    #[arg(long, default_value = "")]
    name: String,
    /// Summary text.
    #[arg(long, default_value = "")]
    description: String,
    /// Running time in minutes.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    duration: String,
    /// Release date (YYYY-MM-DD).
    #[arg(long, default_value = "")]
    release_date: String,
    /// Trailer URL.
    #[arg(long, default_value = "")]
    trailer_url: String,
    /// Category ID (see `cineadmin reference categories`).
    #[arg(long, default_value = "")]
    category_id: String,
    /// Existing director ID (see `cineadmin reference directors`).
    #[arg(long)]
    director_id: Option<String>,
    /// New director name, used when --director-id is not given.
    #[arg(long, default_value = "")]
    director_name: String,
    /// Mark the movie as not currently showing.
    #[arg(long)]
    not_in_vision: bool,
    /// Access token (falls back to CINEADMIN_TOKEN, then the config file).
    #[arg(long)]
    token: Option<String>,
    /// Validate and show the request without sending it.
    #[arg(long)]
    dry_run: bool,
}

impl MovieAddArgs {
    fn to_form(&self) -> MovieForm {
        MovieForm {
            movie_name: self.name.clone(),
            description: self.description.clone(),
            duration: self.duration.clone(),
            release_date: self.release_date.clone(),
            trailer_url: self.trailer_url.clone(),
            category_id: self.category_id.clone(),
            director_id: self.director_id.clone(),
            director_name: self.director_name.clone(),
            is_in_vision: !self.not_in_vision,
        }
    }
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show the effective configuration (token redacted).
    Show,
    /// Persist the backend base URL.
    SetBaseUrl {
        /// Base URL of the movie service.
        url: Url,
    },
}

/// Loads the config file and applies the `--base-url` override.
fn load_config(dir: Option<&PathBuf>, base_url: Option<&Url>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&config_path)?;
    if let Some(url) = base_url {
        config.api.base_url = Some(url.clone());
    }
    Ok(config)
}

fn build_client(config: &AppConfig) -> Result<CinemaClient> {
    let mut builder = CinemaClient::builder()
        .timeout(config.api.timeout())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(url) = &config.api.base_url {
        builder = builder.base_url(url.clone());
    }
    builder.build().context("failed to build cinema API client")
}

fn log_records<T: ReferenceRecord>(kind: ReferenceKind, records: &[T]) {
    tracing::info!("== {kind} ({})", records.len());
    tracing::info!("ID\tName");
    for record in records {
        tracing::info!("{}\t{}", record.id(), record.display_name());
    }
}

/// Runs the `reference` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or every requested list failed.
#[instrument(skip_all)]
async fn run_reference(args: &ReferenceArgs, config: &AppConfig) -> Result<()> {
    let client = build_client(config)?;
    let data = load_reference_data(&client).await;

    let target = args.target;
    for kind in ReferenceKind::ALL {
        if !target.includes(kind) {
            continue;
        }
        match kind {
            ReferenceKind::Actors => log_records(kind, &data.actors),
            ReferenceKind::Cities => log_records(kind, &data.cities),
            ReferenceKind::Categories => log_records(kind, &data.categories),
            ReferenceKind::Directors => log_records(kind, &data.directors),
        }
    }

    let requested = ReferenceKind::ALL
        .into_iter()
        .filter(|k| target.includes(*k))
        .count();
    let failed = data
        .failures
        .iter()
        .filter(|k| target.includes(**k))
        .count();
    if failed > 0 && failed == requested {
        anyhow::bail!(
            "failed to load reference data from {}",
            config.api.effective_base_url()
        );
    }
    Ok(())
}

/// Logs each rejected field so the operator sees every problem at once.
fn log_field_errors(errors: &ValidationErrors) {
    for error in errors.errors() {
        tracing::error!("{}: {}", error.field, error.message);
    }
}

/// Logs the movie request a submission would send, with the token redacted.
///
/// # Errors
///
/// Returns an error if the form is invalid.
fn preview_movie(form: &MovieForm, categories: &[CategoryRef]) -> Result<()> {
    let draft = form.validate(categories).map_err(|errors| {
        log_field_errors(&errors);
        SubmitError::from(errors)
    })?;
    let director_id = match &draft.director {
        DirectorChoice::Resolved(id) => id.clone(),
        DirectorChoice::Unresolved(_) => DirectorId::new("<created on submit>"),
    };
    let preview = draft.into_new_movie(director_id, AccessToken::new("<redacted>"));
    let json = serde_json::to_string_pretty(&preview).context("failed to encode movie")?;
    tracing::info!("Dry run, nothing sent. Movie request:\n{json}");
    Ok(())
}

/// Runs the `movie add` subcommand.
///
/// # Errors
///
/// Returns an error if no token is available for a real submission, the form
/// is invalid, or the backend rejects the director or movie.
#[instrument(skip_all)]
async fn run_movie_add(args: &MovieAddArgs, config: &AppConfig) -> Result<()> {
    // Dry runs send nothing, so they need no token.
    let token = if args.dry_run {
        None
    } else {
        Some(resolve_access_token(args.token.as_deref(), config)?)
    };
    let client = build_client(config)?;

    let reference = load_reference_data(&client).await;
    for kind in &reference.failures {
        tracing::warn!("{kind} could not be loaded; related options are unavailable");
    }

    let form = args.to_form();
    let Some(token) = token else {
        return preview_movie(&form, &reference.categories);
    };

    let submission = submit_form(&client, &form, &reference.categories, &token)
        .await
        .map_err(|e| {
            if let SubmitError::Invalid(errors) = &e {
                log_field_errors(errors);
            }
            if let Some(id) = e.orphaned_director() {
                tracing::warn!("director {id} was created but has no movie; remove it manually");
            }
            anyhow::Error::new(e)
        })?;

    if let Some(director) = &submission.created_director {
        tracing::info!("Director ID: {}", director.director_id);
    }
    tracing::info!("Movie ID: {}", submission.movie.movie_id);
    tracing::info!("Next: {}", submission.next_page);
    Ok(())
}

/// Runs the `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
fn run_config(cmd: &ConfigCommand, dir: Option<&PathBuf>, base_url: Option<&Url>) -> Result<()> {
    match &cmd.command {
        ConfigSubcommands::Show => {
            let config = load_config(dir, base_url)?;
            tracing::info!("base_url = {}", config.api.effective_base_url());
            tracing::info!("timeout_secs = {}", config.api.timeout_secs);
            tracing::info!(
                "access_token = {}",
                if config.api.access_token.is_some() {
                    "(set)"
                } else {
                    "(unset)"
                }
            );
            Ok(())
        }
        ConfigSubcommands::SetBaseUrl { url } => {
            let config_path = resolve_config_path(dir)?;
            let mut config = AppConfig::load(&config_path)?;
            config.api.base_url = Some(url.clone());
            config.save(&config_path)?;
            tracing::info!("Saved base_url to {}", config_path.display());
            Ok(())
        }
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    let base_url = cli.base_url.as_ref();
    match cli.command {
        Commands::Reference(args) => run_reference(&args, &load_config(dir, base_url)?).await,
        Commands::Movie(movie) => match movie.command {
            MovieSubcommands::Add(args) => {
                run_movie_add(&args, &load_config(dir, base_url)?).await
            }
        },
        Commands::PaymentSuccess => {
            PaymentSuccessPage.render();
            Ok(())
        }
        Commands::Config(cmd) => run_config(&cmd, dir, base_url),
    }
}
