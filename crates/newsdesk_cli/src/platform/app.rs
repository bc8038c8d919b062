use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use desk_logging::{desk_debug, desk_info};
use newsdesk_client::{
    Advertisement, ApiClient, Article, AuthSession, Backend, Category, City, CredentialStore,
    DismissReason, EPaper, FilePart, FileStorage, Location, NotificationController, Payload,
    Resource, ResourceStore, ShortVideo, SingleFlight, State, User,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::config::CliConfig;
use super::logging;
use super::render;
use super::terminal::{TerminalNavigator, TerminalPresenter};
use crate::cli::{Cli, Command, ResourceKind};

/// How long to wait for the notification latch after the user dismisses.
const RELEASE_TIMEOUT: Duration = Duration::from_secs(2);

enum ResourceAction {
    List { page: u32, limit: u32 },
    Show(String),
    Create(Payload),
    Update(String, Payload),
    Delete(String),
}

struct App {
    backend: Arc<dyn Backend>,
    auth: AuthSession,
    notifications: Arc<NotificationController>,
    navigator: Arc<TerminalNavigator>,
    latch: Arc<SingleFlight>,
}

pub async fn run_app(cli: Cli) -> Result<ExitCode> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url.clone() {
        config.api_url = api_url;
    }
    if let Some(state_dir) = cli.state_dir.clone() {
        config.state_dir = state_dir;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = Some(level);
    }
    if let Some(destination) = cli.log_to {
        config.log_destination = destination;
    }
    logging::initialize(
        config.log_destination,
        logging::parse_level(config.log_level.as_deref()),
    );
    desk_debug!("Using backend {} and state dir {:?}", config.api_url, config.state_dir);

    let app = App::build(&config)?;
    let succeeded = app.execute(cli.command).await?;
    app.settle_notification().await;

    if app.navigator.redirected() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

impl App {
    fn build(config: &CliConfig) -> Result<Self> {
        let credentials = CredentialStore::new(Arc::new(FileStorage::new(&config.state_dir)));
        let latch = SingleFlight::new();
        // No exit animation in a terminal.
        let notifications = Arc::new(
            NotificationController::new(Arc::new(TerminalPresenter), Arc::clone(&latch))
                .with_exit_delay(Duration::ZERO),
        );
        let navigator = Arc::new(TerminalNavigator::default());
        let client = ApiClient::with_session(
            &config.client_settings(),
            credentials.clone(),
            notifications.clone(),
            navigator.clone(),
            Arc::clone(&latch),
        )
        .context("invalid backend URL")?;
        let backend: Arc<dyn Backend> = Arc::new(client);

        Ok(Self {
            auth: AuthSession::new(Arc::clone(&backend), credentials),
            backend,
            notifications,
            navigator,
            latch,
        })
    }

    async fn execute(&self, command: Command) -> Result<bool> {
        match command {
            Command::Login { email, password } => {
                match self.auth.login(&email, &password).await {
                    Ok(user) => {
                        match user {
                            Some(user) => render::value(&user)?,
                            None => println!("Signed in as {email}"),
                        }
                        Ok(true)
                    }
                    Err(err) => {
                        eprintln!("Sign-in failed: {err}");
                        Ok(false)
                    }
                }
            }
            Command::Logout => {
                self.auth.logout();
                println!("Signed out");
                Ok(true)
            }
            Command::Whoami => {
                if !self.auth.is_signed_in() {
                    println!("Not signed in");
                    return Ok(false);
                }
                match self.auth.current_user() {
                    Some(user) => render::value(&user)?,
                    None => println!("Signed in"),
                }
                Ok(true)
            }
            Command::List {
                resource,
                page,
                limit,
            } => {
                self.dispatch(resource, ResourceAction::List { page, limit })
                    .await
            }
            Command::Show { resource, id } => {
                self.dispatch(resource, ResourceAction::Show(id)).await
            }
            Command::Create {
                resource,
                data,
                files,
            } => {
                let payload = build_payload(&data, &files)?;
                self.dispatch(resource, ResourceAction::Create(payload))
                    .await
            }
            Command::Update {
                resource,
                id,
                data,
                files,
            } => {
                let payload = build_payload(&data, &files)?;
                self.dispatch(resource, ResourceAction::Update(id, payload))
                    .await
            }
            Command::Delete { resource, id } => {
                self.dispatch(resource, ResourceAction::Delete(id)).await
            }
        }
    }

    async fn dispatch(&self, resource: ResourceKind, action: ResourceAction) -> Result<bool> {
        let backend = Arc::clone(&self.backend);
        match resource {
            ResourceKind::Articles => run_resource::<Article>(backend, action).await,
            ResourceKind::Advertisements => run_resource::<Advertisement>(backend, action).await,
            ResourceKind::Categories => run_resource::<Category>(backend, action).await,
            ResourceKind::Locations => run_resource::<Location>(backend, action).await,
            ResourceKind::Videos => run_resource::<ShortVideo>(backend, action).await,
            ResourceKind::Epapers => run_resource::<EPaper>(backend, action).await,
            ResourceKind::States => run_resource::<State>(backend, action).await,
            ResourceKind::Cities => run_resource::<City>(backend, action).await,
            ResourceKind::Users => run_resource::<User>(backend, action).await,
        }
    }

    /// Holds the process open while a session or permission notice is up.
    ///
    /// On a terminal the user acknowledges with Enter; otherwise the notice
    /// is acknowledged straight away. Either way the sign-in redirect runs
    /// before the process exits.
    async fn settle_notification(&self) {
        if !self.notifications.snapshot().visible {
            return;
        }
        if std::io::stdin().is_terminal() {
            eprintln!("Press Enter to continue.");
            let mut line = String::new();
            let _ = BufReader::new(tokio::io::stdin()).read_line(&mut line).await;
        }
        self.notifications.dismiss(DismissReason::Acknowledged);

        let released = tokio::time::timeout(RELEASE_TIMEOUT, async {
            while self.latch.is_held() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        if released.is_err() {
            desk_debug!("Notification latch still held at exit");
        }
    }
}

async fn run_resource<T>(backend: Arc<dyn Backend>, action: ResourceAction) -> Result<bool>
where
    T: Resource + Serialize,
{
    let store = ResourceStore::<T>::for_resource(backend);
    match &action {
        ResourceAction::List { page, limit } => store.list(*page, *limit).await,
        ResourceAction::Show(id) => store.fetch(id).await,
        ResourceAction::Create(payload) => store.create(payload.clone()).await,
        ResourceAction::Update(id, payload) => store.update(id, payload.clone()).await,
        ResourceAction::Delete(id) => store.delete(id).await,
    }

    let state = store.snapshot();
    if let Some(message) = state.error() {
        eprintln!("{}: {message}", store.endpoint().path);
        return Ok(false);
    }
    match action {
        ResourceAction::List { .. } => render::list(&state)?,
        ResourceAction::Delete(id) => {
            desk_info!("Deleted {} {}", store.endpoint().path, id);
            println!("Deleted {id}");
        }
        _ => render::current(&state)?,
    }
    Ok(true)
}

/// Builds a request body from a JSON object and `FIELD=PATH` file specs.
fn build_payload(data: &str, files: &[String]) -> Result<Payload> {
    let fields: Map<String, Value> = match serde_json::from_str(data)
        .with_context(|| format!("--data is not valid JSON: {data}"))?
    {
        Value::Object(fields) => fields,
        other => bail!("--data must be a JSON object, got {other}"),
    };
    let parts = files
        .iter()
        .map(|arg| read_file_part(arg))
        .collect::<Result<Vec<_>>>()?;
    Ok(Payload::from_parts(fields, parts))
}

fn read_file_part(arg: &str) -> Result<FilePart> {
    let Some((field, path)) = arg.split_once('=') else {
        bail!("--file expects FIELD=PATH, got {arg}");
    };
    let path = Path::new(path);
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {path:?}"))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| field.to_string());
    Ok(FilePart::new(field, file_name, bytes).with_mime(mime_for(path)))
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
