mod app;
mod members;
mod paths;
mod runner;
mod settings;
mod source;
mod ui;

use std::fs::{self, File};
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};
use staffgrid::GridError;
use staffwatch_lib::guard::LOGIN_PATH;
use staffwatch_lib::{ApiClient, ApiError, GuardDecision, RouteGuard};
use thiserror::Error;

use crate::app::App;
use crate::settings::{SettingsProvider, SqliteBackend};
use crate::source::{FixtureSource, MemberSource, RemoteSource};

const FIXTURE_MEMBERS: usize = 137;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("access denied (redirected to {0})")]
    Denied(&'static str),
}

/// Environment overrides.
struct Env {
    api_url: Option<String>,
    token: Option<String>,
    org: Option<String>,
    project: String,
}

impl Env {
    fn read() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_url: var("STAFFWATCH_API_URL"),
            token: var("STAFFWATCH_TOKEN"),
            org: var("STAFFWATCH_ORG"),
            project: var("STAFFWATCH_PROJECT").unwrap_or_else(|| "default".to_string()),
        }
    }

    /// The route the console stands in for.
    fn route(&self) -> String {
        match &self.org {
            Some(org) => format!("/{}/projects/{}/members", org, self.project),
            None => format!("/dashboard/projects/{}/members", self.project),
        }
    }
}

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(e) => eprintln!("logging disabled: {}", e),
    }
}

async fn open_settings() -> SettingsProvider {
    let Some(path) = paths::settings_db() else {
        warn!("no data directory; settings will not persist");
        return SettingsProvider::in_memory();
    };
    match SqliteBackend::open(&path).await {
        Ok(backend) => SettingsProvider::new(backend),
        Err(e) => {
            warn!("settings: could not open {}: {}", path.display(), e);
            SettingsProvider::in_memory()
        }
    }
}

async fn connect(env: &Env, base_url: &str) -> Result<Arc<dyn MemberSource>, StartupError> {
    let client = ApiClient::builder()
        .url(base_url)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let guard = RouteGuard::new(client.clone());
    let decision = guard.check(&env.route(), env.token.as_deref()).await;
    match (decision, &env.token) {
        (GuardDecision::Allow, Some(token)) => Ok(Arc::new(RemoteSource::new(client, token, env.project.clone()))),
        (decision, _) => Err(StartupError::Denied(decision.location().unwrap_or(LOGIN_PATH))),
    }
}

async fn start() -> Result<(), StartupError> {
    let env = Env::read();
    let settings = open_settings().await;
    let mut table = settings.load_table().await;

    if let Some(url) = &env.api_url {
        table.base_url = Some(url.clone());
        if let Err(e) = settings.save_table(&table).await {
            warn!("settings: could not remember API URL: {}", e);
        }
    }

    let source: Arc<dyn MemberSource> = match &table.base_url {
        Some(url) => connect(&env, url).await?,
        None => Arc::new(FixtureSource::generated(FIXTURE_MEMBERS)),
    };
    info!("member source: {}", source.describe());

    let app = App::new(&table, source.sorts_remotely(), source.can_remove())?;
    runner::run(app, source, settings).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = start().await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
