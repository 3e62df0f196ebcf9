//! Event loop: draws frames, feeds input to the [`App`] and performs its commands.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use staffgrid::{DebouncedSearch, GridError, Terminal, Theme};
use staffwatch_lib::Page;
use staffwatch_lib::model::ProjectMember;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::app::{App, Command};
use crate::paths;
use crate::settings::{SettingsProvider, TableSettings};
use crate::source::MemberSource;
use crate::ui;

const FRAME: Duration = Duration::from_millis(50);
/// How long the simulated per-row actions keep their spinner up.
const ROW_ACTION_DELAY: Duration = Duration::from_millis(800);

/// Results coming back from spawned work.
enum Outcome {
    Page {
        request: u64,
        result: Result<Page<ProjectMember>, String>,
    },
    RowAction(String),
    Removed {
        keys: Vec<String>,
        result: Result<usize, String>,
    },
    Exported(Result<PathBuf, String>),
}

struct Runner {
    source: Arc<dyn MemberSource>,
    saves: mpsc::UnboundedSender<TableSettings>,
    tx: mpsc::UnboundedSender<Outcome>,
}

/// Writes table settings one at a time, in the order they were sent.
fn spawn_settings_writer(settings: SettingsProvider) -> (mpsc::UnboundedSender<TableSettings>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<TableSettings>();
    let handle = tokio::spawn(async move {
        while let Some(table) = rx.recv().await {
            if let Err(e) = settings.save_table(&table).await {
                warn!("settings: could not save table settings: {}", e);
            }
        }
    });
    (tx, handle)
}

pub async fn run(mut app: App, source: Arc<dyn MemberSource>, settings: SettingsProvider) -> Result<(), GridError> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (saves, writer) = spawn_settings_writer(settings);
    let runner = Runner { source, saves, tx };
    let mut search = DebouncedSearch::new("");

    let mut terminal = Terminal::new()?;
    let theme = Theme::default();
    let describe = runner.source.describe();

    let first = app.start();
    runner.perform(first, &search);

    loop {
        let layouts = terminal.draw(|buf| ui::draw(&app, &describe, buf.area(), buf, &theme))?;
        app.set_layouts(layouts);

        let mut commands = Vec::new();
        for input in terminal.poll(FRAME)? {
            commands.extend(app.handle_input(input));
        }
        while let Ok(outcome) = rx.try_recv() {
            commands.extend(apply(&mut app, outcome));
        }
        while let Some(text) = search.try_next() {
            commands.extend(app.apply_search(&text));
        }

        for command in commands {
            if matches!(command, Command::Quit) {
                info!("quit");
                // let queued settings reach the backend
                drop(runner);
                let _ = writer.await;
                return Ok(());
            }
            runner.perform(command, &search);
        }
    }
}

fn apply(app: &mut App, outcome: Outcome) -> Vec<Command> {
    match outcome {
        Outcome::Page { request, result } => app.finish_fetch(request, result),
        Outcome::RowAction(key) => {
            app.finish_row_action(&key);
            Vec::new()
        }
        Outcome::Removed { keys, result } => app.finish_remove(&keys, result),
        Outcome::Exported(result) => {
            app.finish_export(result);
            Vec::new()
        }
    }
}

impl Runner {
    fn perform(&self, command: Command, search: &DebouncedSearch) {
        match command {
            Command::Fetch { request, query } => {
                let source = self.source.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = source.fetch(&query).await.map_err(|e| e.to_string());
                    let _ = tx.send(Outcome::Page { request, result });
                });
            }
            Command::Search(text) => search.set(text),
            Command::RowAction { key } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    sleep(ROW_ACTION_DELAY).await;
                    let _ = tx.send(Outcome::RowAction(key));
                });
            }
            Command::Remove { keys } => {
                let source = self.source.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    sleep(ROW_ACTION_DELAY).await;
                    let result = source.remove(&keys).await.map_err(|e| e.to_string());
                    let _ = tx.send(Outcome::Removed { keys, result });
                });
            }
            Command::Export { rows } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let members: Vec<ProjectMember> = rows.into_iter().map(|r| r.0).collect();
                    let _ = tx.send(Outcome::Exported(export(&members).await));
                });
            }
            Command::SaveSettings(table) => {
                if self.saves.send(table).is_err() {
                    warn!("settings: writer stopped, table settings not saved");
                }
            }
            Command::Quit => {}
        }
    }
}

async fn export(members: &[ProjectMember]) -> Result<PathBuf, String> {
    let path = paths::export_file().ok_or("no data directory")?;
    let json = serde_json::to_vec_pretty(members).map_err(|e| e.to_string())?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| e.to_string())?;
    }
    tokio::fs::write(&path, json).await.map_err(|e| e.to_string())?;
    info!("exported {} members to {}", members.len(), path.display());
    Ok(path)
}
