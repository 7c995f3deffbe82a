use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Quiet period used to fold an editor's burst of writes into one reload.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches the config file and signals once per (debounced) change.
///
/// The parent directory is watched rather than the file itself so that a
/// config created after startup, or replaced atomically by an editor, is
/// still picked up.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let (_, mut rx) = buttons_config::ConfigWatcher::spawn("/home/user/.config/bottom-buttons/config.toml");
/// while rx.recv().await.is_some() {
///     println!("config changed, recreating the bar");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path` on the current tokio runtime.
    /// Returns the watcher handle and a receiver that fires on every change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };

    let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = event_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        warn!("Cannot watch '{}' (live reload disabled): {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = event_rx.recv().await {
        match event {
            Ok(e) if touches_config(&e, &path) => {
                // Swallow the rest of the burst before signalling.
                while let Ok(Some(_)) = tokio::time::timeout(DEBOUNCE, event_rx.recv()).await {}
                debug!("Config change detected");
                if tx.send(()).await.is_err() {
                    break; // receiver dropped
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

fn touches_config(event: &notify::Event, path: &Path) -> bool {
    use notify::EventKind::{Create, Modify};
    matches!(event.kind, Modify(_) | Create(_))
        && event.paths.iter().any(|p| p.file_name() == path.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind};

    fn event(kind: EventKind, path: &str) -> notify::Event {
        notify::Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn write_to_config_file_counts() {
        let cfg = Path::new("/cfg/bottom-buttons/config.toml");
        let e = event(EventKind::Modify(ModifyKind::Any), "/cfg/bottom-buttons/config.toml");
        assert!(touches_config(&e, cfg));
    }

    #[test]
    fn sibling_files_and_removals_are_ignored() {
        let cfg = Path::new("/cfg/bottom-buttons/config.toml");
        let sibling = event(EventKind::Create(CreateKind::File), "/cfg/bottom-buttons/notes.txt");
        let removed = event(EventKind::Remove(RemoveKind::File), "/cfg/bottom-buttons/config.toml");
        assert!(!touches_config(&sibling, cfg));
        assert!(!touches_config(&removed, cfg));
    }
}
