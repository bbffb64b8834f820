use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use glob::Pattern;
use log::{debug, error, info};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Result as NotifyResult, Watcher};

use crate::builder::site::{build_pages, BuildOptions, BuildReport};
use crate::config::Config;
use crate::directory::copy_static;
use crate::utils::error::BoxResult;

/// Editor droppings and hidden files never trigger a rebuild
const IGNORED_FILE_NAMES: [&str; 4] = [".*", "*~", "*.swp", "4913"];

/// Part of the build to redo after a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RebuildTask {
    /// Copy the static directory again
    Static,
    /// Re-render articles and pages
    Pages,
}

/// Map a changed path to the task it invalidates
pub fn classify_change(path: &Path, config: &Config) -> Option<RebuildTask> {
    if is_ignored(path) {
        return None;
    }

    if path.starts_with(config.static_path()) {
        return Some(RebuildTask::Static);
    }

    let content_dirs = [
        config.articles_path(),
        config.pages_path(),
        config.templates_path(),
    ];
    if content_dirs.iter().any(|dir| path.starts_with(dir)) {
        return Some(RebuildTask::Pages);
    }

    None
}

fn is_ignored(path: &Path) -> bool {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return false,
    };

    IGNORED_FILE_NAMES.iter().any(|pattern| {
        Pattern::new(pattern)
            .map(|glob| glob.matches(&name))
            .unwrap_or(false)
    })
}

/// Watch the content, template and static directories, sending the task
/// each change invalidates
pub fn watch_site(config: &Config, tx: Sender<RebuildTask>) -> BoxResult<RecommendedWatcher> {
    let watch_config = config.clone();

    let mut watcher = notify::recommended_watcher(move |res: NotifyResult<Event>| match res {
        Ok(event) => match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {
                for path in &event.paths {
                    if let Some(task) = classify_change(path, &watch_config) {
                        debug!("{} changed, scheduling {:?}", path.display(), task);
                        if let Err(e) = tx.send(task) {
                            error!("Error sending file event: {}", e);
                        }
                    }
                }
            }
            _ => {}
        },
        Err(e) => error!("Watch error: {}", e),
    })?;

    let dirs: [PathBuf; 4] = [
        config.articles_path(),
        config.pages_path(),
        config.templates_path(),
        config.static_path(),
    ];
    for dir in dirs.iter().filter(|dir| dir.is_dir()) {
        watcher.watch(dir, RecursiveMode::Recursive)?;
        info!("Watching for changes in {}", dir.display());
    }

    Ok(watcher)
}

/// Run one rebuild task
pub fn run_task(task: RebuildTask, config: &Config, options: &BuildOptions) -> BoxResult<BuildReport> {
    match task {
        RebuildTask::Static => {
            let static_files_count = copy_static(config)?;
            Ok(BuildReport {
                static_files_count,
                ..BuildReport::default()
            })
        }
        RebuildTask::Pages => build_pages(config, options),
    }
}

/// Rebuild on every batch of changes until the sender goes away.
///
/// Changes arriving within `debounce` of each other are coalesced, and each
/// task runs at most once per batch. `on_rebuilt` is called after every task
/// that succeeds.
pub fn handle_changes<F>(
    rx: Receiver<RebuildTask>,
    config: &Config,
    options: &BuildOptions,
    debounce: Duration,
    mut on_rebuilt: F,
) where
    F: FnMut(&BuildReport),
{
    loop {
        let first = match rx.recv() {
            Ok(task) => task,
            Err(_) => break,
        };

        let mut tasks = BTreeSet::new();
        tasks.insert(first);
        let mut disconnected = false;
        loop {
            match rx.recv_timeout(debounce) {
                Ok(task) => {
                    tasks.insert(task);
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        for task in tasks {
            info!("Change detected, running {:?} task...", task);
            let options = BuildOptions {
                build_time: chrono::Utc::now(),
                ..options.clone()
            };
            match run_task(task, config, &options) {
                Ok(report) => {
                    report.log_summary();
                    on_rebuilt(&report);
                }
                Err(e) => error!("Error rebuilding site: {}", e),
            }
        }

        if disconnected {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::mpsc::channel;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> Config {
        Config {
            source: root.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_classify_change() {
        let config = config_for(Path::new("/site"));

        assert_eq!(
            classify_change(Path::new("/site/static/css/site.css"), &config),
            Some(RebuildTask::Static)
        );
        assert_eq!(
            classify_change(Path::new("/site/articles/2020-01-01-a.md"), &config),
            Some(RebuildTask::Pages)
        );
        assert_eq!(
            classify_change(Path::new("/site/templates/page.html"), &config),
            Some(RebuildTask::Pages)
        );
        assert_eq!(classify_change(Path::new("/site/build/index.html"), &config), None);
        assert_eq!(classify_change(Path::new("/site/pages/.about.md.swp"), &config), None);
        assert_eq!(classify_change(Path::new("/site/pages/about.md~"), &config), None);
    }

    #[test]
    fn test_handle_changes_coalesces_and_stops() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/app.js"), "1").unwrap();
        let config = config_for(dir.path());

        let (tx, rx) = channel();
        tx.send(RebuildTask::Static).unwrap();
        tx.send(RebuildTask::Static).unwrap();
        tx.send(RebuildTask::Pages).unwrap();
        drop(tx);

        let mut reports = Vec::new();
        handle_changes(rx, &config, &BuildOptions::default(), Duration::from_millis(10), |r| {
            reports.push(r.static_files_count)
        });

        // One static copy, then one (empty) page build
        assert_eq!(reports, vec![1, 0]);
        assert!(dir.path().join("build/app.js").exists());
    }

    #[test]
    fn test_run_task_static() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/app.js"), "1").unwrap();
        let config = config_for(dir.path());

        let report = run_task(RebuildTask::Static, &config, &BuildOptions::default()).unwrap();

        assert_eq!(report.static_files_count, 1);
        assert!(dir.path().join("build/app.js").exists());
    }
}
