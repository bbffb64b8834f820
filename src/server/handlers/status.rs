use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Local};

use crate::builder::BuildReport;

/// Outcome of the most recent build, shown on the status page
#[derive(Debug, Clone, Default)]
pub struct BuildStatus {
    pub finished_at: Option<DateTime<Local>>,
    pub pages_count: usize,
    pub articles_count: usize,
    pub passthrough_count: usize,
    pub static_files_count: usize,
    pub duration_ms: u128,
    pub errors: Vec<String>,
    pub builds: usize,
}

impl BuildStatus {
    pub fn record(&mut self, report: &BuildReport) {
        self.finished_at = Some(Local::now());
        self.pages_count = report.pages_count;
        self.articles_count = report.articles_count;
        self.passthrough_count = report.passthrough_count;
        self.static_files_count = report.static_files_count;
        self.duration_ms = report.duration.as_millis();
        self.errors = report.errors.iter().map(|e| e.to_string()).collect();
        self.builds += 1;
    }
}

pub type SharedStatus = Arc<Mutex<BuildStatus>>;

/// Render the status page
pub fn render_status(status: &BuildStatus, site_url: &str) -> String {
    let finished = status
        .finished_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let errors = if status.errors.is_empty() {
        "<p>No errors.</p>".to_string()
    } else {
        let items: Vec<String> = status
            .errors
            .iter()
            .map(|e| format!("<li>{}</li>", html_escape::encode_text(e)))
            .collect();
        format!("<ul class=\"errors\">{}</ul>", items.join(""))
    };

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Build status</title></head><body>\
<h1>Build status</h1>\
<p>Site: <a href=\"{url}\">{url}</a></p>\
<table>\
<tr><th>Builds</th><td>{builds}</td></tr>\
<tr><th>Last build</th><td>{finished}</td></tr>\
<tr><th>Duration</th><td>{duration} ms</td></tr>\
<tr><th>Pages</th><td>{pages}</td></tr>\
<tr><th>Articles</th><td>{articles}</td></tr>\
<tr><th>Copied</th><td>{copied}</td></tr>\
<tr><th>Static files</th><td>{statics}</td></tr>\
</table>\
<h2>Errors ({error_count})</h2>{errors}</body></html>\n",
        url = html_escape::encode_double_quoted_attribute(site_url),
        builds = status.builds,
        finished = finished,
        duration = status.duration_ms,
        pages = status.pages_count,
        articles = status.articles_count,
        copied = status.passthrough_count,
        statics = status.static_files_count,
        error_count = status.errors.len(),
        errors = errors,
    )
}

#[derive(Clone)]
struct StatusState {
    status: SharedStatus,
    site_url: String,
}

async fn status_page(State(state): State<StatusState>) -> Html<String> {
    let snapshot = match state.status.lock() {
        Ok(status) => status.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    Html(render_status(&snapshot, &state.site_url))
}

/// Create the router for the status UI
pub fn create_status_handler(status: SharedStatus, site_url: String) -> Router {
    Router::new()
        .route("/", get(status_page))
        .with_state(StatusState { status, site_url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{PageError, SiteError};
    use std::time::Duration;

    #[test]
    fn test_record_and_render() {
        let report = BuildReport {
            pages_count: 3,
            articles_count: 2,
            errors: vec![PageError::new(
                "pages/bad.md",
                SiteError::Template("unknown <tag>".to_string()),
            )],
            duration: Duration::from_millis(42),
            ..BuildReport::default()
        };

        let mut status = BuildStatus::default();
        status.record(&report);
        assert_eq!(status.builds, 1);
        assert_eq!(status.errors.len(), 1);

        let html = render_status(&status, "http://localhost:4000/");
        assert!(html.contains("<tr><th>Pages</th><td>3</td></tr>"));
        assert!(html.contains("42 ms"));
        assert!(html.contains("unknown &lt;tag&gt;"));
        assert!(html.contains("Errors (1)"));
    }

    #[test]
    fn test_render_before_first_build() {
        let html = render_status(&BuildStatus::default(), "http://localhost:4000/");
        assert!(html.contains("never"));
        assert!(html.contains("No errors."));
    }
}
