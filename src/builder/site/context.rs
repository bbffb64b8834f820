use std::collections::VecDeque;

use chrono::{DateTime, FixedOffset, Utc};

use crate::builder::page::Page;
use crate::config::Config;

/// Build-wide state shared by every page.
///
/// Articles are added during the content stage; the template stage only
/// reads them. Each insert goes to the front, so the listing runs from the
/// last processed article to the first.
#[derive(Debug, Clone)]
pub struct Site {
    pub title: String,
    pub subtitle: Option<String>,
    pub base_url: String,
    pub timezone: String,
    pub utc_offset: FixedOffset,
    pub build_time: DateTime<Utc>,
    pub production: bool,
    pub date_format: String,
    /// Template forced onto every article
    pub article_template: String,
    articles: VecDeque<Page>,
}

impl Site {
    pub fn new(config: &Config, utc_offset: FixedOffset, build_time: DateTime<Utc>) -> Self {
        Site {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            base_url: config.base_url(),
            timezone: config.timezone.clone(),
            utc_offset,
            build_time,
            production: config.production,
            date_format: config.date_format.clone(),
            article_template: config.article_template.clone(),
            articles: VecDeque::new(),
        }
    }

    /// Register a fully processed article at the head of the listing
    pub fn add_article(&mut self, page: Page) {
        self.articles.push_front(page);
    }

    pub fn articles(&self) -> impl Iterator<Item = &Page> {
        self.articles.iter()
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }
}
