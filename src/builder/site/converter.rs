use liquid::model::Value;
use liquid::Object;
use serde_yaml::Value as YamlValue;

use crate::builder::page::Page;
use crate::builder::site::context::Site;

/// Convert YAML value to Liquid value
pub fn yaml_to_liquid(yaml: &YamlValue) -> Value {
    match yaml {
        YamlValue::Null => Value::Nil,
        YamlValue::Bool(b) => Value::scalar(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::scalar(i)
            } else if let Some(f) = n.as_f64() {
                Value::scalar(f)
            } else {
                Value::scalar(n.to_string())
            }
        }
        YamlValue::String(s) => Value::scalar(s.clone()),
        YamlValue::Sequence(seq) => Value::Array(seq.iter().map(yaml_to_liquid).collect()),
        YamlValue::Mapping(map) => {
            let mut obj = Object::new();
            for (k, v) in map {
                let key = match k {
                    YamlValue::String(key) => key.clone(),
                    other => serde_yaml::to_string(other)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_default(),
                };
                obj.insert(key.into(), yaml_to_liquid(v));
            }
            Value::Object(obj)
        }
        YamlValue::Tagged(tagged) => yaml_to_liquid(&tagged.value),
    }
}

fn insert_opt(obj: &mut Object, key: &'static str, value: Option<&String>) {
    if let Some(value) = value {
        obj.insert(key.into(), Value::scalar(value.clone()));
    }
}

/// Convert a page to the `page` object seen by templates.
///
/// Free-form front matter keys come first so the computed fields win.
pub fn page_to_liquid(page: &Page) -> Object {
    let mut obj = Object::new();

    for (key, value) in &page.front_matter.extra {
        obj.insert(key.clone().into(), yaml_to_liquid(value));
    }

    let fm = &page.front_matter;
    insert_opt(&mut obj, "title", fm.title.as_ref());
    insert_opt(&mut obj, "subtitle", fm.subtitle.as_ref());
    insert_opt(&mut obj, "description", fm.description.as_ref());

    obj.insert("permalink".into(), Value::scalar(page.permalink.clone()));
    obj.insert("url".into(), Value::scalar(page.permalink.clone()));
    obj.insert("path".into(), Value::scalar(crate::utils::fs::to_slash(&page.relative_path)));
    insert_opt(&mut obj, "template", page.template.as_ref());
    insert_opt(&mut obj, "date", page.date.as_ref());
    insert_opt(&mut obj, "link", page.link.as_ref());
    insert_opt(&mut obj, "contents", page.contents.as_ref());
    insert_opt(&mut obj, "excerpt", page.excerpt.as_ref());
    insert_opt(&mut obj, "content", page.content.as_ref());

    obj
}

/// Convert the site to the `site` object seen by templates
pub fn site_to_liquid(site: &Site) -> Object {
    let mut obj = Object::new();

    obj.insert("title".into(), Value::scalar(site.title.clone()));
    insert_opt(&mut obj, "subtitle", site.subtitle.as_ref());
    obj.insert("base_url".into(), Value::scalar(site.base_url.clone()));
    obj.insert("timezone".into(), Value::scalar(site.timezone.clone()));
    obj.insert("utc_offset".into(), Value::scalar(site.utc_offset.to_string()));
    obj.insert(
        "build_time".into(),
        Value::scalar(site.build_time.with_timezone(&site.utc_offset).to_rfc3339()),
    );
    obj.insert("production".into(), Value::scalar(site.production));
    obj.insert("date_format".into(), Value::scalar(site.date_format.clone()));

    let articles = site
        .articles()
        .map(|article| Value::Object(page_to_liquid(article)))
        .collect();
    obj.insert("articles".into(), Value::Array(articles));

    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use chrono::{FixedOffset, TimeZone, Utc};
    use liquid::ValueView;

    use crate::builder::page::model::Section;
    use crate::config::Config;
    use crate::front_matter::FrontMatter;

    fn article(title: &str) -> Page {
        Page {
            path: PathBuf::from(format!("articles/{}.md", title)),
            relative_path: PathBuf::from(format!("articles/{}.md", title)),
            section: Section::Article,
            front_matter: FrontMatter {
                title: Some(title.to_string()),
                ..FrontMatter::default()
            },
            permalink: format!("/articles/{}/", title),
            template: Some("article.html".to_string()),
            date: None,
            link: None,
            contents: None,
            excerpt: None,
            body: String::new(),
            content: None,
        }
    }

    fn text(value: Option<&Value>) -> String {
        value.map(|v| v.to_kstr().to_string()).unwrap_or_default()
    }

    #[test]
    fn test_yaml_to_liquid() {
        let yaml: YamlValue = serde_yaml::from_str("a: [1, two, true]\nb: {c: 1.5}").unwrap();
        let obj = match yaml_to_liquid(&yaml) {
            Value::Object(obj) => obj,
            other => panic!("expected object, got {:?}", other),
        };

        match obj.get("a") {
            Some(Value::Array(items)) => assert_eq!(items.len(), 3),
            other => panic!("expected array, got {:?}", other),
        }
        assert!(matches!(obj.get("b"), Some(Value::Object(_))));
    }

    #[test]
    fn test_extra_fields_do_not_shadow_computed() {
        let mut page = article("a");
        page.front_matter
            .extra
            .insert("permalink_note".to_string(), YamlValue::String("x".into()));
        page.front_matter
            .extra
            .insert("excerpt".to_string(), YamlValue::String("from yaml".into()));
        page.excerpt = Some("computed".to_string());

        let obj = page_to_liquid(&page);
        assert_eq!(text(obj.get("excerpt")), "computed");
        assert_eq!(text(obj.get("permalink_note")), "x");
        assert_eq!(text(obj.get("permalink")), "/articles/a/");
    }

    #[test]
    fn test_site_articles_newest_first() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let build_time = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let mut site = Site::new(&Config::default(), offset, build_time);
        site.add_article(article("a"));
        site.add_article(article("b"));

        let obj = site_to_liquid(&site);
        let titles: Vec<String> = match obj.get("articles") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Object(article) => text(article.get("title")),
                    other => panic!("expected object, got {:?}", other),
                })
                .collect(),
            other => panic!("expected array, got {:?}", other),
        };

        assert_eq!(titles, vec!["b", "a"]);
        assert_eq!(text(obj.get("build_time")), "2024-05-06T00:08:09-07:00");
    }
}
