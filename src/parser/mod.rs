// src/parser/mod.rs

//! Weekly menu parser.
//!
//! Turns the provider's title and HTML blob into a [`ParsedMenu`]:
//!
//! 1. The week number is read from the title.
//! 2. The HTML is flattened into lines.
//! 3. Each line either opens a day, sets special feature flags and is
//!    filed as a dish or as footer boilerplate, or is skipped as preamble.

mod builder;
mod classify;
mod html;

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ParsedMenu, ParserConfig, RawFooter, RawWeeklyBlob};

pub use builder::{DayCursor, MenuBuilder};
pub use classify::{LineClassifier, LineKind, detect_day, special_features};
pub use html::{html_to_text, normalize_whitespace, split_lines};

/// A title with exactly one group of one or two digits.
static WEEK_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\D*([0-9]{1,2})\D*$").expect("static pattern"));

/// Extract the week number from a menu title such as "Meny vecka 7".
pub fn extract_week(title: &str) -> Option<u32> {
    WEEK_TITLE
        .captures(title.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parser for weekly menus.
#[derive(Debug, Clone)]
pub struct MenuParser {
    classifier: LineClassifier,
    /// Always ends with `/`
    base_url: String,
}

impl MenuParser {
    /// Create a parser from configuration, compiling its patterns.
    pub fn new(config: &ParserConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self {
            classifier: LineClassifier::new(&config.footer_patterns)?,
            base_url,
        })
    }

    /// Parse one weekly menu.
    ///
    /// Fails only when the title or the HTML content is missing.
    pub fn parse(&self, blob: &RawWeeklyBlob) -> Result<ParsedMenu> {
        let title = blob
            .title
            .as_deref()
            .ok_or_else(|| AppError::malformed("content.title"))?;
        let content = blob
            .content_html
            .as_deref()
            .ok_or_else(|| AppError::malformed("content.content"))?;

        let title = normalize_whitespace(title);
        let week_number = extract_week(&title);
        match week_number {
            Some(week) => log::info!("Week for menu grabbed. (Week {week})"),
            None => log::warn!("Week number not found for title {title:?}"),
        }

        let url = blob
            .source_uri
            .as_deref()
            .map(|uri| self.menu_url(uri));

        let mut builder = MenuBuilder::new(initial_footer(blob.footer.as_ref()));
        let text = html_to_text(content);
        for line in split_lines(&text) {
            self.feed(&mut builder, line);
        }

        let menu = builder.finish(title, week_number, url);
        log::debug!("Parsed menu: {menu:?}");
        Ok(menu)
    }

    /// Public page for a provider URI like `/kista-nod/`.
    fn menu_url(&self, uri: &str) -> String {
        format!("{}{}", self.base_url, uri.trim_matches('/'))
    }

    fn feed(&self, builder: &mut MenuBuilder, line: &str) {
        if let Some(day) = detect_day(line) {
            log::info!("Found data for day {} (matched by {:?})", day.swedish(), line);
            builder.start_day(day);
            return;
        }

        let kind = self.classifier.classify(line);
        let Some(mut day) = builder.current_day() else {
            log::debug!("Skipping preamble line {line:?}");
            return;
        };
        for feature in special_features(line) {
            day.set_flag(feature);
        }
        match kind {
            LineKind::Dish(dish) => {
                log::debug!("{} dish: {dish:?}", day.day());
                day.append_dish(dish);
            }
            LineKind::Footer(text) => builder.append_footer(&text),
            LineKind::Blank => {}
        }
    }
}

/// Footer text supplied by the provider, if any.
fn initial_footer(footer: Option<&RawFooter>) -> Option<String> {
    match footer {
        Some(RawFooter::Items(items)) if !items.is_empty() => Some(
            items
                .iter()
                .map(|item| normalize_whitespace(&item.text))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Some(RawFooter::Text(text)) if !text.trim().is_empty() => Some(text.clone()),
        _ => None,
    }
}
