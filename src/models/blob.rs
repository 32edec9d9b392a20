// src/models/blob.rs

//! Raw weekly menu as delivered by the menu provider.

use serde::Deserialize;

/// The provider's weekly menu object before parsing.
///
/// Deserializes from the provider shape:
///
/// ```json
/// {
///   "uri": "/kista-nod",
///   "content": {
///     "title": "Meny vecka 7",
///     "content": "<p>Måndag</p>...",
///     "footer": [{ "text": "..." }]
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ProviderMenu")]
pub struct RawWeeklyBlob {
    pub title: Option<String>,
    pub content_html: Option<String>,
    pub footer: Option<RawFooter>,
    pub source_uri: Option<String>,
}

impl RawWeeklyBlob {
    /// Blob with the required fields set.
    pub fn new(title: impl Into<String>, content_html: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content_html: Some(content_html.into()),
            footer: None,
            source_uri: None,
        }
    }

    pub fn with_footer_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|text| FooterItem { text: text.into() })
            .collect();
        self.footer = Some(RawFooter::Items(items));
        self
    }

    pub fn with_source_uri(mut self, uri: impl Into<String>) -> Self {
        self.source_uri = Some(uri.into());
        self
    }
}

/// Footer as sent by the provider: usually a list of text items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawFooter {
    Items(Vec<FooterItem>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FooterItem {
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
struct ProviderMenu {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    content: Option<ProviderContent>,
}

#[derive(Deserialize)]
struct ProviderContent {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    footer: Option<RawFooter>,
}

impl From<ProviderMenu> for RawWeeklyBlob {
    fn from(menu: ProviderMenu) -> Self {
        let content = menu.content;
        let (title, content_html, footer) = match content {
            Some(c) => (c.title, c.content, c.footer),
            None => (None, None, None),
        };
        Self {
            title,
            content_html,
            footer,
            source_uri: menu.uri,
        }
    }
}
