//! Chooses how a material's content is presented.

use reqwest::Url;

use crate::models::{ContentType, Material};
use crate::session::Session;

pub const EMPTY_TEXT_HTML: &str = "<p>No content.</p>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    Video {
        url: String,
        youtube_id: Option<String>,
    },
    Audio {
        url: String,
    },
    Text {
        html: String,
    },
    Document {
        url: String,
    },
    Unsupported {
        content_type: String,
    },
}

impl ContentView {
    pub fn resolve(material: &Material, session: &Session) -> Self {
        match &material.content_type {
            ContentType::Video => ContentView::Video {
                url: material.content.clone(),
                youtube_id: youtube_video_id(&material.content),
            },
            ContentType::Audio => ContentView::Audio {
                url: session.asset_url(&material.content),
            },
            ContentType::Text => ContentView::Text {
                html: if material.content.trim().is_empty() {
                    EMPTY_TEXT_HTML.to_string()
                } else {
                    material.content.clone()
                },
            },
            ContentType::Document => ContentView::Document {
                url: session.asset_url(&material.content),
            },
            ContentType::Image | ContentType::Other(_) => ContentView::Unsupported {
                content_type: material.content_type.to_string(),
            },
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ContentView::Unsupported { .. })
    }
}

/// One handler per [`ContentView`] variant.
pub trait ContentRenderer {
    type Output;

    fn video(&self, url: &str, youtube_id: Option<&str>) -> Self::Output;
    fn audio(&self, url: &str) -> Self::Output;
    fn text(&self, html: &str) -> Self::Output;
    fn document(&self, url: &str) -> Self::Output;
    fn unsupported(&self, content_type: &str) -> Self::Output;
}

pub fn render<R: ContentRenderer>(view: &ContentView, renderer: &R) -> R::Output {
    match view {
        ContentView::Video { url, youtube_id } => renderer.video(url, youtube_id.as_deref()),
        ContentView::Audio { url } => renderer.audio(url),
        ContentView::Text { html } => renderer.text(html),
        ContentView::Document { url } => renderer.document(url),
        ContentView::Unsupported { content_type } => renderer.unsupported(content_type),
    }
}

/// Extracts the 11-character id from `youtube.com/...?v=ID` and
/// `youtu.be/ID` links. Links without a scheme are read as https.
pub fn youtube_video_id(link: &str) -> Option<String> {
    let link = link.trim();
    let url = if link.contains("://") {
        Url::parse(link)
    } else {
        Url::parse(&format!("https://{}", link))
    }
    .ok()?;
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let candidate = match host {
        "youtu.be" => url.path_segments()?.next()?.to_string(),
        "youtube.com" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?,
        _ => return None,
    };

    let id: String = candidate.chars().take(11).collect();
    let valid = id.chars().count() == 11
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(id)
}

/// Plain-text description of a material, for terminals and logs.
pub struct TextRenderer;

impl ContentRenderer for TextRenderer {
    type Output = String;

    fn video(&self, url: &str, youtube_id: Option<&str>) -> String {
        match youtube_id {
            Some(id) => format!("[video] https://www.youtube.com/watch?v={}", id),
            None => format!("[video] {}", url),
        }
    }

    fn audio(&self, url: &str) -> String {
        format!("[audio] {}", url)
    }

    fn text(&self, html: &str) -> String {
        strip_tags(html)
    }

    fn document(&self, url: &str) -> String {
        format!("[document] {}", url)
    }

    fn unsupported(&self, content_type: &str) -> String {
        format!("Type content not supported: {}", content_type)
    }
}

/// Drops markup and decodes the common named entities. Numeric references
/// other than `&#39;` are left as written.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                if !out.ends_with('\n') && !out.is_empty() {
                    out.push('\n');
                }
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    decode_entities(&out)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    // `&amp;` last so `&amp;lt;` stays `&lt;`
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
