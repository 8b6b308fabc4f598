//! Content renderer
//!
//! Turns an item's raw markdown body into sanitized HTML: a short summary
//! led by engagement counters, and the full body with a table of contents.

use std::collections::HashSet;

use ammonia::Builder;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use pulldown_cmark_escape::{escape_href, escape_html};

use crate::domain::entities::{FeedItem, LOCK_SENTINEL};

/// Lines of body text kept in a summary
const HEAD_LINES: usize = 5;

/// Lines containing this are images and never make it into a summary
const IMAGE_MARKER: &str = "![";

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Markdown-to-HTML renderer for feed items.
///
/// Holds no state beyond the markdown options, so one value is built at
/// startup and shared by every request.
#[derive(Debug, Clone, Copy)]
pub struct ContentRenderer {
    options: Options,
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_TASKLISTS,
        )
    }
}

impl ContentRenderer {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Counters line plus the first few text lines of the body
    pub fn summary(&self, item: &FeedItem) -> String {
        let head = head_extract(&item.content_text);
        let separator = if head == LOCK_SENTINEL { " " } else { "\n\n" };

        let markdown = format!(
            "💚{} 💬{}{}{}",
            item.club.upvotes, item.club.comment_count, separator, head
        );

        let mut rendered = String::new();
        html::push_html(&mut rendered, Parser::new_ext(&markdown, self.options));

        sanitize(&rendered).trim().to_string()
    }

    /// The whole body, preceded by a table of contents when it has headings
    pub fn content(&self, item: &FeedItem) -> String {
        self.render_document(&item.content_text)
    }

    pub fn render_document(&self, markdown: &str) -> String {
        let mut events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();
        let toc = assign_heading_ids(&mut events);

        let mut rendered = String::new();
        if !toc.is_empty() {
            rendered.push_str(&render_toc(&toc));
        }
        html::push_html(&mut rendered, events.into_iter());

        sanitize(&rendered).trim().to_string()
    }
}

/// Up to five leading lines of `content`, skipping image lines.
///
/// Each line loses trailing whitespace; the result is trimmed.
pub fn head_extract(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.contains(IMAGE_MARKER))
        .take(HEAD_LINES)
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Clean HTML against the user-generated-content policy.
///
/// Scripts, styles and event handlers are dropped, every link gets
/// `rel="nofollow noopener noreferrer"`, and heading ids survive so
/// table-of-contents anchors keep working.
pub fn sanitize(html: &str) -> String {
    let mut builder = Builder::default();
    builder
        .link_rel(Some("nofollow noopener noreferrer"))
        .add_tags(&["nav"]);

    for tag in HEADING_TAGS {
        builder.add_tag_attributes(tag, &["id"]);
    }

    builder.clean(html).to_string()
}

#[derive(Debug, Clone, PartialEq)]
struct TocEntry {
    level: usize,
    id: String,
    title: String,
}

/// Give every heading a unique id and collect them in document order
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<TocEntry> {
    let mut toc = Vec::new();
    let mut used = HashSet::new();

    for start in 0..events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[start] else {
            continue;
        };
        let level = *level as usize;
        let explicit = id.as_ref().map(|id| id.to_string());

        let title: String = events[start + 1..]
            .iter()
            .take_while(|event| !matches!(event, Event::End(TagEnd::Heading(_))))
            .filter_map(|event| match event {
                Event::Text(text) | Event::Code(text) => Some(&**text),
                _ => None,
            })
            .collect();

        let id = unique_id(explicit.unwrap_or_else(|| slugify(&title)), &mut used);

        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[start] {
            *slot = Some(CowStr::from(id.clone()));
        }

        toc.push(TocEntry { level, id, title });
    }

    toc
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

fn unique_id(base: String, used: &mut HashSet<String>) -> String {
    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Nested lists of links; a deeper level opens its list inside the
/// parent's still-open `<li>`.
fn render_toc(entries: &[TocEntry]) -> String {
    let base = entries.iter().map(|e| e.level).min().unwrap_or(1);
    let mut out = String::from("<nav>\n");
    let mut depth = 0;

    for entry in entries {
        let target = entry.level - base + 1;

        if target > depth {
            if depth > 0 {
                out.push('\n');
            }
            loop {
                out.push_str("<ul>\n");
                depth += 1;
                if depth == target {
                    break;
                }
                out.push_str("<li>\n");
            }
        } else {
            out.push_str("</li>\n");
            while depth > target {
                out.push_str("</ul>\n</li>\n");
                depth -= 1;
            }
        }

        // Writes into a String never fail
        out.push_str("<li><a href=\"#");
        let _ = escape_href(&mut out, &entry.id);
        out.push_str("\">");
        let _ = escape_html(&mut out, &entry.title);
        out.push_str("</a>");
    }

    if depth > 0 {
        out.push_str("</li>\n");
        while depth > 1 {
            out.push_str("</ul>\n</li>\n");
            depth -= 1;
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</nav>\n");

    out
}
