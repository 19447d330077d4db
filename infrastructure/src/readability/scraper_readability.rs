//! Reduced Readability algorithm on top of `scraper`.
//!
//! 1. Drop boilerplate subtrees (scripts, navigation, forms, elements whose
//!    class or id looks like a sidebar, share bar or advert).
//! 2. Use `<article>`, `[role=main]` or `<main>` when present.
//! 3. Otherwise score containers by the paragraphs they hold, penalised by
//!    link density, and take the best one.
//! 4. Collect block-level text from the winner and clean whitespace.

use regex::Regex;
use sage_application::ports::readability::{ExtractedArticle, ReadabilityPort};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Tags whose entire subtree is ignored.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "svg", "nav", "header", "footer", "aside", "form", "iframe",
];

/// Tags that start a new paragraph in the output.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul",
    "ol", "blockquote", "pre", "table", "tr", "figure", "figcaption", "br",
];

/// Paragraphs shorter than this do not contribute to container scores.
const MIN_PARAGRAPH_CHARS: usize = 25;

static UNLIKELY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)comment|sidebar|footer|menu|share|social|advert|promo|related|cookie|newsletter|subscribe|banner|popup",
    )
    .expect("static regex")
});

static MAYBE_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article|content|main|body|story|post|entry|text").expect("static regex")
});

static CONTENT_ROOTS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["article", "[role=main]", "main"]
        .iter()
        .map(|s| Selector::parse(s).expect("static selector"))
        .collect()
});

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("static selector"));
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("static selector"));
static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("static selector")
});
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("static selector"));

/// [`ReadabilityPort`] backed by `scraper`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperReadability;

impl ScraperReadability {
    pub fn new() -> Self {
        Self
    }
}

impl ReadabilityPort for ScraperReadability {
    fn extract(&self, html: &str, base_url: &str) -> Option<ExtractedArticle> {
        let document = Html::parse_document(html);

        let root = content_root(&document)
            .or_else(|| best_scored_container(&document))
            .or_else(|| document.select(&BODY).next())?;

        let text = element_text(root);
        if text.is_empty() {
            debug!("No readable content in {}", base_url);
            return None;
        }

        debug!(
            root = root.value().name(),
            chars = text.chars().count(),
            "Readable content found in {}",
            base_url
        );

        Some(ExtractedArticle {
            title: page_title(&document),
            text_content: text,
        })
    }
}

/// Whether this element's subtree is boilerplate.
fn is_skipped(element: ElementRef) -> bool {
    let el = element.value();
    if SKIP_TAGS.contains(&el.name()) {
        return true;
    }
    if matches!(el.name(), "html" | "body" | "article" | "main") {
        return false;
    }

    let class_and_id = format!(
        "{} {}",
        el.attr("class").unwrap_or_default(),
        el.id().unwrap_or_default()
    );
    UNLIKELY.is_match(&class_and_id) && !MAYBE_CANDIDATE.is_match(&class_and_id)
}

fn is_inside_skipped(element: ElementRef) -> bool {
    is_skipped(element)
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(is_skipped)
}

/// The first semantic content element with text, preferring
/// `<article>` over `[role=main]` over `<main>`.
fn content_root(document: &Html) -> Option<ElementRef<'_>> {
    for selector in CONTENT_ROOTS.iter() {
        let best = document
            .select(selector)
            .filter(|el| !is_inside_skipped(*el))
            .map(|el| (el, element_text(el).chars().count()))
            .filter(|(_, chars)| *chars > 0)
            .max_by_key(|(_, chars)| *chars);

        if let Some((el, _)) = best {
            return Some(el);
        }
    }
    None
}

fn paragraph_score(text: &str) -> f64 {
    let chars = text.chars().count();
    let commas = text.matches(',').count();
    1.0 + commas as f64 + (chars as f64 / 100.0).min(3.0)
}

/// Ratio of link text to all text in `element`.
fn link_density(element: ElementRef) -> f64 {
    let total: usize = element.text().map(|t| t.trim().chars().count()).sum();
    if total == 0 {
        return 1.0;
    }
    let linked: usize = element
        .select(&LINK)
        .flat_map(|a| a.text())
        .map(|t| t.trim().chars().count())
        .sum();
    linked as f64 / total as f64
}

/// Score each paragraph's parent fully and its grandparent by half, then
/// scale by `1 - link density`.
fn best_scored_container(document: &Html) -> Option<ElementRef<'_>> {
    let mut scores = HashMap::new();

    for p in document.select(&PARAGRAPH) {
        if is_inside_skipped(p) {
            continue;
        }
        let text = collapse(&p.text().collect::<String>());
        if text.chars().count() < MIN_PARAGRAPH_CHARS {
            continue;
        }
        let score = paragraph_score(&text);

        let Some(parent) = p.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        *scores.entry((*parent).id()).or_insert(0.0) += score;
        if let Some(grandparent) = parent.parent().and_then(ElementRef::wrap) {
            *scores.entry((*grandparent).id()).or_insert(0.0) += score / 2.0;
        }
    }

    scores
        .into_iter()
        .filter_map(|(id, score)| {
            let el = document.tree.get(id).and_then(ElementRef::wrap)?;
            Some((el, score * (1.0 - link_density(el))))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(el, _)| el)
}

fn page_title(document: &Html) -> Option<String> {
    let og = document
        .select(&OG_TITLE)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(collapse);
    let title = || {
        document
            .select(&TITLE)
            .next()
            .map(|t| collapse(&t.text().collect::<String>()))
    };
    let heading = || {
        document
            .select(&H1)
            .next()
            .map(|h| collapse(&h.text().collect::<String>()))
    };

    og.filter(|t| !t.is_empty())
        .or_else(|| title().filter(|t| !t.is_empty()))
        .or_else(|| heading().filter(|t| !t.is_empty()))
}

/// Readable text of `element` with paragraphs separated by blank lines.
fn element_text(element: ElementRef) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    clean_whitespace(&raw)
}

fn collect_text(element: ElementRef, out: &mut String) {
    if is_skipped(element) {
        return;
    }
    let block = BLOCK_TAGS.contains(&element.value().name());
    if block {
        out.push('\n');
    }

    for child in element.children() {
        match child.value() {
            // Source newlines inside text are plain whitespace
            Node::Text(text) => out.extend(text.chars().map(|c| if c == '\n' { ' ' } else { c })),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }

    if block {
        out.push('\n');
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace within lines, drop blank lines, and separate the
/// remaining lines with one blank line.
fn clean_whitespace(text: &str) -> String {
    text.lines()
        .map(collapse)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
