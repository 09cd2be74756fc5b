use readability::extractor;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Containers tried in order when readability cannot make sense of the
/// page. The first one present wins even when it is empty: pages that
/// render their content with scripts legitimately extract to nothing.
const CONTENT_SELECTORS: [&str; 7] = [
    "article",
    "[role='main']",
    "main",
    ".article-body",
    ".story-body",
    ".post-content",
    "#content",
];

/// Subtrees that never carry article text.
const BOILERPLATE_TAGS: [&str; 6] = ["script", "style", "nav", "footer", "header", "aside"];

pub struct ReadOutcome {
    pub text: String,
    pub title: Option<String>,
}

pub fn read(html: &str, url: &Url) -> ReadOutcome {
    // Try readability first; its output already excludes navigation chrome.
    // The title is folded into the text so downstream analysis sees it.
    if let Ok(article) = extractor::extract(&mut html.as_bytes(), url)
        && !article.text.trim().is_empty()
    {
        let title = non_blank(article.title);
        let text = match &title {
            Some(title) => format!("{title}\n\n{}", article.text),
            None => article.text,
        };
        return ReadOutcome { text, title };
    }

    // Fallback to basic scraping if readability fails
    let document = Html::parse_document(html);
    ReadOutcome {
        text: container_text(&document),
        title: page_title(&document),
    }
}

pub(crate) fn container_text(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str)
            && let Some(element) = document.select(&selector).next()
        {
            return visible_text(element);
        }
    }

    // Last resort: the whole body, minus boilerplate subtrees
    if let Ok(selector) = Selector::parse("body")
        && let Some(body) = document.select(&selector).next()
    {
        return visible_text(body);
    }

    String::new()
}

fn visible_text(root: ElementRef) -> String {
    let mut out = String::new();
    collect_text(root, &mut out);
    out
}

fn collect_text(element: ElementRef, out: &mut String) {
    if BOILERPLATE_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

fn page_title(document: &Html) -> Option<String> {
    // Try og:title first
    if let Ok(selector) = Selector::parse("meta[property='og:title']") {
        for element in document.select(&selector) {
            if let Some(content) = element.value().attr("content")
                && !content.trim().is_empty()
            {
                return Some(content.trim().to_string());
            }
        }
    }

    // Then the document title, then the first h1
    for tag in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(tag) {
            for element in document.select(&selector) {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }

    None
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
