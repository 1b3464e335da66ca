use std::collections::BTreeMap;

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;

use crate::document::{BlockKind, Document};
use crate::error::ReadmeError;

pub const TOC_HEADING: &str = "## Table of contents";

/// One node of the table-of-contents tree.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TocEntry {
    pub depth: u8,
    pub text: String,
    pub label: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    /// Number of entries in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TocEntry::count).sum::<usize>()
    }
}

/// Builds a heading tree from the top-level headings of `doc`. A heading becomes a
/// child of the nearest preceding heading with a smaller depth; headings without
/// such an ancestor are roots.
pub fn build_toc(doc: &Document) -> Result<Vec<TocEntry>, ReadmeError> {
    let mut slugger = Slugger::default();
    let mut roots: Vec<TocEntry> = Vec::new();
    // Open ancestors, innermost last. Finished entries are folded into their parent.
    let mut stack: Vec<TocEntry> = Vec::new();

    for block in &doc.blocks {
        let BlockKind::Heading { depth, text, label } = &block.kind else {
            continue;
        };

        while stack.last().is_some_and(|open| open.depth >= *depth) {
            close_innermost(&mut stack, &mut roots);
        }

        stack.push(TocEntry {
            depth: *depth,
            text: text.clone(),
            label: label.clone(),
            slug: slugger.slug(text),
            children: Vec::new(),
        });
    }

    while !stack.is_empty() {
        close_innermost(&mut stack, &mut roots);
    }

    if roots.is_empty() {
        return Err(ReadmeError::TocConstruction(
            "document contains no headings".into(),
        ));
    }

    tracing::debug!(
        entries = roots.iter().map(TocEntry::count).sum::<usize>(),
        "built table of contents"
    );
    Ok(roots)
}

fn close_innermost(stack: &mut Vec<TocEntry>, roots: &mut Vec<TocEntry>) {
    let Some(entry) = stack.pop() else {
        return;
    };
    match stack.last_mut() {
        Some(parent) => parent.children.push(entry),
        None => roots.push(entry),
    }
}

/// Renders the TOC heading followed by a tight nested bullet list.
pub fn render_toc(entries: &[TocEntry]) -> Result<Document, ReadmeError> {
    let mut out = String::from(TOC_HEADING);
    out.push_str("\n\n");
    for entry in entries {
        render_entry(entry, 0, &mut out);
    }
    Document::parse(&out)
}

fn render_entry(entry: &TocEntry, level: usize, out: &mut String) {
    out.push_str(&"  ".repeat(level));
    out.push_str(&format!("- [{}](#{})\n", entry.label, entry.slug));
    for child in &entry.children {
        render_entry(child, level + 1, out);
    }
}

/// Assigns GitHub-compatible anchor slugs. A repeated slug gets the next free
/// `-1`, `-2`, ... suffix.
#[derive(Default)]
struct Slugger {
    occurrences: BTreeMap<String, usize>,
}

impl Slugger {
    fn slug(&mut self, text: &str) -> String {
        let base = slugify_heading(text);
        let mut slug = base.clone();
        while self.occurrences.contains_key(&slug) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{base}-{count}");
        }
        self.occurrences.insert(slug.clone(), 0);
        slug
    }
}

/// GitHub's heading anchor: lowercase, drop everything but letters, numbers,
/// combining marks, `-`, `_` and spaces, then turn each space into `-`. Runs are
/// not collapsed and ends are not trimmed.
fn slugify_heading(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|ch| match ch {
            ' ' => Some('-'),
            '-' | '_' => Some(ch),
            _ if ch.is_alphanumeric() || is_combining_mark(ch) => Some(ch),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(md: &str) -> Document {
        Document::parse(md).unwrap()
    }

    #[test]
    fn slugify_removes_punctuation_and_hyphenates_spaces() {
        assert_eq!(slugify_heading("Hello, world!"), "hello-world");
        assert_eq!(slugify_heading("snake_case API"), "snake_case-api");
        assert_eq!(slugify_heading("Café"), "café");
        assert_eq!(slugify_heading("v1.2 (beta)"), "v12-beta");
    }

    #[test]
    fn slugs_keep_every_hyphen_like_github_anchors() {
        assert_eq!(slugify_heading("Foo & Bar"), "foo--bar");
        assert_eq!(slugify_heading("API - v2"), "api---v2");
        assert_eq!(slugify_heading("Node.js / Browser"), "nodejs--browser");
        assert_eq!(slugify_heading(" -- edge -- "), "----edge----");
    }

    #[test]
    fn combining_marks_survive_slugging() {
        assert_eq!(slugify_heading("Cafe\u{301} menu"), "cafe\u{301}-menu");
    }

    #[test]
    fn toc_links_use_github_anchors() {
        let toc = build_toc(&doc("## Foo & Bar\n\n## API - v2\n")).unwrap();
        let rendered = render_toc(&toc).unwrap();
        assert_eq!(
            rendered.blocks[1].markdown,
            "- [Foo & Bar](#foo--bar)\n- [API - v2](#api---v2)"
        );
    }

    #[test]
    fn duplicate_headings_get_numbered_slugs() {
        let toc = build_toc(&doc("## Usage\n\n## Usage\n\n## Usage\n")).unwrap();
        let slugs: Vec<_> = toc.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, ["usage", "usage-1", "usage-2"]);
    }

    #[test]
    fn numbered_slug_skips_names_already_taken() {
        let toc = build_toc(&doc("## Usage 1\n\n## Usage\n\n## Usage\n")).unwrap();
        let slugs: Vec<_> = toc.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, ["usage-1", "usage", "usage-2"]);
    }

    #[test]
    fn nesting_follows_heading_depth() {
        let toc = build_toc(&doc(
            "## Install\n\n## API\n\n### create\n\n### destroy\n\n## License\n",
        ))
        .unwrap();

        assert_eq!(toc.len(), 3);
        assert_eq!(toc[1].text, "API");
        let children: Vec<_> = toc[1].children.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(children, ["create", "destroy"]);
        assert!(toc[2].children.is_empty());
    }

    #[test]
    fn skipped_levels_attach_to_nearest_shallower_heading() {
        let toc = build_toc(&doc("## Usage\n\n#### Deep\n\n### Mid\n")).unwrap();

        assert_eq!(toc.len(), 1);
        let usage = &toc[0];
        assert_eq!(usage.children.len(), 2);
        assert_eq!(usage.children[0].depth, 4);
        assert_eq!(usage.children[1].depth, 3);
    }

    #[test]
    fn shallower_heading_after_deep_one_is_a_root() {
        let toc = build_toc(&doc("### Intro\n\n## Usage\n\n### Detail\n")).unwrap();
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].text, "Intro");
        assert_eq!(toc[1].children[0].text, "Detail");
    }

    #[test]
    fn document_without_headings_fails() {
        let err = build_toc(&doc("Just prose.\n\n- and a list\n")).unwrap_err();
        assert!(matches!(err, ReadmeError::TocConstruction(_)));
    }

    #[test]
    fn render_produces_tight_nested_list() {
        let toc = build_toc(&doc(
            "## Install\n\n## API\n\n### `create()`\n\n## License\n",
        ))
        .unwrap();
        let rendered = render_toc(&toc).unwrap();

        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered.blocks[0].markdown, TOC_HEADING);
        assert_eq!(
            rendered.blocks[1].markdown,
            "- [Install](#install)\n- [API](#api)\n  - [`create()`](#create)\n- [License](#license)"
        );
    }
}
