use markdown::ParseOptions;
use markdown::mdast::Node;

use crate::error::ReadmeError;

/// Discriminant of a top-level markdown block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    /// `text` is the plain heading text; `label` keeps inline markup (minus links)
    /// for use as link text.
    Heading {
        depth: u8,
        text: String,
        label: String,
    },
    Paragraph,
    Blockquote,
    List,
    Code,
    ThematicBreak,
    Html,
    Other,
}

/// One top-level block together with the markdown it was parsed from. Fenced code
/// and HTML blocks left open at the end of the source get their terminator
/// appended, so blocks placed after them stay separate when the output is re-read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub markdown: String,
}

impl Block {
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, BlockKind::Heading { .. })
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, BlockKind::Paragraph)
    }

    pub fn is_blockquote(&self) -> bool {
        matches!(self.kind, BlockKind::Blockquote)
    }

    /// Serialized form of the block, lowercased for keyword matching.
    pub fn rendered_lowercase(&self) -> String {
        self.markdown.to_lowercase()
    }
}

/// Ordered sequence of top-level blocks in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parses markdown into top-level blocks. Each block keeps the source slice it
    /// covers, so serializing an unmodified, terminated block reproduces it verbatim.
    pub fn parse(source: &str) -> Result<Self, ReadmeError> {
        let root = markdown::to_mdast(source, &ParseOptions::gfm())
            .map_err(|err| ReadmeError::Markdown(err.to_string()))?;

        let Some(children) = root.children() else {
            return Ok(Self::default());
        };

        let mut blocks = Vec::with_capacity(children.len());
        for node in children {
            let Some(mut markdown) = block_source(node, source) else {
                continue;
            };
            if let Some(terminator) = missing_terminator(node, &markdown) {
                tracing::debug!(%terminator, "closing block left open at end of input");
                markdown.push('\n');
                markdown.push_str(&terminator);
            }
            blocks.push(Block {
                kind: block_kind(node, source),
                markdown,
            });
        }
        Ok(Self { blocks })
    }

    /// Blocks separated by one blank line, terminated by a single newline.
    pub fn to_markdown(&self) -> String {
        if self.blocks.is_empty() {
            return String::new();
        }
        let mut out = self
            .blocks
            .iter()
            .map(|block| block.markdown.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn headings(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|block| block.is_heading())
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

fn block_kind(node: &Node, source: &str) -> BlockKind {
    match node {
        Node::Heading(heading) => {
            let mut text = String::new();
            for child in &heading.children {
                plain_text(child, &mut text);
            }
            let mut label = String::new();
            for child in &heading.children {
                inline_label(child, source, &mut label);
            }
            BlockKind::Heading {
                depth: heading.depth,
                text: text.trim().replace('\n', " "),
                label: single_line(&label),
            }
        }
        Node::Paragraph(_) => BlockKind::Paragraph,
        Node::Blockquote(_) => BlockKind::Blockquote,
        Node::List(_) => BlockKind::List,
        Node::Code(_) => BlockKind::Code,
        Node::ThematicBreak(_) => BlockKind::ThematicBreak,
        Node::Html(_) => BlockKind::Html,
        _ => BlockKind::Other,
    }
}

/// Source text of a top-level node. The start is widened to the beginning of its
/// line when only indentation precedes it, so indented code keeps its indent.
fn block_source(node: &Node, source: &str) -> Option<String> {
    let position = node.position()?;
    let mut start = position.start.offset;
    let end = position.end.offset.min(source.len());
    if start > end {
        return None;
    }

    let line_start = source[..start].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    if source[line_start..start]
        .chars()
        .all(|ch| ch == ' ' || ch == '\t')
    {
        start = line_start;
    }

    let text = source[start..end].trim_end();
    if text.trim().is_empty() {
        return None;
    }
    Some(text.to_string())
}

/// Closing line that `block` lacks, for constructs that otherwise run to the end of
/// the document.
fn missing_terminator(node: &Node, block: &str) -> Option<String> {
    match node {
        Node::Code(_) => missing_fence(block),
        Node::Html(_) => missing_html_end(block),
        _ => None,
    }
}

fn missing_fence(block: &str) -> Option<String> {
    let mut lines = block.lines();
    let opening = lines.next()?;
    let trimmed = opening.trim_start_matches(' ');
    if opening.len() - trimmed.len() > 3 {
        return None;
    }
    let marker = trimmed.chars().next().filter(|ch| *ch == '`' || *ch == '~')?;
    let width = trimmed.chars().take_while(|ch| *ch == marker).count();
    if width < 3 {
        return None;
    }

    let closed = lines.last().is_some_and(|last| {
        let last = last.trim();
        last.len() >= width && last.chars().all(|ch| ch == marker)
    });
    if closed {
        None
    } else {
        Some(marker.to_string().repeat(width))
    }
}

const RAW_HTML_TAGS: [&str; 4] = ["pre", "script", "style", "textarea"];

fn missing_html_end(block: &str) -> Option<String> {
    let opening = block.trim_start().to_ascii_lowercase();
    let end = if opening.starts_with("<!--") {
        "-->".to_string()
    } else if opening.starts_with("<?") {
        "?>".to_string()
    } else if opening.starts_with("<![cdata[") {
        "]]>".to_string()
    } else if opening
        .strip_prefix("<!")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|ch| ch.is_ascii_alphabetic())
    {
        ">".to_string()
    } else {
        let tag = RAW_HTML_TAGS.iter().find(|tag| {
            opening
                .strip_prefix('<')
                .and_then(|rest| rest.strip_prefix(**tag))
                .is_some_and(|rest| {
                    rest.is_empty() || rest.starts_with(|ch: char| ch == '>' || ch.is_whitespace())
                })
        })?;
        format!("</{tag}>")
    };

    if opening.contains(end.as_str()) {
        None
    } else {
        Some(end)
    }
}

fn plain_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(&t.value),
        Node::InlineCode(c) => out.push_str(&c.value),
        Node::Break(_) => out.push(' '),
        _ => {
            if let Some(children) = node.children() {
                for child in children {
                    plain_text(child, out);
                }
            }
        }
    }
}

fn inline_label(node: &Node, source: &str, out: &mut String) {
    match node {
        Node::Link(link) => {
            for child in &link.children {
                inline_label(child, source, out);
            }
        }
        Node::LinkReference(reference) => {
            for child in &reference.children {
                inline_label(child, source, out);
            }
        }
        Node::FootnoteReference(_) => {}
        Node::Break(_) => out.push(' '),
        _ => match node.position() {
            Some(position) if position.end.offset <= source.len() => {
                out.push_str(&source[position.start.offset..position.end.offset]);
            }
            _ => plain_text(node, out),
        },
    }
}

fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
