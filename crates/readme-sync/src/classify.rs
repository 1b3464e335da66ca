//! Positional and keyword heuristics that separate tool-owned README sections
//! from author-written content.
//!
//! The rules mirror the layout produced by [`crate::assemble::assemble`]: a title
//! heading, a badge paragraph, an optional overview quote, a two-block table of
//! contents, a two-block install section, author content, and a license section
//! running to the end of the file. Stripping exactly those shapes is what makes a
//! second run over generated output a no-op.
//!
//! Any heading containing "install" is taken to be the install section, including
//! author headings such as "Installation Guide".

use crate::document::{Block, Document};

/// Zone a block was assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionTag {
    Title,
    Badges,
    Overview,
    TocHeading,
    TocBody,
    Install,
    InstallBody,
    License,
    Body,
}

impl SectionTag {
    pub fn is_body(self) -> bool {
        matches!(self, SectionTag::Body)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClassifierState {
    Seeking,
    /// The previous block was the TOC heading.
    AfterToc,
    /// The previous block was the install heading.
    AfterInstall,
    /// A license heading was seen; everything up to end of file belongs to it.
    InLicense,
}

struct Classifier {
    state: ClassifierState,
    /// Set once a TOC or install heading has been seen; overview quotes only
    /// appear before either.
    marker_seen: bool,
}

impl Classifier {
    fn new() -> Self {
        Self {
            state: ClassifierState::Seeking,
            marker_seen: false,
        }
    }

    fn tag(&self, index: usize, block: &Block) -> SectionTag {
        if self.state == ClassifierState::InLicense {
            return SectionTag::License;
        }

        let rendered = block.rendered_lowercase();
        if index == 0 && block.is_heading() {
            SectionTag::Title
        } else if index == 1 && block.is_paragraph() {
            SectionTag::Badges
        } else if block.is_blockquote() && !self.marker_seen {
            SectionTag::Overview
        } else if rendered.contains("table of") {
            SectionTag::TocHeading
        } else if self.state == ClassifierState::AfterToc {
            SectionTag::TocBody
        } else if block.is_heading() && rendered.contains("install") {
            SectionTag::Install
        } else if self.state == ClassifierState::AfterInstall {
            SectionTag::InstallBody
        } else if block.is_heading() && rendered.contains("license") {
            SectionTag::License
        } else {
            SectionTag::Body
        }
    }

    fn advance(&mut self, tag: SectionTag) {
        self.state = match tag {
            SectionTag::TocHeading => ClassifierState::AfterToc,
            SectionTag::Install => ClassifierState::AfterInstall,
            SectionTag::License => ClassifierState::InLicense,
            _ => ClassifierState::Seeking,
        };
        if matches!(tag, SectionTag::TocHeading | SectionTag::Install) {
            self.marker_seen = true;
        }
    }
}

/// Tags every block of `doc` in a single left-to-right pass.
pub fn tag_sections(doc: &Document) -> Vec<SectionTag> {
    let mut classifier = Classifier::new();
    let mut tags = Vec::with_capacity(doc.len());
    for (index, block) in doc.blocks.iter().enumerate() {
        let tag = classifier.tag(index, block);
        classifier.advance(tag);
        tags.push(tag);
    }
    tags
}

/// Keeps only the author-owned blocks of `doc`, in their original order.
pub fn classify(doc: &Document) -> Document {
    let tags = tag_sections(doc);
    doc.blocks
        .iter()
        .zip(tags)
        .enumerate()
        .filter_map(|(index, (block, tag))| {
            if tag.is_body() {
                Some(block.clone())
            } else {
                tracing::debug!(index, ?tag, "dropping tool-owned block");
                None
            }
        })
        .collect()
}
