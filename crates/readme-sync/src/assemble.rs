use crate::document::Document;

/// Canonical README layout: header, table of contents, install, author content,
/// license.
pub fn assemble(
    header: &Document,
    install: &Document,
    body: &Document,
    license: &Document,
    toc: &Document,
) -> Document {
    concat([header, toc, install, body, license])
}

/// The part of the README the table of contents is built from.
pub fn assemble_preliminary(install: &Document, body: &Document, license: &Document) -> Document {
    concat([install, body, license])
}

fn concat<const N: usize>(parts: [&Document; N]) -> Document {
    parts
        .into_iter()
        .flat_map(|part| part.blocks.iter().cloned())
        .collect()
}
