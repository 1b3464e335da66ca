use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::document::Document;
use crate::error::ReadmeError;

const DUAL_APACHE_MIT: &str = "## License

Licensed under either of

- Apache 2.0, ([LICENSE-APACHE](LICENSE-APACHE) / <http://www.apache.org/licenses/LICENSE-2.0>)
- MIT ([LICENSE-MIT](LICENSE-MIT) / <http://opensource.org/licenses/MIT>)

## Contribution

Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.
";

static BUILTIN_LICENSES: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("ChainSafe", DUAL_APACHE_MIT),
        ("achingbrain", DUAL_APACHE_MIT),
        ("ipfs", DUAL_APACHE_MIT),
        ("ipfs-shipyard", DUAL_APACHE_MIT),
        ("ipld", DUAL_APACHE_MIT),
        ("libp2p", DUAL_APACHE_MIT),
        ("multiformats", DUAL_APACHE_MIT),
    ])
});

/// Immutable owner -> license markdown lookup.
#[derive(Clone, Debug)]
pub struct LicenseRegistry {
    texts: BTreeMap<String, String>,
}

impl Default for LicenseRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LicenseRegistry {
    pub fn builtin() -> Self {
        let texts = BUILTIN_LICENSES
            .iter()
            .map(|(owner, text)| (owner.to_string(), text.to_string()))
            .collect();
        Self { texts }
    }

    /// Built-in table extended (and overridden) by `extra`.
    pub fn with_overrides<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut registry = Self::builtin();
        for (owner, text) in extra {
            registry.texts.insert(owner.into(), text.into());
        }
        registry
    }

    pub fn get(&self, owner: &str) -> Option<&str> {
        self.texts.get(owner).map(String::as_str)
    }

    /// License section for `owner`. The text must open with a heading mentioning
    /// "license", otherwise the classifier could not recognise it on the next run.
    pub fn license_section(&self, owner: &str) -> Result<Document, ReadmeError> {
        let text = self.get(owner).ok_or_else(|| {
            ReadmeError::Configuration(format!("no license text registered for owner '{owner}'"))
        })?;

        let doc = Document::parse(text)?;
        let opens_with_heading = doc.blocks.first().is_some_and(|block| {
            block.is_heading() && block.rendered_lowercase().contains("license")
        });
        if !opens_with_heading {
            return Err(ReadmeError::Configuration(format!(
                "license text for owner '{owner}' must start with a license heading"
            )));
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_owner_resolves_to_license_section() {
        let registry = LicenseRegistry::builtin();
        let doc = registry.license_section("ipfs").unwrap();
        assert_eq!(doc.blocks[0].markdown, "## License");
        assert!(doc.headings().any(|h| h.markdown == "## Contribution"));
    }

    #[test]
    fn unknown_owner_is_a_configuration_error() {
        let registry = LicenseRegistry::builtin();
        let err = registry.license_section("unknown-owner").unwrap_err();
        assert!(matches!(err, ReadmeError::Configuration(_)));
        assert!(err.to_string().contains("unknown-owner"));
    }

    #[test]
    fn overrides_extend_the_builtin_table() {
        let registry =
            LicenseRegistry::with_overrides([("acme", "## License\n\nMIT © Acme\n")]);
        assert!(registry.get("ipfs").is_some());
        let doc = registry.license_section("acme").unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn license_text_without_heading_is_rejected() {
        let registry = LicenseRegistry::with_overrides([("acme", "MIT\n")]);
        let err = registry.license_section("acme").unwrap_err();
        assert!(matches!(err, ReadmeError::Configuration(_)));
    }
}
