use handlebars::Handlebars;
use serde_json::json;

use crate::document::Document;
use crate::error::ReadmeError;
use crate::license::LicenseRegistry;
use crate::manifest::{PackageMetadata, RepoCoordinates};

const HEADER_TEMPLATE: &str = "# {{name}}

[![CI](https://img.shields.io/github/actions/workflow/status/{{owner}}/{{repo}}/ci.yml?branch={{branch}}&style=flat-square)](https://github.com/{{owner}}/{{repo}}/actions/workflows/ci.yml?query=branch%3A{{branch}})
[![npm](https://img.shields.io/npm/v/{{name}}.svg?style=flat-square)](https://www.npmjs.com/package/{{name}})
[![codecov](https://img.shields.io/codecov/c/github/{{owner}}/{{repo}}.svg?style=flat-square)](https://codecov.io/gh/{{owner}}/{{repo}})
";

const OVERVIEW_TEMPLATE: &str = "> {{description}}
";

const INSTALL_TEMPLATE: &str = "## Install

```console
$ npm i {{name}}
```
";

/// Renders the header, install and license sections owned by the tool.
pub struct SectionGenerator<'a> {
    registry: Handlebars<'static>,
    licenses: &'a LicenseRegistry,
}

impl<'a> SectionGenerator<'a> {
    pub fn new(licenses: &'a LicenseRegistry) -> Result<Self, ReadmeError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);
        for (name, template) in [
            ("header", HEADER_TEMPLATE),
            ("overview", OVERVIEW_TEMPLATE),
            ("install", INSTALL_TEMPLATE),
        ] {
            registry
                .register_template_string(name, template)
                .map_err(|err| ReadmeError::Template(format!("{name}: {err}")))?;
        }
        Ok(Self { registry, licenses })
    }

    /// Title heading, badge paragraph and, when the package has one, the
    /// description as a blockquote.
    pub fn generate_header(
        &self,
        meta: &PackageMetadata,
        coords: &RepoCoordinates,
    ) -> Result<Document, ReadmeError> {
        let mut rendered = self.render(
            "header",
            &json!({
                "name": meta.name,
                "owner": coords.owner,
                "repo": coords.name,
                "branch": coords.default_branch,
            }),
        )?;

        if let Some(description) = meta.summary() {
            rendered.push('\n');
            rendered.push_str(&self.render("overview", &json!({ "description": description }))?);
        }

        Document::parse(&rendered)
    }

    pub fn generate_install(&self, meta: &PackageMetadata) -> Result<Document, ReadmeError> {
        let rendered = self.render("install", &json!({ "name": meta.name }))?;
        Document::parse(&rendered)
    }

    pub fn generate_license(&self, owner: &str) -> Result<Document, ReadmeError> {
        self.licenses.license_section(owner)
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, ReadmeError> {
        self.registry
            .render(name, data)
            .map_err(|err| ReadmeError::Template(format!("{name}: {err}")))
    }
}
