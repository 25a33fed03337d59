//! Artifact rendering: structured data + named Handlebars template → file.
//!
//! A template named `foo.html` is read from `template_dir/foo.html` and its
//! output lands in `output_dir/foo.html`. Templates run in strict mode with
//! escaping turned off, since the data carries raw SVG markup and JSON.
//!
//! Every failure here is fatal to the build. Output is staged in a temporary
//! file next to the target and only moved into place once fully written, so a
//! failed run never leaves a truncated artifact behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{RenderError, RenderResult};

/// Renders named templates into same-named files.
#[derive(Debug, Clone)]
pub struct ArtifactRenderer {
    template_dir: PathBuf,
    output_dir: PathBuf,
}

impl ArtifactRenderer {
    pub fn new(template_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Where the artifact for `template` is written.
    pub fn output_path(&self, template: &str) -> PathBuf {
        self.output_dir.join(template)
    }

    /// Render `data` through `template` to a string without touching the output directory.
    pub fn render_to_string<T: Serialize>(&self, template: &str, data: &T) -> RenderResult<String> {
        let path = self.template_dir.join(template);
        let source =
            std::fs::read_to_string(&path).map_err(|e| RenderError::TemplateMissing {
                path: path.display().to_string(),
                source: e,
            })?;

        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(template, source)
            .map_err(|e| RenderError::TemplateSyntax {
                name: template.to_string(),
                message: e.to_string(),
            })?;

        registry
            .render(template, data)
            .map_err(|e| RenderError::Execute {
                name: template.to_string(),
                message: e.to_string(),
            })
    }

    /// Render `data` through `template` and write the artifact. Returns its path.
    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> RenderResult<PathBuf> {
        let rendered = self.render_to_string(template, data)?;
        let target = self.output_path(template);
        write_atomic(&self.output_dir, &target, rendered.as_bytes())?;
        tracing::info!(artifact = %target.display(), bytes = rendered.len(), "artifact written");
        Ok(target)
    }
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> RenderResult<()> {
    let write_error = |e| RenderError::Write {
        path: target.display().to_string(),
        source: e,
    };

    std::fs::create_dir_all(dir).map_err(write_error)?;
    let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
    staged.write_all(bytes).map_err(write_error)?;
    staged.flush().map_err(write_error)?;
    staged.persist(target).map_err(|e| write_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IconRecord;

    fn renderer_with(template: &str, body: &str) -> (tempfile::TempDir, ArtifactRenderer) {
        let dir = tempfile::TempDir::new().unwrap();
        let templates = dir.path().join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join(template), body).unwrap();
        let renderer = ArtifactRenderer::new(templates, dir.path().join("out"));
        (dir, renderer)
    }

    #[test]
    fn renders_sequence_without_escaping() {
        let (_dir, renderer) = renderer_with(
            "set.html",
            "{{#each this}}<g id=\"{{text}}\">{{markup}}</g>{{/each}}",
        );
        let icons = vec![
            IconRecord {
                text: "\u{1F600}".into(),
                markup: "<path d=\"M0\"/>".into(),
            },
            IconRecord {
                text: "&".into(),
                markup: "<g/>".into(),
            },
        ];

        let path = renderer.render("set.html", &icons).unwrap();
        assert_eq!(path, renderer.output_path("set.html"));
        assert!(path.ends_with("out/set.html"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<g id=\"\u{1F600}\"><path d=\"M0\"/></g><g id=\"&\"><g/></g>"
        );
    }

    #[test]
    fn renders_string_blob() {
        let (_dir, renderer) = renderer_with("dict.html", "var EMOJI = {{this}};");
        let out = renderer
            .render_to_string("dict.html", &"{\":a:\":\"x\"}")
            .unwrap();
        assert_eq!(out, "var EMOJI = {\":a:\":\"x\"};");
    }

    #[test]
    fn missing_template_is_fatal() {
        let (_dir, renderer) = renderer_with("a.html", "");
        let err = renderer.render("b.html", &()).unwrap_err();
        assert!(matches!(err, RenderError::TemplateMissing { .. }));
        assert!(!renderer.output_path("b.html").exists());
    }

    #[test]
    fn bad_syntax_is_fatal() {
        let (_dir, renderer) = renderer_with("a.html", "{{#each this}}x{{/if}}");
        assert!(matches!(
            renderer.render("a.html", &Vec::<u8>::new()),
            Err(RenderError::TemplateSyntax { .. })
        ));
    }

    #[test]
    fn unknown_field_fails_and_writes_nothing() {
        let (_dir, renderer) = renderer_with("a.html", "{{#each this}}{{unicode}}{{/each}}");
        let icons = vec![IconRecord {
            text: "x".into(),
            markup: String::new(),
        }];
        assert!(matches!(
            renderer.render("a.html", &icons),
            Err(RenderError::Execute { .. })
        ));
        assert!(!renderer.output_path("a.html").exists());
    }

    #[test]
    fn rerender_replaces_previous_artifact() {
        let (_dir, renderer) = renderer_with("a.html", "{{this}}");
        renderer.render("a.html", &"first").unwrap();
        let path = renderer.render("a.html", &"second").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }
}
