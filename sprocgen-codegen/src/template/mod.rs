//! Text templates for generated SQL.
//!
//! A small substitution language evaluated against any `Serialize` context:
//!
//! - `{{ table_name }}`, `{{ structure.query }}`: field access
//! - `{{.}}`: the current value itself
//! - `{{#each columns}} ... {{/each}}`: iteration, with `@index`, `@first`
//!   and `@last` available inside the loop
//! - `{{#sep}}, {{/sep}}`: rendered after every element except the last
//! - `{{#if field}} ... {{else}} ... {{/if}}` and `{{#unless field}}`
//! - `{{~` / `~}}`: trim whitespace before / after a tag
//!
//! Lookups that miss in a loop element fall back to the enclosing scopes, so
//! `{{ table_name }}` still resolves inside `{{#each columns}}`.
//!
//! # Example
//!
//! ```
//! use sprocgen_codegen::template::Template;
//!
//! let template = Template::parse(
//!     "insert.tmpl",
//!     "INSERT INTO {{table_name}} ({{#each columns}}{{name}}{{#sep}}, {{/sep}}{{/each}})",
//! )
//! .unwrap();
//!
//! let ctx = serde_json::json!({
//!     "table_name": "users",
//!     "columns": [{ "name": "name" }, { "name": "email" }],
//! });
//! assert_eq!(template.render(&ctx).unwrap(), "INSERT INTO users (name, email)");
//! ```

mod parse;
mod render;

use std::path::Path;

use serde::Serialize;

use crate::{Error, Result, error::SourceContext};
use parse::Node;
use render::Renderer;

/// A parsed template, ready to render.
#[derive(Debug, Clone)]
pub struct Template {
    source: SourceContext,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template text. `name` is used in error reports.
    pub fn parse(name: impl Into<String>, src: impl Into<String>) -> Result<Self> {
        let source = SourceContext::new(src, name);
        let nodes = parse::parse(source.src())
            .map_err(|e| source.parse_error(e.message, e.span))?;
        Ok(Self { source, nodes })
    }

    /// Read and parse a template file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|e| Error::template_io(path, e))?;
        tracing::trace!(path = %path.display(), "loaded template");
        Self::parse(path.display().to_string(), src)
    }

    /// Name of the template, usually its file path.
    pub fn name(&self) -> &str {
        self.source.filename()
    }

    /// Render the template against a serializable context.
    pub fn render<T: Serialize + ?Sized>(&self, ctx: &T) -> Result<String> {
        let value = serde_json::to_value(ctx).map_err(|source| Box::new(Error::Context { source }))?;
        Renderer::new(&value)
            .render(&self.nodes)
            .map_err(|e| self.source.render_error(e.message, e.span))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn render(src: &str, ctx: serde_json::Value) -> String {
        Template::parse("test.tmpl", src)
            .expect("template should parse")
            .render(&ctx)
            .expect("template should render")
    }

    fn render_err(src: &str, ctx: serde_json::Value) -> Box<Error> {
        Template::parse("test.tmpl", src)
            .expect("template should parse")
            .render(&ctx)
            .unwrap_err()
    }

    #[test]
    fn test_field_access() {
        let out = render(
            "{{procedure_name}}: {{structure.query}}",
            json!({ "procedure_name": "sp_users_select", "structure": { "query": "SELECT 1" } }),
        );
        assert_eq!(out, "sp_users_select: SELECT 1");
    }

    #[test]
    fn test_this_on_plain_string() {
        assert_eq!(render("@{{.}}", json!("id")), "@id");
        assert_eq!(render("p_{{this}}", json!("name")), "p_name");
    }

    #[test]
    fn test_scalars() {
        let out = render(
            "{{n}} {{b}} [{{none}}]",
            json!({ "n": 50, "b": true, "none": null }),
        );
        assert_eq!(out, "50 true []");
    }

    #[test]
    fn test_separator_skips_last_element() {
        let out = render(
            "{{#each columns}}{{name}}{{#sep}} AND {{/sep}}{{/each}}",
            json!({ "columns": [{ "name": "a" }, { "name": "b" }, { "name": "c" }] }),
        );
        assert_eq!(out, "a AND b AND c");
    }

    #[test]
    fn test_separator_single_element() {
        let out = render(
            "({{#each columns}}{{name}}{{#sep}}, {{/sep}}{{/each}})",
            json!({ "columns": [{ "name": "id" }] }),
        );
        assert_eq!(out, "(id)");
    }

    #[test]
    fn test_each_empty_list() {
        let out = render("[{{#each columns}}x{{/each}}]", json!({ "columns": [] }));
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_loop_variables() {
        let out = render(
            "{{#each xs}}{{@index}}{{#if @first}}F{{/if}}{{#if @last}}L{{/if}};{{/each}}",
            json!({ "xs": [1, 2, 3] }),
        );
        assert_eq!(out, "0F;1;2L;");
    }

    #[test]
    fn test_lookup_falls_back_to_parent_scope() {
        let out = render(
            "{{#each columns}}{{table_name}}.{{name}}{{#sep}}, {{/sep}}{{/each}}",
            json!({ "table_name": "users", "columns": [{ "name": "id" }, { "name": "name" }] }),
        );
        assert_eq!(out, "users.id, users.name");
    }

    #[test]
    fn test_nested_each_separators() {
        let out = render(
            "{{#each rows}}[{{#each cells}}{{.}}{{#sep}},{{/sep}}{{/each}}]{{#sep}};{{/sep}}{{/each}}",
            json!({ "rows": [{ "cells": [1, 2] }, { "cells": [3] }] }),
        );
        assert_eq!(out, "[1,2];[3]");
    }

    #[test]
    fn test_if_else_and_unless() {
        let src = "{{#if returns_rows}}rows{{else}}void{{/if}}/{{#unless returns_rows}}none{{/unless}}";
        assert_eq!(render(src, json!({ "returns_rows": true })), "rows/");
        assert_eq!(render(src, json!({ "returns_rows": false })), "void/none");
    }

    #[test]
    fn test_truthiness_of_strings() {
        let src = "{{#if where_condition}} {{where_condition}}{{/if}};";
        assert_eq!(render(src, json!({ "where_condition": "" })), ";");
        assert_eq!(
            render(src, json!({ "where_condition": "WHERE (x)" })),
            " WHERE (x);"
        );
    }

    #[test]
    fn test_unknown_field() {
        let err = render_err("{{ table }}", json!({ "table_name": "users" }));
        let Error::Render { message, span, .. } = *err else {
            panic!("expected render error");
        };
        assert_eq!(message, "unknown field 'table'");
        assert_eq!(span.offset(), 0);
        assert_eq!(span.len(), 11);
    }

    #[test]
    fn test_each_over_non_list() {
        let err = render_err("{{#each table_name}}{{/each}}", json!({ "table_name": "users" }));
        assert!(matches!(*err, Error::Render { ref message, .. } if message == "'table_name' is not a list"));
    }

    #[test]
    fn test_printing_a_list_fails() {
        let err = render_err("{{ columns }}", json!({ "columns": [] }));
        assert!(matches!(*err, Error::Render { .. }));
    }

    #[test]
    fn test_parse_error_carries_span() {
        let err = Template::parse("bad.tmpl", "SELECT {{#each columns}}").unwrap_err();
        let Error::TemplateParse { message, span, .. } = *err else {
            panic!("expected parse error");
        };
        assert_eq!(message, "'#each' is never closed");
        assert_eq!(span.offset(), 7);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Template::load(Path::new("does/not/exist.tmpl")).unwrap_err();
        assert!(matches!(*err, Error::TemplateIo { .. }));
    }
}
