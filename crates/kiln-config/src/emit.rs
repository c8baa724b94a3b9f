//! Rendering the configuration for the external bundler.
//!
//! The bundler reads a `vite.config.js` module whose default export is the
//! configuration object. Both renderers below walk the same object tree, so
//! the JS and JSON outputs always agree on content and key order.

use std::fmt::Write as _;

use serde_json::{Map, Value};

use crate::config::KilnConfig;
use crate::defaults::{is_default_out_dir, DEFAULT_CHUNK_SIZE_WARNING_LIMIT};

const INDENT: &str = "  ";

enum Node {
    Str(String),
    Bool(bool),
    Num(u32),
    List(Vec<String>),
    Object(Vec<Field>),
}

struct Field {
    key: String,
    /// Keys that are not plain identifiers are always quoted.
    quoted: bool,
    value: Node,
}

impl Field {
    fn ident(key: &str, value: Node) -> Self {
        Self {
            key: key.to_string(),
            quoted: false,
            value,
        }
    }

    fn quoted(key: &str, value: Node) -> Self {
        Self {
            key: key.to_string(),
            quoted: true,
            value,
        }
    }
}

fn strings<'a, S>(items: impl IntoIterator<Item = &'a S>) -> Node
where
    S: AsRef<str> + 'a,
{
    Node::List(items.into_iter().map(|s| s.as_ref().to_string()).collect())
}

fn config_tree(config: &KilnConfig) -> Node {
    let build = &config.build;
    let mut build_fields = vec![Field::ident("target", Node::Str(build.target.to_string()))];

    if !is_default_out_dir(&build.out_dir) {
        build_fields.push(Field::ident(
            "outDir",
            Node::Str(build.out_dir.to_string_lossy().replace('\\', "/")),
        ));
    }
    if build.sourcemap {
        build_fields.push(Field::ident("sourcemap", Node::Bool(true)));
    }
    if !build.minify {
        build_fields.push(Field::ident("minify", Node::Bool(false)));
    }
    if build.chunk_size_warning_limit != DEFAULT_CHUNK_SIZE_WARNING_LIMIT {
        build_fields.push(Field::ident(
            "chunkSizeWarningLimit",
            Node::Num(build.chunk_size_warning_limit),
        ));
    }

    let chunks = build.manual_chunks();
    if !chunks.is_empty() {
        let manual_chunks = chunks
            .iter()
            .map(|(name, modules)| Field::quoted(name, strings(modules)))
            .collect();
        build_fields.push(Field::ident(
            "rollupOptions",
            Node::Object(vec![Field::ident(
                "output",
                Node::Object(vec![Field::ident("manualChunks", Node::Object(manual_chunks))]),
            )]),
        ));
    }

    let mut root = vec![Field::ident("build", Node::Object(build_fields))];

    let deps = &config.optimize_deps;
    let mut deps_fields = Vec::new();
    if !deps.include.is_empty() {
        deps_fields.push(Field::ident("include", strings(&deps.include)));
    }
    if !deps.exclude.is_empty() {
        deps_fields.push(Field::ident("exclude", strings(&deps.exclude)));
    }
    if deps.force {
        deps_fields.push(Field::ident("force", Node::Bool(true)));
    }
    if !deps_fields.is_empty() {
        root.push(Field::ident("optimizeDeps", Node::Object(deps_fields)));
    }

    Node::Object(root)
}

/// Render a `vite.config.js` module.
///
/// # Example
///
/// ```
/// use kiln_config::{emit_js, KilnConfig};
///
/// let js = emit_js(&KilnConfig::reference());
/// assert!(js.starts_with("import { defineConfig } from 'vite';"));
/// assert!(js.contains("'core': ['./src/core/index.js']"));
/// ```
pub fn emit_js(config: &KilnConfig) -> String {
    let mut out = String::from("import { defineConfig } from 'vite';\n\nexport default defineConfig(");
    write_node(&mut out, &config_tree(config), 0);
    out.push_str(");\n");
    out
}

/// Render the bundler-facing object as pretty JSON.
pub fn emit_json(config: &KilnConfig) -> String {
    let value = to_json(config_tree(config));
    // Serializing a `Value` cannot fail.
    let mut out = serde_json::to_string_pretty(&value).unwrap_or_default();
    out.push('\n');
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Str(s) => write_js_string(out, s),
        Node::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Node::Num(n) => {
            let _ = write!(out, "{n}");
        }
        Node::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_js_string(out, item);
            }
            out.push(']');
        }
        Node::Object(fields) if fields.is_empty() => out.push_str("{}"),
        Node::Object(fields) => {
            out.push_str("{\n");
            for (i, field) in fields.iter().enumerate() {
                out.push_str(&INDENT.repeat(depth + 1));
                if field.quoted {
                    write_js_string(out, &field.key);
                } else {
                    out.push_str(&field.key);
                }
                out.push_str(": ");
                write_node(out, &field.value, depth + 1);
                if i + 1 < fields.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
        }
    }
}

fn write_js_string(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}

fn to_json(node: Node) -> Value {
    match node {
        Node::Str(s) => Value::String(s),
        Node::Bool(b) => Value::Bool(b),
        Node::Num(n) => Value::from(n),
        Node::List(items) => Value::Array(items.into_iter().map(Value::String).collect()),
        Node::Object(fields) => {
            let mut map = Map::with_capacity(fields.len());
            for field in fields {
                map.insert(field.key, to_json(field.value));
            }
            Value::Object(map)
        }
    }
}
