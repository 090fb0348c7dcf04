//! Static reading of bundler configuration files.
//!
//! Configs are parsed with `oxc_parser` and never executed. A property is
//! located by its chain of object keys from the outermost object literal, so
//! `build.rollupOptions.input` matches inside `defineConfig({ ... })` as well
//! as in a plain `export default { ... }`. Only literal values are read:
//! strings, arrays, object values and the last argument of helper calls such
//! as `path.resolve(__dirname, 'src/index.js')`. Anything computed is
//! skipped.

use std::fs;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, ObjectProperty, ObjectPropertyKind};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{DetectError, Result};

/// Literal value found at a property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Every string literal reachable from the value, in source order.
    Strings(Vec<String>),
    Bool(bool),
    /// An object literal that holds no strings.
    Object,
    /// Computed or otherwise unreadable.
    Opaque,
}

impl PropertyValue {
    pub fn strings(&self) -> &[String] {
        match self {
            PropertyValue::Strings(values) => values,
            _ => &[],
        }
    }
}

/// Read the value at `key_path` in the config file at `path`.
///
/// Returns `Ok(None)` when no object literal carries that key chain.
pub fn read_property(path: &Path, key_path: &[&str]) -> Result<Option<PropertyValue>> {
    let source = fs::read_to_string(path).map_err(|source| DetectError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    read_property_from_source(path, &source, key_path)
}

pub(crate) fn read_property_from_source(
    path: &Path,
    source: &str,
    key_path: &[&str],
) -> Result<Option<PropertyValue>> {
    let invalid = |reason: String| DetectError::InvalidBundlerConfig {
        path: path.to_path_buf(),
        reason,
    };

    let source_type = SourceType::from_path(path)
        .map_err(|_| invalid("unsupported file extension".to_string()))?;
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if let Some(err) = ret.errors.first() {
        return Err(invalid(err.to_string()));
    }
    if ret.panicked {
        return Err(invalid("parser aborted".to_string()));
    }

    let mut finder = PropertyFinder::new(key_path);
    finder.visit_program(&ret.program);
    Ok(finder.found)
}

struct PropertyFinder<'k> {
    key_path: &'k [&'k str],
    keys: Vec<String>,
    found: Option<PropertyValue>,
}

impl<'k> PropertyFinder<'k> {
    fn new(key_path: &'k [&'k str]) -> Self {
        Self {
            key_path,
            keys: Vec::new(),
            found: None,
        }
    }

    fn at_target(&self) -> bool {
        self.keys.len() == self.key_path.len()
            && self.keys.iter().zip(self.key_path).all(|(a, b)| a == b)
    }
}

impl<'a> Visit<'a> for PropertyFinder<'_> {
    fn visit_object_property(&mut self, prop: &ObjectProperty<'a>) {
        if self.found.is_some() {
            return;
        }

        let key = prop.key.static_name().map(|name| name.into_owned()).unwrap_or_default();
        self.keys.push(key);
        if self.at_target() {
            self.found = Some(property_value(&prop.value));
        } else {
            walk::walk_object_property(self, prop);
        }
        self.keys.pop();
    }
}

fn property_value(expr: &Expression<'_>) -> PropertyValue {
    match expr.get_inner_expression() {
        Expression::BooleanLiteral(lit) => PropertyValue::Bool(lit.value),
        Expression::ObjectExpression(_) => {
            let mut strings = Vec::new();
            collect_strings(expr, &mut strings);
            if strings.is_empty() {
                PropertyValue::Object
            } else {
                PropertyValue::Strings(strings)
            }
        }
        _ => {
            let mut strings = Vec::new();
            collect_strings(expr, &mut strings);
            if strings.is_empty() {
                PropertyValue::Opaque
            } else {
                PropertyValue::Strings(strings)
            }
        }
    }
}

fn collect_strings(expr: &Expression<'_>, out: &mut Vec<String>) {
    match expr.get_inner_expression() {
        Expression::StringLiteral(lit) => out.push(lit.value.to_string()),
        Expression::TemplateLiteral(tpl) if tpl.expressions.is_empty() => {
            if let Some(cooked) = tpl.quasis.first().and_then(|q| q.value.cooked.as_ref()) {
                out.push(cooked.to_string());
            }
        }
        Expression::ArrayExpression(array) => {
            for element in &array.elements {
                if let Some(expr) = element.as_expression() {
                    collect_strings(expr, out);
                }
            }
        }
        Expression::ObjectExpression(object) => {
            for property in &object.properties {
                if let ObjectPropertyKind::ObjectProperty(prop) = property {
                    collect_strings(&prop.value, out);
                }
            }
        }
        Expression::CallExpression(call) => {
            if let Some(expr) = call.arguments.last().and_then(|arg| arg.as_expression()) {
                collect_strings(expr, out);
            }
        }
        _ => {}
    }
}
