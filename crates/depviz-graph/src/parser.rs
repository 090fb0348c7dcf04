//! Module structure extraction.
//!
//! Parses one source file with oxc and keeps only what the classifier and
//! the builder need: the import/re-export edges in source order, the export
//! table and the kinds of the top-level declarations. The AST itself does not
//! outlive [`ModuleInfo::parse`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Declaration, ExportDefaultDeclarationKind, Expression, ImportDeclarationSpecifier,
    ModuleDeclaration, ModuleExportName, VariableDeclarator,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::{GraphError, Result};
use crate::paths;

/// Calls whose result is a component (`memo(Button)`, `React.forwardRef(...)`).
const COMPONENT_FACTORIES: &[&str] = &["memo", "forwardRef", "lazy", "observer"];

static COMPONENT_ANNOTATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r":\s*(React\.)?(FC|FunctionComponent|VFC|ComponentType)\b").ok()
});

/// What an edge asks for from its target module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImportRequest {
    /// `import X from` / `export { default } from`
    Default,
    /// `import { x } from` / `export { x } from`, by source-side name.
    Named(String),
    /// `import * as ns from` / `export * from` / `export * as ns from`
    Namespace,
}

impl ImportRequest {
    fn from_name(name: String) -> Self {
        if name == "default" {
            ImportRequest::Default
        } else {
            ImportRequest::Named(name)
        }
    }

    /// Name to look up in the target's export table, if any.
    pub fn export_name(&self) -> Option<&str> {
        match self {
            ImportRequest::Default => Some("default"),
            ImportRequest::Named(name) => Some(name),
            ImportRequest::Namespace => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Import,
    ReExport,
}

/// One dependency edge: one binding of one import or re-export statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEdge {
    pub specifier: String,
    /// Name the node is presented under (local or exported binding, `*`).
    pub name: String,
    pub request: ImportRequest,
    pub kind: EdgeKind,
}

/// Facts about a variable initializer the classifier decides on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariableShape {
    /// Initializer is a component factory call or styled template.
    pub component_factory: bool,
    /// Initializer is an arrow function or function expression.
    pub callable: bool,
    /// Declarator is typed as `FC`, `FunctionComponent`, ...
    pub component_annotation: bool,
}

/// Syntactic kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Enum,
    Interface,
    TypeAlias,
    Class,
    Function,
    Variable(VariableShape),
    Other,
}

/// A declaration with the name it was declared under (`None` for anonymous
/// default exports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDeclaration {
    pub name: Option<String>,
    pub kind: DeclarationKind,
}

/// How an exported name is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportBinding {
    /// Declared by the export statement itself.
    Local(LocalDeclaration),
    /// `export { local as name }` or `export default local`.
    Alias(String),
    /// `export { imported as name } from 'source'`, or
    /// `export * as name from 'source'` with a namespace request.
    ReExport { source: String, request: ImportRequest },
}

/// Structure of one parsed module.
#[derive(Debug, Clone, Default)]
pub struct ModuleInfo {
    pub path: PathBuf,
    /// Imports in source order, then re-exports in source order.
    pub edges: Vec<ModuleEdge>,
    pub exports: FxHashMap<String, ExportBinding>,
    /// Sources of plain `export * from '...'` statements.
    pub star_exports: Vec<String>,
    /// Top-level declarations by local name.
    pub declarations: FxHashMap<String, DeclarationKind>,
    /// Local import bindings: local name → (specifier, request).
    pub imported: FxHashMap<String, (String, ImportRequest)>,
    /// File may contain JSX (`.jsx` / `.tsx`).
    pub jsx: bool,
}

impl ModuleInfo {
    /// Read and parse a file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| GraphError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &source)
    }

    /// Parse `source` as the contents of `path`.
    pub fn parse(path: &Path, source: &str) -> Result<Self> {
        let parse_error = |message: String| GraphError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let ext = paths::extension(path).unwrap_or_default();
        let source_type = SourceType::from_path(path)
            .map_err(|_| parse_error(format!("unsupported file extension '{ext}'")))?;
        let source_type = match ext.as_str() {
            "js" | "mjs" | "cjs" => source_type.with_jsx(true),
            _ => source_type,
        };

        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, source_type).parse();
        if let Some(err) = ret.errors.first() {
            return Err(parse_error(err.to_string()));
        }
        if ret.panicked {
            return Err(parse_error("parser aborted".to_string()));
        }

        let mut info = ModuleInfo {
            path: path.to_path_buf(),
            jsx: matches!(ext.as_str(), "jsx" | "tsx"),
            ..Default::default()
        };
        let mut re_exports = Vec::new();

        for stmt in &ret.program.body {
            if let Some(decl) = stmt.as_declaration() {
                info.record_declaration(decl, source);
                continue;
            }
            let Some(module_decl) = stmt.as_module_declaration() else {
                continue;
            };
            match module_decl {
                ModuleDeclaration::ImportDeclaration(import) => {
                    let specifier = import.source.value.to_string();
                    let Some(specs) = &import.specifiers else {
                        // Side-effect import: no binding, no edge.
                        continue;
                    };
                    for spec in specs {
                        let (local, request) = match spec {
                            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                                (s.local.name.to_string(), ImportRequest::Default)
                            }
                            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                                (s.local.name.to_string(), ImportRequest::Namespace)
                            }
                            ImportDeclarationSpecifier::ImportSpecifier(s) => (
                                s.local.name.to_string(),
                                ImportRequest::from_name(export_name(&s.imported)),
                            ),
                        };
                        info.imported
                            .insert(local.clone(), (specifier.clone(), request.clone()));
                        info.edges.push(ModuleEdge {
                            specifier: specifier.clone(),
                            name: local,
                            request,
                            kind: EdgeKind::Import,
                        });
                    }
                }
                ModuleDeclaration::ExportNamedDeclaration(named) => {
                    if let Some(decl) = &named.declaration {
                        for (name, kind) in info.record_declaration(decl, source) {
                            info.exports.insert(
                                name.clone(),
                                ExportBinding::Local(LocalDeclaration {
                                    name: Some(name),
                                    kind,
                                }),
                            );
                        }
                    }
                    match &named.source {
                        Some(src) => {
                            let specifier = src.value.to_string();
                            for spec in &named.specifiers {
                                let exported = export_name(&spec.exported);
                                let request = ImportRequest::from_name(export_name(&spec.local));
                                info.exports.insert(
                                    exported.clone(),
                                    ExportBinding::ReExport {
                                        source: specifier.clone(),
                                        request: request.clone(),
                                    },
                                );
                                re_exports.push(ModuleEdge {
                                    specifier: specifier.clone(),
                                    name: exported,
                                    request,
                                    kind: EdgeKind::ReExport,
                                });
                            }
                        }
                        None => {
                            for spec in &named.specifiers {
                                info.exports.insert(
                                    export_name(&spec.exported),
                                    ExportBinding::Alias(export_name(&spec.local)),
                                );
                            }
                        }
                    }
                }
                ModuleDeclaration::ExportAllDeclaration(all) => {
                    let specifier = all.source.value.to_string();
                    match &all.exported {
                        Some(exported) => {
                            info.exports.insert(
                                export_name(exported),
                                ExportBinding::ReExport {
                                    source: specifier.clone(),
                                    request: ImportRequest::Namespace,
                                },
                            );
                        }
                        None => info.star_exports.push(specifier.clone()),
                    }
                    re_exports.push(ModuleEdge {
                        specifier,
                        name: "*".to_string(),
                        request: ImportRequest::Namespace,
                        kind: EdgeKind::ReExport,
                    });
                }
                ModuleDeclaration::ExportDefaultDeclaration(default) => {
                    let binding = info.default_binding(&default.declaration);
                    info.exports.insert("default".to_string(), binding);
                }
                _ => {}
            }
        }

        info.edges.extend(re_exports);
        Ok(info)
    }

    /// Record a top-level declaration, returning the names it binds.
    fn record_declaration(
        &mut self,
        decl: &Declaration<'_>,
        source: &str,
    ) -> Vec<(String, DeclarationKind)> {
        let bound = declaration_kinds(decl, source);
        for (name, kind) in &bound {
            self.declarations.insert(name.clone(), *kind);
        }
        bound
    }

    fn default_binding(&mut self, kind: &ExportDefaultDeclarationKind<'_>) -> ExportBinding {
        let (name, kind) = match kind {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => (
                func.id.as_ref().map(|id| id.name.to_string()),
                DeclarationKind::Function,
            ),
            ExportDefaultDeclarationKind::ClassDeclaration(class) => (
                class.id.as_ref().map(|id| id.name.to_string()),
                DeclarationKind::Class,
            ),
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(iface) => {
                (Some(iface.id.name.to_string()), DeclarationKind::Interface)
            }
            other => match other.as_expression() {
                Some(expr) => {
                    if let Expression::Identifier(ident) = expr.get_inner_expression() {
                        return ExportBinding::Alias(ident.name.to_string());
                    }
                    (None, expression_kind(expr, ""))
                }
                None => (None, DeclarationKind::Other),
            },
        };
        if let Some(name) = &name {
            self.declarations.insert(name.clone(), kind);
        }
        ExportBinding::Local(LocalDeclaration { name, kind })
    }

    /// Whether the module is a script module this parser understands.
    pub fn is_script(path: &Path) -> bool {
        paths::extension(path).is_some_and(|ext| {
            matches!(
                ext.as_str(),
                "ts" | "tsx" | "mts" | "cts" | "js" | "jsx" | "mjs" | "cjs"
            )
        })
    }
}

/// Parsed modules of one traversal, keyed by absolute path.
///
/// Failed parses are not stored, so a later reference retries the file.
#[derive(Debug, Default)]
pub struct ModuleStore {
    modules: FxHashMap<PathBuf, Arc<ModuleInfo>>,
}

impl ModuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ModuleInfo>> {
        if let Some(info) = self.modules.get(path) {
            return Ok(Arc::clone(info));
        }
        let info = Arc::new(ModuleInfo::load(path)?);
        self.modules.insert(path.to_path_buf(), Arc::clone(&info));
        Ok(info)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

fn declaration_kinds(decl: &Declaration<'_>, source: &str) -> Vec<(String, DeclarationKind)> {
    match decl {
        Declaration::VariableDeclaration(var) => var
            .declarations
            .iter()
            .filter_map(|declarator| {
                let id = declarator.id.get_binding_identifier()?;
                Some((id.name.to_string(), variable_kind(declarator, source)))
            })
            .collect(),
        Declaration::FunctionDeclaration(func) => func
            .id
            .iter()
            .map(|id| (id.name.to_string(), DeclarationKind::Function))
            .collect(),
        Declaration::ClassDeclaration(class) => class
            .id
            .iter()
            .map(|id| (id.name.to_string(), DeclarationKind::Class))
            .collect(),
        Declaration::TSEnumDeclaration(decl) => {
            vec![(decl.id.name.to_string(), DeclarationKind::Enum)]
        }
        Declaration::TSInterfaceDeclaration(decl) => {
            vec![(decl.id.name.to_string(), DeclarationKind::Interface)]
        }
        Declaration::TSTypeAliasDeclaration(decl) => {
            vec![(decl.id.name.to_string(), DeclarationKind::TypeAlias)]
        }
        _ => Vec::new(),
    }
}

fn variable_kind(declarator: &VariableDeclarator<'_>, source: &str) -> DeclarationKind {
    let Some(init) = &declarator.init else {
        return DeclarationKind::Variable(VariableShape::default());
    };
    // Text between the binding and the initializer holds any type annotation.
    let start = declarator.span.start as usize;
    let end = init.span().start as usize;
    let annotation = source.get(start..end).unwrap_or_default();
    expression_kind(init, annotation)
}

fn expression_kind(expr: &Expression<'_>, annotation: &str) -> DeclarationKind {
    let expr = expr.get_inner_expression();
    if matches!(expr, Expression::ClassExpression(_)) {
        return DeclarationKind::Class;
    }
    DeclarationKind::Variable(VariableShape {
        component_factory: is_component_factory(expr),
        callable: matches!(
            expr,
            Expression::ArrowFunctionExpression(_) | Expression::FunctionExpression(_)
        ),
        component_annotation: COMPONENT_ANNOTATION
            .as_ref()
            .is_some_and(|re| re.is_match(annotation)),
    })
}

/// `memo(...)`, `React.forwardRef(...)`, `styled.div`...``, `styled(Button)(...)`.
fn is_component_factory(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::CallExpression(call) => is_factory_callee(call.callee.get_inner_expression()),
        Expression::TaggedTemplateExpression(tagged) => {
            is_styled(tagged.tag.get_inner_expression())
        }
        _ => false,
    }
}

fn is_factory_callee(callee: &Expression<'_>) -> bool {
    match callee {
        Expression::Identifier(ident) => COMPONENT_FACTORIES.contains(&ident.name.as_str()),
        Expression::StaticMemberExpression(member) => {
            let react_member = matches!(
                &member.object,
                Expression::Identifier(object) if object.name == "React"
            );
            (react_member && COMPONENT_FACTORIES.contains(&member.property.name.as_str()))
                || is_styled(callee)
        }
        _ => is_styled(callee),
    }
}

fn is_styled(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::Identifier(ident) => ident.name == "styled",
        Expression::StaticMemberExpression(member) => is_styled(&member.object),
        Expression::CallExpression(call) => is_styled(call.callee.get_inner_expression()),
        _ => false,
    }
}
