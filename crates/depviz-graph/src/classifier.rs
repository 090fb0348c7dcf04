//! Symbol classification.
//!
//! Decides what an imported name *is* from syntax alone: file extension,
//! naming convention, then the kind of the exported declaration. This is a
//! best-effort judgment, not a type-checked fact. Every path ends in a
//! concrete [`Category`], with `unknown` as the fallback.

use std::fmt;
use std::path::Path;

use crate::node::Category;
use crate::parser::{
    DeclarationKind, ExportBinding, ImportRequest, LocalDeclaration, ModuleInfo, ModuleStore,
};
use crate::paths;
use crate::resolver::{ModuleResolver, ResolvedTarget, ResolverCache};

const MEDIA_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "svg", "gif", "webp", "bmp", "ico", "avif",
];
const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];

/// Why a symbol classified as `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No export with the requested name.
    SymbolNotFound,
    /// The export exists but binds nothing we recognize.
    NoDeclaration,
    /// The symbol comes from a package or a file outside the source graph.
    OutsideProject,
    /// The target file could not be read or parsed.
    ParseFailed,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FallbackReason::SymbolNotFound => "symbol not found",
            FallbackReason::NoDeclaration => "no declaration",
            FallbackReason::OutsideProject => "declared outside the project",
            FallbackReason::ParseFailed => "file could not be parsed",
        })
    }
}

/// Outcome of classifying one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Set when `category` is `unknown` because the lookup fell through.
    pub fallback: Option<FallbackReason>,
}

impl Classification {
    fn known(category: Category) -> Self {
        Self {
            category,
            fallback: None,
        }
    }

    fn unknown(reason: FallbackReason) -> Self {
        Self {
            category: Category::Unknown,
            fallback: Some(reason),
        }
    }
}

/// `media` or `style` for asset files, by extension.
pub fn asset_category(path: &Path) -> Option<Category> {
    let ext = paths::extension(path)?;
    if MEDIA_EXTENSIONS.contains(&ext.as_str()) {
        Some(Category::Media)
    } else if STYLE_EXTENSIONS.contains(&ext.as_str()) {
        Some(Category::Style)
    } else {
        None
    }
}

/// `use` followed by an uppercase letter.
pub fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

fn is_capitalized(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Map a declaration to a category.
///
/// `name` is the declared name (or the importer's binding for anonymous
/// default exports); `jsx` is whether the declaring file is `.jsx`/`.tsx`.
pub fn category_for(kind: DeclarationKind, name: &str, jsx: bool) -> Category {
    match kind {
        DeclarationKind::Enum => Category::Enum,
        DeclarationKind::Interface => Category::Interface,
        DeclarationKind::TypeAlias => Category::Type,
        DeclarationKind::Class => Category::Component,
        DeclarationKind::Function if jsx && is_capitalized(name) => Category::Component,
        DeclarationKind::Function => Category::Function,
        DeclarationKind::Variable(shape) => {
            if shape.component_factory || shape.component_annotation {
                Category::Component
            } else if shape.callable && is_capitalized(name) {
                if jsx { Category::Component } else { Category::Const }
            } else if shape.callable {
                Category::Function
            } else {
                Category::Const
            }
        }
        DeclarationKind::Other => Category::Unknown,
    }
}

/// What a lookup found.
enum Found {
    Declaration { decl: LocalDeclaration, jsx: bool },
    Namespace,
    Asset(Category),
}

/// Classifies imported symbols, following at most one re-export hop.
pub struct SymbolClassifier<'r, 'c> {
    resolver: &'r ModuleResolver<'c>,
}

impl<'r, 'c> SymbolClassifier<'r, 'c> {
    pub fn new(resolver: &'r ModuleResolver<'c>) -> Self {
        Self { resolver }
    }

    /// Classify the binding `name` (requesting `request`) of an edge that
    /// resolved to `file`.
    pub fn classify(
        &self,
        file: &Path,
        name: &str,
        request: &ImportRequest,
        modules: &mut ModuleStore,
        cache: &mut ResolverCache,
    ) -> Classification {
        let classification = self.decide(file, name, request, modules, cache);
        if let Some(reason) = classification.fallback {
            tracing::warn!(
                file = %file.display(),
                name,
                %reason,
                "Fallback type unknown"
            );
        }
        classification
    }

    fn decide(
        &self,
        file: &Path,
        name: &str,
        request: &ImportRequest,
        modules: &mut ModuleStore,
        cache: &mut ResolverCache,
    ) -> Classification {
        if let Some(category) = asset_category(file) {
            return Classification::known(category);
        }

        let hook_name = match request {
            ImportRequest::Named(imported) => imported.as_str(),
            ImportRequest::Default | ImportRequest::Namespace => name,
        };
        if is_hook_name(hook_name) {
            return Classification::known(Category::Hook);
        }

        if !ModuleInfo::is_script(file) {
            return Classification::unknown(FallbackReason::ParseFailed);
        }
        if *request == ImportRequest::Namespace {
            return Classification::known(Category::Const);
        }

        let module = match modules.get_or_load(file) {
            Ok(module) => module,
            Err(err) => {
                tracing::debug!(error = %err, "Cannot classify symbol");
                return Classification::unknown(FallbackReason::ParseFailed);
            }
        };

        match self.lookup(&module, name, request, modules, cache) {
            Ok(Found::Declaration { decl, jsx }) => {
                let decl_name = decl.name.as_deref().unwrap_or(name);
                match category_for(decl.kind, decl_name, jsx) {
                    Category::Unknown => Classification::unknown(FallbackReason::NoDeclaration),
                    category => Classification::known(category),
                }
            }
            Ok(Found::Namespace) => Classification::known(Category::Const),
            Ok(Found::Asset(category)) => Classification::known(category),
            Err(reason) => Classification::unknown(reason),
        }
    }

    /// Find the export `request` refers to in `module`.
    ///
    /// Default imports try the importer's binding name first, then the
    /// default export.
    fn lookup(
        &self,
        module: &ModuleInfo,
        name: &str,
        request: &ImportRequest,
        modules: &mut ModuleStore,
        cache: &mut ResolverCache,
    ) -> Result<Found, FallbackReason> {
        let candidates: Vec<&str> = match request {
            ImportRequest::Default => vec![name, "default"],
            ImportRequest::Named(imported) => vec![imported.as_str()],
            ImportRequest::Namespace => return Ok(Found::Namespace),
        };

        for candidate in candidates {
            if let Some(binding) = module.exports.get(candidate) {
                return self.follow_binding(module, binding, modules, cache);
            }
        }

        // `export * from` re-exports count as the single hop.
        let wanted = request.export_name().unwrap_or(name);
        for source in &module.star_exports {
            let hop = ImportRequest::Named(wanted.to_string());
            match self.hop(module, source, &hop, modules, cache) {
                Ok(found) => return Ok(found),
                Err(FallbackReason::SymbolNotFound) => continue,
                Err(other) => return Err(other),
            }
        }

        Err(FallbackReason::SymbolNotFound)
    }

    fn follow_binding(
        &self,
        module: &ModuleInfo,
        binding: &ExportBinding,
        modules: &mut ModuleStore,
        cache: &mut ResolverCache,
    ) -> Result<Found, FallbackReason> {
        match binding {
            ExportBinding::Local(decl) => Ok(Found::Declaration {
                decl: decl.clone(),
                jsx: module.jsx,
            }),
            ExportBinding::Alias(local) => {
                if let Some(found) = local_declaration(module, local) {
                    return Ok(found);
                }
                match module.imported.get(local) {
                    Some((source, request)) => self.hop(module, source, request, modules, cache),
                    None => Err(FallbackReason::NoDeclaration),
                }
            }
            ExportBinding::ReExport { source, request } => {
                self.hop(module, source, request, modules, cache)
            }
        }
    }

    /// Follow one import from `module` and look `request` up directly in
    /// the target, without further hops.
    fn hop(
        &self,
        module: &ModuleInfo,
        specifier: &str,
        request: &ImportRequest,
        modules: &mut ModuleStore,
        cache: &mut ResolverCache,
    ) -> Result<Found, FallbackReason> {
        let target = match self.resolver.resolve(specifier, &module.path, cache) {
            ResolvedTarget::File(path) => path,
            ResolvedTarget::External(_) => return Err(FallbackReason::OutsideProject),
            ResolvedTarget::Unresolved => return Err(FallbackReason::SymbolNotFound),
        };
        if let Some(category) = asset_category(&target) {
            return Ok(Found::Asset(category));
        }
        let Some(name) = request.export_name() else {
            return Ok(Found::Namespace);
        };
        if !ModuleInfo::is_script(&target) {
            return Err(FallbackReason::OutsideProject);
        }
        let target = modules
            .get_or_load(&target)
            .map_err(|_| FallbackReason::ParseFailed)?;

        match target.exports.get(name) {
            Some(ExportBinding::Local(decl)) => Ok(Found::Declaration {
                decl: decl.clone(),
                jsx: target.jsx,
            }),
            Some(ExportBinding::Alias(local)) => {
                local_declaration(&target, local).ok_or(FallbackReason::NoDeclaration)
            }
            Some(ExportBinding::ReExport { .. }) => Err(FallbackReason::NoDeclaration),
            None => Err(FallbackReason::SymbolNotFound),
        }
    }
}

fn local_declaration(module: &ModuleInfo, local: &str) -> Option<Found> {
    module.declarations.get(local).map(|kind| Found::Declaration {
        decl: LocalDeclaration {
            name: Some(local.to_string()),
            kind: *kind,
        },
        jsx: module.jsx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::VariableShape;

    #[test]
    fn test_asset_category() {
        assert_eq!(asset_category(Path::new("a/logo.SVG")), Some(Category::Media));
        assert_eq!(asset_category(Path::new("a/photo.avif")), Some(Category::Media));
        assert_eq!(asset_category(Path::new("app.module.scss")), Some(Category::Style));
        assert_eq!(asset_category(Path::new("theme.styl")), Some(Category::Style));
        assert_eq!(asset_category(Path::new("App.tsx")), None);
    }

    #[test]
    fn test_hook_names() {
        assert!(is_hook_name("useCounter"));
        assert!(is_hook_name("useX"));
        assert!(!is_hook_name("use"));
        assert!(!is_hook_name("user"));
        assert!(!is_hook_name("UseCounter"));
    }

    #[test]
    fn test_category_for_declarations() {
        assert_eq!(category_for(DeclarationKind::Enum, "Color", false), Category::Enum);
        assert_eq!(category_for(DeclarationKind::Interface, "Props", true), Category::Interface);
        assert_eq!(category_for(DeclarationKind::TypeAlias, "Id", false), Category::Type);
        assert_eq!(category_for(DeclarationKind::Class, "Store", false), Category::Component);
        assert_eq!(category_for(DeclarationKind::Function, "format", true), Category::Function);
        assert_eq!(category_for(DeclarationKind::Function, "Page", true), Category::Component);
        assert_eq!(category_for(DeclarationKind::Function, "Page", false), Category::Function);
        assert_eq!(category_for(DeclarationKind::Other, "ns", false), Category::Unknown);
    }

    #[test]
    fn test_category_for_variables() {
        let plain = DeclarationKind::Variable(VariableShape::default());
        let callable = DeclarationKind::Variable(VariableShape {
            callable: true,
            ..Default::default()
        });
        let factory = DeclarationKind::Variable(VariableShape {
            component_factory: true,
            ..Default::default()
        });
        let annotated = DeclarationKind::Variable(VariableShape {
            callable: true,
            component_annotation: true,
            ..Default::default()
        });

        assert_eq!(category_for(plain, "LIMIT", true), Category::Const);
        assert_eq!(category_for(callable, "Header", true), Category::Component);
        assert_eq!(category_for(callable, "Header", false), Category::Const);
        assert_eq!(category_for(callable, "formatDate", false), Category::Function);
        assert_eq!(category_for(factory, "List", false), Category::Component);
        assert_eq!(category_for(annotated, "Card", false), Category::Component);
    }
}
