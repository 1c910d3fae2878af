//! Resolution of one document generation.
//!
//! [`Resolver::resolve`] turns a parsed document into a [`ResolveContext`]:
//!
//! 1. **Populate** - walk the document, recording items, properties, tasks,
//!    metadata and raw imports into [`FileSymbols`]
//! 2. **Merge** - if the document has errors, union in the previous
//!    generation's own symbols so a broken edit keeps completion working
//! 3. **Resolve imports** - evaluate each import path, then reuse the
//!    previous generation's [`ParsedImport`] when the file is unchanged or
//!    parse it fresh (off-thread) otherwise
//!
//! Imports are flattened: every transitively imported file appears once in
//! [`ResolveContext::resolved_imports`], which also makes import cycles
//! terminate.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::builtins::Builtins;
use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::eval::{ImportEvaluationContext, is_wildcard};
use super::symbols::{
    ItemInfo, MetadataInfo, PropertyInfo, SymbolInfo, SymbolKind, SymbolMap, TaskInfo,
};
use super::visitor::{DocumentWalker, MsBuildVisitor};
use crate::base::{is_private_name, resolve_relative};
use crate::parser::Reference;
use crate::project::{FileSystem, ResolveOptions, RuntimeInformation, ToolsVersion};
use crate::schema::{MsBuildElement, MsBuildKind, Schema};
use crate::syntax::{ElementId, XDocument, XElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("resolution was cancelled")]
    Cancelled,
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), ResolveError> {
    if cancel.is_cancelled() {
        return Err(ResolveError::Cancelled);
    }
    Ok(())
}

// ============================================================================
// IMPORT SITES
// ============================================================================

/// Where an import points after evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
    /// Absolute candidate paths; the first existing one wins.
    Candidates(Vec<PathBuf>),
    /// The `Project` attribute is missing or blank.
    Empty,
    /// An SDK import with no SDKs directory configured.
    Sdk,
    /// Glob patterns are expanded by evaluation, not here.
    Wildcard,
    Unevaluable(String),
}

/// One import as written in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    /// `None` for sites carried over from a previous generation.
    pub element: Option<ElementId>,
    /// The raw `Project` value.
    pub project: SmolStr,
    /// Span diagnostics and navigation attach to.
    pub range: Option<TextRange>,
    pub target: ImportTarget,
}

// ============================================================================
// FILE SYMBOLS
// ============================================================================

/// Everything one file declares, without its imports.
#[derive(Debug, Clone, Default)]
pub struct FileSymbols {
    pub items: SymbolMap<ItemInfo>,
    pub tasks: SymbolMap<TaskInfo>,
    pub properties: SymbolMap<PropertyInfo>,
    /// Raw `Project` values of `Import` elements, unevaluated.
    pub imports: IndexSet<SmolStr>,
    pub import_sites: Vec<ImportSite>,
    pub annotations: FxHashMap<ElementId, MsBuildKind>,
    pub diagnostics: Vec<Diagnostic>,
}

/// What populating a file needs besides the document.
struct PopulateScope<'a> {
    schema: &'a Schema,
    builtins: &'static Builtins,
    runtime: &'a RuntimeInformation,
    eval: ImportEvaluationContext,
}

impl FileSymbols {
    fn collect(file: &Path, document: &XDocument, scope: &PopulateScope<'_>) -> Self {
        let mut populator = Populator {
            symbols: FileSymbols::default(),
            scope,
            base_dir: file.parent(),
            sdk_targets: Vec::new(),
        };
        let result = DocumentWalker::new(scope.schema, document).run(&mut populator);

        let mut symbols = populator.finish();
        symbols.annotations = result.annotations;
        symbols.diagnostics = result.diagnostics.into_diagnostics();
        symbols
    }

    pub fn contains(&self, kind: SymbolKind, name: &str) -> bool {
        match kind {
            SymbolKind::Item => self.items.contains(name),
            SymbolKind::Property => self.properties.contains(name),
            SymbolKind::Task => self.tasks.contains(name),
            SymbolKind::Metadata => self.items.values().any(|item| item.metadata.contains(name)),
            SymbolKind::TaskParameter => {
                self.tasks.values().any(|task| task.parameters.contains(name))
            }
        }
    }

    /// Union in symbols a previous generation knew about.
    fn merge_from(&mut self, previous: &FileSymbols) {
        for item in previous.items.values() {
            match self.items.get_mut(&item.name) {
                Some(existing) => existing.merge_from(item),
                None => {
                    self.items.insert(&item.name, item.clone());
                }
            }
        }
        for task in previous.tasks.values() {
            match self.tasks.get_mut(&task.name) {
                Some(existing) => existing.merge_from(task),
                None => {
                    self.tasks.insert(&task.name, task.clone());
                }
            }
        }
        for property in previous.properties.values() {
            if !self.properties.contains(&property.name) {
                self.properties.insert(&property.name, property.clone());
            }
        }

        for raw in &previous.imports {
            self.imports.insert(raw.clone());
        }
        for site in &previous.import_sites {
            if !matches!(site.target, ImportTarget::Candidates(_)) {
                continue;
            }
            if self.import_sites.iter().any(|s| s.target == site.target) {
                continue;
            }
            self.import_sites.push(ImportSite {
                element: None,
                range: None,
                ..site.clone()
            });
        }
    }
}

struct Populator<'a> {
    symbols: FileSymbols,
    scope: &'a PopulateScope<'a>,
    base_dir: Option<&'a Path>,
    /// Implicit `Sdk.targets` imports, which come after everything else.
    sdk_targets: Vec<ImportSite>,
}

impl Populator<'_> {
    fn finish(mut self) -> FileSymbols {
        self.symbols.import_sites.append(&mut self.sdk_targets);
        self.symbols
    }

    fn add_property(&mut self, name: &str) {
        self.symbols
            .properties
            .get_or_insert_with(name, || PropertyInfo::new(name));
    }

    fn item(&mut self, name: &str) -> &mut ItemInfo {
        self.symbols
            .items
            .get_or_insert_with(name, || ItemInfo::new(name))
    }

    fn import_target(&self, project: &str, sdk: Option<&str>) -> ImportTarget {
        if project.trim().is_empty() {
            return ImportTarget::Empty;
        }
        let candidates = match self.scope.eval.evaluate(project) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(project, %err, "import path could not be evaluated");
                return ImportTarget::Unevaluable(err.to_string());
            }
        };
        if candidates.iter().any(|c| is_wildcard(c)) {
            return ImportTarget::Wildcard;
        }

        let sdk_dir;
        let base = match sdk {
            Some(sdk) => match self.scope.runtime.sdk_directory(sdk) {
                Some(dir) => {
                    sdk_dir = dir;
                    Some(sdk_dir.as_path())
                }
                None => return ImportTarget::Sdk,
            },
            None => self.base_dir,
        };
        ImportTarget::Candidates(
            candidates
                .iter()
                .map(|candidate| resolve_relative(base, candidate.trim()))
                .collect(),
        )
    }

    /// `<Project Sdk="A;B">` imports `Sdk.props` first and `Sdk.targets`
    /// last from every listed SDK.
    fn add_sdk_imports(&mut self, id: ElementId, element: &XElement) {
        let Some(attribute) = element.attribute("Sdk") else {
            return;
        };
        for sdk in attribute.value.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            for (project, last) in [("Sdk.props", false), ("Sdk.targets", true)] {
                let site = ImportSite {
                    element: Some(id),
                    project: SmolStr::new(project),
                    range: Some(attribute.value_range),
                    target: self.import_target(project, Some(sdk)),
                };
                if last {
                    self.sdk_targets.push(site);
                } else {
                    self.symbols.import_sites.push(site);
                }
            }
        }
    }
}

impl MsBuildVisitor for Populator<'_> {
    fn visit_element(&mut self, id: ElementId, element: &XElement, kind: &MsBuildElement) {
        match kind.kind {
            MsBuildKind::Project => self.add_sdk_imports(id, element),
            MsBuildKind::Output => {
                if let Some(name) = element.attribute_value("PropertyName") {
                    if !name.is_empty() {
                        self.add_property(name);
                    }
                }
                if let Some(name) = element.attribute_value("ItemName") {
                    if !name.is_empty() {
                        self.item(name);
                    }
                }
            }
            _ => {}
        }
    }

    fn visit_item(&mut self, _id: ElementId, element: &XElement, kind: &MsBuildElement) {
        let item = self.item(&element.name.local);
        for attribute in &element.attributes {
            if attribute.name.has_prefix() || kind.has_attribute(&attribute.name.local) {
                continue;
            }
            item.add_metadata(&attribute.name.local);
        }
    }

    fn visit_metadata(&mut self, item: &XElement, element: &XElement) {
        self.item(&item.name.local).add_metadata(&element.name.local);
    }

    fn visit_property(&mut self, _id: ElementId, element: &XElement) {
        self.add_property(&element.name.local);
    }

    fn visit_task(&mut self, _id: ElementId, element: &XElement, kind: &MsBuildElement) {
        let task = self
            .symbols
            .tasks
            .get_or_insert_with(&element.name.local, || TaskInfo::new(element.name.local.as_str()));
        for attribute in &element.attributes {
            if attribute.name.has_prefix() || kind.has_attribute(&attribute.name.local) {
                continue;
            }
            task.add_parameter(&attribute.name.local);
        }
    }

    fn visit_import(&mut self, id: ElementId, element: &XElement) {
        let project = element.attribute("Project");
        let raw = project.map(|a| a.value.as_str()).unwrap_or("");
        let range = project.map(|a| a.value_range).unwrap_or(element.name_range);
        if !raw.trim().is_empty() {
            self.symbols.imports.insert(SmolStr::new(raw));
        }

        let target = self.import_target(raw, element.attribute_value("Sdk"));
        self.symbols.import_sites.push(ImportSite {
            element: Some(id),
            project: SmolStr::new(raw),
            range: Some(range),
            target,
        });
    }

    fn visit_reference(&mut self, reference: &Reference, enclosing_item: Option<&str>) {
        let builtins = self.scope.builtins;
        match reference {
            Reference::Property { name, .. } => {
                if !builtins.is_property(name) {
                    self.add_property(name);
                }
            }
            Reference::Item { name, .. } => {
                self.item(name);
            }
            Reference::Metadata { item, name, .. } => {
                if builtins.is_metadata(name) {
                    return;
                }
                if let Some(item) = item.as_deref().or(enclosing_item) {
                    self.item(item).add_metadata(name);
                }
            }
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// A parsed import, shared between generations while its file is unchanged.
#[derive(Debug)]
pub struct ParsedImport {
    pub filename: PathBuf,
    /// Modification time observed before the file was read.
    pub timestamp: SystemTime,
    pub document: Arc<XDocument>,
    pub symbols: FileSymbols,
}

/// Resolves documents against one file system and installation.
#[derive(Clone)]
pub struct Resolver {
    fs: Arc<dyn FileSystem>,
    runtime: Arc<RuntimeInformation>,
    options: ResolveOptions,
    schema: &'static Schema,
}

impl Resolver {
    pub fn new(fs: Arc<dyn FileSystem>, runtime: RuntimeInformation) -> Self {
        Self {
            fs,
            runtime: Arc::new(runtime),
            options: ResolveOptions::default(),
            schema: Schema::standard(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_schema(mut self, schema: &'static Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub fn runtime(&self) -> &RuntimeInformation {
        &self.runtime
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Resolve `document`, the current text of `file`.
    ///
    /// `previous` is the last published generation of the same file; its
    /// imports are reused when unchanged on disk.
    pub fn resolve(
        &self,
        file: &Path,
        document: Arc<XDocument>,
        previous: Option<&ResolveContext>,
        cancel: &CancellationToken,
    ) -> Result<ResolveContext, ResolveError> {
        check_cancelled(cancel)?;

        let tools_version = document
            .root_element()
            .and_then(|root| root.attribute_value("ToolsVersion"))
            .map(ToolsVersion::parse)
            .unwrap_or_default();
        let builtins = Builtins::for_tools_version(tools_version);
        let project_eval = ImportEvaluationContext::new(&self.runtime).with_project(file);

        let scope = PopulateScope {
            schema: self.schema,
            builtins,
            runtime: &self.runtime,
            eval: project_eval.for_file(file),
        };
        let mut symbols = FileSymbols::collect(file, &document, &scope);
        check_cancelled(cancel)?;

        if let Some(previous) = previous {
            if symbols.diagnostics.iter().any(Diagnostic::is_error) {
                debug!(file = %file.display(), "document has errors, keeping previous symbols");
                symbols.merge_from(&previous.symbols);
            }
        }

        let reusable = previous.filter(|p| p.tools_version == tools_version);
        let mut walk = ImportWalk {
            resolver: self,
            root: file,
            project_eval: &project_eval,
            builtins,
            reusable,
            cancel,
            resolved: IndexMap::new(),
            targets: FxHashMap::default(),
            links: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        };
        let sites = symbols.import_sites.clone();
        walk.resolve_sites(&sites, true)?;
        check_cancelled(cancel)?;

        let mut diagnostics = symbols.diagnostics.clone();
        diagnostics.extend(walk.diagnostics.into_diagnostics());
        debug!(
            file = %file.display(),
            imports = walk.resolved.len(),
            diagnostics = diagnostics.len(),
            "resolved document"
        );

        Ok(ResolveContext {
            file: file.to_path_buf(),
            document,
            tools_version,
            builtins,
            symbols,
            resolved_imports: walk.resolved,
            import_targets: walk.targets,
            import_links: walk.links,
            diagnostics,
            show_private_symbols: self.options.show_private_symbols,
        })
    }
}

/// State of one import graph traversal.
struct ImportWalk<'a> {
    resolver: &'a Resolver,
    root: &'a Path,
    project_eval: &'a ImportEvaluationContext,
    builtins: &'static Builtins,
    reusable: Option<&'a ResolveContext>,
    cancel: &'a CancellationToken,
    resolved: IndexMap<PathBuf, Arc<ParsedImport>>,
    targets: FxHashMap<ElementId, PathBuf>,
    links: Vec<(TextRange, PathBuf)>,
    diagnostics: DiagnosticCollector,
}

impl ImportWalk<'_> {
    /// `report` is set for the root document's own sites; problems inside
    /// imported files belong to those files.
    fn resolve_sites(&mut self, sites: &[ImportSite], report: bool) -> Result<(), ResolveError> {
        let located: Vec<Option<PathBuf>> = sites.iter().map(|site| self.locate(site)).collect();

        // Read and parse new files in parallel before walking them in order.
        let mut seen = FxHashSet::default();
        let fresh: Vec<PathBuf> = located
            .iter()
            .flatten()
            .filter(|path| !self.is_known(path) && seen.insert((*path).clone()))
            .filter(|path| self.reuse(path).is_none())
            .cloned()
            .collect();
        let mut loaded: FxHashMap<PathBuf, Option<Arc<ParsedImport>>> = fresh
            .into_par_iter()
            .map(|path| {
                let parsed = self.load(&path);
                (path, parsed)
            })
            .collect();

        for (site, located) in sites.iter().zip(located) {
            check_cancelled(self.cancel)?;
            let Some(path) = self.check_site(site, located, report) else {
                continue;
            };

            if report {
                if let Some(element) = site.element {
                    self.targets.entry(element).or_insert_with(|| path.clone());
                }
                if let Some(range) = site.range {
                    self.links.push((range, path.clone()));
                }
            }
            if self.is_known(&path) {
                continue;
            }

            let parsed = match self.reuse(&path) {
                Some(parsed) => parsed,
                None => {
                    let fresh = match loaded.remove(&path) {
                        Some(fresh) => fresh,
                        None => self.load(&path),
                    };
                    match fresh {
                        Some(parsed) => parsed,
                        None => continue,
                    }
                }
            };
            self.resolved.insert(path, Arc::clone(&parsed));
            self.resolve_sites(&parsed.symbols.import_sites, false)?;
        }
        Ok(())
    }

    /// The root itself and anything already resolved are never entered
    /// again.
    fn is_known(&self, path: &Path) -> bool {
        path == self.root || self.resolved.contains_key(path)
    }

    fn locate(&self, site: &ImportSite) -> Option<PathBuf> {
        match &site.target {
            ImportTarget::Candidates(candidates) => candidates
                .iter()
                .find(|path| self.resolver.fs.exists(path))
                .cloned(),
            _ => None,
        }
    }

    fn check_site(
        &mut self,
        site: &ImportSite,
        located: Option<PathBuf>,
        report: bool,
    ) -> Option<PathBuf> {
        let range = site.range.filter(|_| report);
        match &site.target {
            ImportTarget::Candidates(_) => {
                if located.is_none() {
                    debug!(project = %site.project, "import not found");
                    if let Some(range) = range {
                        self.diagnostics.unresolved_import(
                            format!("Could not resolve import '{}'", site.project),
                            range,
                        );
                    }
                }
                located
            }
            ImportTarget::Empty => {
                if let Some(range) = range {
                    self.diagnostics.empty_import(range);
                }
                None
            }
            ImportTarget::Unevaluable(reason) => {
                if let Some(range) = range {
                    self.diagnostics.unresolved_import(
                        format!("Could not evaluate import '{}': {reason}", site.project),
                        range,
                    );
                }
                None
            }
            ImportTarget::Sdk | ImportTarget::Wildcard => {
                debug!(project = %site.project, target = ?site.target, "skipping import");
                None
            }
        }
    }

    /// The previous generation's import, if the file has not changed since.
    fn reuse(&self, path: &Path) -> Option<Arc<ParsedImport>> {
        let cached = self.reusable?.resolved_imports.get(path)?;
        match self.resolver.fs.modified(path) {
            Ok(modified) if modified <= cached.timestamp => {
                debug!(path = %path.display(), "import cache hit");
                Some(Arc::clone(cached))
            }
            _ => {
                debug!(path = %path.display(), "import cache stale");
                None
            }
        }
    }

    fn load(&self, path: &Path) -> Option<Arc<ParsedImport>> {
        if self.cancel.is_cancelled() {
            return None;
        }
        let fs = &self.resolver.fs;
        let timestamp = match fs.modified(path) {
            Ok(timestamp) => timestamp,
            Err(err) => {
                error!(path = %path.display(), %err, "failed to read import");
                return None;
            }
        };
        let text = match fs.read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                error!(path = %path.display(), %err, "failed to read import");
                return None;
            }
        };

        let document = Arc::new(XDocument::parse(&text));
        let scope = PopulateScope {
            schema: self.resolver.schema,
            builtins: self.builtins,
            runtime: &self.resolver.runtime,
            eval: self.project_eval.for_file(path),
        };
        let symbols = FileSymbols::collect(path, &document, &scope);
        debug!(path = %path.display(), "import cache miss, parsed");

        Some(Arc::new(ParsedImport {
            filename: path.to_path_buf(),
            timestamp,
            document,
            symbols,
        }))
    }
}

// ============================================================================
// RESOLVE CONTEXT
// ============================================================================

/// One immutable generation of a resolved document.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    file: PathBuf,
    document: Arc<XDocument>,
    tools_version: ToolsVersion,
    builtins: &'static Builtins,
    symbols: FileSymbols,
    resolved_imports: IndexMap<PathBuf, Arc<ParsedImport>>,
    import_targets: FxHashMap<ElementId, PathBuf>,
    import_links: Vec<(TextRange, PathBuf)>,
    diagnostics: Vec<Diagnostic>,
    show_private_symbols: bool,
}

impl ResolveContext {
    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn document(&self) -> &Arc<XDocument> {
        &self.document
    }

    pub fn tools_version(&self) -> ToolsVersion {
        self.tools_version
    }

    pub fn builtins(&self) -> &'static Builtins {
        self.builtins
    }

    /// Symbols declared by this document alone.
    pub fn own_symbols(&self) -> &FileSymbols {
        &self.symbols
    }

    /// Raw `Project` values as written, before evaluation.
    pub fn imports(&self) -> &IndexSet<SmolStr> {
        &self.symbols.imports
    }

    /// Every transitively imported file, in resolution order.
    pub fn resolved_imports(&self) -> &IndexMap<PathBuf, Arc<ParsedImport>> {
        &self.resolved_imports
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn kind_of(&self, element: ElementId) -> Option<MsBuildKind> {
        self.symbols.annotations.get(&element).copied()
    }

    /// The file an `Import` element resolved to.
    pub fn import_target(&self, element: ElementId) -> Option<&Path> {
        self.import_targets.get(&element).map(PathBuf::as_path)
    }

    /// The import whose `Project` (or `Sdk`) value contains `offset`.
    pub fn import_at(&self, offset: TextSize) -> Option<&Path> {
        self.import_links
            .iter()
            .find(|(range, _)| range.contains_inclusive(offset))
            .map(|(_, path)| path.as_path())
    }

    // ------------------------------------------------------------------------
    // Merged views
    // ------------------------------------------------------------------------

    fn visible(&self, name: &str) -> bool {
        self.show_private_symbols || !is_private_name(name)
    }

    fn merged<T: Clone + SymbolInfo>(
        &self,
        mut merged: SymbolMap<T>,
        table: fn(&FileSymbols) -> &SymbolMap<T>,
        merge: fn(&mut T, &T),
    ) -> SymbolMap<T> {
        let declared = table(&self.symbols).values().map(|value| (value, true));
        let imported = self
            .resolved_imports
            .values()
            .flat_map(|import| table(&import.symbols).values())
            .map(|value| (value, false));

        for (value, own) in declared.chain(imported) {
            if !own && !self.visible(value.name()) {
                continue;
            }
            match merged.get_mut(value.name()) {
                Some(existing) => merge(existing, value),
                None => {
                    merged.insert(value.name(), value.clone());
                }
            }
        }
        merged
    }

    /// Items of this document and its imports, metadata unioned.
    pub fn items(&self) -> SymbolMap<ItemInfo> {
        self.merged(SymbolMap::new(), |s| &s.items, ItemInfo::merge_from)
    }

    /// One symbol from this document's table, merged with each visible
    /// import's entry in import order.
    fn lookup<T: Clone>(
        &self,
        name: &str,
        table: fn(&FileSymbols) -> &SymbolMap<T>,
        merge: fn(&mut T, &T),
    ) -> Option<T> {
        let visible = self.visible(name);
        let imported = self
            .resolved_imports
            .values()
            .filter(|_| visible)
            .filter_map(|import| table(&import.symbols).get(name));

        let mut found: Option<T> = None;
        for value in table(&self.symbols).get(name).into_iter().chain(imported) {
            match &mut found {
                Some(existing) => merge(existing, value),
                None => found = Some(value.clone()),
            }
        }
        found
    }

    pub fn item(&self, name: &str) -> Option<ItemInfo> {
        self.lookup(name, |s| &s.items, ItemInfo::merge_from)
    }

    pub fn tasks(&self) -> SymbolMap<TaskInfo> {
        self.merged(SymbolMap::new(), |s| &s.tasks, TaskInfo::merge_from)
    }

    pub fn task(&self, name: &str) -> Option<TaskInfo> {
        self.lookup(name, |s| &s.tasks, TaskInfo::merge_from)
    }

    /// Properties of this document and its imports; builtins come first
    /// when requested.
    pub fn properties(&self, include_builtins: bool) -> SymbolMap<PropertyInfo> {
        let start = if include_builtins {
            self.builtins.properties.clone()
        } else {
            SymbolMap::new()
        };
        self.merged(start, |s| &s.properties, |_, _| {})
    }

    pub fn property(&self, name: &str) -> Option<PropertyInfo> {
        self.lookup(name, |s| &s.properties, |_, _| {})
            .or_else(|| self.builtins.properties.get(name).cloned())
    }

    /// Metadata available on `item`; well-known metadata first when
    /// requested.
    pub fn item_metadata(&self, item: &str, include_builtins: bool) -> Vec<MetadataInfo> {
        let mut metadata = if include_builtins {
            self.builtins.metadata.clone()
        } else {
            SymbolMap::new()
        };
        if let Some(item) = self.item(item) {
            for value in item.metadata.values() {
                if !metadata.contains(&value.name) {
                    metadata.insert(&value.name, value.clone());
                }
            }
        }
        metadata.values().cloned().collect()
    }

    /// Files that declare or reference the symbol, this document first.
    pub fn files_seen_in(&self, kind: SymbolKind, name: &str) -> Vec<PathBuf> {
        let own = self
            .symbols
            .contains(kind, name)
            .then(|| self.file.clone());
        let imported = self
            .resolved_imports
            .iter()
            .filter(|(_, import)| import.symbols.contains(kind, name))
            .map(|(path, _)| path.clone());
        own.into_iter().chain(imported).collect()
    }
}
