//! Import resolution: merged views, caching across generations and cycles.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use msbuild::hir::{DiagnosticKind, Resolver, SymbolKind};
use msbuild::project::{RealFileSystem, ResolveOptions, RuntimeInformation, ToolsVersion};
use msbuild::syntax::XDocument;
use msbuild::TextSize;
use tokio_util::sync::CancellationToken;

use crate::helpers::diagnostic_helpers::{assert_no_diagnostics, diagnostics_of};
use crate::helpers::project_fixtures::{
    COMMON_PROPS, CYCLE_A, CYCLE_B, IMPORTS_COMMON, SELF_IMPORT,
};
use crate::helpers::resolve_helpers::{memory_fs, project_path, resolve_text, resolver_for};

fn common_path() -> PathBuf {
    PathBuf::from(project_path("common.props"))
}

// =============================================================================
// MERGED VIEWS
// =============================================================================

#[test]
fn test_imported_symbols_are_visible() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let ctx = resolve_text(&resolver_for(&fs), "app.proj", IMPORTS_COMMON, None);

    assert_no_diagnostics(&ctx);
    assert_eq!(ctx.resolved_imports().len(), 1);
    assert!(ctx.resolved_imports().contains_key(&common_path()));
    assert!(ctx.property("Shared").is_some());
    assert!(ctx.property("Own").is_some());
    assert!(ctx.item("Compile").unwrap().metadata.contains("Link"));
    assert!(ctx.task("Csc").unwrap().parameters.contains("Sources"));
}

#[test]
fn test_private_imported_symbols_are_hidden() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let ctx = resolve_text(&resolver_for(&fs), "app.proj", IMPORTS_COMMON, None);

    assert!(ctx.property("_PrivateShared").is_none());
    assert!(ctx.properties(false).get("_PrivateShared").is_none());
    assert!(ctx.items().get("_Hidden").is_none());
}

#[test]
fn test_private_symbols_shown_when_enabled() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let resolver = resolver_for(&fs).with_options(ResolveOptions {
        show_private_symbols: true,
        ..ResolveOptions::default()
    });
    let ctx = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, None);
    assert!(ctx.property("_PrivateShared").is_some());
    assert!(ctx.items().get("_Hidden").is_some());
}

#[test]
fn test_own_private_symbols_are_always_visible() {
    let fs = memory_fs(&[]);
    let ctx = resolve_text(
        &resolver_for(&fs),
        "app.proj",
        "<Project><PropertyGroup><_Mine>1</_Mine></PropertyGroup></Project>",
        None,
    );
    assert!(ctx.property("_Mine").is_some());
}

#[test]
fn test_files_seen_in_lists_root_first() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let ctx = resolve_text(&resolver_for(&fs), "app.proj", IMPORTS_COMMON, None);
    let files = ctx.files_seen_in(SymbolKind::Property, "shared");
    assert_eq!(files, vec![PathBuf::from(project_path("app.proj")), common_path()]);
    assert_eq!(ctx.files_seen_in(SymbolKind::Metadata, "Link"), vec![common_path()]);
}

#[test]
fn test_import_navigation() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let ctx = resolve_text(&resolver_for(&fs), "app.proj", IMPORTS_COMMON, None);
    let doc = ctx.document();

    let (import_id, _) = doc
        .elements()
        .find(|(_, e)| e.name.local == "Import")
        .unwrap();
    assert_eq!(ctx.import_target(import_id), Some(common_path().as_path()));

    let offset = IMPORTS_COMMON.find("common.props").unwrap() as u32 + 2;
    assert_eq!(ctx.import_at(TextSize::new(offset)), Some(common_path().as_path()));
    assert!(ctx.import_at(TextSize::new(0)).is_none());
}

// =============================================================================
// CACHING ACROSS GENERATIONS
// =============================================================================

#[test]
fn test_unchanged_import_is_reused() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let resolver = resolver_for(&fs);

    let first = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, None);
    let reformatted = IMPORTS_COMMON.replace("  ", "    ");
    let second = resolve_text(&resolver, "app.proj", &reformatted, Some(&first));

    let a = &first.resolved_imports()[&common_path()];
    let b = &second.resolved_imports()[&common_path()];
    assert!(Arc::ptr_eq(a, b));
    assert_eq!(fs.read_count(&common_path()), 1);
}

#[test]
fn test_content_change_without_mtime_change_is_not_seen() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let resolver = resolver_for(&fs);

    let first = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, None);
    fs.write_preserving_mtime(&common_path(), "<Project />");
    let second = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, Some(&first));

    assert!(second.property("Shared").is_some());
    assert_eq!(fs.read_count(&common_path()), 1);
}

#[test]
fn test_rewritten_import_is_reread() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let resolver = resolver_for(&fs);

    let first = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, None);
    fs.write(
        project_path("common.props"),
        "<Project><PropertyGroup><Replaced>1</Replaced></PropertyGroup></Project>",
    );
    let second = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, Some(&first));

    assert_eq!(fs.read_count(&common_path()), 2);
    assert!(!Arc::ptr_eq(
        &first.resolved_imports()[&common_path()],
        &second.resolved_imports()[&common_path()],
    ));
    assert!(second.property("Replaced").is_some());
    assert!(second.own_symbols().contains(SymbolKind::Property, "Shared"));
    assert!(second.resolved_imports()[&common_path()].symbols.properties.get("Shared").is_none());
}

#[test]
fn test_tools_version_change_drops_cache() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let resolver = resolver_for(&fs);

    let first = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, None);
    let versioned = IMPORTS_COMMON.replace("<Project>", r#"<Project ToolsVersion="4.0">"#);
    let second = resolve_text(&resolver, "app.proj", &versioned, Some(&first));

    assert_eq!(second.tools_version(), ToolsVersion::V4_0);
    assert_eq!(fs.read_count(&common_path()), 2);
}

#[test]
fn test_deleted_import_is_reported() {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    let resolver = resolver_for(&fs);

    let first = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, None);
    assert!(fs.remove(&common_path()));
    let second = resolve_text(&resolver, "app.proj", IMPORTS_COMMON, Some(&first));

    assert!(second.resolved_imports().is_empty());
    assert_eq!(diagnostics_of(&second, DiagnosticKind::UnresolvedImport).len(), 1);
}

// =============================================================================
// CYCLES
// =============================================================================

#[test]
fn test_self_import_terminates() {
    let fs = memory_fs(&[("self.proj", SELF_IMPORT)]);
    let ctx = resolve_text(&resolver_for(&fs), "self.proj", SELF_IMPORT, None);

    assert!(ctx.resolved_imports().is_empty());
    assert!(ctx.property("SelfProp").is_some());
    assert_eq!(fs.read_count(Path::new(&project_path("self.proj"))), 0);
}

#[test]
fn test_mutual_imports_terminate() {
    let fs = memory_fs(&[("a.props", CYCLE_A), ("b.props", CYCLE_B)]);
    let ctx = resolve_text(&resolver_for(&fs), "a.props", CYCLE_A, None);

    let imported: Vec<_> = ctx.resolved_imports().keys().cloned().collect();
    assert_eq!(imported, vec![PathBuf::from(project_path("b.props"))]);
    assert_eq!(fs.read_count(Path::new(&project_path("b.props"))), 1);

    assert!(ctx.property("FromA").is_some());
    assert!(ctx.property("FromB").is_some());
    let shared = ctx.item("Shared").unwrap();
    assert_eq!(shared.metadata.len(), 2);
    assert_eq!(ctx.items().len(), 1);
}

// =============================================================================
// REAL FILE SYSTEM
// =============================================================================

#[test]
fn test_resolves_imports_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let common = dir.path().join("common.props");
    std::fs::write(&common, COMMON_PROPS).unwrap();
    let project = dir.path().join("app.proj");
    std::fs::write(&project, IMPORTS_COMMON).unwrap();

    let resolver = Resolver::new(Arc::new(RealFileSystem), RuntimeInformation::default());
    let document = Arc::new(XDocument::parse(IMPORTS_COMMON));
    let ctx = resolver
        .resolve(&project, document, None, &CancellationToken::new())
        .unwrap();

    assert_no_diagnostics(&ctx);
    assert_eq!(ctx.resolved_imports().len(), 1);
    assert!(ctx.property("Shared").is_some());
}
