//! Single-document resolution: symbol tables, diagnostics and merging.

use msbuild::hir::{DiagnosticKind, SymbolKind, codes};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{assert_no_diagnostics, diagnostics_of};
use crate::helpers::project_fixtures::{
    MISSING_IMPORT, PROPERTY_AND_ITEM, PROPERTY_AND_ITEM_REFORMATTED, UNKNOWN_ROOT_CHILD,
};
use crate::helpers::resolve_helpers::{memory_fs, resolve_single, resolve_text, resolver_for};

#[rstest]
#[case(PROPERTY_AND_ITEM)]
#[case(PROPERTY_AND_ITEM_REFORMATTED)]
fn test_property_and_item_are_declared(#[case] text: &str) {
    let ctx = resolve_single(text);
    assert_no_diagnostics(&ctx);
    assert!(ctx.property("Foo").is_some());
    assert!(ctx.item("Bar").is_some());
    assert!(ctx.own_symbols().contains(SymbolKind::Property, "Foo"));
    assert!(ctx.imports().is_empty());
}

#[test]
fn test_unknown_root_child_is_one_error() {
    let ctx = resolve_single(UNKNOWN_ROOT_CHILD);
    let errors: Vec<_> = ctx.diagnostics().iter().filter(|d| d.is_error()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::UNKNOWN_ELEMENT);
    assert!(errors[0].message.contains("UnknownTag"));
    assert!(ctx.has_errors());
}

#[test]
fn test_missing_import_is_one_warning() {
    let ctx = resolve_single(MISSING_IMPORT);
    let warnings = diagnostics_of(&ctx, DiagnosticKind::UnresolvedImport);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, codes::UNRESOLVED_IMPORT);
    assert!(warnings[0].message.contains("missing.props"));
    assert!(!ctx.has_errors());
    assert!(ctx.imports().contains("missing.props"));
    assert!(ctx.resolved_imports().is_empty());
}

#[rstest]
#[case("foo", "bar")]
#[case("FOO", "BAR")]
#[case("Foo", "bAr")]
fn test_lookup_ignores_case(#[case] property: &str, #[case] item: &str) {
    let ctx = resolve_single(PROPERTY_AND_ITEM);
    assert_eq!(ctx.property(property).unwrap().name, "Foo");
    assert_eq!(ctx.items().get(item).unwrap().name, "Bar");
}

#[test]
fn test_tasks_record_parameters() {
    let ctx = resolve_single(
        r#"<Project>
  <Target Name="Build">
    <Csc Sources="@(Compile)" OutputAssembly="a.dll" Condition="true" />
  </Target>
</Project>"#,
    );
    let task = ctx.task("csc").unwrap();
    assert!(task.parameters.contains("Sources"));
    assert!(task.parameters.contains("OutputAssembly"));
    assert!(!task.parameters.contains("Condition"));
}

#[test]
fn test_item_metadata_from_children_and_attributes() {
    let ctx = resolve_single(
        r#"<Project>
  <ItemGroup>
    <Compile Include="a.cs" Link="x">
      <DependentUpon>b.cs</DependentUpon>
    </Compile>
  </ItemGroup>
</Project>"#,
    );
    let names: Vec<_> = ctx
        .item_metadata("Compile", false)
        .into_iter()
        .map(|m| m.name.to_string())
        .collect();
    assert!(names.contains(&"Link".to_string()));
    assert!(names.contains(&"DependentUpon".to_string()));

    let with_builtins = ctx.item_metadata("Compile", true);
    assert!(with_builtins.iter().any(|m| m.name == "FullPath" && m.well_known));
}

#[test]
fn test_builtin_properties_are_opt_in() {
    let ctx = resolve_single(PROPERTY_AND_ITEM);
    assert!(ctx.properties(false).get("MSBuildProjectFile").is_none());
    assert!(ctx.properties(true).get("MSBuildProjectFile").is_some());
}

#[test]
fn test_broken_edit_keeps_previous_symbols_for_one_generation() {
    let fs = memory_fs(&[]);
    let resolver = resolver_for(&fs);

    let good = resolve_text(&resolver, "test.proj", PROPERTY_AND_ITEM, None);
    let broken = resolve_text(
        &resolver,
        "test.proj",
        "<Project><PropertyGroup><Other>1</Other>",
        Some(&good),
    );
    assert!(broken.has_errors());
    assert!(broken.property("Foo").is_some());
    assert!(broken.property("Other").is_some());
    assert!(broken.item("Bar").is_some());

    let fixed = resolve_text(
        &resolver,
        "test.proj",
        "<Project><PropertyGroup><Other>1</Other></PropertyGroup></Project>",
        Some(&broken),
    );
    assert_no_diagnostics(&fixed);
    assert!(fixed.property("Foo").is_none());
    assert!(fixed.property("Other").is_some());
}

#[test]
fn test_error_free_edit_does_not_merge() {
    let fs = memory_fs(&[]);
    let resolver = resolver_for(&fs);
    let first = resolve_text(&resolver, "test.proj", PROPERTY_AND_ITEM, None);
    let second = resolve_text(&resolver, "test.proj", "<Project />", Some(&first));
    assert!(second.property("Foo").is_none());
    assert!(second.items().is_empty());
}

#[test]
fn test_empty_import_warns() {
    let ctx = resolve_single(r#"<Project><Import Project="" /></Project>"#);
    assert_eq!(diagnostics_of(&ctx, DiagnosticKind::EmptyImportValue).len(), 1);
    assert!(ctx.imports().is_empty());
}
