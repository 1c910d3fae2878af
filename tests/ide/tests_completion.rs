//! Completion over a resolved project with imports.

use msbuild::hir::ResolveContext;
use msbuild::ide::{
    CompletionKind, ExpressionTrigger, expression_completions, expression_trigger,
    inferred_attributes, inferred_children, resolve_element_path,
};
use msbuild::schema::{MsBuildKind, Schema};
use rstest::rstest;

use crate::helpers::project_fixtures::{COMMON_PROPS, IMPORTS_COMMON};
use crate::helpers::resolve_helpers::{memory_fs, resolve_text, resolver_for};

fn imported_context() -> ResolveContext {
    let fs = memory_fs(&[("common.props", COMMON_PROPS)]);
    resolve_text(&resolver_for(&fs), "app.proj", IMPORTS_COMMON, None)
}

fn labels(items: &[msbuild::ide::CompletionItem]) -> Vec<&str> {
    items.iter().map(|item| &*item.label).collect()
}

#[test]
fn test_property_group_children_include_imported_properties() {
    let ctx = imported_context();
    let path =
        resolve_element_path(Schema::standard(), &["Project", "PropertyGroup"], None).unwrap();
    let completions = inferred_children(&ctx, &path);
    let names = labels(&completions);
    assert!(names.contains(&"Shared"));
    assert!(names.contains(&"Own"));
    assert!(!names.contains(&"_PrivateShared"));
    assert!(!names.contains(&"MSBuildProjectFile"));
}

#[test]
fn test_item_children_are_metadata() {
    let ctx = imported_context();
    let path = resolve_element_path(
        Schema::standard(),
        &["Project", "ItemGroup", "Compile"],
        None,
    )
    .unwrap();
    let completions = inferred_children(&ctx, &path);
    let link = completions.iter().find(|c| &*c.label == "Link").unwrap();
    assert_eq!(link.kind, CompletionKind::Metadata);
}

#[test]
fn test_target_children_list_schema_elements_first() {
    let ctx = imported_context();
    let path = resolve_element_path(Schema::standard(), &["Project", "Target"], None).unwrap();
    let completions = inferred_children(&ctx, &path);

    let on_error = completions.iter().find(|c| &*c.label == "OnError").unwrap();
    let csc = completions.iter().find(|c| &*c.label == "Csc").unwrap();
    assert_eq!(on_error.kind, CompletionKind::Element);
    assert_eq!(csc.kind, CompletionKind::Task);
    assert!(on_error.sort_priority < csc.sort_priority);
}

#[test]
fn test_task_attributes_include_parameters() {
    let ctx = imported_context();
    let path = resolve_element_path(Schema::standard(), &["Project", "Target", "Csc"], Some("Sour"))
        .unwrap();
    assert_eq!(path.kind(), MsBuildKind::Task);

    let completions = inferred_attributes(&ctx, &path);
    let names = labels(&completions);
    assert!(names.contains(&"Condition"));
    assert!(names.contains(&"Sources"));
}

#[rstest]
#[case("<Own>$(Sh", &["Shared"])]
#[case("$(msbuildproject", &["MSBuildProjectDirectory", "MSBuildProjectFile"])]
fn test_property_completions(#[case] before_caret: &str, #[case] expected: &[&str]) {
    let ctx = imported_context();
    let trigger = expression_trigger(before_caret).unwrap();
    let completions = expression_completions(&ctx, &trigger, None);
    let names = labels(&completions);
    for name in expected {
        assert!(names.contains(name), "{name} missing from {names:?}");
    }
    assert!(completions.iter().all(|c| c.kind == CompletionKind::Property));
}

#[test]
fn test_item_completions() {
    let ctx = imported_context();
    let trigger = ExpressionTrigger::Item { prefix: "".into() };
    let names: Vec<_> = expression_completions(&ctx, &trigger, None)
        .into_iter()
        .map(|c| c.label.to_string())
        .collect();
    assert_eq!(names, vec!["Compile".to_string()]);
}

#[test]
fn test_unqualified_metadata_needs_an_item() {
    let ctx = imported_context();
    let trigger = expression_trigger("%(Li").unwrap();
    assert!(expression_completions(&ctx, &trigger, None).is_empty());

    let completions = expression_completions(&ctx, &trigger, Some("Compile"));
    assert_eq!(labels(&completions), vec!["Link"]);
}

#[test]
fn test_well_known_metadata_sorts_after_declared() {
    let ctx = imported_context();
    let trigger = expression_trigger("%(Compile.").unwrap();
    let completions = expression_completions(&ctx, &trigger, None);

    let link = completions.iter().find(|c| &*c.label == "Link").unwrap();
    let full_path = completions.iter().find(|c| &*c.label == "FullPath").unwrap();
    assert!(link.sort_priority < full_path.sort_priority);
    assert!(full_path.documentation.is_some());
}
