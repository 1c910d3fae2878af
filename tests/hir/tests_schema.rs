//! Element kinds recorded during resolution.

use msbuild::hir::DiagnosticKind;
use msbuild::schema::MsBuildKind;
use msbuild::syntax::ElementId;
use rstest::rstest;

use crate::helpers::diagnostic_helpers::diagnostics_of;
use crate::helpers::resolve_helpers::resolve_single;

const OUTPUTS: &str = r#"<Project>
  <Target Name="Build">
    <Output />
    <Csc Sources="a.cs">
      <Output TaskParameter="OutputAssembly" PropertyName="Assembly" />
      <Output TaskParameter="Files" ItemName="Produced" />
    </Csc>
  </Target>
</Project>"#;

fn elements_named(doc: &msbuild::syntax::XDocument, name: &str) -> Vec<ElementId> {
    doc.elements()
        .filter(|(_, e)| e.name.local == name)
        .map(|(id, _)| id)
        .collect()
}

#[test]
fn test_output_kind_depends_on_parent() {
    let ctx = resolve_single(OUTPUTS);
    let outputs = elements_named(ctx.document(), "Output");
    assert_eq!(outputs.len(), 3);
    assert_eq!(ctx.kind_of(outputs[0]), Some(MsBuildKind::Task));
    assert_eq!(ctx.kind_of(outputs[1]), Some(MsBuildKind::Output));
    assert_eq!(ctx.kind_of(outputs[2]), Some(MsBuildKind::Output));
}

#[test]
fn test_task_outputs_declare_symbols() {
    let ctx = resolve_single(OUTPUTS);
    assert!(ctx.property("Assembly").is_some());
    assert!(ctx.item("Produced").is_some());
    assert!(ctx.task("Output").is_some());
}

#[rstest]
#[case("<Project><PropertyGroup><A>1</A></PropertyGroup></Project>", "A", MsBuildKind::Property)]
#[case("<Project><ItemGroup><A Include=\"x\" /></ItemGroup></Project>", "A", MsBuildKind::Item)]
#[case(
    r#"<Project><ItemGroup><A Include="x"><M>1</M></A></ItemGroup></Project>"#,
    "M",
    MsBuildKind::Metadata
)]
#[case("<Project><Target Name=\"T\"><A /></Target></Project>", "A", MsBuildKind::Task)]
#[case(
    r#"<Project><Choose><When Condition="true" /></Choose></Project>"#,
    "When",
    MsBuildKind::When
)]
fn test_open_ended_children(#[case] text: &str, #[case] name: &str, #[case] kind: MsBuildKind) {
    let ctx = resolve_single(text);
    let ids = elements_named(ctx.document(), name);
    assert_eq!(ctx.kind_of(ids[0]), Some(kind));
}

#[test]
fn test_special_element_children_are_not_walked() {
    let ctx = resolve_single(
        r#"<Project>
  <UsingTask TaskName="T" TaskFactory="CodeTaskFactory" AssemblyFile="x.dll">
    <Task>
      <Code Type="Fragment" Language="cs"><![CDATA[ return true; ]]></Code>
    </Task>
  </UsingTask>
</Project>"#,
    );
    assert!(diagnostics_of(&ctx, DiagnosticKind::UnknownElement).is_empty());
    let code = elements_named(ctx.document(), "Code");
    assert_eq!(ctx.kind_of(code[0]), None);
}

#[test]
fn test_unknown_attribute_is_reported() {
    let ctx = resolve_single(r#"<Project><PropertyGroup Bogus="1" /></Project>"#);
    let errors = diagnostics_of(&ctx, DiagnosticKind::UnknownAttribute);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Bogus"));
}

#[test]
fn test_invalid_expression_is_reported() {
    let ctx = resolve_single(
        r#"<Project><PropertyGroup><A Condition="'$(B)' == ">1</A></PropertyGroup></Project>"#,
    );
    assert_eq!(diagnostics_of(&ctx, DiagnosticKind::InvalidExpression).len(), 1);
}
