//! Expression and condition parsing through the public API.

use msbuild::parser::{
    ExpressionOptions, ExpressionParser, NodeKind, Reference, parse_condition, parse_expression,
};
use rstest::rstest;

fn reference_names(text: &str) -> Vec<String> {
    parse_expression(text, ExpressionOptions::ITEMS_METADATA_AND_LISTS)
        .unwrap()
        .references()
        .iter()
        .map(|r| r.name().to_string())
        .collect()
}

// =============================================================================
// PROPERTY REFERENCES
// =============================================================================

#[rstest]
#[case("OutputPath")]
#[case("_Private")]
#[case("Name-With-Dashes")]
#[case("MSBuildExtensionsPath32")]
fn test_property_name_round_trips(#[case] name: &str) {
    let text = format!("$({name})");
    let expr = parse_expression(&text, ExpressionOptions::empty()).unwrap();
    let refs = expr.references();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].name(), name);
    assert_eq!(&text[refs[0].range()], name);
}

#[test]
fn test_nodes_point_to_their_parent() {
    let expr = parse_expression("$(A)x$(B.Trim())", ExpressionOptions::empty()).unwrap();
    for (id, node) in expr.iter() {
        match node.parent() {
            Some(parent) => assert!(expr.children(parent).contains(&id)),
            None => assert_eq!(id, expr.root()),
        }
    }
}

// =============================================================================
// ITEMS AND METADATA
// =============================================================================

#[test]
fn test_item_transform_references() {
    let expr =
        parse_expression("@(Foo->'%(Bar)')", ExpressionOptions::ITEMS_METADATA_AND_LISTS).unwrap();
    let refs = expr.references();
    assert!(matches!(&refs[0], Reference::Item { name, .. } if name == "Foo"));
    assert!(matches!(&refs[1], Reference::Metadata { item: None, name, .. } if name == "Bar"));
}

#[rstest]
#[case("@(Compile)", vec!["Compile"])]
#[case("%(Compile.Link)", vec!["Link"])]
#[case("$(A);@(B);%(C)", vec!["A", "B", "C"])]
#[case("@(X->'%(Filename)%(Extension)', ' ')", vec!["X", "Filename", "Extension"])]
#[case("plain;text", vec![])]
fn test_reference_extraction(#[case] text: &str, #[case] expected: Vec<&str>) {
    assert_eq!(reference_names(text), expected);
}

#[test]
fn test_options_gate_items_and_metadata() {
    assert!(parse_expression("@(Foo)", ExpressionOptions::empty()).is_err());
    assert!(parse_expression("@(Foo)", ExpressionOptions::ITEMS).is_ok());
    assert!(parse_expression("%(Foo)", ExpressionOptions::ITEMS).is_err());
    assert!(parse_expression("%(Foo)", ExpressionOptions::METADATA).is_ok());
}

#[test]
fn test_parser_struct_matches_free_function() {
    let text = "$(A)@(B)";
    let a = ExpressionParser::new(text, ExpressionOptions::ITEMS).parse().unwrap();
    let b = parse_expression(text, ExpressionOptions::ITEMS).unwrap();
    assert_eq!(a, b);
}

// =============================================================================
// CONDITIONS
// =============================================================================

#[test]
fn test_condition_references() {
    let condition = "'$(Configuration)|$(Platform)' == 'Debug|AnyCPU' and Exists('@(Ref)')";
    let expr = parse_condition(condition).unwrap();
    let names: Vec<_> = expr.references().iter().map(|r| r.name().to_string()).collect();
    assert_eq!(names, vec!["Configuration", "Platform", "Ref"]);
}

#[test]
fn test_condition_error_position_is_within_text() {
    let text = "'$(A)' == ";
    let err = parse_condition(text).unwrap_err();
    assert!(u32::from(err.position()) as usize <= text.len());
}

#[test]
fn test_negated_group() {
    let expr = parse_condition("!('$(A)' == '')").unwrap();
    assert!(matches!(expr.kind(expr.root()), NodeKind::Not(_)));
}
