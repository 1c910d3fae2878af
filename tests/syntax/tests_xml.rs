//! XML document structure and spans.

use msbuild::syntax::XDocument;
use msbuild::TextSize;
use rstest::rstest;

use crate::helpers::project_fixtures::{PROPERTY_AND_ITEM, PROPERTY_AND_ITEM_REFORMATTED};

#[test]
fn test_fixture_parses_without_errors() {
    for text in [PROPERTY_AND_ITEM, PROPERTY_AND_ITEM_REFORMATTED] {
        let doc = XDocument::parse(text);
        assert!(!doc.has_errors(), "{:?}", doc.errors());
        assert_eq!(doc.root_element().unwrap().name.local, "Project");
    }
}

#[test]
fn test_element_ranges_slice_source() {
    let text =
        "<Project>\n  <ItemGroup>\n    <Compile Include=\"a.cs\" />\n  </ItemGroup>\n</Project>";
    let doc = XDocument::parse(text);
    for (_, element) in doc.elements() {
        let slice = &text[element.range];
        assert!(slice.starts_with('<'));
        assert!(slice.ends_with('>'));
        assert_eq!(&text[element.name_range], element.name.local.as_str());
    }
}

#[test]
fn test_parent_links_match_children() {
    let doc = XDocument::parse(PROPERTY_AND_ITEM);
    for (id, element) in doc.elements() {
        match element.parent {
            Some(parent) => assert!(doc.element(parent).children.contains(&id)),
            None => assert_eq!(Some(id), doc.root()),
        }
    }
}

#[rstest]
#[case("<Project><PropertyGroup></Project>")]
#[case("<Project><PropertyGroup>")]
#[case("<Project></Project><Other />")]
fn test_malformed_documents_keep_root(#[case] text: &str) {
    let doc = XDocument::parse(text);
    assert!(doc.has_errors());
    assert!(doc.root().is_some());
    for error in doc.errors() {
        assert!(u32::from(error.range.end()) as usize <= text.len());
    }
}

#[test]
fn test_text_content_is_trimmed_and_unescaped() {
    let doc = XDocument::parse("<Project><P>\n  a &amp; b\n</P></Project>");
    let (_, p) = doc.children(doc.root().unwrap()).next().unwrap();
    assert_eq!(p.text_content(), Some("a & b"));
}

#[test]
fn test_find_at_offset_outside_root() {
    let text = "   <Project />";
    let doc = XDocument::parse(text);
    assert!(doc.find_at_offset(TextSize::new(0)).is_none());
    assert!(doc.find_at_offset(TextSize::new(4)).is_some());
}
