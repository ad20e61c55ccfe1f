//! Integration tests for the element arena and its lookups.

use sift_dom::{
    AttributesMap, Document, DocumentBuilder, ElementData, NodeId, ROOT_TAG_NAME, TextSpan,
};

fn element(tag: &str, attrs: &[(&str, &str)]) -> ElementData {
    let mut map = AttributesMap::new();
    for (name, value) in attrs {
        let _ = map.insert((*name).to_string(), (*value).to_string());
    }
    ElementData::new(tag, map)
}

/// `<div class="card c"><span class="card-c"></span></div><p id="x" class="c"></p>`
fn sample() -> Document {
    let mut builder = DocumentBuilder::new();
    let div = builder.append_element(NodeId::ROOT, element("div", &[("class", "card c")]));
    let _ = builder.append_element(div, element("span", &[("class", "card-c")]));
    let _ = builder.append_element(NodeId::ROOT, element("P", &[("id", "x"), ("class", "c")]));
    builder.finish()
}

#[test]
fn test_new_document_has_only_root() {
    let doc = Document::new();
    assert!(doc.is_empty());
    assert_eq!(doc.root_ref().tag_name(), ROOT_TAG_NAME);
    assert!(doc.root_ref().is_root());
    assert!(doc.children(doc.root()).is_empty());
    assert!(doc.node(NodeId(1)).is_none());
}

#[test]
fn test_class_lookup_is_token_exact() {
    let doc = sample();
    let tags: Vec<&str> = doc
        .get_elements_by_class_name("c")
        .iter()
        .map(|n| n.tag_name())
        .collect();
    assert_eq!(tags, ["div", "P"]);
    assert_eq!(doc.get_elements_by_class_name("card-c").len(), 1);
    assert!(doc.get_elements_by_class_name("card-").is_empty());
}

#[test]
fn test_tag_lookup_is_case_insensitive() {
    let doc = sample();
    assert_eq!(doc.get_elements_by_tag_name("p").len(), 1);
    assert_eq!(doc.get_elements_by_tag_name("DIV").len(), 1);
    assert!(doc.get_elements_by_tag_name("root").is_empty());
}

#[test]
fn test_attribute_access() {
    let doc = sample();
    let p = doc.get_element_by_id("x").unwrap();
    assert_eq!(p.get_attribute("ID"), Some("x"));
    assert!(p.has_attribute("class"));
    assert!(!p.has_attribute("title"));
    assert_eq!(p.element_id(), Some("x"));
    assert_eq!(p.classes().collect::<Vec<_>>(), ["c"]);
    assert!(p.has_class("c"));
    assert!(!p.has_class("card"));
}

#[test]
fn test_ids_follow_append_order() {
    let doc = sample();
    let ids: Vec<NodeId> = doc.root_ref().descendants().map(|n| n.node_id()).collect();
    assert_eq!(ids, [NodeId(1), NodeId(2), NodeId(3)]);
    assert_eq!(doc.len(), 4);
    assert_eq!(doc.ancestors(NodeId(2)).collect::<Vec<_>>(), [NodeId(1), NodeId::ROOT]);
}

#[test]
fn test_builder_attaches_orphans_to_root() {
    let mut builder = DocumentBuilder::new();
    let id = builder.append_element(NodeId(42), element("b", &[]));
    let doc = builder.finish();
    assert_eq!(doc.parent(id), Some(NodeId::ROOT));
    assert_eq!(doc.children(NodeId::ROOT), [id]);
}

#[test]
fn test_builder_fills_text_and_markup() {
    let mut builder = DocumentBuilder::with_source("<p><b>hi</b></p>");
    let id = builder.append_element(NodeId::ROOT, element("p", &[]));
    let start = builder.text_len();
    builder.push_text("  hi\n");
    builder.finish_text(id, start);
    if let Some(data) = builder.element_mut(id) {
        data.inner_html = 3..12;
    }
    builder.for_each_element(|data| data.tag_name.make_ascii_uppercase());
    let doc = builder.finish();

    let p = doc.node(id).unwrap();
    assert_eq!(p.tag_name(), "P");
    assert_eq!(p.text_content(), "hi");
    assert_eq!(p.inner_html(), "<b>hi</b>");
    assert_eq!(doc.root_ref().tag_name(), "ROOT");
    assert_eq!(doc.source(), "<p><b>hi</b></p>");
}

#[test]
fn test_nested_text_shares_one_buffer() {
    // <div>a <p>b <i>c</i></p> d</div><span>e</span>
    let mut builder = DocumentBuilder::new();
    let root_start = builder.text_len();
    let div = builder.append_element(NodeId::ROOT, element("div", &[]));
    let div_start = builder.text_len();
    builder.push_text("a ");
    let p = builder.append_element(div, element("p", &[]));
    let p_start = builder.text_len();
    builder.push_text("b ");
    let i = builder.append_element(p, element("i", &[]));
    let i_start = builder.text_len();
    builder.push_text("c");
    builder.finish_text(i, i_start);
    builder.finish_text(p, p_start);
    builder.push_text(" d");
    builder.finish_text(div, div_start);
    let span = builder.append_element(NodeId::ROOT, element("span", &[]));
    let span_start = builder.text_len();
    builder.push_word("e");
    builder.finish_text(span, span_start);
    let empty = builder.append_element(NodeId::ROOT, element("br", &[]));
    let empty_start = builder.text_len();
    builder.finish_text(empty, empty_start);
    builder.finish_text(NodeId::ROOT, root_start);
    let doc = builder.finish();

    let text = |id| doc.node(id).unwrap().text_content();
    assert_eq!(text(NodeId::ROOT), "a b c d e");
    assert_eq!(text(div), "a b c d");
    assert_eq!(text(p), "b c");
    assert_eq!(text(i), "c");
    assert_eq!(text(span), "e");
    assert_eq!(text(empty), "");
}

#[test]
fn test_out_of_range_spans_resolve_empty() {
    let mut builder = DocumentBuilder::with_source("abc");
    let id = builder.append_element(NodeId::ROOT, element("p", &[]));
    if let Some(data) = builder.element_mut(id) {
        data.inner_html = 2..10;
        data.text_content = TextSpan::Source(5..6);
    }
    let doc = builder.finish();

    let p = doc.node(id).unwrap();
    assert_eq!(p.inner_html(), "");
    assert_eq!(p.text_content(), "");
}
