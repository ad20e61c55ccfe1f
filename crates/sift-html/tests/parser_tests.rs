//! Integration tests for the tree builder.

use std::time::{Duration, Instant};

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use sift_dom::{Document, NodeId, NodeSnapshot};
use sift_html::{
    CloserMatching, IssueKind, ParseOptions, TreeBuilder, parse, parse_with_options,
};

/// Text of every element with the given tag, in document order.
fn texts(doc: &Document, tag: &str) -> Vec<String> {
    doc.get_elements_by_tag_name(tag)
        .iter()
        .map(|n| n.text_content().to_string())
        .collect()
}

/// Issue kinds produced while parsing `html`.
fn issue_kinds(html: &str) -> Vec<IssueKind> {
    let (_, issues) = TreeBuilder::new(html).run_with_issues();
    issues.into_iter().map(|issue| issue.kind).collect()
}

// ========== Behavior ==========

#[test]
fn test_list_items_in_order() {
    let doc = parse("<ul><li>A</li><li>B</li></ul>");
    assert_eq!(texts(&doc, "li"), ["A", "B"]);
    assert_eq!(texts(&doc, "ul"), ["A B"]);
}

#[test]
fn test_script_body_excluded_from_text() {
    let doc = parse("<script>alert(1)</script><p>Safe</p>");
    assert_eq!(doc.text_content(), "Safe");

    let script = doc.get_elements_by_tag_name("script")[0];
    assert_eq!(script.inner_html(), "alert(1)");
    assert_eq!(script.text_content(), "alert(1)");
    assert_eq!(script.children().count(), 0);
}

#[test]
fn test_style_body_is_not_parsed() {
    let doc = parse("<style>p > a { color: red }</style><a>x</a>");
    assert_eq!(doc.get_elements_by_tag_name("a").len(), 1);
    assert_eq!(doc.text_content(), "x");
}

#[test]
fn test_unclosed_tags_keep_partial_text() {
    let doc = parse("<div><p>text");
    assert_eq!(texts(&doc, "p"), ["text"]);
    assert_eq!(texts(&doc, "div"), ["text"]);
    assert_eq!(doc.text_content(), "text");
    assert_eq!(
        issue_kinds("<div><p>text"),
        [IssueKind::UnclosedElement, IssueKind::UnclosedElement]
    );
}

#[test]
fn test_empty_input() {
    let doc = parse("");
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.text_content(), "");
    assert!(issue_kinds("").is_empty());
}

#[test]
fn test_text_is_whitespace_normalized() {
    let doc = parse("  <p>\n  hello \t  world  </p>  tail \n");
    assert_eq!(texts(&doc, "p"), ["hello world"]);
    assert_eq!(doc.text_content(), "hello world tail");
}

#[test]
fn test_closer_is_case_insensitive_and_tag_case_kept() {
    let doc = parse("<DIV Class=box>x</div>");
    let div = doc.get_elements_by_tag_name("div")[0];
    assert_eq!(div.tag_name(), "DIV");
    assert_eq!(div.get_attribute("class"), Some("box"));
    assert!(issue_kinds("<DIV>x</div>").is_empty());
}

#[test]
fn test_no_implicit_closing() {
    let doc = parse("<p>a<p>b</p></p>");
    let paragraphs = doc.get_elements_by_tag_name("p");
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[1].parent(), Some(paragraphs[0]));
}

#[test]
fn test_void_elements_have_no_children() {
    let doc = parse("<p>a<br>b<img src=x.png>c<input/></p>");
    let p = doc.get_elements_by_tag_name("p")[0];
    let names: Vec<&str> = p.children().map(|c| c.tag_name()).collect();
    assert_eq!(names, ["br", "img", "input"]);
    assert_eq!(p.text_content(), "a b c");
    assert!(p.children().all(|c| c.children().count() == 0));
}

#[test]
fn test_self_closing_custom_element() {
    let doc = parse("<x-icon name=star/><span>after</span>");
    let icon = doc.get_elements_by_tag_name("x-icon")[0];
    assert_eq!(icon.get_attribute("name"), Some("star"));
    assert_eq!(icon.children().count(), 0);
    assert_eq!(texts(&doc, "span"), ["after"]);
}

#[test]
fn test_quoted_gt_inside_attribute() {
    let doc = parse(r#"<a title="x > y" href="/z">link</a>"#);
    let a = doc.get_elements_by_tag_name("a")[0];
    assert_eq!(a.get_attribute("title"), Some("x > y"));
    assert_eq!(a.text_content(), "link");
}

#[test]
fn test_comments_and_doctype_are_skipped() {
    let html = "<!DOCTYPE html><!-- note --><p>x</p></span>";
    let doc = parse(html);
    assert_eq!(doc.text_content(), "x");
    assert_eq!(doc.len(), 2);
    assert_eq!(
        issue_kinds(html),
        [
            IssueKind::SkippedMarkup,
            IssueKind::SkippedMarkup,
            IssueKind::SkippedMarkup
        ]
    );
}

#[test]
fn test_literal_less_than_is_text() {
    let doc = parse("<p>1 < 2 and 3 <= 4</p>");
    assert_eq!(texts(&doc, "p"), ["1 < 2 and 3 <= 4"]);
}

#[test]
fn test_inner_html_is_raw_substring() {
    let doc = parse("<div> <b>bold</b> &amp; </div>");
    let div = doc.get_elements_by_tag_name("div")[0];
    assert_eq!(div.inner_html(), " <b>bold</b> &amp; ");
    assert_eq!(div.text_content(), "bold &amp;");
}

#[test]
fn test_entities_decoded_only_when_enabled() {
    let html = r#"<p title="a &amp; b">&lt;ok&gt;</p>"#;

    let doc = parse(html);
    assert_eq!(texts(&doc, "p"), ["&lt;ok&gt;"]);

    let doc = parse_with_options(html, ParseOptions::new().decode_entities(true));
    let p = doc.get_elements_by_tag_name("p")[0];
    assert_eq!(p.text_content(), "<ok>");
    assert_eq!(p.get_attribute("title"), Some("a & b"));
    assert_eq!(p.inner_html(), "&lt;ok&gt;");
}

#[test]
fn test_nearest_and_balanced_matching_differ() {
    let html = "<div>a<div>b</div>c</div>";

    let doc = parse(html);
    let divs = doc.get_elements_by_tag_name("div");
    assert_eq!(divs[0].inner_html(), "a<div>b");
    assert_eq!(doc.text_content(), "a b c");

    let doc = parse_with_options(
        html,
        ParseOptions::new().closer_matching(CloserMatching::Balanced),
    );
    let divs = doc.get_elements_by_tag_name("div");
    assert_eq!(divs[0].inner_html(), "a<div>b</div>c");
    assert_eq!(divs[0].text_content(), "a b c");
    assert_eq!(divs[1].parent(), Some(divs[0]));
}

#[test]
fn test_max_input_bytes_truncates_on_char_boundary() {
    let html = "<p>caf\u{00E9}</p>";
    let options = ParseOptions::new().max_input_bytes(7);
    let (doc, issues) = TreeBuilder::new(html).with_options(options).run_with_issues();
    assert_eq!(texts(&doc, "p"), ["caf"]);
    assert_eq!(issues[0].kind, IssueKind::InputTruncated);
    assert_eq!(issues[0].offset, 6);
}

#[test]
fn test_issue_offsets_point_at_markup() {
    let (_, issues) = TreeBuilder::new("ab<div class").run_with_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::UnterminatedTag);
    assert_eq!(issues[0].offset, 2);
    assert_eq!(issues[0].kind.to_string(), "UnterminatedTag");
}

// ========== Stress ==========

#[test]
fn test_deep_nesting() {
    let depth = 200;
    let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));

    let doc = parse(&html);
    let divs = doc.get_elements_by_tag_name("div");
    assert_eq!(divs.len(), depth);
    assert_eq!(divs[depth - 1].ancestors().count(), depth);
    assert!(divs.iter().all(|d| d.text_content() == "x"));

    let (doc, issues) = TreeBuilder::new(&html)
        .with_options(ParseOptions::new().closer_matching(CloserMatching::Balanced))
        .run_with_issues();
    assert_eq!(doc.get_elements_by_tag_name("div").len(), depth);
    assert!(issues.is_empty());
}

#[test]
fn test_many_siblings() {
    let count = 5_000;
    let items: String = (0..count).map(|i| format!("<li>{i}</li>")).collect();
    let doc = parse(&format!("<ul>{items}</ul>"));

    let lis = doc.get_elements_by_tag_name("li");
    assert_eq!(lis.len(), count);
    assert_eq!(lis[0].text_content(), "0");
    assert_eq!(lis[count - 1].text_content(), "4999");
    assert_eq!(doc.get_elements_by_tag_name("ul")[0].children().count(), count);
}

#[test]
fn test_long_attribute_and_text_runs() {
    let run = "a".repeat(100_000);
    let doc = parse(&format!(r#"<div data-x="{run}">{run}</div>"#));
    let div = doc.get_elements_by_tag_name("div")[0];
    assert_eq!(div.get_attribute("data-x").map(str::len), Some(100_000));
    assert_eq!(div.text_content().len(), 100_000);

    let unterminated = format!(r#"<div title="{run}"#);
    let doc = parse(&unterminated);
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_multi_megabyte_document() {
    let row = r#"<div class="row"><span>cell</span><a href="/x">link</a></div>"#;
    let rows = 50_000;
    let html = format!("<body>{}</body>", row.repeat(rows));
    assert!(html.len() > 3_000_000);

    let doc = parse(&html);
    assert_eq!(doc.get_elements_by_class_name("row").len(), rows);
    assert_eq!(doc.get_elements_by_tag_name("a").len(), rows);
    assert_eq!(doc.len(), 1 + 1 + rows * 3);
}

#[test]
fn test_unclosed_paragraphs_nest_and_share_text() {
    let doc = parse("<p>a<p>b <b>c</b><p>d");
    assert_eq!(texts(&doc, "p"), ["a b c d", "b c d", "d"]);
    assert_eq!(texts(&doc, "b"), ["c"]);
    let ps = doc.get_elements_by_tag_name("p");
    assert_eq!(ps[1].inner_html(), "b <b>c</b><p>d");
    assert_eq!(ps[2].ancestors().count(), 3);
}

#[test]
fn test_long_run_of_unclosed_paragraphs() {
    let count = 50_000;
    let html = format!("<body>{}</body>", "<p>paragraph text here ".repeat(count));
    assert!(html.len() > 1_000_000);

    let started = Instant::now();
    let doc = parse(&html);
    assert!(started.elapsed() < Duration::from_secs(10));

    let ps = doc.get_elements_by_tag_name("p");
    assert_eq!(ps.len(), count);
    assert_eq!(ps[count - 1].ancestors().count(), count + 1);
    assert_eq!(ps[count - 1].text_content(), "paragraph text here");
    assert_eq!(ps[0].text_content(), doc.text_content());
    assert_eq!(doc.text_content().len(), count * 20 - 1);
    assert_eq!(ps[0].inner_html().len(), count * 23 - 3);
    assert_eq!(doc.source(), html);
}

#[test]
fn test_binary_and_bracket_noise() {
    let bytes: Vec<u8> = (0..=255_u8).cycle().take(4096).collect();
    let noise = String::from_utf8_lossy(&bytes);
    let _ = parse(&noise);
    let _ = parse("<<<>>><</></<!<?<a<b<<c>>></");
    let _ = parse("<a href='><b>\"</a>");
}

// ========== Properties ==========

const PIECES: &[&str] = &[
    "<div>", "</div>", "<p>", "</p>", "<span class=\"a b\">", "</span>", "<br>", "<img/>",
    "<script>", "</script>", "<!-- c -->", "<!DOCTYPE html>", "text", " ", "<", ">", "\"",
    "'", "=", "&amp;", "<a href='x'>", "</a>", "<DIV id=m>", "\u{00E9}", "</",
];

/// Markup assembled from tag-like fragments, so generated inputs actually
/// exercise the builder.
#[derive(Debug, Clone)]
struct Markup(String);

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 64;
        let mut out = String::new();
        for _ in 0..len {
            if let Some(piece) = g.choose(PIECES) {
                out.push_str(piece);
            }
        }
        Self(out)
    }
}

fn snapshot(doc: &Document) -> NodeSnapshot {
    NodeSnapshot::capture(doc.root_ref())
}

#[quickcheck]
fn prop_parse_never_panics(input: String) -> bool {
    parse(&input).get(NodeId::ROOT).is_some()
}

#[quickcheck]
fn prop_parse_is_deterministic(markup: Markup) -> bool {
    snapshot(&parse(&markup.0)) == snapshot(&parse(&markup.0))
}

#[quickcheck]
fn prop_ids_follow_document_order(markup: Markup) -> bool {
    let doc = parse(&markup.0);
    (1..doc.len()).all(|i| {
        let id = NodeId(i);
        doc.parent(id)
            .is_some_and(|parent| parent < id && doc.children(parent).contains(&id))
    })
}

#[quickcheck]
fn prop_balanced_mode_never_panics(markup: Markup) -> bool {
    let options = ParseOptions::new()
        .closer_matching(CloserMatching::Balanced)
        .decode_entities(true);
    parse_with_options(&markup.0, options)
        .get(NodeId::ROOT)
        .is_some()
}

#[quickcheck]
fn prop_attribute_parser_never_panics(raw: String) -> bool {
    sift_html::parse_attributes(&raw)
        .keys()
        .all(|name| !name.is_empty())
}
