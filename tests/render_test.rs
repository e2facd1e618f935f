//! Integration tests for depth-first markup rendering

use pretty_assertions::assert_eq;
use rstest::rstest;

use challenges::domain::{
    render, render_recursive, render_with, Document, DomainError, Node, TraversalStrategy,
    DEFAULT_RECURSION_LIMIT,
};
use challenges::util::testing;

// ============================================================
// Helpers
// ============================================================

/// Checks that every closing tag matches the most recent unmatched opening tag.
fn assert_balanced(lines: &[String]) {
    let mut open: Vec<&str> = Vec::new();
    let mut opens = 0;
    let mut closes = 0;

    for line in lines {
        if let Some(tag) = line.strip_prefix("</").and_then(|l| l.strip_suffix('>')) {
            closes += 1;
            assert_eq!(open.pop(), Some(tag), "unbalanced close {line} in {lines:?}");
        } else if line.contains(" </") {
            // leaf: "<tag> text </tag>"
            let tag = &line[1..line.find('>').unwrap()];
            assert!(line.ends_with(&format!("</{tag}>")), "malformed leaf {line}");
        } else {
            let tag = line.strip_prefix('<').and_then(|l| l.strip_suffix('>')).unwrap();
            opens += 1;
            open.push(tag);
        }
    }

    assert_eq!(opens, closes, "open/close count differs in {lines:?}");
    assert!(open.is_empty(), "unclosed tags {open:?}");
}

/// Deterministic tree: every branch at `depth` has `fanout` children, tags named by level.
fn full_tree(depth: usize, fanout: usize) -> Node {
    fn build(level: usize, depth: usize, fanout: usize, counter: &mut usize) -> Node {
        *counter += 1;
        let tag = format!("n{level}");
        if level + 1 == depth {
            return Node::leaf(tag, format!("leaf {counter}"));
        }
        let children = (0..fanout)
            .map(|_| build(level + 1, depth, fanout, counter))
            .collect();
        Node::branch(tag, children)
    }
    let mut counter = 0;
    build(0, depth, fanout, &mut counter)
}

/// Irregular tree mixing leaves and branches at every level.
fn ragged_tree() -> Node {
    Node::branch(
        "html",
        vec![
            Node::branch(
                "head",
                vec![Node::leaf("title", "t"), Node::leaf("meta", "m")],
            ),
            Node::branch(
                "body",
                vec![
                    Node::leaf("h1", "heading"),
                    Node::branch(
                        "ul",
                        vec![
                            Node::leaf("li", "one"),
                            Node::branch("li", vec![Node::leaf("em", "two")]),
                        ],
                    ),
                    Node::branch("footer", vec![Node::branch("div", vec![Node::leaf("a", "x")])]),
                ],
            ),
        ],
    )
}

fn chain(depth: usize) -> Node {
    let mut node = Node::leaf("p", "bottom");
    for level in (1..depth).rev() {
        node = Node::branch(format!("d{level}"), vec![node]);
    }
    node
}

// ============================================================
// Fixed expectations
// ============================================================

#[test]
fn given_single_leaf_when_rendering_then_returns_one_string() {
    testing::init_test_setup();
    let out = render(&Node::leaf("p", "x")).unwrap();
    assert_eq!(out, vec!["<p> x </p>".to_string()]);
}

#[test]
fn given_html_div_two_paragraphs_when_rendering_then_matches_expected() {
    let doc = Document::new(Node::branch(
        "html",
        vec![Node::branch(
            "div",
            vec![Node::leaf("p", "hello world"), Node::leaf("p", "hello world")],
        )],
    ));

    let out = doc.render().unwrap();

    assert_eq!(
        out,
        vec![
            "<html>",
            "<div>",
            "<p> hello world </p>",
            "<p> hello world </p>",
            "</div>",
            "</html>",
        ]
    );
}

#[test]
fn given_ragged_tree_when_rendering_then_visits_pre_order_and_defers_closes() {
    let out = render(&ragged_tree()).unwrap();
    assert_eq!(
        out,
        vec![
            "<html>",
            "<head>",
            "<title> t </title>",
            "<meta> m </meta>",
            "<body>",
            "<h1> heading </h1>",
            "<ul>",
            "<li> one </li>",
            "<li>",
            "<em> two </em>",
            "<footer>",
            "<div>",
            "<a> x </a>",
            "</div>",
            "</footer>",
            "</li>",
            "</ul>",
            "</body>",
            "</head>",
            "</html>",
        ]
    );
}

// ============================================================
// Properties
// ============================================================

#[rstest]
#[case::leaf(Node::leaf("p", "x"))]
#[case::ragged(ragged_tree())]
#[case::binary(full_tree(5, 2))]
#[case::wide(full_tree(3, 7))]
#[case::chain(chain(40))]
fn given_any_tree_when_rendering_then_tags_form_balanced_sequence(#[case] tree: Node) {
    let out = render(&tree).unwrap();
    assert_balanced(&out);
}

#[rstest]
#[case::ragged(ragged_tree())]
#[case::binary(full_tree(6, 2))]
#[case::chain(chain(100))]
fn given_any_tree_when_rendering_with_each_strategy_then_outputs_agree(#[case] tree: Node) {
    let expected = render(&tree).unwrap();
    assert_eq!(render_recursive(&tree).unwrap(), expected);
    for strategy in [
        TraversalStrategy::Stack,
        TraversalStrategy::Recursive,
        TraversalStrategy::Auto,
    ] {
        assert_eq!(render_with(&tree, strategy, DEFAULT_RECURSION_LIMIT).unwrap(), expected);
    }
}

#[test]
fn given_full_tree_when_rendering_then_emits_one_string_per_leaf_and_two_per_branch() {
    let tree = full_tree(4, 3);
    let leaves = 27;
    let branches = 1 + 3 + 9;
    assert_eq!(tree.node_count(), leaves + branches);

    let out = render(&tree).unwrap();
    assert_eq!(out.len(), leaves + 2 * branches);
}

#[test]
fn given_same_document_when_rendered_twice_then_output_is_identical() {
    let doc = Document::new(ragged_tree());
    let first = doc.render().unwrap();
    let second = doc.render().unwrap();
    assert_eq!(first, second);
    assert_eq!(doc.root(), &ragged_tree());
}

#[test]
fn given_tree_deeper_than_limit_when_auto_rendering_then_uses_stack_and_succeeds() {
    let tree = chain(2_000);
    let out = render_with(&tree, TraversalStrategy::Auto, 64).unwrap();
    assert_eq!(out.len(), 1 + 2 * 1_999);
    assert_eq!(out.first().map(String::as_str), Some("<d1>"));
    assert_eq!(out.last().map(String::as_str), Some("</d1>"));
    assert_balanced(&out);
}

#[test]
fn given_very_deep_chain_when_rendered_and_dropped_then_neither_overflows() {
    let tree = chain(200_000);
    let out = render(&tree).unwrap();
    assert_eq!(out.len(), 1 + 2 * 199_999);
    assert_eq!(out.last().map(String::as_str), Some("</d1>"));
    drop(tree);
}

// ============================================================
// Errors
// ============================================================

#[rstest]
#[case::stack(TraversalStrategy::Stack)]
#[case::recursive(TraversalStrategy::Recursive)]
#[case::auto(TraversalStrategy::Auto)]
fn given_leaf_without_text_when_rendering_then_returns_invalid_node(
    #[case] strategy: TraversalStrategy,
) {
    let tree = Node::branch(
        "body",
        vec![Node::leaf("h1", "title"), Node::new("br", None, Vec::new())],
    );
    let err = render_with(&tree, strategy, DEFAULT_RECURSION_LIMIT).unwrap_err();
    match err {
        DomainError::InvalidNode { tag, .. } => assert_eq!(tag, "br"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_root_leaf_without_text_when_rendering_then_returns_invalid_node() {
    let err = render(&Node::new("p", None, Vec::new())).unwrap_err();
    assert!(matches!(err, DomainError::InvalidNode { .. }));
}

#[test]
fn given_absent_root_when_creating_document_then_returns_invalid_argument() {
    let err = Document::from_root(None).unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidArgument("document has no root node".to_string())
    );
}
