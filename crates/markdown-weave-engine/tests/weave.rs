use markdown_weave_engine::frames::{Frame, FrameBuilder, Frames, Node};
use markdown_weave_engine::markdown::CmarkEngine;
use markdown_weave_engine::output::{OutputFragment, Payload, html::to_html, positions};
use markdown_weave_engine::weave;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::EchoEngine;

fn run(frames: Vec<Frame>) -> Vec<OutputFragment> {
    weave(&CmarkEngine::default(), &Frames::new(frames).unwrap())
}

fn markups(out: &[OutputFragment]) -> Vec<&str> {
    out.iter().filter_map(OutputFragment::markup).collect()
}

/// A table whose body rows come from a loop, each row reusing the same host
/// positions.
fn order_table(rows: usize) -> Frames {
    let mut builder = FrameBuilder::new();
    builder.add_markup(0, "| Item | Qty |\n|---|---|");
    for i in 0..rows {
        builder.open_region(1);
        builder.add_markup(2, "\n| ");
        builder.open_element(3, "code");
        builder.add_text(4, format!("sku-{i}"));
        builder.close().unwrap();
        builder.add_markup(5, format!("| {i} |"));
        builder.close().unwrap();
    }
    builder.add_markup(6, "\n\n");
    builder.build().unwrap()
}

fn looped_sections(count: usize) -> Frames {
    let mut builder = FrameBuilder::new();
    for i in 0..count {
        builder.open_element(0, "section");
        builder.add_attribute(1, "id", format!("s{i}"));
        builder.add_markup(2, "Para\n\n");
        builder.add_text(3, "tail");
        builder.close().unwrap();
    }
    builder.build().unwrap()
}

#[test]
fn table_split_across_three_fragments_renders_once() {
    let out = run(vec![
        Frame::markup(5, "| Name | Qty |"),
        Frame::markup(6, "\n|------|-----|"),
        Frame::markup(7, "\n| bolt | 3 |\n\n"),
    ]);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].position, 6);
    assert_eq!(
        out[0].markup(),
        Some(
            "<table><thead><tr><th>Name</th><th>Qty</th></tr></thead><tbody>\n\
             <tr><td>bolt</td><td>3</td></tr>\n\
             </tbody></table>\n"
        )
    );
}

#[test]
fn generated_cell_is_folded_into_the_table() {
    let out = run(vec![
        Frame::markup(0, "| Item | Qty |\n|---|---|\n| "),
        Frame::element(1, "strong", 1),
        Frame::text(2, "bolt"),
        Frame::markup(3, "| 3 |\n\n"),
    ]);

    assert_eq!(out.len(), 1);
    let table = out[0].markup().unwrap();
    assert!(table.contains("<tr><td><strong>bolt</strong></td><td>3</td></tr>"));
}

#[test]
fn closed_fragments_pass_straight_through() {
    let out = run(vec![
        Frame::markup(0, "# Title\n\nIntro.\n\n"),
        Frame::text(1, "plain"),
    ]);

    assert_eq!(
        out,
        vec![
            OutputFragment {
                position: 1,
                payload: Payload::Markup("<h1>Title</h1>\n".to_string()),
            },
            OutputFragment {
                position: 2,
                payload: Payload::Markup("<p>Intro.</p>\n".to_string()),
            },
            OutputFragment {
                position: 4,
                payload: Payload::Text("plain".to_string()),
            },
        ]
    );
}

#[test]
fn text_inside_an_open_paragraph_joins_it() {
    let out = run(vec![
        Frame::markup(0, "Hello "),
        Frame::text(1, "<world>"),
        Frame::markup(2, "!\n\n"),
    ]);

    assert_eq!(markups(&out), vec!["<p>Hello &lt;world&gt;!</p>\n"]);
}

#[test]
fn unterminated_list_is_flushed_at_end_of_input() {
    let out = run(vec![Frame::markup(0, "- one\n- two")]);

    assert_eq!(
        out,
        vec![OutputFragment {
            position: 1,
            payload: Payload::Markup("<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n".to_string()),
        }]
    );
}

#[test]
fn indentation_is_learned_from_the_first_fragment() {
    let out = run(vec![
        Frame::markup(0, "    - one"),
        Frame::markup(1, "\n    - two"),
        Frame::markup(2, "\n  - three\n\n"),
    ]);

    assert_eq!(
        markups(&out),
        vec!["<ul>\n<li>one</li>\n<li>two</li>\n<li>three</li>\n</ul>\n"]
    );
}

#[test]
fn fenced_code_spans_fragments_until_its_closing_fence() {
    let out = run(vec![
        Frame::markup(0, "```rust\nfn main() {"),
        Frame::markup(1, "\n}\n```\n"),
        Frame::markup(2, "After.\n\n"),
    ]);

    assert_eq!(
        markups(&out),
        vec![
            "<pre><code class=\"language-rust\">fn main() {\n}\n</code></pre>\n",
            "<p>After.</p>\n",
        ]
    );
}

#[test]
fn fence_inside_a_list_item_spans_fragments() {
    let out = run(vec![
        Frame::markup(0, "- item\n\n  ```\n  line1\n\n"),
        Frame::markup(1, "\n  line2\n  ```\n\n"),
    ]);

    let html = markups(&out);
    assert_eq!(html.len(), 1);
    assert!(html[0].starts_with("<ul>"));
    assert!(html[0].contains("<pre><code>line1\nline2\n</code></pre>"));
    assert!(!html[0].contains("<p>line2</p>"));
}

#[test]
fn looped_rows_render_as_one_table() {
    let out = weave(&CmarkEngine::default(), &order_table(3));

    assert_eq!(out.len(), 1);
    let table = out[0].markup().unwrap();
    assert_eq!(table.matches("<tr>").count(), 4);
    assert!(table.contains("<td><code>sku-2</code></td><td>2</td>"));
}

#[test]
fn markup_inside_emitted_elements_stays_inside_them() {
    let out = weave(&CmarkEngine::default(), &looped_sections(2));

    assert_eq!(
        to_html(&out),
        "<section id=\"s0\"><p>Para</p>\ntail</section>\
         <section id=\"s1\"><p>Para</p>\ntail</section>"
    );
}

#[rstest]
#[case::looped_table(order_table(4))]
#[case::looped_sections(looped_sections(4))]
#[case::empty(Frames::default())]
fn output_positions_strictly_increase(#[case] frames: Frames) {
    let out = weave(&CmarkEngine::default(), &frames);

    let positions = positions(&out);
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "positions not increasing: {positions:?}"
    );
}

#[test]
fn host_tree_json_weaves_like_frames() {
    let nodes: Vec<Node> = serde_json::from_str(
        r#"[
            { "markup": "| a | b |\n|---|---|\n| " },
            { "element": { "name": "span", "attributes": [["class", "x"]], "children": [{ "text": "1" }] } },
            { "markup": "| 2 |\n\n" }
        ]"#,
    )
    .unwrap();

    let out = weave(&CmarkEngine::default(), &Node::into_frames(nodes).unwrap());

    assert_eq!(out.len(), 1);
    assert!(
        out[0]
            .markup()
            .unwrap()
            .contains("<td><span class=\"x\">1</span></td><td>2</td>")
    );
}

#[test]
fn no_content_is_lost_in_an_unterminated_block() {
    let frames = Frames::new(vec![
        Frame::markup(0, "| a | "),
        Frame::element(1, "b", 1),
        Frame::text(2, "bold & <brave>"),
        Frame::markup(3, "| tail"),
        Frame::text(4, " end"),
    ])
    .unwrap();

    let out = weave(&EchoEngine, &frames);

    assert_eq!(
        markups(&out),
        vec!["| a | <b>bold &amp; &lt;brave&gt;</b>| tail end"]
    );
}

#[test]
fn no_content_is_lost_around_closed_blocks() {
    let frames = Frames::new(vec![
        Frame::text(0, "before "),
        Frame::markup(1, "first\n\n"),
        Frame::element(2, "p", 1),
        Frame::text(3, "inside"),
        Frame::markup(4, "second"),
    ])
    .unwrap();

    let out = weave(&EchoEngine, &frames);

    assert_eq!(to_html(&out), "before first\n\n<p>inside</p>second");
}
