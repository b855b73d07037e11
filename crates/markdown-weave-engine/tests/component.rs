use markdown_weave_engine::frames::{Frames, Node};
use markdown_weave_engine::output::positions;
use markdown_weave_engine::{CmarkEngine, ComponentOptions, MarkdownComponent};

fn fixture(name: &str) -> Frames {
    let json = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let nodes: Vec<Node> = serde_json::from_str(&json).unwrap();
    Node::into_frames(nodes).unwrap()
}

fn component() -> MarkdownComponent {
    MarkdownComponent::new(CmarkEngine::default(), ComponentOptions::default())
}

#[test]
fn inventory_renders_heading_table_and_footer() {
    let html = component().render_html(&fixture("inventory"));

    insta::assert_snapshot!(html, @r#"
    <div class="markdown"><h1>Inventory</h1>
    <table><thead><tr><th>Item</th><th>Qty</th></tr></thead><tbody>
    <tr><td><em>bolt</em></td><td>3</td></tr>
    <tr><td><em>nut &amp; washer</em></td><td>12</td></tr>
    </tbody></table>
    <p>Totals are <em>approximate</em>.</p>
    </div>
    "#);
}

#[test]
fn inventory_positions_follow_the_container() {
    let out = component().render(&fixture("inventory"));

    assert_eq!(positions(&out), vec![2, 3, 4, 6, 7]);
}
