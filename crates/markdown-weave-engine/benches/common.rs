// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
use markdown_weave_engine::frames::{FrameBuilder, Frames};

/// A table with `rows` generated body rows, each carrying a serialized
/// element. Every row re-parses the whole buffer, so this measures the
/// quadratic end of the accumulator.
#[allow(dead_code)]
pub fn generated_table(rows: usize) -> Frames {
    let mut builder = FrameBuilder::new();
    builder.add_markup(0, "    | Item | Qty | Note |\n    |------|-----|------|");
    for i in 0..rows {
        builder.open_region(1);
        builder.add_markup(2, "\n    | ");
        builder.open_element(3, "code");
        builder.add_text(4, format!("sku-{i}"));
        builder.close().unwrap();
        builder.add_markup(5, format!(" | {i} | *n/a* |"));
        builder.close().unwrap();
    }
    builder.add_markup(6, "\n\n");
    builder.build().unwrap()
}

/// Many small closed blocks, the pass-through path.
#[allow(dead_code)]
pub fn closed_sections(count: usize) -> Frames {
    let mut builder = FrameBuilder::new();
    for i in 0..count {
        builder.open_element(0, "section");
        builder.add_markup(1, format!("## Section {i}\n\nSome paragraph text.\n\n"));
        builder.close().unwrap();
    }
    builder.build().unwrap()
}
