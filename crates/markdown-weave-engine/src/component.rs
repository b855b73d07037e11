use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::frames::{Frames, Position};
use crate::markdown::{CmarkEngine, MarkdownEngine};
use crate::output::{OutputFragment, html};
use crate::weave::{TraversalContext, walk};

/// Anchor for the wrapping container and its class attribute.
const CONTAINER_ANCHOR: Position = 1;
/// Anchor for the render-time readout; far past any realistic content.
const RENDER_TIME_ANCHOR: Position = 99999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentOptions {
    /// Class of the wrapping `<div>`.
    pub container_class: String,
    /// Append a `<code>rendered in: ...</code>` readout after the container.
    pub add_render_time: bool,
}

impl Default for ComponentOptions {
    fn default() -> Self {
        Self {
            container_class: "markdown".to_string(),
            add_render_time: false,
        }
    }
}

/// Renders a frame tree inside a `<div class="...">` container.
#[derive(Debug, Clone, Default)]
pub struct MarkdownComponent<E = CmarkEngine> {
    engine: E,
    options: ComponentOptions,
}

impl<E: MarkdownEngine> MarkdownComponent<E> {
    pub fn new(engine: E, options: ComponentOptions) -> Self {
        Self { engine, options }
    }

    pub fn options(&self) -> &ComponentOptions {
        &self.options
    }

    pub fn render(&self, frames: &Frames) -> Vec<OutputFragment> {
        let started = Instant::now();
        let mut cx = TraversalContext::new();

        let position = cx.sequencer_mut().next(CONTAINER_ANCHOR);
        cx.output_mut().open_element(position, "div");
        let position = cx.sequencer_mut().next(CONTAINER_ANCHOR);
        cx.output_mut()
            .add_attribute(position, "class", self.options.container_class.as_str());

        walk(&self.engine, frames, &mut cx);
        cx.output_mut().close_element();

        if self.options.add_render_time {
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            log::debug!("rendered {} frames in {elapsed_ms:.2}ms", frames.len());
            let position = cx.sequencer_mut().next(RENDER_TIME_ANCHOR);
            cx.output_mut().add_markup(
                position,
                format!("<code>rendered in: {elapsed_ms:.2}ms</code>"),
            );
        }

        cx.finish()
    }

    pub fn render_html(&self, frames: &Frames) -> String {
        html::to_html(&self.render(frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::Frame;
    use crate::output::positions;
    use pretty_assertions::assert_eq;

    fn frames(frames: Vec<Frame>) -> Frames {
        Frames::new(frames).unwrap()
    }

    #[test]
    fn wraps_content_in_a_container() {
        let component = MarkdownComponent::new(CmarkEngine::default(), ComponentOptions::default());

        let html = component.render_html(&frames(vec![Frame::markup(0, "# Hi\n\n")]));

        assert_eq!(html, "<div class=\"markdown\"><h1>Hi</h1>\n</div>");
    }

    #[test]
    fn container_takes_the_first_positions() {
        let component = MarkdownComponent::new(CmarkEngine::default(), ComponentOptions::default());

        let out = component.render(&frames(vec![Frame::markup(0, "text\n\n")]));

        assert_eq!(positions(&out), vec![2, 3, 4]);
    }

    #[test]
    fn custom_class_is_applied() {
        let component = MarkdownComponent::new(
            CmarkEngine::default(),
            ComponentOptions {
                container_class: "prose".to_string(),
                ..ComponentOptions::default()
            },
        );

        let html = component.render_html(&frames(Vec::new()));

        assert_eq!(html, "<div class=\"prose\" />");
    }

    #[test]
    fn render_time_is_appended_after_the_container() {
        let component = MarkdownComponent::new(
            CmarkEngine::default(),
            ComponentOptions {
                add_render_time: true,
                ..ComponentOptions::default()
            },
        );

        let out = component.render(&frames(vec![Frame::text(0, "plain")]));

        assert_eq!(out.len(), 2);
        let readout = out[1].markup().unwrap();
        assert!(readout.starts_with("<code>rendered in: "));
        assert!(readout.ends_with("ms</code>"));
        assert!(out[1].position > RENDER_TIME_ANCHOR);
    }
}
