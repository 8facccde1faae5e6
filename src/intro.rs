use crate::{dom, frame, style};
use hero_core::{Choreography, Clock, DeviceClass, IntroKey, IntroValues, LoopHandle};
use web_sys as web;

const START_ATTRIBUTE: &str = "data-mv-from";

/// Heading / title / links reveal. Runs once, independent of the 3D scene.
pub struct IntroChoreographer {
    heading: web::HtmlElement,
    title: web::HtmlElement,
    links: Vec<web::HtmlElement>,
    choreography: Choreography,
    clock: Clock,
}

impl IntroChoreographer {
    /// Fails when the heading or title is missing. No links is fine.
    pub fn new(document: &web::Document, device: DeviceClass) -> anyhow::Result<Self> {
        let heading = dom::query_html(document, "[data-mv=\"heading\"]")?;
        let title = dom::query_html(document, "[data-mv=\"title\"]")?;
        let links = dom::query_all_html(document, "[data-mv=\"link\"]");
        log::info!("[intro] links={} compact={}", links.len(), device.is_compact());
        let start = IntroValues::from_start_attributes(
            heading.get_attribute(START_ATTRIBUTE).as_deref(),
            links
                .first()
                .and_then(|l| l.get_attribute(START_ATTRIBUTE))
                .as_deref(),
        );
        let mut intro = Self {
            heading,
            title,
            links,
            choreography: Choreography::start(device, start),
            clock: Clock::new(),
        };
        // Pin the start state before the first frame.
        intro.flush();
        Ok(intro)
    }

    /// Apply whatever the timeline wrote since the last flush.
    fn flush(&mut self) {
        let values = &mut self.choreography.values;
        let snapshot = *values;
        for key in values.take_dirty() {
            match key {
                IntroKey::HeadingY => dom::set_style(
                    &self.heading,
                    "transform",
                    &style::translate_y_pct(snapshot.heading_y_pct),
                ),
                IntroKey::TitleLeft => {
                    dom::set_style(&self.title, "left", &style::percent(snapshot.title_left_pct))
                }
                IntroKey::TitleTop => {
                    dom::set_style(&self.title, "top", &style::percent(snapshot.title_top_pct))
                }
                IntroKey::LinksOpacity => {
                    let value = style::opacity(snapshot.links_opacity);
                    for link in &self.links {
                        dom::set_style(link, "opacity", &value);
                    }
                }
            }
        }
    }

    fn tick(&mut self) -> bool {
        let (_, dt) = self.clock.tick();
        self.choreography.tick(dt);
        self.flush();
        if self.choreography.is_complete() {
            log::info!("[intro] complete");
            return false;
        }
        true
    }

    /// Hand the choreographer to its own animation-frame loop. The loop ends
    /// by itself after the last step.
    pub fn start(mut self) -> LoopHandle {
        self.clock.mark();
        let handle = LoopHandle::new();
        frame::start_loop(handle.clone(), move || self.tick());
        handle
    }
}
