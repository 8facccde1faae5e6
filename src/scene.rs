use crate::render::GpuState;
use crate::{dom, events, frame, loader};
use hero_core::{
    Clock, HeroScene, LoadTransition, LoopHandle, SceneConfig, ViewportState, RESIZE_THROTTLE_MS,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const CANVAS_HOST: &str = "[data-canvas]";

/// State touched by the frame loop and the event handlers.
struct SceneShared {
    hero: HeroScene,
    gpu: Option<GpuState>,
    clock: Clock,
}

impl SceneShared {
    fn resize(&mut self, canvas: &web::HtmlCanvasElement, viewport: ViewportState) {
        self.hero.on_resize(viewport);
        dom::apply_canvas_size(canvas, &viewport);
        if let Some(gpu) = self.gpu.as_mut() {
            let (w, h) = viewport.physical_size();
            gpu.resize(w, h);
        }
    }

    fn render(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        if let Err(e) = gpu.render(&self.hero.camera, &self.hero.scene) {
            log::error!("[scene] {:?}", e);
        }
    }

    fn frame(&mut self) -> bool {
        let (elapsed, dt) = self.clock.tick();
        if !self.hero.frame(elapsed, dt) {
            return false;
        }
        self.render();
        true
    }
}

/// Owns the 3D hero: canvas, scene state, GPU renderer and the render loop.
pub struct SceneRenderer {
    canvas: web::HtmlCanvasElement,
    shared: Rc<RefCell<SceneShared>>,
}

impl SceneRenderer {
    /// Synchronous setup: scene graph, canvas, pointer and resize wiring.
    /// The GPU and the model come later in [`SceneRenderer::start`].
    pub fn new(window: &web::Window, document: &web::Document) -> anyhow::Result<Self> {
        let host = dom::query_html(document, CANVAS_HOST)?;
        let mut config = SceneConfig::default();
        if let Some(url) = host.get_attribute("data-model").filter(|u| !u.is_empty()) {
            config.model_url = url;
        }
        let viewport = dom::current_viewport(window)?;
        let device = dom::detect_device_class(window);
        let canvas = dom::create_canvas(document, &host)?;
        dom::apply_canvas_size(&canvas, &viewport);

        let shared = Rc::new(RefCell::new(SceneShared {
            hero: HeroScene::new(config, viewport, device),
            gpu: None,
            clock: Clock::new(),
        }));

        {
            let shared = shared.clone();
            events::wire_pointer_move(document, move |x, y| {
                shared.borrow_mut().hero.on_pointer_move(x, y);
            });
        }
        {
            let shared = shared.clone();
            let canvas = canvas.clone();
            events::wire_throttled_resize(window, RESIZE_THROTTLE_MS, move || {
                let Some(window) = web::window() else {
                    return;
                };
                match dom::current_viewport(&window) {
                    Ok(viewport) => shared.borrow_mut().resize(&canvas, viewport),
                    Err(e) => log::warn!("[scene] resize: {:?}", e),
                }
            });
        }

        Ok(Self { canvas, shared })
    }

    /// Create the GPU renderer while the model loads, then either start the
    /// loop or draw a single static frame. The returned handle stops the loop.
    pub fn start(self) -> LoopHandle {
        let handle = LoopHandle::new();
        let loop_handle = handle.clone();
        spawn_local(async move {
            if let Err(e) = self.run(loop_handle).await {
                log::error!("[scene] {:?}", e);
            }
        });
        handle
    }

    async fn run(self, handle: LoopHandle) -> anyhow::Result<()> {
        // Never hold the RefCell across an await.
        let (viewport, scene, url) = {
            let s = self.shared.borrow();
            (
                *s.hero.viewport(),
                s.hero.scene.clone(),
                s.hero.config.model_url.clone(),
            )
        };
        // The fetch runs while the adapter and device are requested.
        let (gpu, outcome) = futures::join!(
            GpuState::new(self.canvas.clone(), &viewport, &scene),
            loader::load_model(&url)
        );
        let mut gpu = gpu?;
        {
            let mut s = self.shared.borrow_mut();
            // The window may have been resized while the adapter was pending.
            let (w, h) = s.hero.viewport().physical_size();
            gpu.resize(w, h);
            s.gpu = Some(gpu);
        }

        let transition = {
            let mut s = self.shared.borrow_mut();
            let s = &mut *s;
            let transition = s.hero.complete_load(outcome)?;
            if transition == LoadTransition::StartLoop {
                if let (Some(gpu), Some(model)) = (s.gpu.as_mut(), s.hero.scene.subject()) {
                    gpu.set_subject(model);
                }
                s.clock.mark();
            }
            transition
        };

        match transition {
            LoadTransition::StartLoop => {
                let shared = self.shared.clone();
                frame::start_loop(handle, move || shared.borrow_mut().frame());
            }
            LoadTransition::Stalled => {
                handle.stop();
                self.shared.borrow_mut().render();
            }
        }
        Ok(())
    }
}
