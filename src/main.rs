//! Event Horizon entry point
//!
//! On the web the page's render loop drives [`wasm_app::SceneHandle`] and the
//! chat widget drives [`wasm_app::ChatHandle`]. Natively we run a short
//! headless animation and report what would be drawn.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use event_horizon::chat::{
        self, ChatSession, ClientConfig, ConversationClient, Credential, FetchTransport, persona,
    };
    use event_horizon::scene::VoxelScene;
    use event_horizon::{QualityPreset, Settings};

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Voxel black hole exposed to the host renderer
    #[wasm_bindgen]
    pub struct SceneHandle {
        scene: VoxelScene,
        show_fps: bool,
    }

    #[wasm_bindgen]
    impl SceneHandle {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Result<SceneHandle, JsValue> {
            let settings = Settings::load();
            let scene = VoxelScene::new(&settings, None).map_err(js_error)?;
            Ok(SceneHandle {
                scene,
                show_fps: settings.show_fps,
            })
        }

        /// Advance to the requestAnimationFrame timestamp (ms)
        pub fn frame(&mut self, now_ms: f64) {
            self.scene.frame(now_ms / 1000.0);
        }

        pub fn disk_count(&self) -> usize {
            self.scene.disk_instances().len()
        }

        pub fn horizon_count(&self) -> usize {
            self.scene.horizon_instances().len()
        }

        /// 16 model floats + 4 color floats per disk instance
        pub fn disk_instances(&self) -> js_sys::Float32Array {
            js_sys::Float32Array::from(self.scene.disk_instances().as_floats())
        }

        pub fn horizon_instances(&self) -> js_sys::Float32Array {
            js_sys::Float32Array::from(self.scene.horizon_instances().as_floats())
        }

        pub fn group_matrix(&self) -> Vec<f32> {
            self.scene.group_matrix().to_cols_array().to_vec()
        }

        pub fn horizon_matrix(&self) -> Vec<f32> {
            self.scene.horizon_matrix().to_cols_array().to_vec()
        }

        pub fn galaxy_matrix(&self) -> Vec<f32> {
            self.scene.galaxy_matrix().to_cols_array().to_vec()
        }

        /// Galaxy xyz triples (empty when the preset disables it)
        pub fn galaxy_positions(&self) -> js_sys::Float32Array {
            let floats = self.scene.galaxy().map(|g| g.position_floats()).unwrap_or(&[]);
            js_sys::Float32Array::from(floats)
        }

        pub fn galaxy_colors(&self) -> js_sys::Float32Array {
            let floats = self.scene.galaxy().map(|g| g.color_floats()).unwrap_or(&[]);
            js_sys::Float32Array::from(floats)
        }

        pub fn galaxy_point_size(&self) -> f32 {
            self.scene.galaxy_point_size()
        }

        pub fn star_count(&self) -> usize {
            self.scene.stars().len()
        }

        /// Star xyz triples in world space
        pub fn star_positions(&self) -> js_sys::Float32Array {
            js_sys::Float32Array::from(self.scene.stars().position_floats())
        }

        pub fn star_colors(&self) -> js_sys::Float32Array {
            js_sys::Float32Array::from(self.scene.stars().color_floats())
        }

        pub fn star_sizes(&self) -> js_sys::Float32Array {
            js_sys::Float32Array::from(self.scene.stars().sizes())
        }

        /// Sprite size multiplier for the current frame
        pub fn star_twinkle(&self) -> f32 {
            self.scene.star_twinkle()
        }

        /// Radius of the black sphere hiding the shell's interior
        pub fn core_radius(&self) -> f32 {
            self.scene.core_radius()
        }

        /// Clear color as rgb
        pub fn background_color(&self) -> Vec<f32> {
            self.scene.background().to_array().to_vec()
        }

        pub fn fps(&self) -> u32 {
            self.scene.clock().fps()
        }

        pub fn show_fps(&self) -> bool {
            self.show_fps
        }

        pub fn set_show_fps(&mut self, show: bool) {
            self.show_fps = show;
            Settings::update(|s| s.show_fps = show);
        }

        pub fn set_reduced_motion(&mut self, reduced: bool) -> Result<(), JsValue> {
            let settings = Settings::update(|s| s.reduced_motion = reduced);
            self.scene.apply_settings(&settings).map_err(js_error)
        }

        /// Switch quality preset ("low", "medium", "high")
        pub fn set_quality(&mut self, preset: &str) -> Result<(), JsValue> {
            let quality = QualityPreset::from_str(preset)
                .ok_or_else(|| JsValue::from_str(&format!("unknown quality preset {preset:?}")))?;
            let settings = Settings::update(|s| s.quality = quality);
            log::info!("Quality set to {}", quality.as_str());
            self.scene.apply_settings(&settings).map_err(js_error)
        }
    }

    /// Chat widget state exposed to the page
    #[wasm_bindgen]
    pub struct ChatHandle {
        session: Rc<RefCell<ChatSession>>,
        client: Rc<ConversationClient<FetchTransport>>,
    }

    #[wasm_bindgen]
    impl ChatHandle {
        #[wasm_bindgen(constructor)]
        pub fn new() -> ChatHandle {
            let settings = Settings::load();
            let client = ConversationClient::from_env(
                FetchTransport,
                ClientConfig::from_settings(&settings),
            );
            ChatHandle {
                session: Rc::new(RefCell::new(ChatSession::new())),
                client: Rc::new(client),
            }
        }

        pub fn has_credential(&self) -> bool {
            self.client.has_credential()
        }

        /// Whether the chat panel was left expanded
        pub fn chat_open(&self) -> bool {
            Settings::load().chat_open
        }

        pub fn set_chat_open(&self, open: bool) {
            Settings::update(|s| s.chat_open = open);
        }

        pub fn is_pending(&self) -> bool {
            self.session.borrow().is_pending()
        }

        pub fn pending_status(&self) -> String {
            persona::PENDING_STATUS.to_string()
        }

        /// Transcript as a JSON array of `{role, text}`
        pub fn transcript_json(&self) -> Result<String, JsValue> {
            self.session
                .borrow()
                .transcript()
                .to_json()
                .map_err(js_error)
        }

        /// Submit user text; resolves to false if it was ignored
        pub fn submit(&self, text: String) -> js_sys::Promise {
            let session = Rc::clone(&self.session);
            let client = Rc::clone(&self.client);
            wasm_bindgen_futures::future_to_promise(async move {
                let accepted = chat::submit(&session, &*client, &text).await;
                Ok(JsValue::from_bool(accepted))
            })
        }
    }

    /// Overlay shown when the chat has no credential
    fn show_missing_key_banner() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        let Ok(banner) = document.create_element("div") else {
            return;
        };
        banner.set_id("api-key-warning");
        banner.set_class_name("api-key-warning");

        if let (Ok(title), Ok(text)) = (document.create_element("h2"), document.create_element("p")) {
            title.set_text_content(Some(persona::MISSING_KEY_TITLE));
            text.set_text_content(Some(persona::MISSING_KEY_BODY));
            let _ = banner.append_child(&title);
            let _ = banner.append_child(&text);
        }
        let _ = body.append_child(&banner);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Event Horizon starting...");

        if let Err(e) = Credential::from_env() {
            log::warn!("{}", e);
            show_missing_key_banner();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use event_horizon::Settings;
    use event_horizon::chat::{Credential, persona};
    use event_horizon::scene::{VoxelScene, flicker};

    env_logger::init();
    log::info!("Event Horizon (native) starting...");
    log::info!("Rendering and chat require the web build - run with `trunk serve`");

    let settings = Settings::load();
    let seed = std::env::var("EVENT_HORIZON_SEED")
        .ok()
        .and_then(|s| s.parse().ok());

    let mut scene = match VoxelScene::new(&settings, seed) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Invalid scene configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Two seconds at 60 Hz
    for frame in 0..=120 {
        scene.frame(frame as f64 / 60.0);
    }

    let t = scene.clock().elapsed();
    let params = scene.params();
    let flickering = (0..scene.disk().len())
        .filter(|&i| flicker(t, i, params.flicker_rate, params.flicker_threshold))
        .count();
    println!(
        "\nSeed {}: {} disk voxels ({} flickering at t={:.2}s), {} horizon voxels, {} stars",
        scene.seed(),
        scene.disk().len(),
        flickering,
        t,
        scene.horizon().len(),
        scene.stars().len()
    );
    if settings.show_fps {
        println!("{} fps", scene.clock().fps());
    }

    match Credential::from_env() {
        Ok(_) => println!("API key found"),
        Err(e) => {
            log::warn!("{}", e);
            println!("{}: {}", persona::MISSING_KEY_TITLE, persona::MISSING_KEY_BODY);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
