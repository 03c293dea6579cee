//! Viewer session lifecycle: activation, the load hand-off, per-frame
//! work and teardown.
//!
//! A [`ViewerSession`] owns everything one mounted viewer needs: the
//! render backend, the scene with its light rig, the orbit camera, the
//! resize subscription, the render loop and at most one in-flight load.
//! Every resource is optional so teardown can run from any partial state.

mod backend;
mod render_loop;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

pub use backend::{EngineConfig, RenderBackend};
pub use render_loop::RenderLoop;

use crate::camera::OrbitCamera;
use crate::error::ViewerError;
use crate::framing::{self, FramingOutcome, FramingReport};
use crate::input::{CursorState, InputEvent, InputProcessor};
use crate::loader::ModelLocator;
use crate::options::Options;
use crate::scene::{AssetContainer, Light, Material, NodeId, RenderableMesh, Scene};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique, monotonically increasing session identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Token held while the session accepts surface resizes. The host owns
/// the platform listener and drops it when the session deactivates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSubscription {
    session: SessionId,
}

impl ResizeSubscription {
    /// Session the subscription belongs to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }
}

/// Where the model load stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Still loading (or never started).
    Pending,
    /// Loaded, normalized and framed.
    Framed(FramingReport),
    /// Loaded, but nothing had vertices; default framing applied.
    Empty,
    /// Loaded, but every vertex coincides; no scaling applied.
    Degenerate,
    /// The load or the normalization failed.
    Failed(String),
}

type LoadResult = Result<AssetContainer, ViewerError>;

/// One mounted viewer.
pub struct ViewerSession<B: RenderBackend> {
    id: SessionId,
    locator: ModelLocator,
    options: Options,
    backend: Option<B>,
    scene: Option<Scene>,
    camera: Option<OrbitCamera>,
    input: InputProcessor,
    resize: Option<ResizeSubscription>,
    render_loop: RenderLoop,
    pending: Option<mpsc::Receiver<LoadResult>>,
    pivot: Option<NodeId>,
    outcome: LoadOutcome,
    deactivated: bool,
}

impl<B: RenderBackend> ViewerSession<B> {
    /// Activate a session for `locator` and start loading the model.
    ///
    /// Natively the load runs on a background thread and is picked up by
    /// [`frame`](Self::frame). On wasm32 there are no threads: the host
    /// fetches the bytes itself and calls
    /// [`complete_load`](Self::complete_load).
    ///
    /// Never fails: errors are logged and the session comes back with
    /// whatever resources could be created.
    pub fn activate<F>(locator: ModelLocator, options: Options, acquire: F) -> Self
    where
        F: FnOnce(&EngineConfig) -> Result<B, ViewerError>,
    {
        let mut session = Self::activate_deferred(locator, options, acquire);
        if session.backend.is_some() {
            session.start_background_load();
        }
        session
    }

    /// Activate without starting a load; the caller delivers the result
    /// through [`complete_load`](Self::complete_load).
    pub fn activate_deferred<F>(locator: ModelLocator, options: Options, acquire: F) -> Self
    where
        F: FnOnce(&EngineConfig) -> Result<B, ViewerError>,
    {
        let id = SessionId::next();
        let mut session = Self {
            id,
            locator,
            render_loop: RenderLoop::new(options.engine.target_fps),
            options,
            backend: None,
            scene: None,
            camera: None,
            input: InputProcessor::new(),
            resize: None,
            pending: None,
            pivot: None,
            outcome: LoadOutcome::Pending,
            deactivated: false,
        };

        let config = EngineConfig::from(&session.options.engine);
        let backend = match acquire(&config) {
            Ok(backend) => backend,
            Err(e) => {
                log::error!("session {id}: render backend unavailable: {e}");
                session.outcome = LoadOutcome::Failed(e.to_string());
                return session;
            }
        };
        let (width, height) = backend.size();

        let mut scene = Scene::new(session.options.scene.clear_color);
        for light in Light::rig(&session.options.lighting) {
            scene.add_light(light);
        }

        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let mut camera = OrbitCamera::from_options(&session.options.camera, aspect);
        camera.attach_control();

        session.backend = Some(backend);
        session.scene = Some(scene);
        session.camera = Some(camera);
        session.render_loop.start();
        session.resize = Some(ResizeSubscription { session: id });
        log::info!(
            "session {id}: activated for {} ({width}x{height})",
            session.locator
        );
        session
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn start_background_load(&mut self) {
        let locator = self.locator.clone();
        self.spawn_load(move || crate::loader::load(&locator));
    }

    #[cfg(target_arch = "wasm32")]
    fn start_background_load(&mut self) {
        log::debug!("session {}: waiting for host-driven load", self.id);
    }

    /// Run `job` on the loader thread; its result is picked up by
    /// [`frame`](Self::frame).
    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn spawn_load<F>(&mut self, job: F)
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let id = self.id;
        let spawned = std::thread::Builder::new()
            .name("orbitview-loader".into())
            .spawn(move || {
                if tx.send(job()).is_err() {
                    log::debug!("session {id}: load finished after teardown, result dropped");
                }
            });
        match spawned {
            Ok(_) => self.pending = Some(rx),
            Err(e) => self.fail_load(&ViewerError::ThreadSpawn(e)),
        }
    }

    fn fail_load(&mut self, error: &ViewerError) {
        log::error!("session {}: failed to load {}: {error}", self.id, self.locator);
        self.outcome = LoadOutcome::Failed(error.to_string());
    }

    fn poll_load(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.complete_load(result);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.pending = None;
                self.fail_load(&ViewerError::Fetch("loader thread exited without a result".into()));
            }
        }
    }

    /// Merge a finished load into the scene and normalize it.
    ///
    /// Every loaded mesh is enabled and shown; meshes without a material
    /// get the default gray. A no-op after teardown or once an earlier load
    /// has settled, successfully or not.
    pub fn complete_load(&mut self, result: Result<AssetContainer, ViewerError>) {
        if self.deactivated {
            log::debug!("session {}: load completed after teardown, ignoring", self.id);
            return;
        }
        if self.pivot.is_some() || self.outcome != LoadOutcome::Pending {
            log::warn!("session {}: load already settled, ignoring second load", self.id);
            return;
        }
        let container = match result {
            Ok(container) => container,
            Err(e) => {
                self.fail_load(&e);
                return;
            }
        };
        let (Some(scene), Some(camera)) = (self.scene.as_mut(), self.camera.as_mut()) else {
            log::debug!("session {}: no scene to load into", self.id);
            return;
        };

        let mesh_count = container.mesh_count();
        let meshes = container.add_all_to_scene(scene);
        let gray = self.options.scene.default_material_color;
        let graph = scene.graph_mut();
        for &id in &meshes {
            let Some(mesh) = graph.node_mut(id).and_then(|n| n.mesh.as_mut()) else {
                continue;
            };
            mesh.set_enabled(true);
            mesh.set_visible(true);
            if !mesh.has_material() {
                mesh.set_material(Material::solid("default", gray));
            }
            log::debug!("mesh {id:?}: {} vertices", mesh.vertex_count());
        }
        log::info!("session {}: merged {mesh_count} meshes", self.id);

        let renderable = framing::renderable_meshes(scene, &meshes);
        self.outcome = match framing::normalize(scene, camera, &renderable, &self.options.framing) {
            Ok(FramingOutcome::Framed(report)) => {
                self.pivot = Some(report.pivot);
                LoadOutcome::Framed(report)
            }
            Ok(FramingOutcome::Degenerate { pivot }) => {
                self.pivot = Some(pivot);
                LoadOutcome::Degenerate
            }
            Ok(FramingOutcome::Empty) => LoadOutcome::Empty,
            Err(e) => {
                log::error!("session {}: normalization failed: {e}", self.id);
                LoadOutcome::Failed(e.to_string())
            }
        };
    }

    /// One render loop tick: pick up a finished load, advance the camera
    /// and draw. Returns whether a frame was rendered.
    pub fn frame(&mut self) -> bool {
        if !self.render_loop.is_running() {
            return false;
        }
        self.poll_load();

        let (Some(backend), Some(scene), Some(camera)) =
            (self.backend.as_mut(), self.scene.as_mut(), self.camera.as_mut())
        else {
            return false;
        };
        camera.update();
        if !self.render_loop.tick() {
            return false;
        }
        match backend.render(scene, camera) {
            Ok(()) => {
                scene.mark_rendered();
                self.render_loop.frame_done();
                true
            }
            Err(e) => {
                log::error!("session {}: render failed: {e}", self.id);
                false
            }
        }
    }

    /// Resize the surface. Ignored unless subscribed.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        if self.resize.is_none() {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(width, height);
        }
        if let Some(camera) = self.camera.as_mut() {
            camera.resize(width, height);
        }
    }

    /// Feed a pointer event to the camera. Returns the new cursor state
    /// when it changed.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<CursorState> {
        let camera = self.camera.as_mut()?;
        self.input.handle_event(event, camera)
    }

    /// Release everything the session owns. Idempotent; each step runs
    /// only if its resource exists.
    pub fn deactivate(&mut self) {
        if self.deactivated {
            return;
        }
        self.deactivated = true;

        if let Some(subscription) = self.resize.take() {
            log::debug!("session {}: resize unsubscribed", subscription.session());
        }
        if let Some(camera) = self.camera.as_mut() {
            camera.detach_control();
        }
        self.render_loop.stop();
        if self.pending.take().is_some() {
            log::debug!("session {}: abandoning in-flight load", self.id);
        }
        if let Some(mut backend) = self.backend.take() {
            backend.dispose();
        }
        if let Some(scene) = self.scene.as_mut() {
            scene.dispose();
        }
        log::info!("session {}: deactivated", self.id);
    }

    /// Session identity.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The locator this session was activated with.
    #[must_use]
    pub fn locator(&self) -> &ModelLocator {
        &self.locator
    }

    /// Options the session was activated with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current load state.
    #[must_use]
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// Whether the session is live (activated and not torn down).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.deactivated && self.backend.is_some()
    }

    /// The scene, if one was created.
    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// The camera, if one was created.
    #[must_use]
    pub fn camera(&self) -> Option<&OrbitCamera> {
        self.camera.as_ref()
    }

    /// The render backend while the session is live.
    #[must_use]
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// The model pivot, once a model has been normalized.
    #[must_use]
    pub fn pivot(&self) -> Option<NodeId> {
        self.pivot
    }

    /// Current cursor feedback.
    #[must_use]
    pub fn cursor(&self) -> CursorState {
        self.input.cursor()
    }

    /// Render loop statistics.
    #[must_use]
    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }
}

impl<B: RenderBackend> Drop for ViewerSession<B> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use glam::Vec3;

    use super::*;
    use crate::framing::PIVOT_NAME;
    use crate::input::MouseButton;
    use crate::scene::Mesh;

    #[derive(Debug, Default)]
    struct Calls {
        resizes: Vec<(u32, u32)>,
        renders: usize,
        disposals: usize,
    }

    struct RecordingBackend {
        calls: Rc<RefCell<Calls>>,
        size: (u32, u32),
    }

    impl RenderBackend for RecordingBackend {
        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
            self.calls.borrow_mut().resizes.push((width, height));
        }

        fn render(&mut self, _scene: &Scene, _camera: &OrbitCamera) -> Result<(), ViewerError> {
            self.calls.borrow_mut().renders += 1;
            Ok(())
        }

        fn dispose(&mut self) {
            self.calls.borrow_mut().disposals += 1;
        }
    }

    fn live_session(locator: &str) -> (ViewerSession<RecordingBackend>, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let shared = Rc::clone(&calls);
        let session = ViewerSession::activate_deferred(
            ModelLocator::new(locator),
            Options::default(),
            move |config| {
                assert!(config.preserve_drawing_buffer);
                assert!(config.stencil);
                Ok(RecordingBackend {
                    calls: shared,
                    size: (800, 600),
                })
            },
        );
        (session, calls)
    }

    fn box_container() -> AssetContainer {
        let mut container = AssetContainer::new("box.stl");
        let _ = container.push_mesh(
            "box",
            Mesh::new(
                vec![Vec3::ZERO, Vec3::new(2.0, 4.0, 2.0)],
                Vec::new(),
                Vec::new(),
            ),
        );
        container
    }

    #[test]
    fn activation_sets_up_scene_and_camera() {
        let (session, _) = live_session("model.glb");
        assert!(session.is_active());
        assert_eq!(session.load_outcome(), &LoadOutcome::Pending);

        let scene = session.scene().unwrap();
        assert_eq!(scene.clear_color, [0.05, 0.05, 0.08, 1.0]);
        assert_eq!(scene.lights().len(), 2);

        let camera = session.camera().unwrap();
        assert!((camera.alpha + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!((camera.beta - std::f32::consts::PI / 2.5).abs() < 1e-5);
        assert_eq!(camera.radius, 10.0);
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(camera.is_attached());
    }

    #[test]
    fn session_ids_increase() {
        let (a, _) = live_session("a.obj");
        let (b, _) = live_session("b.obj");
        assert!(b.id() > a.id());
    }

    #[test]
    fn failed_backend_deactivates_cleanly() {
        let mut session: ViewerSession<RecordingBackend> = ViewerSession::activate(
            ModelLocator::new("model.glb"),
            Options::default(),
            |_| Err(ViewerError::Viewer("no adapter".into())),
        );
        assert!(!session.is_active());
        assert!(session.scene().is_none());
        assert!(matches!(session.load_outcome(), LoadOutcome::Failed(m) if m.contains("no adapter")));
        assert!(!session.frame());

        session.deactivate();
        session.deactivate();
        session.handle_resize(10, 10);
        assert!(session.handle_input(InputEvent::PointerLeft).is_none());
    }

    #[test]
    fn load_assigns_gray_and_frames_model() {
        let (mut session, _) = live_session("box.stl");
        session.complete_load(Ok(box_container()));

        let LoadOutcome::Framed(report) = session.load_outcome().clone() else {
            unreachable!("expected framed outcome, got {:?}", session.load_outcome());
        };
        assert!((report.scale - 2.5).abs() < 1e-5);
        assert!((report.pivot_position - Vec3::new(-2.5, -5.0, -2.5)).length() < 1e-4);
        assert!((report.radius - 15.0).abs() < 1e-4);
        assert_eq!(session.pivot(), Some(report.pivot));

        let scene = session.scene().unwrap();
        let mesh = scene
            .graph()
            .mesh_nodes()
            .into_iter()
            .find_map(|id| scene.graph().node(id).and_then(|n| n.mesh.as_ref()))
            .unwrap();
        assert_eq!(mesh.material, Some(Material::solid("default", [0.8, 0.8, 0.8])));
        assert!(mesh.enabled && mesh.visible);

        let camera = session.camera().unwrap();
        assert!(camera.lower_radius_limit <= camera.upper_radius_limit);
        assert!(camera.zfar >= camera.znear);
    }

    #[test]
    fn existing_material_is_kept() {
        let (mut session, _) = live_session("red.obj");
        let mut container = AssetContainer::new("red.obj");
        let red = Material::solid("red", [1.0, 0.0, 0.0]);
        let _ = container.push_mesh(
            "tri",
            Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Vec::new(), vec![0, 1, 2])
                .with_material(red.clone()),
        );
        session.complete_load(Ok(container));

        let scene = session.scene().unwrap();
        let materials: Vec<_> = scene
            .graph()
            .iter()
            .filter_map(|(_, n)| n.mesh.as_ref()?.material.clone())
            .collect();
        assert_eq!(materials, vec![red]);
    }

    #[test]
    fn second_load_does_not_add_a_pivot() {
        let (mut session, _) = live_session("box.stl");
        session.complete_load(Ok(box_container()));
        session.complete_load(Ok(box_container()));

        let pivots = session
            .scene()
            .unwrap()
            .graph()
            .iter()
            .filter(|(_, n)| n.name == PIVOT_NAME)
            .count();
        assert_eq!(pivots, 1);
    }

    #[test]
    fn failed_framing_settles_the_load() {
        let (mut session, _) = live_session("broken.stl");
        let mut broken = AssetContainer::new("broken.stl");
        let _ = broken.push_mesh(
            "broken",
            Mesh::new(
                vec![Vec3::ZERO, Vec3::new(f32::INFINITY, 1.0, 1.0)],
                Vec::new(),
                Vec::new(),
            ),
        );
        session.complete_load(Ok(broken));
        assert!(matches!(session.load_outcome(), LoadOutcome::Failed(m) if m.contains("framing")));

        session.complete_load(Ok(box_container()));
        let scene = session.scene().unwrap();
        let pivots = scene.graph().iter().filter(|(_, n)| n.name == PIVOT_NAME).count();
        assert_eq!(pivots, 0);
        assert_eq!(scene.graph().mesh_nodes().len(), 1);
        assert!(session.pivot().is_none());
        assert!(matches!(session.load_outcome(), LoadOutcome::Failed(_)));
    }

    #[test]
    fn load_after_fetch_error_is_ignored() {
        let (mut session, _) = live_session("flaky.glb");
        session.complete_load(Err(ViewerError::Fetch("timeout".into())));
        session.complete_load(Ok(box_container()));
        assert!(session.scene().unwrap().graph().is_empty());
        assert!(matches!(session.load_outcome(), LoadOutcome::Failed(m) if m.contains("timeout")));
    }

    #[test]
    fn empty_meshes_fall_back_to_defaults() {
        let (mut session, _) = live_session("empty.obj");
        let mut container = AssetContainer::new("empty.obj");
        let _ = container.push_mesh("nothing", Mesh::new(Vec::new(), Vec::new(), Vec::new()));
        session.complete_load(Ok(container));

        assert_eq!(session.load_outcome(), &LoadOutcome::Empty);
        assert!(session.pivot().is_none());
        let camera = session.camera().unwrap();
        assert_eq!(camera.radius, 10.0);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn load_error_keeps_session_alive() {
        let (mut session, calls) = live_session("missing.glb");
        session.complete_load(Err(ViewerError::Fetch("404".into())));
        assert!(matches!(session.load_outcome(), LoadOutcome::Failed(m) if m.contains("404")));
        assert!(session.is_active());
        assert!(session.frame());
        assert_eq!(calls.borrow().renders, 1);
    }

    #[test]
    fn frame_renders_and_clears_dirty_flag() {
        let (mut session, calls) = live_session("box.stl");
        session.complete_load(Ok(box_container()));
        assert!(session.scene().unwrap().is_dirty());

        assert!(session.frame());
        assert!(!session.scene().unwrap().is_dirty());
        assert_eq!(calls.borrow().renders, 1);
        assert_eq!(session.render_loop().frame_count(), 1);
    }

    #[test]
    fn resize_reaches_backend_and_camera() {
        let (mut session, calls) = live_session("box.stl");
        session.handle_resize(400, 200);
        assert_eq!(calls.borrow().resizes, vec![(400, 200)]);
        assert!((session.camera().unwrap().aspect - 2.0).abs() < 1e-6);

        session.deactivate();
        session.handle_resize(100, 100);
        assert_eq!(calls.borrow().resizes.len(), 1);
    }

    #[test]
    fn deactivate_releases_once() {
        let (mut session, calls) = live_session("box.stl");
        session.deactivate();
        session.deactivate();
        assert_eq!(calls.borrow().disposals, 1);
        assert!(!session.is_active());
        assert!(session.scene().unwrap().is_disposed());
        assert!(!session.camera().unwrap().is_attached());
        assert!(!session.frame());

        session.complete_load(Ok(box_container()));
        assert_eq!(session.load_outcome(), &LoadOutcome::Pending);
        drop(session);
        assert_eq!(calls.borrow().disposals, 1);
    }

    #[test]
    fn drop_deactivates() {
        let (session, calls) = live_session("box.stl");
        drop(session);
        assert_eq!(calls.borrow().disposals, 1);
    }

    #[test]
    fn pointer_feedback_through_session() {
        let (mut session, _) = live_session("box.stl");
        assert_eq!(session.cursor(), CursorState::Grab);
        assert_eq!(
            session.handle_input(InputEvent::PointerDown { button: MouseButton::Left }),
            Some(CursorState::Grabbing)
        );
        assert_eq!(
            session.handle_input(InputEvent::PointerUp { button: MouseButton::Left }),
            Some(CursorState::Grab)
        );
    }

    #[test]
    fn background_load_is_picked_up_by_frame() {
        let (mut session, _) = live_session("box.stl");
        session.spawn_load(|| Ok(box_container()));
        for _ in 0..200 {
            let _ = session.frame();
            if session.load_outcome() != &LoadOutcome::Pending {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(matches!(session.load_outcome(), LoadOutcome::Framed(_)));
    }

    #[test]
    fn teardown_mid_load_drops_result() {
        let (mut session, _) = live_session("slow.glb");
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        session.spawn_load(move || {
            let _ = release_rx.recv();
            let _ = done_tx.send(());
            Ok(box_container())
        });

        session.deactivate();
        release_tx.send(()).unwrap();
        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(!session.frame());
        assert_eq!(session.load_outcome(), &LoadOutcome::Pending);
        assert!(session.pivot().is_none());
    }

    #[test]
    fn native_activate_loads_from_disk() {
        let path = std::env::temp_dir().join(format!("orbitview_session_{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 2 0 0\nv 0 4 2\nf 1 2 3\n").unwrap();

        let calls = Rc::new(RefCell::new(Calls::default()));
        let shared = Rc::clone(&calls);
        let mut session = ViewerSession::activate(
            ModelLocator::new(path.display().to_string()),
            Options::default(),
            move |_| {
                Ok(RecordingBackend {
                    calls: shared,
                    size: (640, 480),
                })
            },
        );
        for _ in 0..200 {
            let _ = session.frame();
            if session.load_outcome() != &LoadOutcome::Pending {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let _ = std::fs::remove_file(&path);
        assert!(matches!(session.load_outcome(), LoadOutcome::Framed(_)));
        assert!(calls.borrow().renders > 0);
    }
}
