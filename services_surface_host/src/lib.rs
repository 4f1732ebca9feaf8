//! # Surface Host Service
//!
//! This crate implements the host side of the remote surface bridge: a
//! controller that keeps one surface synchronized with an out-of-process
//! rendering engine through a [`RendererConnector`].
//!
//! ## Philosophy
//!
//! - **Diff, don't stream**: The renderer hears about a value only when it
//!   actually changed
//! - **Two cadences**: Input and diffing run on the host's variable tick;
//!   frame sync runs on the fixed tick, so decode cost never skews input
//!   timing
//! - **Scoped acquisition**: The connector and the host-wide settings the
//!   bridge overrides are acquired on enable and released/restored on
//!   disable, shutdown success or not
//! - **Nothing blocks**: Every connector call is fire-and-forget or a
//!   non-blocking poll; failures go to diagnostics, never into the host
//!   loop
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A rendering engine (that's the process behind the connector)
//! - A widget/scene system (the host owns layout and hit testing)
//! - A transport (see `renderer_connector`)

pub mod change;
pub mod diagnostics;
pub mod frame_sync;
pub mod host;
pub mod keyboard;
pub mod pointer;

pub use change::{ChangeDetector, PushedState};
pub use diagnostics::{DiagnosticsSink, LogEntry, LogLevel, MemorySink, NullSink};
pub use frame_sync::{DecodeError, FrameDecoder, RgbaFrameDecoder};
pub use host::{HostEnvironment, HostSettings, FIXED_TICK_INTERVAL};
pub use keyboard::{KeyEmission, KeyRepeat, RepeatConfig};
pub use pointer::{PointerEmission, PointerTracker};

use std::time::Duration;

use input_types::InputSample;
use renderer_connector::{RendererConnector, SurfaceCommand};
use surface_types::{Surface, SurfaceImage};

/// Controller for one surface backed by a remote renderer.
///
/// Drive it with the host's callbacks: [`enable`](Self::enable) when the
/// surface comes alive, [`tick`](Self::tick) once per host frame,
/// [`fixed_tick`](Self::fixed_tick) at the fixed rate, and
/// [`disable`](Self::disable) on teardown.
pub struct SurfaceHost<C: RendererConnector> {
    surface: Surface,
    connector: Option<C>,
    initialized: bool,
    change: ChangeDetector,
    keyboard: KeyRepeat,
    pointer: PointerTracker,
    decoder: Box<dyn FrameDecoder>,
    image: Option<SurfaceImage>,
    captured: Option<HostSettings>,
    diagnostics: Box<dyn DiagnosticsSink>,
}

impl<C: RendererConnector> SurfaceHost<C> {
    /// Creates a disabled controller for the given surface
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            connector: None,
            initialized: false,
            change: ChangeDetector::new(),
            keyboard: KeyRepeat::new(),
            pointer: PointerTracker::new(),
            decoder: Box::new(RgbaFrameDecoder),
            image: None,
            captured: None,
            diagnostics: Box::new(NullSink),
        }
    }

    /// Replaces the diagnostics sink
    pub fn with_diagnostics(mut self, sink: Box<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Replaces the key-repeat thresholds
    pub fn with_repeat_config(mut self, config: RepeatConfig) -> Self {
        self.keyboard = KeyRepeat::with_config(config);
        self
    }

    /// Replaces the frame decoder
    pub fn with_decoder(mut self, decoder: Box<dyn FrameDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Returns the surface
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Returns the surface for host mutation (layout, navigation)
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Returns the connector while enabled
    pub fn connector(&self) -> Option<&C> {
        self.connector.as_ref()
    }

    /// Returns the connector mutably while enabled
    pub fn connector_mut(&mut self) -> Option<&mut C> {
        self.connector.as_mut()
    }

    /// Returns the backing image, once a frame or resize allocated it
    pub fn image(&self) -> Option<&SurfaceImage> {
        self.image.as_ref()
    }

    /// Returns true once the initial setup command has been sent this
    /// enable cycle
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns true between enable and disable
    pub fn is_enabled(&self) -> bool {
        self.connector.is_some()
    }

    /// Brings the bridge up.
    ///
    /// Captures the host settings the bridge overrides (background
    /// execution, fixed tick rate), applies the overrides, and installs
    /// the connector. A second enable without a disable is ignored.
    pub fn enable(&mut self, env: &mut dyn HostEnvironment, connector: C) {
        if self.connector.is_some() {
            self.diagnostics.report(LogEntry::new(
                LogLevel::Debug,
                "enable ignored: bridge already enabled",
            ));
            return;
        }

        self.captured = Some(env.settings());
        env.apply(HostSettings::bridge_overrides());

        self.connector = Some(connector);
        self.initialized = false;
        self.change.reset();
        self.keyboard.reset();
        self.pointer.reset();
        self.image = None;
    }

    /// Tears the bridge down.
    ///
    /// Requests connector shutdown, then restores the captured host
    /// settings — in that order, whether or not shutdown succeeded.
    /// Returns the released connector. Safe to call repeatedly.
    pub fn disable(&mut self, env: &mut dyn HostEnvironment) -> Option<C> {
        let connector = self.connector.take().map(|mut connector| {
            if let Err(err) = connector.shutdown() {
                self.diagnostics.report(
                    LogEntry::new(LogLevel::Warn, "connector shutdown failed")
                        .with_field("error", err.to_string()),
                );
            }
            connector
        });

        if let Some(captured) = self.captured.take() {
            env.apply(captured);
        }

        self.initialized = false;
        connector
    }

    /// Runs one variable-rate tick.
    ///
    /// Order per tick: initialize-if-ready, content diff, geometry diff,
    /// keyboard, pointer. `dt` is the wall time since the previous tick.
    pub fn tick(&mut self, sample: &InputSample, dt: Duration) {
        let Some(connector) = self.connector.as_mut() else {
            return;
        };

        // Initialization defers silently until the host lays the surface
        // out with a nonzero width.
        if !self.initialized {
            let rect = self.surface.rect();
            if rect.is_zero_width() {
                return;
            }
            self.change.snapshot(self.surface.url(), rect);
            send_command(
                connector,
                self.diagnostics.as_mut(),
                SurfaceCommand::Initialize {
                    url: self.surface.url().to_string(),
                    rect,
                },
            );
            self.initialized = true;
        }

        if self.change.url_changed(self.surface.url()) {
            send_command(
                connector,
                self.diagnostics.as_mut(),
                SurfaceCommand::LoadUrl {
                    url: self.surface.url().to_string(),
                },
            );
        }

        let rect = self.surface.rect();
        if self.change.rect_changed(rect) {
            // Reallocate before the command goes out so a frame arriving
            // on the next fixed tick never decodes into stale dimensions.
            self.image = Some(SurfaceImage::new(rect.width as u32, rect.height as u32));
            send_command(
                connector,
                self.diagnostics.as_mut(),
                SurfaceCommand::Resize { rect },
            );
        }

        for emission in self.keyboard.poll(sample, dt) {
            let command = match emission {
                KeyEmission::Key(key) => SurfaceCommand::key_down(key),
                KeyEmission::Text(text) => SurfaceCommand::char_down(text),
            };
            send_command(connector, self.diagnostics.as_mut(), command);
        }

        for emission in self.pointer.poll(sample, self.surface.id(), rect) {
            let command = match emission {
                PointerEmission::Wheel { at, delta } => SurfaceCommand::MouseWheel {
                    x: at.x,
                    y: at.y,
                    delta,
                },
                PointerEmission::Move { at } => SurfaceCommand::MouseMove { x: at.x, y: at.y },
                PointerEmission::Down { at, button } => SurfaceCommand::mouse_down(at, button),
                PointerEmission::Up { at, button } => SurfaceCommand::mouse_up(at, button),
                PointerEmission::Leave => SurfaceCommand::MouseLeave,
            };
            send_command(connector, self.diagnostics.as_mut(), command);
        }
    }

    /// Runs one fixed-rate tick: frame sync only.
    pub fn fixed_tick(&mut self) {
        if !self.initialized {
            return;
        }
        let Some(connector) = self.connector.as_mut() else {
            return;
        };
        let Some(pushed) = self.change.pushed() else {
            return;
        };
        let pushed_rect = pushed.rect;

        frame_sync::sync_frame(
            connector,
            self.decoder.as_ref(),
            &mut self.image,
            pushed_rect,
            self.diagnostics.as_mut(),
        );
    }

    /// Loads explicit HTML, bypassing the surface's url field.
    ///
    /// Dropped (with a diagnostics note) until the bridge has initialized.
    pub fn load_html(&mut self, html: impl Into<String>) {
        if !self.initialized {
            self.diagnostics.report(LogEntry::new(
                LogLevel::Debug,
                "html load dropped: bridge not initialized",
            ));
            return;
        }
        let Some(connector) = self.connector.as_mut() else {
            return;
        };
        send_command(
            connector,
            self.diagnostics.as_mut(),
            SurfaceCommand::LoadHtml { html: html.into() },
        );
    }

    /// Forwards a host focus transition to the renderer.
    ///
    /// Dropped until the bridge has initialized.
    pub fn focus_changed(&mut self, focused: bool) {
        if !self.initialized {
            return;
        }
        let Some(connector) = self.connector.as_mut() else {
            return;
        };
        send_command(
            connector,
            self.diagnostics.as_mut(),
            SurfaceCommand::FocusChanged { focused },
        );
    }
}

/// Fire-and-forget send: failures go to diagnostics, not to the caller.
fn send_command<C: RendererConnector>(
    connector: &mut C,
    diagnostics: &mut dyn DiagnosticsSink,
    command: SurfaceCommand,
) {
    let action = command.action();
    if let Err(err) = connector.send(command) {
        diagnostics.report(
            LogEntry::new(LogLevel::Warn, "command send failed")
                .with_field("action", action)
                .with_field("error", err.to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_types::{Key, MouseButton};
    use renderer_connector::RecordingConnector;
    use surface_types::{Point, Rect, BYTES_PER_PIXEL};

    const TICK: Duration = Duration::from_millis(16);

    struct MockEnv {
        settings: HostSettings,
        applied: Vec<HostSettings>,
    }

    impl MockEnv {
        fn new() -> Self {
            Self {
                settings: HostSettings {
                    run_in_background: false,
                    fixed_tick_interval: Duration::from_millis(20),
                },
                applied: Vec::new(),
            }
        }
    }

    impl HostEnvironment for MockEnv {
        fn settings(&self) -> HostSettings {
            self.settings
        }

        fn apply(&mut self, settings: HostSettings) {
            self.settings = settings;
            self.applied.push(settings);
        }
    }

    fn enabled_host(env: &mut MockEnv) -> SurfaceHost<RecordingConnector> {
        let mut host = SurfaceHost::new(Surface::new("about:blank"));
        host.enable(env, RecordingConnector::new());
        host
    }

    fn initialized_host(env: &mut MockEnv) -> SurfaceHost<RecordingConnector> {
        let mut host = enabled_host(env);
        host.surface_mut().set_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
        host.tick(&InputSample::new(), TICK);
        host.connector_mut().unwrap().take_commands();
        host
    }

    #[test]
    fn test_full_lifecycle_scenario() {
        let mut env = MockEnv::new();
        let original = env.settings();
        let mut host = enabled_host(&mut env);

        // Settings overridden on enable.
        assert_eq!(env.settings(), HostSettings::bridge_overrides());

        // Zero-size surface: no commands at all.
        host.tick(&InputSample::new(), TICK);
        host.tick(&InputSample::new(), TICK);
        assert!(host.connector().unwrap().commands().is_empty());
        assert!(!host.is_initialized());

        // Laid out: exactly one initialize with the full geometry.
        let rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        host.surface_mut().set_rect(rect);
        host.tick(&InputSample::new(), TICK);
        host.tick(&InputSample::new(), TICK);
        assert_eq!(
            host.connector().unwrap().commands(),
            &[SurfaceCommand::Initialize {
                url: "about:blank".to_string(),
                rect,
            }]
        );
        assert!(host.is_initialized());

        // Content change: exactly one load_url.
        host.surface_mut().set_url("https://example.com");
        host.tick(&InputSample::new(), TICK);
        host.tick(&InputSample::new(), TICK);
        assert_eq!(
            host.connector().unwrap().commands()[1..],
            [SurfaceCommand::LoadUrl {
                url: "https://example.com".to_string(),
            }]
        );

        // Geometry change: exactly one resize.
        let resized = Rect::new(0.0, 0.0, 800.0, 400.0);
        host.surface_mut().set_rect(resized);
        host.tick(&InputSample::new(), TICK);
        host.tick(&InputSample::new(), TICK);
        assert_eq!(
            host.connector().unwrap().commands()[2..],
            [SurfaceCommand::Resize { rect: resized }]
        );

        // Disable: one shutdown, then settings restored.
        let connector = host.disable(&mut env).unwrap();
        assert_eq!(connector.shutdown_count(), 1);
        assert_eq!(env.settings(), original);
        assert_eq!(
            env.applied,
            vec![HostSettings::bridge_overrides(), original]
        );
    }

    #[test]
    fn test_disable_is_idempotent() {
        let mut env = MockEnv::new();
        let mut host = enabled_host(&mut env);

        assert!(host.disable(&mut env).is_some());
        let applied_after_first = env.applied.len();
        assert!(host.disable(&mut env).is_none());
        assert_eq!(env.applied.len(), applied_after_first);
    }

    #[test]
    fn test_double_enable_ignored() {
        let mut env = MockEnv::new();
        let mut host = enabled_host(&mut env);
        host.enable(&mut env, RecordingConnector::new());

        // The captured settings still restore to the true original.
        host.disable(&mut env);
        assert!(!env.settings().run_in_background);
    }

    #[test]
    fn test_tick_without_enable_is_noop() {
        let mut host: SurfaceHost<RecordingConnector> =
            SurfaceHost::new(Surface::new("about:blank"));
        host.surface_mut().set_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
        host.tick(&InputSample::new(), TICK);
        host.fixed_tick();
        assert!(!host.is_initialized());
    }

    #[test]
    fn test_geometry_resize_reallocates_image() {
        let mut env = MockEnv::new();
        let mut host = initialized_host(&mut env);

        host.surface_mut().set_rect(Rect::new(0.0, 0.0, 4.0, 2.0));
        host.tick(&InputSample::new(), TICK);

        let image = host.image().unwrap();
        assert_eq!((image.width(), image.height()), (4, 2));
    }

    #[test]
    fn test_keyboard_emissions_become_commands() {
        let mut env = MockEnv::new();
        let mut host = initialized_host(&mut env);

        host.tick(&InputSample::new().with_pressed(Key::PageDown), TICK);
        host.tick(&InputSample::new().with_text("hi"), TICK);

        assert_eq!(
            host.connector().unwrap().commands(),
            &[
                SurfaceCommand::KeyDown {
                    key: "PageDown".to_string()
                },
                SurfaceCommand::CharDown {
                    text: "hi".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_pointer_emissions_become_commands() {
        let mut env = MockEnv::new();
        let mut host = initialized_host(&mut env);
        let owned = host.surface().id();

        let sample = InputSample::new()
            .at_pointer(Point::new(100.0, 100.0))
            .with_hit(&owned)
            .with_button_pressed(MouseButton::Middle);
        host.tick(&sample, TICK);

        assert_eq!(
            host.connector().unwrap().commands(),
            &[
                SurfaceCommand::MouseMove { x: 100.0, y: 500.0 },
                SurfaceCommand::MouseDown {
                    x: 100.0,
                    y: 500.0,
                    button: 1
                },
            ]
        );
    }

    #[test]
    fn test_fixed_tick_decodes_ready_frame() {
        let mut env = MockEnv::new();
        let mut host = enabled_host(&mut env);
        host.surface_mut().set_rect(Rect::new(0.0, 0.0, 2.0, 2.0));
        host.tick(&InputSample::new(), TICK);

        host.connector_mut()
            .unwrap()
            .publish_frame(vec![0x7F; 2 * 2 * BYTES_PER_PIXEL]);
        host.fixed_tick();

        assert!(host.image().unwrap().pixels().iter().all(|&b| b == 0x7F));
        assert!(!host.connector().unwrap().is_frame_ready());
    }

    #[test]
    fn test_fixed_tick_before_initialization_pulls_nothing() {
        let mut env = MockEnv::new();
        let mut host = enabled_host(&mut env);
        host.connector_mut().unwrap().publish_frame(vec![1, 2, 3]);

        host.fixed_tick();

        assert!(host.image().is_none());
        assert!(host.connector().unwrap().is_frame_ready());
    }

    #[test]
    fn test_load_html_and_focus_gated_on_initialization() {
        let mut env = MockEnv::new();
        let mut host = enabled_host(&mut env);

        host.load_html("<p>hi</p>");
        host.focus_changed(true);
        assert!(host.connector().unwrap().commands().is_empty());

        host.surface_mut().set_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
        host.tick(&InputSample::new(), TICK);
        host.connector_mut().unwrap().take_commands();

        host.load_html("<p>hi</p>");
        host.focus_changed(false);
        assert_eq!(
            host.connector().unwrap().commands(),
            &[
                SurfaceCommand::LoadHtml {
                    html: "<p>hi</p>".to_string()
                },
                SurfaceCommand::FocusChanged { focused: false },
            ]
        );
    }

    /// Sink the test can read after handing ownership to the host.
    #[derive(Clone, Default)]
    struct SharedSink(std::sync::Arc<std::sync::Mutex<MemorySink>>);

    impl DiagnosticsSink for SharedSink {
        fn report(&mut self, entry: LogEntry) {
            if let Ok(mut sink) = self.0.lock() {
                sink.report(entry);
            }
        }
    }

    #[test]
    fn test_send_failures_go_to_diagnostics() {
        let sink = SharedSink::default();
        let mut env = MockEnv::new();
        let mut host = SurfaceHost::new(Surface::new("about:blank"))
            .with_diagnostics(Box::new(sink.clone()));
        let mut connector = RecordingConnector::new();
        connector.set_fail_sends(true);
        host.enable(&mut env, connector);

        host.surface_mut().set_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
        host.tick(&InputSample::new(), TICK);

        // The failed initialize was reported, not propagated, and the
        // bridge still considers itself initialized.
        assert!(host.is_initialized());
        let sink = sink.0.lock().unwrap();
        assert_eq!(sink.count_at_least(LogLevel::Warn), 1);
        assert_eq!(sink.entries[0].fields[0], ("action".to_string(), "surface.initialize".to_string()));
    }

    #[test]
    fn test_url_revert_emits_again() {
        let mut env = MockEnv::new();
        let mut host = initialized_host(&mut env);

        host.surface_mut().set_url("https://example.com");
        host.tick(&InputSample::new(), TICK);
        host.surface_mut().set_url("about:blank");
        host.tick(&InputSample::new(), TICK);

        let loads = host
            .connector()
            .unwrap()
            .commands()
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::LoadUrl { .. }))
            .count();
        assert_eq!(loads, 2);
    }
}
