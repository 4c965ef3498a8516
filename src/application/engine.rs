use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread::{Builder, JoinHandle};
use std::time::Duration;

use crate::audio::backends::headless::HeadlessAudio;
use crate::audio::backends::Visitor as AudioVisitor;
use crate::audio::AudioDevice;
use crate::math::Vector2;
use crate::window::{HeadlessWindow, Window, WindowEvent};

use super::component::{ComponentHandle, Components, GameComponent};
use super::errors::{Error, Result};
use super::latch::StateLatch;
use super::settings::Settings;
use super::time::{Clock, GameTime};

/// The life-cycle of an `Engine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Constructing,
    Initializing,
    Running,
    Stopping,
    Stopped,
}

/// The native collaborators of the engine loop, created on the loop thread.
pub struct Platform {
    pub window: Box<dyn Window>,
    pub audio: Box<dyn AudioVisitor>,
}

impl Platform {
    pub fn headless(settings: &Settings) -> crate::errors::Result<Platform> {
        Ok(Platform {
            window: Box::new(HeadlessWindow::new(settings.window.size)),
            audio: Box::new(HeadlessAudio::new(settings.audio.efx)),
        })
    }

    /// Opens a native window. Sound is not backed by a native device, so
    /// mixer channels of this platform are disabled.
    #[cfg(feature = "glutin")]
    pub fn native(settings: &Settings) -> crate::errors::Result<Platform> {
        let window = crate::window::GlutinWindow::new(&settings.window, &settings.video)?;
        Ok(Platform {
            window: Box::new(window),
            audio: Box::new(HeadlessAudio::new(false)),
        })
    }
}

struct EngineShared {
    state: StateLatch<EngineState>,
    components: Mutex<Components>,
    failure: Mutex<Option<Error>>,
}

/// `Engine` runs the component loop on a dedicated thread, which owns the
/// window, the graphics device and the audio device.
///
/// Components can be added and removed from any thread. The loop holds the
/// component lists for the whole tick, so these calls block until the current
/// tick is over.
pub struct Engine {
    shared: Arc<EngineShared>,
    thread: Option<JoinHandle<()>>,
    stop_timeout: Duration,
}

impl Engine {
    /// Spawns the loop thread, and blocks until it is running or failed to
    /// initialize.
    pub fn new<F>(settings: Settings, factory: F) -> Result<Self>
    where
        F: FnOnce(&Settings) -> crate::errors::Result<Platform> + Send + 'static,
    {
        let shared = Arc::new(EngineShared {
            state: StateLatch::new(EngineState::Constructing),
            components: Mutex::new(Components::new()),
            failure: Mutex::new(None),
        });

        let stop_timeout = settings.engine.stop_timeout();
        let shared_clone = shared.clone();
        let thread = Builder::new()
            .name("Engine".into())
            .spawn(move || run(&shared_clone, &settings, factory))
            .map_err(|err| Error::InitializationFailure(err.to_string()))?;

        let mut engine = Engine {
            shared,
            thread: Some(thread),
            stop_timeout,
        };

        let state = engine.shared.state.wait_while(
            |v| v == EngineState::Constructing || v == EngineState::Initializing,
            None,
        );

        if state == EngineState::Running {
            info!("Engine is running.");
            Ok(engine)
        } else {
            engine.join_thread();
            Err(engine.take_failure().unwrap_or_else(|| {
                Error::InitializationFailure("The engine loop exited early.".into())
            }))
        }
    }

    /// Runs the engine without any native device.
    pub fn headless(settings: Settings) -> Result<Self> {
        Engine::new(settings, Platform::headless)
    }

    /// Runs the engine on the platform `settings` asks for.
    pub fn launch(settings: Settings) -> Result<Self> {
        if settings.headless {
            return Engine::headless(settings);
        }

        #[cfg(feature = "glutin")]
        {
            Engine::new(settings, Platform::native)
        }

        #[cfg(not(feature = "glutin"))]
        {
            Err(Error::InitializationFailure(
                "Built without a native window backend.".into(),
            ))
        }
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.shared.state.get()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state() == EngineState::Running
    }

    /// Adds a component, its `init` hook is called at the top of the next
    /// tick.
    pub fn add_component<T>(&self, component: T) -> Result<ComponentHandle>
    where
        T: GameComponent + 'static,
    {
        if !self.is_running() {
            return Err(Error::NotRunning);
        }

        Ok(self.shared.components.lock().unwrap().add(component))
    }

    /// Schedules the removal of a component. Returns false if the component
    /// is unknown or is being removed already.
    pub fn remove_component(&self, handle: ComponentHandle) -> Result<bool> {
        if !self.is_running() {
            return Err(Error::NotRunning);
        }

        Ok(self.shared.components.lock().unwrap().remove(handle))
    }

    /// Inspects the component lists.
    pub fn components<F, R>(&self, func: F) -> R
    where
        F: FnOnce(&Components) -> R,
    {
        func(&self.shared.components.lock().unwrap())
    }

    /// Requests the loop to exit, and waits for it up to the stop timeout.
    ///
    /// Returns the failure which ended the loop if any, and
    /// `Error::ShutdownTimeout` if the loop did not exit in time. The loop
    /// thread is never killed, `stop` can be called again to wait longer.
    pub fn stop(&mut self) -> Result<()> {
        if self.thread.is_none() {
            return Err(Error::AlreadyStopped);
        }

        self.shared
            .state
            .transition(EngineState::Running, EngineState::Stopping);

        let timeout = self.stop_timeout;
        let state = self
            .shared
            .state
            .wait_while(|v| v != EngineState::Stopped, Some(timeout));

        if state != EngineState::Stopped {
            warn!("Engine loop did not exit within {:?}.", timeout);
            return Err(Error::ShutdownTimeout(timeout));
        }

        self.join_thread();
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Blocks until the loop exits by itself, like when the window is closed
    /// or a component asks to shut down.
    pub fn join(mut self) -> Result<()> {
        self.shared
            .state
            .wait_while(|v| v != EngineState::Stopped, None);

        self.join_thread();
        match self.take_failure() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn join_thread(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Engine thread panicked.");
            }
        }
    }

    fn take_failure(&self) -> Option<Error> {
        self.shared.failure.lock().unwrap().take()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.thread.is_some() {
            if let Err(err) = self.stop() {
                error!("Failed to stop engine: {}", err);
            }
        }
    }
}

fn run<F>(shared: &EngineShared, settings: &Settings, factory: F)
where
    F: FnOnce(&Settings) -> crate::errors::Result<Platform>,
{
    shared.state.set(EngineState::Initializing);

    let result = panic::catch_unwind(AssertUnwindSafe(|| execute(shared, settings, factory)));
    let failure = match result {
        Ok(Ok(())) => None,
        Ok(Err(err)) => Some(err),
        Err(_) if shared.state.get() == EngineState::Initializing => Some(
            Error::InitializationFailure("The engine panicked while initializing.".into()),
        ),
        Err(_) => Some(Error::ComponentFailure("The engine loop panicked.".into())),
    };

    if let Some(err) = failure {
        error!("{}", err);
        *shared.failure.lock().unwrap() = Some(err);
    }

    info!("Engine is stopped.");
    shared.state.set(EngineState::Stopped);
}

fn execute<F>(shared: &EngineShared, settings: &Settings, factory: F) -> Result<()>
where
    F: FnOnce(&Settings) -> crate::errors::Result<Platform>,
{
    let initialization = |err: failure::Error| Error::InitializationFailure(err.to_string());

    let Platform {
        mut window,
        audio,
    } = factory(settings).map_err(initialization)?;

    let mut device = window.create_device().map_err(initialization)?;
    let mut audio = AudioDevice::new(audio);

    let mut video = device
        .make_current()
        .map_err(|err| Error::InitializationFailure(err.to_string()))?;

    if !shared
        .state
        .transition(EngineState::Initializing, EngineState::Running)
    {
        return Err(Error::InitializationFailure(
            "The engine was stopped while initializing.".into(),
        ));
    }

    let mut clock = Clock::new(&settings.engine);
    let mut events = Vec::new();
    let mut last = GameTime::default();

    let result = loop {
        if shared.state.get() != EngineState::Running {
            break Ok(());
        }

        events.clear();
        window.poll_events(&mut events);
        if events.contains(&WindowEvent::Closed) {
            info!("Window closed.");
            break Ok(());
        }

        last = clock.advance();
        let dimensions = window.dimensions();

        // Panics are caught with the lock held, so the lists are never poisoned.
        let shutdown = {
            let mut components = shared.components.lock().unwrap();
            panic::catch_unwind(AssertUnwindSafe(|| {
                components.tick(&mut video, &mut audio, last, dimensions)
            }))
        };

        match shutdown {
            Ok(Ok(true)) => break Ok(()),
            Ok(Ok(false)) => {}
            Ok(Err(err)) => break Err(Error::ComponentFailure(err.to_string())),
            Err(_) => break Err(Error::ComponentFailure("A component panicked.".into())),
        }

        if let Err(err) = window.swap_buffers() {
            break Err(Error::ComponentFailure(err.to_string()));
        }

        clock.wait();
    };

    shared
        .state
        .transition(EngineState::Running, EngineState::Stopping);

    let dimensions: Vector2<u32> = window.dimensions();
    shared
        .components
        .lock()
        .unwrap()
        .unload_all(&mut video, &mut audio, last, dimensions);

    drop(video);
    drop(audio);
    drop(device);
    result
}
