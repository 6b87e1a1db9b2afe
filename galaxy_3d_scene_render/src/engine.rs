/// Galaxy3D Engine - Singleton manager for process-wide state
///
/// This module provides global singleton management for the scene pass
/// registry and the logger. It uses thread-safe static storage with RwLock
/// for safe concurrent access.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::scene_pass::{PassComponent, PassRegistry, ScenePass, ScenePassCreateInfo};
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Scene pass registry shared by every scene renderer
    pass_registry: RwLock<Option<Arc<Mutex<PassRegistry>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            pass_registry: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the lifecycle of the process-wide scene pass registry and the
/// logger. Registration of scene passes is expected to happen outside the
/// render loop (application startup, pass component load/unload).
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_scene_render::galaxy3d::Engine;
///
/// Engine::initialize()?;
/// Engine::create_pass_registry()?;
///
/// // Pass components register their factories
/// // Engine::load_pass_component(&DeferredShadingComponent)?;
///
/// // Scene renderers created with SceneRenderer::new() use this registry
///
/// Engine::shutdown();
/// # Ok::<(), galaxy_3d_scene_render::galaxy3d::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::engine_error!("galaxy3d::Engine", "Initialization failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::engine_error!("galaxy3d::Engine", "Backend error: {}", msg);
            }
            _ => {
                crate::engine_error!("galaxy3d::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))
    }

    /// Initialize the engine
    ///
    /// Must be called once at application startup. Calling it again is a no-op.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the engine and destroy all singletons
    ///
    /// Scene renderers already created keep their own handle on the registry.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut registry) = state.pass_registry.write() {
                *registry = None;
            }
        }
    }

    // ===== PASS REGISTRY API =====

    /// Create the pass registry singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A pass registry already exists
    /// - The registry lock is poisoned
    pub fn create_pass_registry() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.pass_registry.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("PassRegistry lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("PassRegistry already exists. Call Engine::destroy_pass_registry() first.".to_string())
            ));
        }

        *lock = Some(Arc::new(Mutex::new(PassRegistry::new())));

        crate::engine_info!("galaxy3d::Engine", "PassRegistry singleton created successfully");

        Ok(())
    }

    /// Get the pass registry singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The pass registry has not been created
    pub fn pass_registry() -> Result<Arc<Mutex<PassRegistry>>> {
        let state = Self::state()?;

        let lock = state.pass_registry.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("PassRegistry lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("PassRegistry not created. Call Engine::create_pass_registry() first.".to_string())
            ))
    }

    /// Destroy the pass registry singleton
    pub fn destroy_pass_registry() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.pass_registry.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("PassRegistry lock poisoned".to_string())
            ))?;

        *lock = None;

        crate::engine_info!("galaxy3d::Engine", "PassRegistry singleton destroyed");

        Ok(())
    }

    /// Run `f` on the locked pass registry singleton
    fn with_pass_registry<R>(f: impl FnOnce(&mut PassRegistry) -> R) -> Result<R> {
        let registry = Self::pass_registry()?;
        let mut lock = registry.lock()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("PassRegistry lock poisoned".to_string())
            ))?;
        Ok(f(&mut lock))
    }

    /// Register a scene pass factory in the singleton registry
    ///
    /// Returns `true` if a previous factory was replaced.
    pub fn register_scene_pass<F>(name: &str, creator: F) -> Result<bool>
    where
        F: Fn(&ScenePassCreateInfo<'_>) -> Result<Box<dyn ScenePass>> + Send + Sync + 'static,
    {
        Self::with_pass_registry(|registry| registry.register(name, creator))
    }

    /// Unregister a scene pass factory from the singleton registry
    ///
    /// Returns `false` if nothing was registered under `name`.
    pub fn unregister_scene_pass(name: &str) -> Result<bool> {
        Self::with_pass_registry(|registry| registry.unregister(name))
    }

    /// Register every pass of a component in the singleton registry
    pub fn load_pass_component(component: &dyn PassComponent) -> Result<()> {
        Self::with_pass_registry(|registry| registry.load_component(component))
    }

    /// Unregister every pass of a component from the singleton registry
    pub fn unload_pass_component(component: &dyn PassComponent) -> Result<()> {
        Self::with_pass_registry(|registry| registry.unload_component(component))
    }

    /// Reset all engine state for testing purposes
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut registry) = state.pass_registry.write() {
                *registry = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replaces the default logger with a custom implementation.
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Restore the default logger
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Log a message (internal use by macros)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Log a message with file:line information (internal use by macros)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
