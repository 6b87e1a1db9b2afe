//! Integration tests for Engine logging system
//!
//! These tests verify the logging system functionality and what the scene
//! renderer reports through it. No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests


use std::sync::{Arc, Mutex};
use galaxy_3d_scene_render::galaxy3d::{Engine, SceneRenderer, SceneRendererConfig, SceneViewport};
use galaxy_3d_scene_render::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use galaxy_3d_scene_render::galaxy3d::scene::PassRegistry;
use serial_test::serial;
use test_utils::{new_journal, recording_device, register_journal_pass, Journal};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn from_source<'a>(entries: &'a [LogEntry], source: &str) -> Vec<&'a LogEntry> {
    entries.iter().filter(|e| e.source == source).collect()
}

fn renderer_with(registry: PassRegistry, journal: &Journal, config: SceneRendererConfig) -> SceneRenderer {
    SceneRenderer::with_registry(recording_device(journal), Arc::new(Mutex::new(registry)), config)
        .unwrap()
}

// ============================================================================
// LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Engine::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 3);

        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[0].message, "Test info message");

        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[1].message, "Test warning message");

        assert_eq!(captured[2].severity, LogSeverity::Error);
        assert_eq!(captured[2].message, "Test error message");
        assert_eq!(captured[2].file, None);
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].source, "test::error");
        assert_eq!(captured[0].message, "Critical error occurred");
        assert_eq!(captured[0].file, Some("test_file.rs"));
        assert_eq!(captured[0].line, Some(42));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    Engine::reset_logger();

    // Goes to the default logger
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);
}

// ============================================================================
// SCENE RENDERER LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_duplicate_registration_warns() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let journal = new_journal();
    let mut registry = PassRegistry::new();
    register_journal_pass(&mut registry, "Sky", &[], &journal);
    register_journal_pass(&mut registry, "Sky", &["Fog"], &journal);

    {
        let captured = entries.lock().unwrap();
        let logs = from_source(&captured, "galaxy3d::PassRegistry");
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].severity, LogSeverity::Debug);
        assert_eq!(logs[1].severity, LogSeverity::Warn);
        assert!(logs[1].message.contains("'Sky' was already registered"));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_pass_graph_changes_are_logged() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let journal = new_journal();
    let mut registry = PassRegistry::new();
    register_journal_pass(&mut registry, "Sky", &["Atmosphere"], &journal);
    register_journal_pass(&mut registry, "Atmosphere", &[], &journal);
    let mut renderer = renderer_with(registry, &journal, SceneRendererConfig::default());

    renderer.add_pass("Sky", 0).unwrap();
    renderer.remove_pass("Sky");

    {
        let captured = entries.lock().unwrap();
        let logs = from_source(&captured, "galaxy3d::PassGraph");
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|e| e.severity == LogSeverity::Info));
        assert_eq!(logs[0].message, "Scene pass 'Sky' added (2 new node(s), 2 total)");
        assert_eq!(logs[1].message, "Scene pass 'Sky' removed (2 node(s) destroyed, 0 left)");
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_dependency_loop_is_logged_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let journal = new_journal();
    let mut registry = PassRegistry::new();
    register_journal_pass(&mut registry, "Bloom", &["Tone Mapping"], &journal);
    register_journal_pass(&mut registry, "Tone Mapping", &["Bloom"], &journal);
    let mut renderer = renderer_with(registry, &journal, SceneRendererConfig::default());

    assert!(renderer.add_pass("Bloom", 0).is_err());

    {
        let captured = entries.lock().unwrap();
        let errors: Vec<&LogEntry> = captured
            .iter()
            .filter(|e| e.severity == LogSeverity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source, "galaxy3d::PassGraph");
        assert!(errors[0].message.contains("Bloom -> Tone Mapping -> Bloom"));
        assert!(errors[0].file.is_some());
        assert!(errors[0].line.is_some());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_pass_tracing() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let journal = new_journal();
    let mut registry = PassRegistry::new();
    register_journal_pass(&mut registry, "Sky", &[], &journal);

    let mut quiet = renderer_with(registry.clone(), &journal, SceneRendererConfig::default());
    quiet.add_pass("Sky", 0).unwrap();
    quiet.render_viewport(&SceneViewport::new()).unwrap();
    let traced_by_default = entries
        .lock()
        .unwrap()
        .iter()
        .any(|e| e.severity == LogSeverity::Trace);
    assert!(!traced_by_default);

    let config = SceneRendererConfig {
        trace_passes: true,
        ..SceneRendererConfig::default()
    };
    let mut traced = renderer_with(registry, &journal, config);
    traced.add_pass("Sky", 0).unwrap();
    traced.render(&[SceneViewport::new(), SceneViewport::new()]).unwrap();

    {
        let captured = entries.lock().unwrap();
        let traces: Vec<&str> = captured
            .iter()
            .filter(|e| e.severity == LogSeverity::Trace)
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(
            traces,
            vec![
                "Rendering pass 'Sky' (frame 1, viewport 0)",
                "Rendering pass 'Sky' (frame 1, viewport 1)",
            ]
        );
    }

    Engine::reset_logger();
}
