//! Integration tests for Engine lifecycle and the shared pass registry
//!
//! These tests verify the complete workflow: engine initialization,
//! pass registration through components, scene renderers created on the
//! engine registry, and shutdown. No GPU required.
//!
//! Run with: cargo test --test engine_integration_tests


use galaxy_3d_scene_render::galaxy3d::{Engine, Error, SceneRenderer, SceneViewport};
use galaxy_3d_scene_render::galaxy3d::scene::{ScenePass, ScenePassCreateInfo};
use serial_test::serial;
use test_utils::{journal_entries, new_journal, recording_device, DeferredComponent, JournalPass};

/// Start every test from an initialized engine without a registry
fn fresh_engine() {
    Engine::initialize().unwrap();
    Engine::shutdown();
}

// ============================================================================
// ENGINE LIFECYCLE TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_engine_full_lifecycle() {
    fresh_engine();
    let journal = new_journal();

    // Step 1: Create the pass registry
    assert!(Engine::create_pass_registry().is_ok());
    assert!(Engine::pass_registry().is_ok());

    // Step 2: Register passes through a component
    let component = DeferredComponent { journal: journal.clone() };
    Engine::load_pass_component(&component).unwrap();
    assert_eq!(
        Engine::pass_registry().unwrap().lock().unwrap().names(),
        vec!["G-Buffer", "Lighting", "Post", "Shadow Maps"]
    );

    // Step 3: Create a scene renderer on the engine registry
    let mut renderer = SceneRenderer::new(recording_device(&journal)).unwrap();
    renderer.properties_mut().set("lightsCount", 0i32);
    renderer.properties_mut().set("shininess", 4.0f32);
    renderer.add_pass("Post", 0).unwrap();
    renderer.render_viewport(&SceneViewport::new()).unwrap();
    assert_eq!(
        journal_entries(&journal),
        vec![
            "viewport 1280x720",
            "pass G-Buffer #1",
            "pass Post #1",
            "draw lighting",
            "lighting.shininess=4",
        ]
    );

    // Step 4: Cleanup
    Engine::unload_pass_component(&component).unwrap();
    assert!(Engine::pass_registry().unwrap().lock().unwrap().is_empty());
    Engine::destroy_pass_registry().unwrap();
    assert!(Engine::pass_registry().is_err());
    Engine::shutdown();
}

#[test]
#[serial]
fn test_integration_create_pass_registry_twice_fails() {
    fresh_engine();

    Engine::create_pass_registry().unwrap();
    match Engine::create_pass_registry() {
        Err(Error::InitializationFailed(message)) => assert!(message.contains("already exists")),
        other => panic!("Expected InitializationFailed, got {:?}", other.err()),
    }

    Engine::shutdown();
}

#[test]
#[serial]
fn test_integration_scene_renderer_requires_registry() {
    fresh_engine();
    let journal = new_journal();

    assert!(matches!(
        SceneRenderer::new(recording_device(&journal)),
        Err(Error::InitializationFailed(_))
    ));
    assert!(matches!(
        Engine::register_scene_pass("Sky", |_: &ScenePassCreateInfo<'_>| {
            Err(Error::BackendError("unused".to_string()))
        }),
        Err(Error::InitializationFailed(_))
    ));
}

#[test]
#[serial]
fn test_integration_renderers_share_engine_registry() {
    fresh_engine();
    Engine::create_pass_registry().unwrap();
    let journal = new_journal();

    let mut first = SceneRenderer::new(recording_device(&journal)).unwrap();
    let mut second = SceneRenderer::new(recording_device(&journal)).unwrap();
    assert!(matches!(first.add_pass("Sky", 0), Err(Error::UnknownPass(_))));

    let sky_journal = journal.clone();
    let replaced = Engine::register_scene_pass("Sky", move |_: &ScenePassCreateInfo<'_>| {
        Ok(Box::new(JournalPass::new("Sky", &[], &sky_journal)) as Box<dyn ScenePass>)
    })
    .unwrap();
    assert!(!replaced);

    first.add_pass("Sky", 0).unwrap();
    second.add_pass("Sky", 0).unwrap();
    assert_eq!(first.passes_count(), 1);
    assert_eq!(second.passes_count(), 1);

    Engine::shutdown();
}

#[test]
#[serial]
fn test_integration_unregister_keeps_created_passes() {
    fresh_engine();
    Engine::create_pass_registry().unwrap();
    let journal = new_journal();

    let sky_journal = journal.clone();
    Engine::register_scene_pass("Sky", move |_: &ScenePassCreateInfo<'_>| {
        Ok(Box::new(JournalPass::new("Sky", &[], &sky_journal)) as Box<dyn ScenePass>)
    })
    .unwrap();

    let mut renderer = SceneRenderer::new(recording_device(&journal)).unwrap();
    renderer.add_pass("Sky", 0).unwrap();
    assert!(Engine::unregister_scene_pass("Sky").unwrap());
    assert!(!Engine::unregister_scene_pass("Sky").unwrap());

    renderer.render_viewport(&SceneViewport::new()).unwrap();
    assert_eq!(journal_entries(&journal), vec!["viewport 1280x720", "pass Sky #1"]);

    renderer.remove_pass("Sky");
    assert!(matches!(renderer.add_pass("Sky", 0), Err(Error::UnknownPass(_))));

    Engine::shutdown();
}

#[test]
#[serial]
fn test_integration_engine_reinitialize_after_shutdown() {
    fresh_engine();
    let journal = new_journal();

    // First lifecycle
    Engine::create_pass_registry().unwrap();
    let renderer = SceneRenderer::new(recording_device(&journal)).unwrap();
    Engine::shutdown();

    // The renderer keeps its own handle on the first registry
    assert_eq!(renderer.passes_count(), 0);
    assert!(Engine::pass_registry().is_err());

    // Second lifecycle
    Engine::initialize().unwrap();
    assert!(Engine::create_pass_registry().is_ok());
    assert!(SceneRenderer::new(recording_device(&journal)).is_ok());

    Engine::shutdown();
}
