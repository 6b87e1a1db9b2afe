/// Mock scene passes for unit tests
///
/// A MockScenePass logs `pass:<name>@<frame>` into a shared command log when
/// rendered, and can be told to fail.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::mock_graphics_device::{CommandLog, MockGraphicsDevice};
use crate::graphics_device::DeviceHandle;
use crate::scene_renderer::{ScenePassContext, SceneResources};
use super::pass_registry::PassRegistry;
use super::scene_pass::{ScenePass, ScenePassCreateInfo};

pub struct MockScenePass {
    pub name: String,
    pub dependencies: Vec<String>,
    pub log: CommandLog,
    pub fail: bool,
}

impl ScenePass for MockScenePass {
    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn render(&mut self, context: &mut ScenePassContext) -> Result<()> {
        if self.fail {
            return Err(Error::BackendError(format!("pass '{}' failed", self.name)));
        }
        self.log
            .lock()
            .unwrap()
            .push(format!("pass:{}@{}", self.name, context.current_frame_id()));
        Ok(())
    }
}

/// Counter of instances created by a mock factory
#[derive(Clone, Default)]
pub struct CreationCounter(Arc<AtomicU32>);

impl CreationCounter {
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Register a mock pass factory
pub fn register_mock(
    registry: &mut PassRegistry,
    name: &str,
    dependencies: &[&str],
    log: &CommandLog,
) -> CreationCounter {
    register_mock_with(registry, name, dependencies, log, false)
}

/// Register a mock pass factory whose instances fail to render
pub fn register_failing_mock(
    registry: &mut PassRegistry,
    name: &str,
    dependencies: &[&str],
    log: &CommandLog,
) -> CreationCounter {
    register_mock_with(registry, name, dependencies, log, true)
}

fn register_mock_with(
    registry: &mut PassRegistry,
    name: &str,
    dependencies: &[&str],
    log: &CommandLog,
    fail: bool,
) -> CreationCounter {
    let counter = CreationCounter::default();
    let created = counter.clone();
    let pass_name = name.to_string();
    let dependencies: Vec<String> = dependencies.iter().map(|d| d.to_string()).collect();
    let log = log.clone();

    registry.register(name, move |_info: &ScenePassCreateInfo<'_>| {
        created.0.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockScenePass {
            name: pass_name.clone(),
            dependencies: dependencies.clone(),
            log: log.clone(),
            fail,
        }) as Box<dyn ScenePass>)
    });
    counter
}

/// Device handle backed by a MockGraphicsDevice
pub fn mock_device(log: &CommandLog) -> DeviceHandle {
    Rc::new(RefCell::new(MockGraphicsDevice::new(log)))
}

/// Run `f` with a create info built from fresh resources and a mock device
pub fn with_create_info<R>(log: &CommandLog, f: impl FnOnce(&ScenePassCreateInfo<'_>) -> R) -> R {
    let resources = SceneResources::new();
    let device = mock_device(log);
    f(&ScenePassCreateInfo { resources: &resources, device: &device })
}
