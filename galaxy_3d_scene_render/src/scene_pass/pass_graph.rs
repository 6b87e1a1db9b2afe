/// Pass graph - the per-renderer DAG of scene pass instances.
///
/// Adding a pass by name resolves its declared dependencies recursively.
/// Every pass name is instantiated at most once per graph: a dependency
/// shared by several passes is a single node with several parents.
///
/// Each root (pass added explicitly) holds one reference on every node of
/// its dependency closure. Removing a root releases those references, and a
/// node is destroyed once no root reaches it anymore.
///
/// Execution walks the roots in priority order and renders dependencies
/// first. A node renders at most once per render stamp.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use crate::error::{Error, Result};
use crate::scene_renderer::{FrameId, RenderStamp, ScenePassContext};
use crate::{engine_error, engine_info, engine_trace, engine_warn};
use super::scene_pass::ScenePass;

new_key_type! {
    /// Stable key of a pass node inside a PassGraph
    pub struct PassNodeKey;
}

/// Factory used while resolving: creates a pass instance from its name
pub type PassFactory<'a> = dyn FnMut(&str) -> Result<Box<dyn ScenePass>> + 'a;

struct PassNode {
    name: String,
    pass: Box<dyn ScenePass>,
    priority: i32,
    /// Sorted by priority (stable)
    dependencies: Vec<PassNodeKey>,
    rendered: Option<RenderStamp>,
    root_refs: u32,
}

struct RootBinding {
    name: String,
    key: PassNodeKey,
    priority: i32,
    /// Every node reachable from `key`, `key` included
    closure: Vec<PassNodeKey>,
}

/// DAG of scene pass instances
pub struct PassGraph {
    nodes: SlotMap<PassNodeKey, PassNode>,
    names: FxHashMap<String, PassNodeKey>,
    /// Execution order (stable sort by priority)
    roots: Vec<RootBinding>,
    trace: bool,
}

impl PassGraph {
    /// Create an empty pass graph
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty pass graph with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            names: FxHashMap::default(),
            roots: Vec::new(),
            trace: false,
        }
    }

    /// Log every pass execution at TRACE level
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    // ===== ROOTS =====

    /// Add the pass `name` as a root, resolving its dependencies
    ///
    /// Adding a name which is already a root is a no-op returning the
    /// existing node. A name already instantiated as a dependency becomes a
    /// root without being instantiated again.
    ///
    /// Passes instantiated by this call get `priority`.
    ///
    /// # Errors
    ///
    /// - `UnknownPass` if `create` doesn't know a name of the closure
    /// - `CyclicDependency` if the closure has a dependency loop
    /// - any error returned by `create`
    ///
    /// On error, every node created by this call is destroyed and the graph
    /// is left unchanged.
    pub fn add_root(
        &mut self,
        name: &str,
        priority: i32,
        create: &mut PassFactory<'_>,
    ) -> Result<PassNodeKey> {
        if let Some(root) = self.roots.iter().find(|root| root.name == name) {
            return Ok(root.key);
        }

        let mut stack: Vec<String> = Vec::new();
        let mut created: Vec<PassNodeKey> = Vec::new();

        match self.resolve(name, priority, &mut stack, &mut created, create) {
            Ok(key) => {
                let closure = self.closure(key);
                for node_key in &closure {
                    if let Some(node) = self.nodes.get_mut(*node_key) {
                        node.root_refs += 1;
                    }
                }
                self.roots.push(RootBinding {
                    name: name.to_string(),
                    key,
                    priority,
                    closure,
                });
                self.roots.sort_by_key(|root| root.priority);

                engine_info!("galaxy3d::PassGraph",
                    "Scene pass '{}' added ({} new node(s), {} total)",
                    name, created.len(), self.nodes.len());
                Ok(key)
            }
            Err(error) => {
                for node_key in created.into_iter().rev() {
                    if let Some(node) = self.nodes.remove(node_key) {
                        self.names.remove(&node.name);
                    }
                }
                engine_error!("galaxy3d::PassGraph", "Can't add scene pass '{}': {}", name, error);
                Err(error)
            }
        }
    }

    /// Remove the root `name`
    ///
    /// Nodes which are no longer reachable from any root are destroyed.
    /// Returns `false` if `name` is not a root.
    pub fn remove_root(&mut self, name: &str) -> bool {
        let Some(position) = self.roots.iter().position(|root| root.name == name) else {
            return false;
        };
        let root = self.roots.remove(position);

        let mut destroyed = 0usize;
        for node_key in root.closure {
            let release = match self.nodes.get_mut(node_key) {
                Some(node) => {
                    node.root_refs = node.root_refs.saturating_sub(1);
                    node.root_refs == 0
                }
                None => false,
            };
            if release {
                if let Some(node) = self.nodes.remove(node_key) {
                    self.names.remove(&node.name);
                    destroyed += 1;
                }
            }
        }

        engine_info!("galaxy3d::PassGraph",
            "Scene pass '{}' removed ({} node(s) destroyed, {} left)",
            name, destroyed, self.nodes.len());
        true
    }

    /// Remove every pass
    pub fn clear(&mut self) {
        self.roots.clear();
        self.nodes.clear();
        self.names.clear();
    }

    // ===== EXECUTION =====

    /// Render every root in priority order, dependencies first
    ///
    /// A node already rendered with `stamp` (or a later one) is skipped.
    /// A node is stamped once its render succeeds. The first pass error
    /// aborts the execution.
    pub fn execute(&mut self, stamp: RenderStamp, context: &mut ScenePassContext) -> Result<()> {
        for index in 0..self.roots.len() {
            let key = self.roots[index].key;
            Self::render_node(&mut self.nodes, key, stamp, context, self.trace)?;
        }
        Ok(())
    }

    fn render_node(
        nodes: &mut SlotMap<PassNodeKey, PassNode>,
        key: PassNodeKey,
        stamp: RenderStamp,
        context: &mut ScenePassContext,
        trace: bool,
    ) -> Result<()> {
        let dependencies = match nodes.get(key) {
            Some(node) if node.rendered.map_or(false, |rendered| rendered >= stamp) => return Ok(()),
            Some(node) => node.dependencies.clone(),
            None => {
                engine_warn!("galaxy3d::PassGraph", "Pass node {:?} not found, skipped", key);
                return Ok(());
            }
        };

        for dependency in dependencies {
            Self::render_node(nodes, dependency, stamp, context, trace)?;
        }

        if let Some(node) = nodes.get_mut(key) {
            if trace {
                engine_trace!("galaxy3d::PassGraph",
                    "Rendering pass '{}' (frame {}, viewport {})",
                    node.name, stamp.frame_id, stamp.viewport);
            }
            node.pass.render(context)?;
            node.rendered = Some(stamp);
        }
        Ok(())
    }

    // ===== QUERIES =====

    /// Number of pass nodes (roots and dependencies)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of roots
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Root names in execution order
    pub fn root_names(&self) -> Vec<&str> {
        self.roots.iter().map(|root| root.name.as_str()).collect()
    }

    /// Whether `name` is a root
    pub fn is_root(&self, name: &str) -> bool {
        self.roots.iter().any(|root| root.name == name)
    }

    /// Whether a node named `name` exists (root or dependency)
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Key of the node named `name`
    pub fn key(&self, name: &str) -> Option<PassNodeKey> {
        self.names.get(name).copied()
    }

    /// Name of the node `key`
    pub fn node_name(&self, key: PassNodeKey) -> Option<&str> {
        self.nodes.get(key).map(|node| node.name.as_str())
    }

    pub fn priority(&self, name: &str) -> Option<i32> {
        self.node(name).map(|node| node.priority)
    }

    /// Direct dependency names of `name`, in execution order
    pub fn dependencies(&self, name: &str) -> Option<Vec<&str>> {
        self.node(name).map(|node| {
            node.dependencies
                .iter()
                .filter_map(|key| self.node_name(*key))
                .collect()
        })
    }

    /// Frame id of the last render of `name`
    pub fn last_rendered_frame(&self, name: &str) -> Option<FrameId> {
        self.node(name)
            .and_then(|node| node.rendered)
            .map(|stamp| stamp.frame_id)
    }

    /// Number of roots whose closure contains `name`
    pub fn reference_count(&self, name: &str) -> Option<u32> {
        self.node(name).map(|node| node.root_refs)
    }

    fn node(&self, name: &str) -> Option<&PassNode> {
        self.names.get(name).and_then(|key| self.nodes.get(*key))
    }

    // ===== RESOLUTION =====

    /// Depth-first resolution of `name`
    ///
    /// `stack` holds the names being resolved, root first. Nodes created
    /// here are appended to `created`.
    fn resolve(
        &mut self,
        name: &str,
        priority: i32,
        stack: &mut Vec<String>,
        created: &mut Vec<PassNodeKey>,
        create: &mut PassFactory<'_>,
    ) -> Result<PassNodeKey> {
        if stack.iter().any(|pending| pending == name) {
            let mut chain = stack.join(" -> ");
            chain.push_str(" -> ");
            chain.push_str(name);
            return Err(Error::CyclicDependency {
                root: stack.first().cloned().unwrap_or_else(|| name.to_string()),
                chain,
            });
        }

        if let Some(key) = self.names.get(name) {
            return Ok(*key);
        }

        let pass = create(name)?;
        let declared = pass.dependencies();
        let key = self.nodes.insert(PassNode {
            name: name.to_string(),
            pass,
            priority,
            dependencies: Vec::new(),
            rendered: None,
            root_refs: 0,
        });
        self.names.insert(name.to_string(), key);
        created.push(key);

        stack.push(name.to_string());
        let mut dependencies: Vec<PassNodeKey> = Vec::with_capacity(declared.len());
        for dependency in &declared {
            let dependency_key = self.resolve(dependency, priority, stack, created, create)?;
            if !dependencies.contains(&dependency_key) {
                dependencies.push(dependency_key);
            }
        }
        stack.pop();

        let nodes = &self.nodes;
        dependencies.sort_by_key(|dependency| nodes.get(*dependency).map_or(0, |node| node.priority));
        if let Some(node) = self.nodes.get_mut(key) {
            node.dependencies = dependencies;
        }
        Ok(key)
    }

    /// Every node reachable from `key`, `key` included
    fn closure(&self, key: PassNodeKey) -> Vec<PassNodeKey> {
        let mut visited: FxHashSet<PassNodeKey> = FxHashSet::default();
        let mut pending = vec![key];
        let mut closure = Vec::new();

        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            closure.push(current);
            if let Some(node) = self.nodes.get(current) {
                pending.extend(node.dependencies.iter().copied());
            }
        }
        closure
    }
}

impl Default for PassGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "pass_graph_tests.rs"]
mod tests;
