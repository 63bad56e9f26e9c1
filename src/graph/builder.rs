//! Module graph shaping from a provider payload

use crate::graph::error::GraphError;
use crate::graph::provider::GraphPayload;
use indexmap::IndexMap;

/// Import relationships of a single module
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleNode {
    /// Modules that import this one, in graph order, duplicates preserved
    pub parents: Vec<String>,
    /// Modules this one imports, in source order, duplicates preserved
    pub children: Vec<String>,
    /// Subset of `children` whose written specifier is a local path
    pub local_children: Vec<String>,
}

/// Import graph of a root module, keyed by resolved specifier.
///
/// Node order follows the provider payload, so iteration (and therefore
/// report order) is deterministic for a given graph.
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    root: String,
    nodes: IndexMap<String, ModuleNode>,
}

/// Whether an import was written as a local path.
///
/// Only the written specifier decides this; the resolved URL never does.
/// The test is exactly a `./` or `/` prefix, so `../x.ts` is not local.
fn is_local(raw_specifier: &str) -> bool {
    raw_specifier.starts_with("./") || raw_specifier.starts_with('/')
}

impl ModuleGraph {
    /// Shapes a provider payload into a bidirectional module graph
    ///
    /// # Returns
    /// * `Ok(ModuleGraph)` - One node per module, edges recorded both ways
    /// * `Err(GraphError)` - If any module failed to load or the root is absent
    pub fn from_payload(root: &str, payload: &GraphPayload) -> Result<Self, GraphError> {
        let mut nodes: IndexMap<String, ModuleNode> = IndexMap::new();

        for module in &payload.modules {
            if let Some(message) = &module.error {
                return Err(GraphError::ModuleLoad {
                    specifier: module.specifier.clone(),
                    message: message.clone(),
                });
            }
            nodes.entry(module.specifier.clone()).or_default();
        }

        if !nodes.contains_key(root) {
            return Err(GraphError::MissingRoot(root.to_string()));
        }

        for module in &payload.modules {
            for dependency in &module.dependencies {
                // Type-only imports carry no code resolution and form no edge
                let Some(child) = dependency
                    .code
                    .as_ref()
                    .and_then(|code| code.specifier.clone())
                else {
                    continue;
                };

                let parent = nodes.entry(module.specifier.clone()).or_default();
                parent.children.push(child.clone());
                if is_local(&dependency.specifier) {
                    parent.local_children.push(child.clone());
                }

                nodes
                    .entry(child)
                    .or_default()
                    .parents
                    .push(module.specifier.clone());
            }
        }

        Ok(Self {
            root: root.to_string(),
            nodes,
        })
    }

    /// The root specifier this graph was built for
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Iterates modules in payload order
    pub fn modules(&self) -> impl Iterator<Item = (&String, &ModuleNode)> {
        self.nodes.iter()
    }

    /// Looks up a single module node
    pub fn node(&self, specifier: &str) -> Option<&ModuleNode> {
        self.nodes.get(specifier)
    }

    /// Number of modules in the graph
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no modules
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
