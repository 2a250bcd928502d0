//! Dependency graph for environment execution ordering.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::config::schema::{Environment, Suite};
use crate::error::{Result, SuiterunError};

/// The `depends` relationships between environments.
///
/// Nodes carry their declaration index so ordering is deterministic:
/// among environments whose dependencies are all satisfied, the one
/// declared first runs first.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Environment names in declaration order.
    names: Vec<String>,
    /// Direct dependencies of each node, as indices into `names`.
    dependencies: Vec<Vec<usize>>,
    /// Nodes that depend on each node.
    dependents: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Create a new dependency graph builder.
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::default()
    }

    /// Build the graph for a suite's environments.
    pub fn from_suite(suite: &Suite) -> Result<Self> {
        let mut builder = Self::builder();
        for env in &suite.environments {
            builder = builder.add_environment(&env.name, env.depends.clone());
        }
        builder.build()
    }

    /// Check if an environment exists in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Get the direct dependencies of an environment.
    pub fn dependencies_of(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.index_of(name)?;
        Some(
            self.dependencies[idx]
                .iter()
                .map(|&i| self.names[i].as_str())
                .collect(),
        )
    }

    /// Get the number of environments in the graph.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns environment names in topological order (dependencies before
    /// dependents), breaking ties by declaration order.
    ///
    /// Returns `CircularDependency` if a cycle is detected, naming the
    /// cycle path.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        let mut in_degree: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();

        // Min-heap over declaration indices keeps ties deterministic.
        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut result = Vec::with_capacity(self.names.len());

        while let Some(Reverse(idx)) = ready.pop() {
            result.push(self.names[idx].clone());

            for &dependent in &self.dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        if result.len() != self.names.len() {
            let cycle = self
                .find_cycle()
                .map(|path| path.join(" -> "))
                .unwrap_or_else(|| "unknown".into());
            return Err(SuiterunError::CircularDependency { cycle });
        }

        Ok(result)
    }

    /// Find a cycle in the graph, returning the path if one exists.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Unvisited,
            Visiting,
            Visited,
        }

        fn dfs(
            node: usize,
            graph: &DependencyGraph,
            state: &mut [State],
            path: &mut Vec<usize>,
        ) -> Option<Vec<usize>> {
            state[node] = State::Visiting;
            path.push(node);

            for &dep in &graph.dependencies[node] {
                match state[dep] {
                    State::Visiting => {
                        let start = path.iter().position(|&n| n == dep).unwrap();
                        let mut cycle = path[start..].to_vec();
                        cycle.push(dep);
                        return Some(cycle);
                    }
                    State::Unvisited => {
                        if let Some(cycle) = dfs(dep, graph, state, path) {
                            return Some(cycle);
                        }
                    }
                    State::Visited => {}
                }
            }

            path.pop();
            state[node] = State::Visited;
            None
        }

        let mut state = vec![State::Unvisited; self.names.len()];
        let mut path = Vec::new();

        for node in 0..self.names.len() {
            if state[node] == State::Unvisited {
                if let Some(cycle) = dfs(node, self, &mut state, &mut path) {
                    return Some(cycle.into_iter().map(|i| self.names[i].clone()).collect());
                }
            }
        }

        None
    }
}

/// Order a suite's environments so every dependency precedes its dependents.
///
/// Every environment appears exactly once; ties among independent
/// environments follow envlist declaration order.
pub fn resolve_order(suite: &Suite) -> Result<Vec<&Environment>> {
    let graph = DependencyGraph::from_suite(suite)?;
    let order = graph.topological_order()?;

    // Names are unique, so the lookup cannot fail for a well-formed suite.
    Ok(order
        .iter()
        .filter_map(|name| suite.environment(name))
        .collect())
}

/// Builder for constructing a [`DependencyGraph`].
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    environments: Vec<(String, Vec<String>)>,
}

impl DependencyGraphBuilder {
    /// Add an environment with its dependencies, in declaration order.
    pub fn add_environment(mut self, name: impl Into<String>, depends: Vec<String>) -> Self {
        self.environments.push((name.into(), depends));
        self
    }

    /// Build the dependency graph.
    ///
    /// Returns `UndefinedEnvironment` if any edge references an environment
    /// that was not added.
    pub fn build(self) -> Result<DependencyGraph> {
        let names: Vec<String> = self.environments.iter().map(|(n, _)| n.clone()).collect();

        let mut dependencies = vec![Vec::new(); names.len()];
        let mut dependents = vec![Vec::new(); names.len()];

        for (idx, (name, depends)) in self.environments.iter().enumerate() {
            for dep in depends {
                let dep_idx = names.iter().position(|n| n == dep).ok_or_else(|| {
                    SuiterunError::UndefinedEnvironment {
                        name: dep.clone(),
                        referenced_from: format!("depends of '{}'", name),
                    }
                })?;
                dependencies[idx].push(dep_idx);
                dependents[dep_idx].push(idx);
            }
        }

        Ok(DependencyGraph {
            names,
            dependencies,
            dependents,
        })
    }
}
