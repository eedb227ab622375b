//! Worklist Fixpoint Solver
//!
//! Reference engine driving the plugin protocol:
//! - seeds points-to facts from allocation and class-literal statements,
//! - propagates deltas along copy edges (context-preserving),
//! - commits each delta before notifying subscribed plugins, so plugins
//!   always read a stable snapshot of every other variable's set,
//! - treats plugin unions as new pending events, re-entering the loop.
//!
//! Points-to sets are append-only; every event carries only the committed
//! delta, so propagation work is proportional to new facts.

use super::heap_model::HeapModel;
use crate::features::pta::domain::{
    context::{Context, CsVar},
    heap_object::{HeapObject, ObjectId},
    ir::{CallSite, MethodId, Program, Stmt, Subsignature, VarId},
    points_to_set::PointsToSet,
    value::{ConcreteValue, TypeDescriptor},
};
use crate::features::pta::ports::{Plugin, SolverOps};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// Solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum calling-context depth (k-limiting)
    pub context_depth: usize,

    /// Safety valve on processed update events (0 = unlimited)
    pub max_events: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            context_depth: 2,
            max_events: 0,
        }
    }
}

/// Statistics for one solver run
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SolverStats {
    pub events: usize,
    pub committed_objects: usize,
    pub copy_propagations: usize,
    pub plugin_notifications: usize,
}

/// Context-sensitive worklist solver with plugin dispatch
pub struct Solver {
    program: Program,
    config: SolverConfig,
    heap: HeapModel,
    points_to: FxHashMap<CsVar, PointsToSet>,
    copy_succ: FxHashMap<VarId, Vec<VarId>>,
    pending: VecDeque<(CsVar, PointsToSet)>,
    plugins: Vec<Box<dyn Plugin>>,
    stats: SolverStats,
}

impl Solver {
    pub fn new(program: Program, config: SolverConfig) -> Self {
        let mut copy_succ: FxHashMap<VarId, Vec<VarId>> = FxHashMap::default();
        for stmt in program.stmts() {
            if let Stmt::Copy { lhs, rhs } = stmt {
                let succs = copy_succ.entry(*rhs).or_default();
                if !succs.contains(lhs) {
                    succs.push(*lhs);
                }
            }
        }
        Self {
            program,
            config,
            heap: HeapModel::new(),
            points_to: FxHashMap::default(),
            copy_succ,
            pending: VecDeque::new(),
            plugins: Vec::new(),
            stats: SolverStats::default(),
        }
    }

    /// Attach a modeling plugin; plugins see call discovery when the
    /// solver runs
    pub fn register_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    #[inline]
    pub fn heap(&self) -> &HeapModel {
        &self.heap
    }

    #[inline]
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    #[inline]
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Committed points-to set of a variable in a context
    pub fn points_to(&self, context: &Context, var: VarId) -> PointsToSet {
        self.points_to
            .get(&CsVar::new(context.clone(), var))
            .cloned()
            .unwrap_or_default()
    }

    /// Concrete values among a variable's committed points-to set
    pub fn points_to_values(&self, context: &Context, var: VarId) -> Vec<ConcreteValue> {
        self.points_to(context, var)
            .iter()
            .filter_map(|id| self.heap.object(id).as_value().cloned())
            .collect()
    }

    fn enqueue(&mut self, csvar: CsVar, objects: PointsToSet) {
        if !objects.is_empty() {
            self.pending.push_back((csvar, objects));
        }
    }

    /// Seed the worklist from the program's pointer statements
    fn seed(&mut self) {
        let dctx = self.default_context();
        for (site, stmt) in self.program.stmts().to_vec().iter().enumerate() {
            match stmt {
                Stmt::New { var, class } => {
                    let obj = self.heap.alloc(site as u32, class, &dctx);
                    self.enqueue(
                        CsVar::new(dctx.clone(), *var),
                        PointsToSet::singleton(obj),
                    );
                }
                Stmt::TypeLiteral { var, class } => {
                    let obj = self
                        .heap
                        .constant(ConcreteValue::Type(TypeDescriptor::new(class.as_str())));
                    self.enqueue(
                        CsVar::new(dctx.clone(), *var),
                        PointsToSet::singleton(obj),
                    );
                }
                Stmt::Copy { .. } => {}
            }
        }
    }

    /// Run the fixpoint. Safe to call again after injecting more facts
    /// through `union_points_to`; already-known facts are no-ops.
    pub fn solve(&mut self) {
        // Plugins are detached while they are being driven so the solver
        // can hand itself out as `&mut dyn SolverOps`.
        let mut plugins = std::mem::take(&mut self.plugins);

        for call in self.program.calls().to_vec() {
            for plugin in plugins.iter_mut() {
                plugin.on_call_discovered(self, &call);
            }
        }

        self.seed();

        while let Some((csvar, pending)) = self.pending.pop_front() {
            self.stats.events += 1;
            if self.config.max_events > 0 && self.stats.events > self.config.max_events {
                debug!(events = self.stats.events, "event budget exhausted");
                break;
            }

            let committed = self.points_to.entry(csvar.clone()).or_default();
            let delta = pending.difference(committed);
            if delta.is_empty() {
                continue;
            }
            committed.union_with(&delta);
            self.stats.committed_objects += delta.len();

            if let Some(succs) = self.copy_succ.get(&csvar.var).cloned() {
                for succ in succs {
                    self.stats.copy_propagations += 1;
                    self.enqueue(CsVar::new(csvar.context.clone(), succ), delta.clone());
                }
            }

            for plugin in plugins.iter_mut() {
                if plugin.is_relevant(csvar.var) {
                    self.stats.plugin_notifications += 1;
                    plugin.on_points_to_updated(self, &csvar, &delta);
                }
            }
        }

        self.plugins = plugins;
        debug!(
            events = self.stats.events,
            objects = self.heap.len(),
            "fixpoint reached"
        );
    }
}

impl SolverOps for Solver {
    fn default_context(&self) -> Context {
        Context::empty(self.config.context_depth)
    }

    fn resolve_static_target(&self, call: &CallSite) -> Option<MethodId> {
        if !call.is_static {
            return None;
        }
        self.program
            .declared_method(&call.target.class, &call.target.subsig)
    }

    fn declared_method(&self, class: &str, subsig: &Subsignature) -> Option<MethodId> {
        self.program.declared_method(class, subsig)
    }

    fn current_points_to(&self, context: &Context, var: VarId) -> PointsToSet {
        self.points_to(context, var)
    }

    fn object(&self, id: ObjectId) -> &HeapObject {
        self.heap.object(id)
    }

    fn canonical_object_for(&mut self, value: ConcreteValue) -> ObjectId {
        self.heap.constant(value)
    }

    fn union_points_to(&mut self, context: &Context, var: VarId, objects: PointsToSet) {
        self.enqueue(CsVar::new(context.clone(), var), objects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::pta::domain::ir::ProgramBuilder;

    #[test]
    fn test_alloc_and_copy_propagation() {
        let mut b = ProgramBuilder::new();
        b.stmt_new("x", "Foo");
        b.copy("y", "x");
        b.copy("z", "y");
        let x = b.var("x");
        let z = b.var("z");
        let mut solver = Solver::new(b.build(), SolverConfig::default());
        solver.solve();

        let dctx = solver.default_context();
        let px = solver.points_to(&dctx, x);
        let pz = solver.points_to(&dctx, z);
        assert_eq!(px.len(), 1);
        assert_eq!(px, pz);
    }

    #[test]
    fn test_copy_cycle_terminates() {
        let mut b = ProgramBuilder::new();
        b.stmt_new("x", "Foo");
        b.copy("y", "x");
        b.copy("x", "y");
        let y = b.var("y");
        let mut solver = Solver::new(b.build(), SolverConfig::default());
        solver.solve();
        assert_eq!(solver.points_to(&solver.default_context(), y).len(), 1);
    }

    #[test]
    fn test_resolve_static_target_requires_static() {
        let mut b = ProgramBuilder::new();
        let sig = Subsignature::new("f", &["int"], "void");
        let id = b.declare_method("A", sig.clone(), true).unwrap();
        b.call("A", sig.clone(), &["x"], None, false).unwrap();
        b.call_static("A", sig, &["x"], None).unwrap();
        let solver = Solver::new(b.build(), SolverConfig::default());

        let calls = solver.program().calls().to_vec();
        assert_eq!(solver.resolve_static_target(&calls[0]), None);
        assert_eq!(solver.resolve_static_target(&calls[1]), Some(id));
    }

    #[test]
    fn test_resolve_unknown_target() {
        let mut b = ProgramBuilder::new();
        let sig = Subsignature::new("g", &[], "void");
        b.call_static("Missing", sig, &[], None).unwrap();
        let solver = Solver::new(b.build(), SolverConfig::default());
        assert_eq!(
            solver.resolve_static_target(&solver.program().calls()[0].clone()),
            None
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        // Solving twice changes nothing: deltas of known facts are empty
        let mut b = ProgramBuilder::new();
        b.stmt_new("x", "Foo");
        b.copy("y", "x");
        let y = b.var("y");
        let mut solver = Solver::new(b.build(), SolverConfig::default());
        solver.solve();
        let dctx = solver.default_context();
        let first = solver.points_to(&dctx, y);
        solver.solve();
        assert_eq!(first, solver.points_to(&dctx, y));
    }

    #[test]
    fn test_contexts_are_isolated() {
        let mut b = ProgramBuilder::new();
        b.stmt_new("x", "Foo");
        let x = b.var("x");
        let mut solver = Solver::new(b.build(), SolverConfig::default());

        let ctx1 = Context::with_element(1, 2);
        let extra = solver.canonical_object_for(ConcreteValue::Type(TypeDescriptor::new("int")));
        solver.union_points_to(&ctx1, x, PointsToSet::singleton(extra));
        solver.solve();

        let dctx = solver.default_context();
        assert_eq!(solver.points_to(&dctx, x).len(), 1);
        assert_eq!(solver.points_to(&ctx1, x).len(), 1);
        assert_ne!(solver.points_to(&dctx, x), solver.points_to(&ctx1, x));
    }
}
