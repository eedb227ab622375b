//! MethodType Call Modeling
//!
//! Models invocations of the `java.lang.invoke.MethodType.methodType(*)`
//! overloads, whose result identity depends on the concrete values behind
//! the argument objects. Flow rules cannot express this, so the model
//! subscribes to the argument variables of every modeled call site and,
//! on each points-to update, recombines the delta against the current
//! sets of the sibling arguments, synthesizes signature values and asks
//! the engine to union the canonical result objects back into the
//! fixpoint.
//!
//! Soundness under out-of-order updates: per event, the updated slot
//! contributes only its delta while every sibling slot contributes its
//! full current set. The missing new×new pairings are covered when the
//! sibling's own update fires and plays the same rule with the roles
//! swapped. Termination follows from the finite universe of descriptors
//! and signatures constructible in one run, not from any depth cap.

use crate::features::method_type::domain::{extract::extract, rules::RuleKind};
use crate::features::pta::domain::{
    context::{Context, CsVar},
    ir::{CallSite, CallSiteId, MethodId, Subsignature, VarId},
    points_to_set::PointsToSet,
    value::{ConcreteValue, MethodSignature},
};
use crate::features::pta::ports::{Plugin, SolverOps};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Class whose static factory overloads are modeled
pub const METHOD_TYPE_CLASS: &str = "java.lang.invoke.MethodType";

/// Class-literal argument type of the modeled overloads
pub const CLASS_CLASS: &str = "java.lang.Class";

/// The bound overload targets, resolved once at construction
#[derive(Debug, Clone, Copy)]
struct Bound {
    return_only: MethodId,
    return_and_param: MethodId,
    return_from_signature: MethodId,
}

/// Everything the propagator needs about one registered call site
#[derive(Debug, Clone)]
struct ModeledCall {
    rule: RuleKind,
    args: Vec<VarId>,
    result: Option<VarId>,
}

/// Model statistics
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ModelStats {
    pub calls_registered: usize,
    pub tuples_examined: usize,
    pub signatures_synthesized: usize,
}

/// Plugin modeling the `methodType` overloads
///
/// One instance is scoped to one analysis run; the subscription table is
/// written once per call site at discovery and never removed.
pub struct MethodTypeModel {
    /// `None` when the modeled library surface is absent: the model is
    /// disabled and registers nothing for the rest of the run
    bound: Option<Bound>,
    registered: FxHashMap<CallSiteId, ModeledCall>,
    subscriptions: FxHashMap<VarId, FxHashSet<CallSiteId>>,
    pub stats: ModelStats,
}

impl MethodTypeModel {
    /// Bind the modeled overloads against the loaded program
    pub fn new(ops: &dyn SolverOps) -> Self {
        let shape = |params: &[&str]| Subsignature::new("methodType", params, METHOD_TYPE_CLASS);
        let bound = (|| {
            Some(Bound {
                return_only: ops.declared_method(METHOD_TYPE_CLASS, &shape(&[CLASS_CLASS]))?,
                return_and_param: ops
                    .declared_method(METHOD_TYPE_CLASS, &shape(&[CLASS_CLASS, CLASS_CLASS]))?,
                return_from_signature: ops.declared_method(
                    METHOD_TYPE_CLASS,
                    &shape(&[CLASS_CLASS, METHOD_TYPE_CLASS]),
                )?,
            })
        })();
        if bound.is_none() {
            debug!("methodType overloads not declared, model disabled");
        }
        Self {
            bound,
            registered: FxHashMap::default(),
            subscriptions: FxHashMap::default(),
            stats: ModelStats::default(),
        }
    }

    /// Whether the modeled library surface was resolved at construction
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.bound.is_some()
    }

    fn rule_for(&self, target: MethodId) -> Option<RuleKind> {
        let bound = self.bound.as_ref()?;
        if target == bound.return_only {
            Some(RuleKind::ReturnOnly)
        } else if target == bound.return_and_param {
            Some(RuleKind::ReturnAndParam)
        } else if target == bound.return_from_signature {
            Some(RuleKind::ReturnFromSignature)
        } else {
            None
        }
    }

    /// Recombine one registered call against an update event
    fn process_call(
        &mut self,
        ops: &mut dyn SolverOps,
        context: &Context,
        updated: VarId,
        delta: &PointsToSet,
        mcall: &ModeledCall,
    ) {
        // Candidate values per slot: the delta for the updated variable,
        // the full current set for every sibling.
        let mut slots: Vec<Vec<ConcreteValue>> = Vec::with_capacity(mcall.args.len());
        for &arg in &mcall.args {
            let candidates = if arg == updated {
                delta.clone()
            } else {
                ops.current_points_to(context, arg)
            };
            slots.push(
                candidates
                    .iter()
                    .filter_map(|id| extract(ops.object(id)).cloned())
                    .collect(),
            );
        }

        let mut buffer: Vec<MethodSignature> = Vec::new();
        match slots.as_slice() {
            [only] => {
                for v in only {
                    self.stats.tuples_examined += 1;
                    buffer.extend(mcall.rule.synthesize(&[v]));
                }
            }
            [first, second] => {
                for a in first {
                    for b in second {
                        self.stats.tuples_examined += 1;
                        buffer.extend(mcall.rule.synthesize(&[a, b]));
                    }
                }
            }
            _ => {}
        }
        self.stats.signatures_synthesized += buffer.len();

        // Without a result variable the buffer is simply discarded.
        let Some(result) = mcall.result else { return };
        let mut objects = PointsToSet::new();
        for sig in buffer {
            objects.insert(ops.canonical_object_for(ConcreteValue::Signature(sig)));
        }
        if !objects.is_empty() {
            ops.union_points_to(context, result, objects);
        }
    }
}

impl Plugin for MethodTypeModel {
    fn is_relevant(&self, var: VarId) -> bool {
        self.subscriptions.contains_key(&var)
    }

    fn on_call_discovered(&mut self, ops: &mut dyn SolverOps, call: &CallSite) {
        let Some(target) = ops.resolve_static_target(call) else {
            return;
        };
        let Some(rule) = self.rule_for(target) else {
            return;
        };
        // Registration happens at most once per call site.
        if self.registered.contains_key(&call.id) {
            return;
        }
        for &arg in &call.args {
            self.subscriptions.entry(arg).or_default().insert(call.id);
        }
        self.registered.insert(
            call.id,
            ModeledCall {
                rule,
                args: call.args.clone(),
                result: call.result,
            },
        );
        self.stats.calls_registered += 1;
        trace!(call = call.id, ?rule, "registered methodType call");
    }

    fn on_points_to_updated(&mut self, ops: &mut dyn SolverOps, csvar: &CsVar, delta: &PointsToSet) {
        let Some(calls) = self.subscriptions.get(&csvar.var) else {
            return;
        };
        let mut calls: Vec<CallSiteId> = calls.iter().copied().collect();
        calls.sort_unstable();
        for id in calls {
            if let Some(mcall) = self.registered.get(&id).cloned() {
                self.process_call(ops, &csvar.context, csvar.var, delta, &mcall);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::pta::domain::ir::ProgramBuilder;
    use crate::features::pta::infrastructure::solver::{Solver, SolverConfig};

    fn shape(params: &[&str]) -> Subsignature {
        Subsignature::new("methodType", params, METHOD_TYPE_CLASS)
    }

    fn declare_overloads(b: &mut ProgramBuilder) {
        b.declare_method(METHOD_TYPE_CLASS, shape(&[CLASS_CLASS]), true)
            .unwrap();
        b.declare_method(METHOD_TYPE_CLASS, shape(&[CLASS_CLASS, CLASS_CLASS]), true)
            .unwrap();
        b.declare_method(
            METHOD_TYPE_CLASS,
            shape(&[CLASS_CLASS, METHOD_TYPE_CLASS]),
            true,
        )
        .unwrap();
    }

    #[test]
    fn test_disabled_without_library_surface() {
        let b = ProgramBuilder::new();
        let solver = Solver::new(b.build(), SolverConfig::default());
        let model = MethodTypeModel::new(&solver);
        assert!(!model.is_enabled());
    }

    #[test]
    fn test_partial_surface_disables_model() {
        let mut b = ProgramBuilder::new();
        // Only one of the three overloads is present
        b.declare_method(METHOD_TYPE_CLASS, shape(&[CLASS_CLASS]), true)
            .unwrap();
        let solver = Solver::new(b.build(), SolverConfig::default());
        let model = MethodTypeModel::new(&solver);
        assert!(!model.is_enabled());
    }

    #[test]
    fn test_registration_and_relevance() {
        let mut b = ProgramBuilder::new();
        declare_overloads(&mut b);
        b.type_literal("c", "void");
        b.call_static(METHOD_TYPE_CLASS, shape(&[CLASS_CLASS]), &["c"], Some("mt"))
            .unwrap();
        let c = b.var("c");
        let other = b.var("unrelated");

        let mut solver = Solver::new(b.build(), SolverConfig::default());
        let mut model = MethodTypeModel::new(&solver);
        assert!(model.is_enabled());

        let call = solver.program().calls()[0].clone();
        model.on_call_discovered(&mut solver, &call);
        assert!(model.is_relevant(c));
        assert!(!model.is_relevant(other));
        assert_eq!(model.stats.calls_registered, 1);

        // Re-discovery is a no-op
        model.on_call_discovered(&mut solver, &call);
        assert_eq!(model.stats.calls_registered, 1);
    }

    #[test]
    fn test_non_static_call_ignored() {
        let mut b = ProgramBuilder::new();
        declare_overloads(&mut b);
        b.call(METHOD_TYPE_CLASS, shape(&[CLASS_CLASS]), &["c"], Some("mt"), false)
            .unwrap();
        let c = b.var("c");

        let mut solver = Solver::new(b.build(), SolverConfig::default());
        let mut model = MethodTypeModel::new(&solver);
        let call = solver.program().calls()[0].clone();
        model.on_call_discovered(&mut solver, &call);
        assert!(!model.is_relevant(c));
        assert_eq!(model.stats.calls_registered, 0);
    }

    #[test]
    fn test_unrelated_static_call_ignored() {
        let mut b = ProgramBuilder::new();
        declare_overloads(&mut b);
        let other = Subsignature::new("valueOf", &["int"], "java.lang.Integer");
        b.declare_method("java.lang.Integer", other.clone(), true)
            .unwrap();
        b.call_static("java.lang.Integer", other, &["x"], Some("r"))
            .unwrap();

        let mut solver = Solver::new(b.build(), SolverConfig::default());
        let mut model = MethodTypeModel::new(&solver);
        let call = solver.program().calls()[0].clone();
        model.on_call_discovered(&mut solver, &call);
        assert_eq!(model.stats.calls_registered, 0);
    }
}
