//! Ports (Interfaces) for the Points-to Engine
//!
//! Two seams:
//! - `SolverOps`: the engine surface plugins consume — context supply,
//!   target resolution, points-to queries, canonicalization and union.
//! - `Plugin`: the inbound surface the engine drives — call discovery and
//!   points-to update notifications.
//!
//! Plugins never hold a reference to the engine; the engine passes itself
//! to every notification, so all shared mutation funnels through
//! `union_points_to` on the single worklist thread of control.

use crate::features::pta::domain::{
    context::{Context, CsVar},
    heap_object::{HeapObject, ObjectId},
    ir::{CallSite, MethodId, Subsignature, VarId},
    points_to_set::PointsToSet,
    value::ConcreteValue,
};

/// Engine operations available to plugins
pub trait SolverOps {
    /// The default context for globally shared, constant-like objects
    fn default_context(&self) -> Context;

    /// Resolve the target of a static invocation; `None` for instance
    /// calls or targets absent from the declared-method table
    fn resolve_static_target(&self, call: &CallSite) -> Option<MethodId>;

    /// Look up a declared method by class and subsignature
    fn declared_method(&self, class: &str, subsig: &Subsignature) -> Option<MethodId>;

    /// Snapshot of a variable's current points-to set in a context
    fn current_points_to(&self, context: &Context, var: VarId) -> PointsToSet;

    /// The heap object behind an ID
    fn object(&self, id: ObjectId) -> &HeapObject;

    /// Canonical abstract object for a concrete value (default heap
    /// context, interned by value equality)
    fn canonical_object_for(&mut self, value: ConcreteValue) -> ObjectId;

    /// Union objects into a variable's points-to set, scheduling further
    /// propagation; re-inserting present objects is a no-op
    fn union_points_to(&mut self, context: &Context, var: VarId, objects: PointsToSet);
}

/// Inbound notifications a modeling plugin exposes to the engine
pub trait Plugin {
    /// Cheap existence check the engine runs on every points-to update;
    /// `on_points_to_updated` is only delivered when this returns true
    fn is_relevant(&self, var: VarId) -> bool;

    /// A call site became reachable; called once per site per run
    fn on_call_discovered(&mut self, ops: &mut dyn SolverOps, call: &CallSite);

    /// `delta` objects were newly added to `csvar`'s points-to set
    fn on_points_to_updated(&mut self, ops: &mut dyn SolverOps, csvar: &CsVar, delta: &PointsToSet);
}
