#![deny(missing_docs)]

//! # Resolution Diagnostics
//!
//! Side channel the resolver reports its decisions to. Sinks never influence results.

use std::fmt;
use std::sync::Mutex;

/// The resolution branch a schema node was dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Absent schema, resolved to the dynamic shape.
    Absent,
    /// A `$ref` that was expanded.
    Reference,
    /// A `$ref` already being expanded higher up the call chain.
    ReferenceCycle,
    /// A format with a table entry.
    Format,
    /// An array or tuple.
    Array,
    /// `integer`, `number`, `boolean` or `file`.
    Primitive,
    /// A plain string.
    String,
    /// An object, composition, map or open record.
    Object,
    /// A named non-object shape wrapped as an alias.
    Alias,
    /// A header-only simple type.
    Header,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Branch::Absent => "absent",
            Branch::Reference => "ref",
            Branch::ReferenceCycle => "ref-cycle",
            Branch::Format => "format",
            Branch::Array => "array",
            Branch::Primitive => "primitive",
            Branch::String => "string",
            Branch::Object => "object",
            Branch::Alias => "alias",
            Branch::Header => "header",
        };
        write!(f, "{}", name)
    }
}

/// One reported resolution decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Name of the model being resolved, if any.
    pub model: Option<String>,
    /// Branch taken.
    pub branch: Branch,
    /// Anonymous flag the node was resolved with.
    pub anonymous: bool,
    /// Required flag the node was resolved with.
    pub required: bool,
    /// Computed nullability.
    pub nullable: bool,
    /// Computed target type name.
    pub target_type: String,
}

/// Receiver of resolution decisions.
pub trait DiagnosticsSink: Send + Sync {
    /// Records a single decision.
    fn record(&self, event: &TraceEvent);
}

/// Forwards every decision to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: &TraceEvent) {
        tracing::debug!(
            target: "cdd_resolver::resolver",
            model = event.model.as_deref().unwrap_or(""),
            branch = %event.branch,
            anonymous = event.anonymous,
            required = event.required,
            nullable = event.nullable,
            target_type = %event.target_type,
            "resolved schema"
        );
    }
}

/// Keeps every decision in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events, oldest first.
    pub fn events(&self) -> Vec<TraceEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The branches taken, oldest first.
    pub fn branches(&self) -> Vec<Branch> {
        self.events().into_iter().map(|e| e.branch).collect()
    }
}

impl DiagnosticsSink for RecordingSink {
    fn record(&self, event: &TraceEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
