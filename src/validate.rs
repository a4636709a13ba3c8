//! Consistency checks for partition state.
//!
//! The search maintains three views of one assignment (solution, partition,
//! objective value) and updates them incrementally. [`validate_state`] checks
//! them against each other and against a from-scratch evaluation:
//! - every vertex is listed in exactly the community its solution entry names
//! - no community is empty
//! - community sizes add up to the vertex count
//! - the stored objective value equals the recomputed one
//!
//! ```rust
//! use imbalance::{validate_state, Frustration, NeighborhoodIndex, Sign, SignedGraph};
//!
//! let graph = SignedGraph::from_edges(2, [(0, 1, Sign::Negative)]).unwrap();
//! let nbr = NeighborhoodIndex::build(&graph);
//! let obj = Frustration::singletons(&nbr);
//!
//! let report = validate_state(&obj);
//! assert!(report.is_healthy(), "{report}");
//! ```

use crate::graph::NodeId;
use crate::objective::ObjectiveFunction;
use crate::partition::CommunityId;
use std::collections::HashMap;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, not a problem.
    Info,
    /// Unusual but allowed.
    Warning,
    /// The views disagree; further deltas are unreliable.
    Error,
    /// The objective value itself is wrong.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single problem found in the partition state.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Vertex involved, if any.
    pub vertex: Option<NodeId>,
    /// Community involved, if any.
    pub community: Option<CommunityId>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            vertex: None,
            community: None,
        }
    }

    /// Attach the vertex involved.
    pub fn with_vertex(mut self, v: NodeId) -> Self {
        self.vertex = Some(v);
        self
    }

    /// Attach the community involved.
    pub fn with_community(mut self, c: CommunityId) -> Self {
        self.community = Some(c);
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(v) = self.vertex {
            write!(f, " (vertex {v})")?;
        }
        if let Some(c) = self.community {
            write!(f, " (community {c})")?;
        }
        Ok(())
    }
}

/// Outcome of [`validate_state`].
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// All issues found.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// True when nothing at [`Severity::Error`] or above was found.
    pub fn is_healthy(&self) -> bool {
        !self.issues.iter().any(|i| i.severity >= Severity::Error)
    }

    /// True when there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Count issues by severity.
    pub fn counts(&self) -> HashMap<Severity, usize> {
        let mut counts = HashMap::new();
        for issue in &self.issues {
            *counts.entry(issue.severity).or_default() += 1;
        }
        counts
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_clean() {
            return write!(f, "Validation passed: no issues found");
        }

        let counts = self.counts();
        let parts: Vec<String> = [
            (Severity::Critical, "critical"),
            (Severity::Error, "errors"),
            (Severity::Warning, "warnings"),
            (Severity::Info, "info"),
        ]
        .iter()
        .filter_map(|(sev, name)| counts.get(sev).map(|c| format!("{c} {name}")))
        .collect();
        writeln!(f, "Validation report: {}", parts.join(", "))?;

        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}

/// Check solution, partition and objective value against each other.
///
/// Runs in O(n + m): it includes a full objective evaluation.
pub fn validate_state<O: ObjectiveFunction + ?Sized>(obj: &O) -> ValidationReport {
    let mut report = ValidationReport::new();
    let solution = obj.solution();
    let partition = obj.partition();
    let n = obj.node_count();

    if solution.len() != n {
        report.add(ValidationIssue::new(
            Severity::Error,
            format!("solution covers {} vertices, expected {n}", solution.len()),
        ));
    }

    for (&c, members) in partition {
        if members.is_empty() {
            report.add(ValidationIssue::new(Severity::Error, "empty community").with_community(c));
        }
        for &v in members {
            match solution.get(v) {
                None => report.add(
                    ValidationIssue::new(Severity::Error, "member out of range")
                        .with_vertex(v)
                        .with_community(c),
                ),
                Some(&assigned) if assigned != c => report.add(
                    ValidationIssue::new(
                        Severity::Error,
                        format!("listed as member but assigned to community {assigned}"),
                    )
                    .with_vertex(v)
                    .with_community(c),
                ),
                Some(_) => {}
            }
        }
    }

    for (v, &c) in solution.iter().enumerate() {
        if !partition.members(c).is_some_and(|m| m.contains(&v)) {
            report.add(
                ValidationIssue::new(Severity::Error, "missing from its community's member set")
                    .with_vertex(v)
                    .with_community(c),
            );
        }
    }

    let total = partition.vertex_count();
    if total != n {
        report.add(ValidationIssue::new(
            Severity::Error,
            format!("community sizes sum to {total}, expected {n}"),
        ));
    }

    let stored = obj.value();
    let recomputed = obj.evaluate();
    if stored != recomputed {
        report.add(ValidationIssue::new(
            Severity::Critical,
            format!("stored objective {stored} differs from recomputed {recomputed}"),
        ));
    }

    let singletons = partition.iter().filter(|(_, m)| m.len() == 1).count();
    report.add(ValidationIssue::new(
        Severity::Info,
        format!(
            "{} communities ({singletons} singletons), objective {stored}",
            partition.len()
        ),
    ));

    report
}
