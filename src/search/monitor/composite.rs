use super::{SearchCommand, SearchMonitor};
use crate::graph::NodeId;
use crate::search::stats::SearchStatistics;

/// Forwards every event to several monitors. The first monitor asking to
/// terminate wins.
#[derive(Default)]
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self
            .monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ");
        f.debug_struct("CompositeMonitor").field("monitors", &names).finish()
    }
}

impl<'a> CompositeMonitor<'a> {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Add a monitor.
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Builder form of [`CompositeMonitor::add_monitor`].
    pub fn with_monitor<M>(mut self, monitor: M) -> Self
    where
        M: SearchMonitor + 'a,
    {
        self.add_monitor(monitor);
        self
    }

    /// Number of monitors.
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Whether there are no monitors.
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, initial_value: i64) {
        for m in &mut self.monitors {
            m.on_enter_search(initial_value);
        }
    }

    fn on_destruction(&mut self, sampled: &[NodeId]) {
        for m in &mut self.monitors {
            m.on_destruction(sampled);
        }
    }

    fn on_iteration(&mut self, iteration: u64, value: i64, best: i64) {
        for m in &mut self.monitors {
            m.on_iteration(iteration, value, best);
        }
    }

    fn on_improvement(&mut self, best: i64) {
        for m in &mut self.monitors {
            m.on_improvement(best);
        }
    }

    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        for m in &mut self.monitors {
            m.on_exit_search(stats);
        }
    }

    fn search_command(&self) -> SearchCommand {
        self.monitors
            .iter()
            .map(|m| m.search_command())
            .find(|cmd| matches!(cmd, SearchCommand::Terminate(_)))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::monitor::{InterruptMonitor, NoOpMonitor};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_first_terminate_wins() {
        let flag = AtomicBool::new(false);
        let composite = CompositeMonitor::new()
            .with_monitor(NoOpMonitor::new())
            .with_monitor(InterruptMonitor::new(&flag));

        assert_eq!(composite.len(), 2);
        assert_eq!(composite.search_command(), SearchCommand::Continue);

        flag.store(true, Ordering::Relaxed);
        assert!(matches!(composite.search_command(), SearchCommand::Terminate(_)));
        assert!(format!("{composite:?}").contains("InterruptMonitor"));
    }
}
