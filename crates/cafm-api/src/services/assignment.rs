//! Technician selection policies.
//!
//! The workflow resolves a role from the ticket's category and asks the
//! directory for active technicians holding it; a policy then picks one of
//! those candidates.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::seq::SliceRandom;

use cafm_core::Technician;

use crate::config::AssignmentPolicyKind;

/// Chooses one technician among the candidates for a role.
pub trait AssignmentPolicy: Send + Sync {
    /// Policy name for logs.
    fn name(&self) -> &'static str;

    /// Pick a candidate. `None` only when `candidates` is empty.
    fn pick(&self, role: &str, candidates: &[Technician]) -> Option<Technician>;
}

/// Rotates through candidates with a counter per role.
///
/// The counter is keyed by lowercased role and advances on every pick, so
/// with a stable candidate order each technician receives every n-th ticket.
#[derive(Debug, Default)]
pub struct RoundRobinPolicy {
    counters: Mutex<HashMap<String, usize>>,
}

impl RoundRobinPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssignmentPolicy for RoundRobinPolicy {
    fn name(&self) -> &'static str {
        "round_robin"
    }

    fn pick(&self, role: &str, candidates: &[Technician]) -> Option<Technician> {
        if candidates.is_empty() {
            return None;
        }

        let slot = {
            // A poisoned counter map only loses rotation state
            let mut counters = self
                .counters
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let counter = counters.entry(role.to_lowercase()).or_insert(0);
            let slot = *counter % candidates.len();
            *counter = counter.wrapping_add(1);
            slot
        };

        candidates.get(slot).cloned()
    }
}

/// Picks a candidate uniformly at random.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPolicy;

impl AssignmentPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn pick(&self, _role: &str, candidates: &[Technician]) -> Option<Technician> {
        candidates.choose(&mut rand::thread_rng()).cloned()
    }
}

/// Build the policy selected by configuration.
pub fn policy_for(kind: AssignmentPolicyKind) -> Arc<dyn AssignmentPolicy> {
    match kind {
        AssignmentPolicyKind::RoundRobin => Arc::new(RoundRobinPolicy::new()),
        AssignmentPolicyKind::Random => Arc::new(RandomPolicy),
    }
}
