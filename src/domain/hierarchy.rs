//! Leadership tree kept as parent pointers (`employee -> leader`).
//!
//! Every leader assignment goes through [`LeadershipGraph::validate_assignment`],
//! which refuses anything that would make an employee their own transitive
//! leader. Walks are bounded by the number of known employees so rows that are
//! already corrupted cannot make a walk spin forever.

use std::collections::HashMap;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("leader {0} does not exist")]
    UnknownLeader(Uuid),

    #[error("assigning {leader_id} as leader of {employee_id} would create a leadership cycle")]
    Cycle { employee_id: Uuid, leader_id: Uuid },
}

#[derive(Debug, Clone, Default)]
pub struct LeadershipGraph {
    leaders: HashMap<Uuid, Option<Uuid>>,
}

impl LeadershipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (Uuid, Option<Uuid>)>,
    {
        Self {
            leaders: edges.into_iter().collect(),
        }
    }

    pub fn contains(&self, employee_id: Uuid) -> bool {
        self.leaders.contains_key(&employee_id)
    }

    pub fn leader_of(&self, employee_id: Uuid) -> Option<Uuid> {
        self.leaders.get(&employee_id).copied().flatten()
    }

    /// Checks that `employee_id` may report to `proposed_leader`.
    ///
    /// `employee_id` does not need to be in the graph yet (new hires).
    pub fn validate_assignment(
        &self,
        employee_id: Uuid,
        proposed_leader: Option<Uuid>,
    ) -> Result<(), HierarchyError> {
        let Some(leader_id) = proposed_leader else {
            return Ok(());
        };

        let cycle = HierarchyError::Cycle {
            employee_id,
            leader_id,
        };

        if leader_id == employee_id {
            return Err(cycle);
        }
        if !self.contains(leader_id) {
            return Err(HierarchyError::UnknownLeader(leader_id));
        }

        let mut current = Some(leader_id);
        let mut steps = 0usize;
        while let Some(node) = current {
            if node == employee_id {
                return Err(cycle);
            }
            steps += 1;
            if steps > self.leaders.len() {
                // pre-existing loop above the proposed leader, not through this employee
                break;
            }
            current = self.leader_of(node);
        }

        Ok(())
    }

    /// Validates and records the assignment.
    pub fn assign(
        &mut self,
        employee_id: Uuid,
        leader_id: Option<Uuid>,
    ) -> Result<(), HierarchyError> {
        self.validate_assignment(employee_id, leader_id)?;
        self.leaders.insert(employee_id, leader_id);
        Ok(())
    }

    /// Removes an employee and detaches their direct reports.
    pub fn remove(&mut self, employee_id: Uuid) -> Vec<Uuid> {
        self.leaders.remove(&employee_id);
        let orphans = self.subordinates(employee_id);
        for orphan in &orphans {
            self.leaders.insert(*orphan, None);
        }
        orphans
    }

    /// Direct reports, in no particular order.
    pub fn subordinates(&self, leader_id: Uuid) -> Vec<Uuid> {
        self.leaders
            .iter()
            .filter(|(_, leader)| **leader == Some(leader_id))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Leaders above `employee_id`, nearest first.
    pub fn chain(&self, employee_id: Uuid) -> Vec<Uuid> {
        let mut chain = Vec::new();
        let mut current = self.leader_of(employee_id);
        while let Some(node) = current {
            if node == employee_id || chain.contains(&node) || chain.len() >= self.leaders.len() {
                break;
            }
            chain.push(node);
            current = self.leader_of(node);
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [Uuid; N] {
        std::array::from_fn(|_| Uuid::new_v4())
    }

    #[test]
    fn reversing_a_leadership_edge_is_a_cycle() {
        let [a, b] = ids();
        let mut graph = LeadershipGraph::from_edges([(a, None), (b, None)]);

        graph.assign(b, Some(a)).unwrap();
        assert_eq!(
            graph.assign(a, Some(b)),
            Err(HierarchyError::Cycle {
                employee_id: a,
                leader_id: b
            })
        );
        assert_eq!(graph.leader_of(a), None);
    }

    #[test]
    fn transitive_cycles_are_detected() {
        let [ceo, director, manager, analyst] = ids();
        let graph = LeadershipGraph::from_edges([
            (ceo, None),
            (director, Some(ceo)),
            (manager, Some(director)),
            (analyst, Some(manager)),
        ]);

        assert!(graph.validate_assignment(ceo, Some(analyst)).is_err());
        assert!(graph.validate_assignment(director, Some(manager)).is_err());
        assert!(graph.validate_assignment(analyst, Some(director)).is_ok());
    }

    #[test]
    fn self_leadership_is_a_cycle() {
        let [a] = ids();
        let graph = LeadershipGraph::from_edges([(a, None)]);
        assert!(matches!(
            graph.validate_assignment(a, Some(a)),
            Err(HierarchyError::Cycle { .. })
        ));
    }

    #[test]
    fn unknown_leader_is_rejected() {
        let [a, ghost] = ids();
        let graph = LeadershipGraph::from_edges([(a, None)]);
        assert_eq!(
            graph.validate_assignment(a, Some(ghost)),
            Err(HierarchyError::UnknownLeader(ghost))
        );
    }

    #[test]
    fn clearing_the_leader_is_always_allowed() {
        let [a, b] = ids();
        let graph = LeadershipGraph::from_edges([(a, Some(b)), (b, Some(a))]);
        assert!(graph.validate_assignment(a, None).is_ok());
    }

    #[test]
    fn new_employee_can_join_under_any_known_leader() {
        let [a, b, newcomer] = ids();
        let graph = LeadershipGraph::from_edges([(a, None), (b, Some(a))]);
        assert!(graph.validate_assignment(newcomer, Some(b)).is_ok());
    }

    #[test]
    fn walk_terminates_on_corrupted_data() {
        let [x, y, z, newcomer] = ids();
        // x -> y -> z -> x already loops
        let graph = LeadershipGraph::from_edges([(x, Some(y)), (y, Some(z)), (z, Some(x))]);

        assert!(graph.validate_assignment(newcomer, Some(x)).is_ok());
        assert!(graph.validate_assignment(y, Some(x)).is_err());
        assert_eq!(graph.chain(x).len(), 2);
    }

    #[test]
    fn subordinates_and_chain() {
        let [lead, first, second, intern] = ids();
        let mut graph = LeadershipGraph::from_edges([
            (lead, None),
            (first, Some(lead)),
            (second, Some(lead)),
            (intern, Some(first)),
        ]);

        let mut reports = graph.subordinates(lead);
        reports.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(reports, expected);
        assert_eq!(graph.chain(intern), vec![first, lead]);

        let orphans = graph.remove(first);
        assert_eq!(orphans, vec![intern]);
        assert_eq!(graph.leader_of(intern), None);
        assert!(!graph.contains(first));
    }
}
