//! CriteriaHierarchy - validated goal → main → sub criteria tree.

use std::collections::{HashMap, HashSet};

use super::{Criterion, CriterionLevel, HierarchyError};
use crate::domain::foundation::CriterionId;

/// A validated three-level criteria tree.
///
/// # Invariants
/// - Exactly one criterion has no parent (the goal)
/// - Every main criterion's parent is the goal
/// - Every sub-criterion's parent is a main criterion
/// - Every main criterion has at least one sub-criterion
/// - Ids and codes are unique
///
/// Children are kept in the order the criteria were supplied.
#[derive(Debug, Clone)]
pub struct CriteriaHierarchy {
    criteria: Vec<Criterion>,
    index: HashMap<CriterionId, usize>,
    levels: HashMap<CriterionId, CriterionLevel>,
    children: HashMap<CriterionId, Vec<CriterionId>>,
    goal: CriterionId,
}

impl CriteriaHierarchy {
    /// Builds and validates a hierarchy from flat criterion records.
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, HierarchyError> {
        let mut index = HashMap::with_capacity(criteria.len());
        let mut codes = HashSet::with_capacity(criteria.len());
        for (position, criterion) in criteria.iter().enumerate() {
            if index.insert(criterion.id, position).is_some() {
                return Err(HierarchyError::DuplicateId(criterion.id));
            }
            if !codes.insert(criterion.code.as_str()) {
                return Err(HierarchyError::DuplicateCode(criterion.code.clone()));
            }
        }

        let roots: Vec<CriterionId> = criteria
            .iter()
            .filter(|c| c.is_root())
            .map(|c| c.id)
            .collect();
        let goal = match roots.len() {
            0 => return Err(HierarchyError::NoGoal),
            1 => roots[0],
            _ => return Err(HierarchyError::MultipleGoals(roots)),
        };

        let mut levels = HashMap::with_capacity(criteria.len());
        let mut children: HashMap<CriterionId, Vec<CriterionId>> = HashMap::new();
        for criterion in &criteria {
            let depth = Self::depth_of(&criteria, &index, criterion)?;
            let level = CriterionLevel::from_depth(depth)
                .ok_or(HierarchyError::TooDeep(criterion.id))?;
            levels.insert(criterion.id, level);
            if let Some(parent) = criterion.parent {
                children.entry(parent).or_default().push(criterion.id);
            }
        }

        let main_ids = children.get(&goal).cloned().unwrap_or_default();
        if main_ids.is_empty() {
            return Err(HierarchyError::NoMainCriteria);
        }
        if let Some(bare) = main_ids
            .iter()
            .find(|id| children.get(*id).map_or(true, Vec::is_empty))
        {
            return Err(HierarchyError::MainWithoutSubCriteria(*bare));
        }

        Ok(Self {
            criteria,
            index,
            levels,
            children,
            goal,
        })
    }

    /// Walks up the parent chain, bailing out once it is deeper than a sub-criterion.
    fn depth_of(
        criteria: &[Criterion],
        index: &HashMap<CriterionId, usize>,
        criterion: &Criterion,
    ) -> Result<usize, HierarchyError> {
        let mut depth = 0;
        let mut current = criterion;
        while let Some(parent) = current.parent {
            depth += 1;
            if depth > CriterionLevel::Sub.depth() {
                return Err(HierarchyError::TooDeep(criterion.id));
            }
            let position = index.get(&parent).ok_or(HierarchyError::UnknownParent {
                criterion: current.id,
                parent,
            })?;
            current = &criteria[*position];
        }
        Ok(depth)
    }

    /// Returns the goal criterion.
    pub fn goal(&self) -> &Criterion {
        &self.criteria[self.index[&self.goal]]
    }

    /// Returns the goal's id.
    pub fn goal_id(&self) -> CriterionId {
        self.goal
    }

    /// Looks up a criterion by id.
    pub fn criterion(&self, id: &CriterionId) -> Option<&Criterion> {
        self.index.get(id).map(|&position| &self.criteria[position])
    }

    /// Looks up a criterion by its code.
    pub fn find_by_code(&self, code: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.code == code)
    }

    /// Returns the level of a criterion, if known.
    pub fn level_of(&self, id: &CriterionId) -> Option<CriterionLevel> {
        self.levels.get(id).copied()
    }

    /// Returns the parent of a criterion, if any.
    pub fn parent_of(&self, id: &CriterionId) -> Option<CriterionId> {
        self.criterion(id).and_then(|c| c.parent)
    }

    /// Returns the direct children of a criterion in supply order.
    pub fn children_of(&self, id: &CriterionId) -> &[CriterionId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the main criteria (children of the goal).
    pub fn main_criteria(&self) -> &[CriterionId] {
        self.children_of(&self.goal)
    }

    /// Returns every sub-criterion, grouped by main criterion.
    pub fn sub_criteria(&self) -> Vec<CriterionId> {
        self.main_criteria()
            .iter()
            .flat_map(|main| self.children_of(main).iter().copied())
            .collect()
    }

    /// Returns all criteria in supply order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns the number of criteria including the goal.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Always false for a validated hierarchy; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
