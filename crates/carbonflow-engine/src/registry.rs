//! Project registry
//!
//! Owns project records, per-owner project counts and id allocation. The
//! registry validates and stores; caller gating happens in the engine.

use carbonflow_core::{
    safe_increment, CarbonError, CarbonResult, EngineConfig, Identity, Project, ProjectId,
    ProjectSpec, ProjectStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRegistry {
    projects: BTreeMap<ProjectId, Project>,
    owner_counts: BTreeMap<Identity, u64>,
    next_id: ProjectId,
    total_projects: u64,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self {
            projects: BTreeMap::new(),
            owner_counts: BTreeMap::new(),
            next_id: ProjectId::FIRST,
            total_projects: 0,
        }
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.get_mut(&id)
    }

    /// Look up a project or fail with `ProjectNotFound`.
    pub fn require(&self, id: ProjectId) -> CarbonResult<&Project> {
        self.get(id).ok_or(CarbonError::ProjectNotFound)
    }

    pub fn projects(&self) -> impl Iterator<Item = (ProjectId, &Project)> {
        self.projects.iter().map(|(id, project)| (*id, project))
    }

    /// Projects registered by `owner`.
    pub fn project_count(&self, owner: &Identity) -> u64 {
        self.owner_counts.get(owner).copied().unwrap_or(0)
    }

    pub fn total_projects(&self) -> u64 {
        self.total_projects
    }

    /// Validate a registration by `owner` without storing anything.
    ///
    /// Checks run in a fixed order: coordinates, area, project type, owner cap.
    pub fn validate(
        &self,
        owner: &Identity,
        spec: &ProjectSpec,
        config: &EngineConfig,
    ) -> CarbonResult<()> {
        if !spec.bounds.is_valid() {
            return Err(CarbonError::InvalidCoordinates);
        }
        if spec.area < config.min_project_size {
            return Err(CarbonError::InvalidAmount);
        }
        let type_len = spec.project_type.len();
        if type_len == 0
            || type_len > config.max_project_type_len as usize
            || !spec.project_type.is_ascii()
        {
            return Err(CarbonError::InvalidInput);
        }
        if self.project_count(owner) >= u64::from(config.max_projects_per_owner) {
            return Err(CarbonError::MaxProjectsExceeded);
        }
        Ok(())
    }

    /// Store a validated project and return its id.
    ///
    /// All counters are advanced through checked arithmetic before anything is written.
    pub fn insert(&mut self, owner: Identity, spec: ProjectSpec) -> CarbonResult<ProjectId> {
        let id = self.next_id;
        let next_id = id.next().ok_or(CarbonError::Overflow)?;
        let owner_count = safe_increment(self.project_count(&owner))?;
        let total_projects = safe_increment(self.total_projects)?;

        self.owner_counts.insert(owner.clone(), owner_count);
        self.projects.insert(id, Project::from_spec(owner, spec));
        self.next_id = next_id;
        self.total_projects = total_projects;
        Ok(id)
    }

    pub fn set_status(&mut self, id: ProjectId, status: ProjectStatus) -> CarbonResult<()> {
        let project = self.get_mut(id).ok_or(CarbonError::ProjectNotFound)?;
        project.status = status;
        Ok(())
    }
}
