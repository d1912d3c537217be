pub mod developer;
pub mod project;
pub mod project_type;
pub mod role;
pub mod team;

pub use developer::{Developer, DeveloperFields};
pub use project::{Project, ProjectFields};
pub use project_type::ProjectType;
pub use role::Role;
pub use team::Team;

/// Writable columns of the name-only catalog entities (project types, teams, roles).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFields {
    pub name: String,
}

impl NameFields {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
