use clap::ValueEnum;

/// The resource collections exposed under `/api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    #[value(alias = "projecttype")]
    ProjectType,
    Team,
    Role,
    Developer,
    Project,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::ProjectType,
        Resource::Team,
        Resource::Role,
        Resource::Developer,
        Resource::Project,
    ];

    /// Path segment after `/api/`, e.g. `ProjectType`.
    pub fn segment(self) -> &'static str {
        match self {
            Resource::ProjectType => "ProjectType",
            Resource::Team => "Team",
            Resource::Role => "Role",
            Resource::Developer => "Developer",
            Resource::Project => "Project",
        }
    }

    pub fn collection_path(self) -> String {
        format!("/api/{}", self.segment())
    }

    pub fn item_path(self, id: i32) -> String {
        format!("{}/{}", self.collection_path(), id)
    }

    /// Project types are replaced through their own action path.
    pub fn update_path(self, id: i32) -> String {
        match self {
            Resource::ProjectType => format!("{}/updateprojecttype/{}", self.collection_path(), id),
            _ => self.item_path(id),
        }
    }

    /// Router pattern for single items.
    pub(crate) fn item_route(self) -> String {
        format!("{}/:id", self.collection_path())
    }

    pub(crate) fn update_route(self) -> String {
        match self {
            Resource::ProjectType => format!("{}/updateprojecttype/:id", self.collection_path()),
            _ => self.item_route(),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}
