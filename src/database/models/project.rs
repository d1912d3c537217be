use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ProjectType, Team};
use crate::database::repository::{Entity, PgQueryAs, Reference};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub project_type_id: i32,
    pub team_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub project_type_id: i32,
    pub team_id: i32,
}

impl Entity for Project {
    type Fields = ProjectFields;

    const TABLE: &'static str = "projects";
    const SET_NAME: &'static str = "Projects";
    const COLUMNS: &'static [&'static str] = &["name", "project_type_id", "team_id"];

    fn id(&self) -> i32 {
        self.id
    }

    fn from_fields(id: i32, fields: ProjectFields) -> Self {
        Self {
            id,
            name: fields.name,
            project_type_id: fields.project_type_id,
            team_id: fields.team_id,
        }
    }

    fn bind_fields<'q>(query: PgQueryAs<'q, Self>, fields: ProjectFields) -> PgQueryAs<'q, Self> {
        query
            .bind(fields.name)
            .bind(fields.project_type_id)
            .bind(fields.team_id)
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference { table: ProjectType::TABLE, id: self.project_type_id },
            Reference { table: Team::TABLE, id: self.team_id },
        ]
    }
}
