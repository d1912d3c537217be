use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Role, Team};
use crate::database::repository::{Entity, PgQueryAs, Reference};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Developer {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub role_id: i32,
    pub team_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperFields {
    pub firstname: String,
    pub lastname: String,
    pub role_id: i32,
    pub team_id: i32,
}

impl Entity for Developer {
    type Fields = DeveloperFields;

    const TABLE: &'static str = "developers";
    const SET_NAME: &'static str = "Developers";
    const COLUMNS: &'static [&'static str] = &["firstname", "lastname", "role_id", "team_id"];

    fn id(&self) -> i32 {
        self.id
    }

    fn from_fields(id: i32, fields: DeveloperFields) -> Self {
        Self {
            id,
            firstname: fields.firstname,
            lastname: fields.lastname,
            role_id: fields.role_id,
            team_id: fields.team_id,
        }
    }

    fn bind_fields<'q>(query: PgQueryAs<'q, Self>, fields: DeveloperFields) -> PgQueryAs<'q, Self> {
        query
            .bind(fields.firstname)
            .bind(fields.lastname)
            .bind(fields.role_id)
            .bind(fields.team_id)
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference { table: Role::TABLE, id: self.role_id },
            Reference { table: Team::TABLE, id: self.team_id },
        ]
    }
}
