use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::NameFields;
use crate::database::repository::{Entity, PgQueryAs};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: i32,
    pub name: String,
}

impl Entity for Team {
    type Fields = NameFields;

    const TABLE: &'static str = "teams";
    const SET_NAME: &'static str = "Teams";
    const COLUMNS: &'static [&'static str] = &["name"];
    const NAME_COLUMN: Option<&'static str> = Some("name");

    fn id(&self) -> i32 {
        self.id
    }

    fn from_fields(id: i32, fields: NameFields) -> Self {
        Self { id, name: fields.name }
    }

    fn bind_fields<'q>(query: PgQueryAs<'q, Self>, fields: NameFields) -> PgQueryAs<'q, Self> {
        query.bind(fields.name)
    }

    fn unique_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
