use sea_orm::{
    entity::prelude::*, Condition, ConnectionTrait, DatabaseConnection, DbErr, NotSet, Set,
    SqlErr, Statement, Unchanged,
};
use serde::{Deserialize, Serialize};

use crate::binding;
use crate::errors::ModelError;

/// Employee record. `id` is assigned by the database on insert and is
/// immutable afterwards. Wire names follow the existing API (`firstName`,
/// `lastName`, `email`).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations defined here")
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Caller-supplied record shape for create and update: every field except
/// the store-assigned `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// First/last name pair for the named lookup variants; arguments travel by
/// field name rather than position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameQuery {
    pub first_name: String,
    pub last_name: String,
}

pub fn validate(input: &EmployeeInput) -> Result<(), ModelError> {
    if input.first_name.trim().is_empty() {
        return Err(ModelError::Validation("firstName required".into()));
    }
    if input.last_name.trim().is_empty() {
        return Err(ModelError::Validation("lastName required".into()));
    }
    if input.email.trim().is_empty() {
        return Err(ModelError::Validation("email required".into()));
    }
    if !input.email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

/// Insert a new row, ignoring any caller-supplied id. The unique index on
/// `email` is the authoritative duplicate guard: a violation surfaces as
/// [`ModelError::DuplicateEmail`] even when a racing check missed it.
pub async fn create(db: &DatabaseConnection, input: &EmployeeInput) -> Result<Model, ModelError> {
    validate(input)?;
    let am = ActiveModel {
        id: NotSet,
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        email: Set(input.email.clone()),
    };
    am.insert(db).await.map_err(|e| map_write_err(&input.email, e))
}

/// Every record, order unspecified. An empty table yields an empty vec.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Absence is a normal outcome, never an error.
pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Overwrite every non-id field of the row in a single statement. If the
/// row is gone the driver reports no record updated, which maps to
/// [`ModelError::NotFound`] — there is no separate existence round trip.
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    input: &EmployeeInput,
) -> Result<Model, ModelError> {
    validate(input)?;
    let am = ActiveModel {
        id: Unchanged(id),
        first_name: Set(input.first_name.clone()),
        last_name: Set(input.last_name.clone()),
        email: Set(input.email.clone()),
    };
    am.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => ModelError::NotFound(format!("employee {id} not found")),
        e => map_write_err(&input.email, e),
    })
}

/// Hard delete. Deleting a non-existent id is a no-op.
pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<(), ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(())
}

/// Lookup by name, query builder, arguments bound by position.
///
/// Name pairs are not declared unique; when duplicates exist the first row
/// wins. The three variants below are functionally equivalent and differ
/// only in binding style and query layer.
pub async fn find_by_name(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::FirstName.eq(first_name))
        .filter(Column::LastName.eq(last_name))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Lookup by name, query builder, arguments carried by field name.
pub async fn find_by_name_named(
    db: &DatabaseConnection,
    query: &NameQuery,
) -> Result<Option<Model>, ModelError> {
    let cond = Condition::all()
        .add(Column::FirstName.eq(query.first_name.as_str()))
        .add(Column::LastName.eq(query.last_name.as_str()));
    Entity::find()
        .filter(cond)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

const NAME_SQL_POSITIONAL: &str = r#"SELECT "id", "first_name", "last_name", "email" FROM "employee" WHERE "first_name" = $1 AND "last_name" = $2"#;

const NAME_SQL_NAMED: &str = r#"SELECT "id", "first_name", "last_name", "email" FROM "employee" WHERE "first_name" = :first_name AND "last_name" = :last_name"#;

/// Lookup by name, raw engine SQL, positional placeholders.
pub async fn find_by_name_sql(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<Option<Model>, ModelError> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        NAME_SQL_POSITIONAL,
        [first_name.into(), last_name.into()],
    );
    Entity::find()
        .from_raw_sql(stmt)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Lookup by name, raw engine SQL, named placeholders resolved through
/// [`binding::named`].
pub async fn find_by_name_sql_named(
    db: &DatabaseConnection,
    query: &NameQuery,
) -> Result<Option<Model>, ModelError> {
    let stmt = binding::named(
        db.get_database_backend(),
        NAME_SQL_NAMED,
        &[
            ("last_name", query.last_name.as_str().into()),
            ("first_name", query.first_name.as_str().into()),
        ],
    )?;
    Entity::find()
        .from_raw_sql(stmt)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

fn map_write_err(email: &str, e: DbErr) -> ModelError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ModelError::DuplicateEmail(email.to_string()),
        _ => ModelError::Db(e.to_string()),
    }
}
