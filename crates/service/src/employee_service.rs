use sea_orm::DatabaseConnection;
use tracing::debug;

use models::employee::{self, EmployeeInput, Model};

use crate::errors::ServiceError;

/// Create an employee, enforcing email uniqueness.
///
/// The lookup is a fast-path courtesy check; the store's unique index is the
/// authoritative guard, so a concurrent creator losing the race still gets
/// `DuplicateEmail` back from the insert itself.
pub async fn save_employee(
    db: &DatabaseConnection,
    input: &EmployeeInput,
) -> Result<Model, ServiceError> {
    if employee::find_by_email(db, &input.email).await?.is_some() {
        debug!(email = %input.email, "rejecting create: email already taken");
        return Err(ServiceError::DuplicateEmail(input.email.clone()));
    }
    let created = employee::create(db, input).await?;
    Ok(created)
}

/// Every employee, order unspecified.
pub async fn get_all_employees(db: &DatabaseConnection) -> Result<Vec<Model>, ServiceError> {
    let all = employee::find_all(db).await?;
    Ok(all)
}

/// Get an employee by id; absence is `None`, not an error.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<Model>, ServiceError> {
    let found = employee::find_by_id(db, id).await?;
    Ok(found)
}

/// Replace every non-id field of an existing employee. No field merging:
/// whatever the caller supplies is what the row becomes. A missing target
/// surfaces as `NotFound` from the store's atomic update.
pub async fn update_employee(
    db: &DatabaseConnection,
    id: i64,
    input: &EmployeeInput,
) -> Result<Model, ServiceError> {
    let updated = employee::update(db, id, input).await?;
    Ok(updated)
}

/// Hard-delete an employee; deleting an absent id succeeds.
pub async fn delete_employee(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    employee::delete_by_id(db, id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    fn input(first: &str, last: &str, email: &str) -> EmployeeInput {
        EmployeeInput {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
        }
    }

    fn unique_email(tag: &str) -> String {
        format!("svc_{}_{}@example.com", tag, Uuid::new_v4())
    }

    #[tokio::test]
    async fn employee_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let email = unique_email("crud");
        let created = save_employee(&db, &input("Dan", "Sanchez", &email)).await?;
        assert!(created.id > 0);
        assert_eq!(created.email, email);

        let found = get_employee_by_id(&db, created.id).await?.unwrap();
        assert_eq!(found, created);

        let all = get_all_employees(&db).await?;
        assert!(all.iter().any(|m| m.id == created.id));

        let updated =
            update_employee(&db, created.id, &input("DanUpdate", "Sanchez", &email)).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "DanUpdate");
        assert_eq!(updated.last_name, "Sanchez");
        assert_eq!(updated.email, email);

        delete_employee(&db, created.id).await?;
        assert!(get_employee_by_id(&db, created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn distinct_emails_create_independently() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let a = save_employee(&db, &input("A", "One", &unique_email("a"))).await?;
        let b = save_employee(&db, &input("B", "Two", &unique_email("b"))).await?;
        assert_ne!(a.id, b.id);

        delete_employee(&db, a.id).await?;
        delete_employee(&db, b.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_rejected_and_store_unchanged() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let email = unique_email("dup");
        let kept = save_employee(&db, &input("Kept", "Original", &email)).await?;

        let err = save_employee(&db, &input("Other", "Claimant", &email))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail(_)));

        // the rejected create must not have touched the record set
        let found = get_employee_by_id(&db, kept.id).await?.unwrap();
        assert_eq!(found.first_name, "Kept");
        let holders: Vec<_> = get_all_employees(&db)
            .await?
            .into_iter()
            .filter(|m| m.email == email)
            .collect();
        assert_eq!(holders.len(), 1);

        delete_employee(&db, kept.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let created = save_employee(&db, &input("Gone", "Soon", &unique_email("del"))).await?;
        delete_employee(&db, created.id).await?;
        delete_employee(&db, created.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_is_full_replacement_not_a_patch() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let email = unique_email("replace");
        let created = save_employee(&db, &input("First", "Last", &email)).await?;

        // resending the original lastName/email preserves them
        let updated =
            update_employee(&db, created.id, &input("Renamed", "Last", &email)).await?;
        assert_eq!(updated.last_name, "Last");
        assert_eq!(updated.email, email);

        // supplying different values overwrites every field
        let other_email = unique_email("replace2");
        let replaced =
            update_employee(&db, created.id, &input("Other", "Name", &other_email)).await?;
        assert_eq!(replaced.first_name, "Other");
        assert_eq!(replaced.last_name, "Name");
        assert_eq!(replaced.email, other_email);

        delete_employee(&db, created.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_of_absent_id_is_not_found() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = get_db().await?;

        let err = update_employee(&db, i64::MAX, &input("No", "Body", &unique_email("absent")))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
