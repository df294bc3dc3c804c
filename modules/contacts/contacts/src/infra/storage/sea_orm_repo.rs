use async_trait::async_trait;
use contacts_sdk::{Contact, ContactId, ContactPatch, NewContact};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait,
};

use crate::domain::birthdays::BirthdayWindow;
use crate::domain::error::DomainError;
use crate::domain::repo::ContactsRepository;

use super::entity::{self, Column, Entity as ContactEntity};

fn db_err(e: DbErr) -> DomainError {
    DomainError::database(e.to_string())
}

/// ORM-based implementation of the `ContactsRepository` trait.
///
/// Every call checks a connection out of the pool (or opens a transaction)
/// and hands it back before returning.
#[derive(Clone)]
pub struct SeaOrmContactsRepository {
    db: DatabaseConnection,
}

impl SeaOrmContactsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn backend(&self) -> DatabaseBackend {
        self.db.get_database_backend()
    }
}

#[async_trait]
impl ContactsRepository for SeaOrmContactsRepository {
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Contact>, DomainError> {
        let rows = ContactEntity::find()
            .order_by_asc(Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, DomainError> {
        let found = ContactEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create(&self, new_contact: NewContact) -> Result<Contact, DomainError> {
        let m = entity::ActiveModel {
            id: ActiveValue::NotSet,
            first_name: ActiveValue::Set(new_contact.first_name),
            last_name: ActiveValue::Set(new_contact.last_name),
            email: ActiveValue::Set(new_contact.email),
            phone: ActiveValue::Set(new_contact.phone),
            birthday: ActiveValue::Set(new_contact.birthday),
            notes: ActiveValue::Set(new_contact.notes),
        };

        // insert() reads the row back, so storage-side defaults are reflected
        let model = m.insert(&self.db).await.map_err(db_err)?;
        Ok(model.into())
    }

    async fn update(
        &self,
        id: ContactId,
        patch: ContactPatch,
    ) -> Result<Option<Contact>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(existing) = ContactEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        if patch.is_empty() {
            txn.commit().await.map_err(db_err)?;
            return Ok(Some(existing.into()));
        }

        let mut active_model: entity::ActiveModel = existing.into();
        if let Some(first_name) = patch.first_name {
            active_model.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = patch.last_name {
            active_model.last_name = ActiveValue::Set(last_name);
        }
        if let Some(email) = patch.email {
            active_model.email = ActiveValue::Set(email);
        }
        if let Some(phone) = patch.phone {
            active_model.phone = ActiveValue::Set(phone);
        }
        if let Some(birthday) = patch.birthday {
            active_model.birthday = ActiveValue::Set(birthday);
        }
        if let Some(notes) = patch.notes {
            active_model.notes = ActiveValue::Set(notes);
        }

        let updated = active_model.update(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: ContactId) -> Result<Option<Contact>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(existing) = ContactEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        ContactEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(Some(existing.into()))
    }

    async fn search(
        &self,
        term: &str,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Contact>, DomainError> {
        let pattern = format!("%{}%", escape_like(term));
        let like_term = |col: Column| case_insensitive_like(col, &pattern);

        let rows = ContactEntity::find()
            .filter(
                Condition::any()
                    .add(like_term(Column::FirstName))
                    .add(like_term(Column::LastName))
                    .add(like_term(Column::Email)),
            )
            .order_by_asc(Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn birthdays_within(
        &self,
        window: BirthdayWindow,
    ) -> Result<Vec<Contact>, DomainError> {
        let rows = ContactEntity::find()
            .filter(Column::Birthday.is_not_null())
            .filter(birthday_condition(self.backend(), window))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let backend = self.backend();
        let row = self
            .db
            .query_one(Statement::from_string(backend, "SELECT 1"))
            .await
            .map_err(db_err)?;
        row.map(|_| ())
            .ok_or_else(|| DomainError::database("SELECT 1 returned no rows"))
    }
}

/// Translate a birthday window into a filter on the month/day of `birthday`.
fn birthday_condition(backend: DatabaseBackend, window: BirthdayWindow) -> Condition {
    let month = || Expr::expr(birthday_part(backend, DatePart::Month));
    let day = || Expr::expr(birthday_part(backend, DatePart::Day));

    match window {
        BirthdayWindow::SameMonth {
            month: m,
            from_day,
            to_day,
        } => Condition::all()
            .add(month().eq(m))
            .add(day().between(from_day, to_day)),
        BirthdayWindow::MonthBoundary {
            start_month,
            start_day,
            end_month,
            end_day,
        } => Condition::any()
            .add(
                Condition::all()
                    .add(month().eq(start_month))
                    .add(day().gte(start_day)),
            )
            .add(
                Condition::all()
                    .add(month().eq(end_month))
                    .add(day().lte(end_day)),
            ),
    }
}

#[derive(Clone, Copy)]
enum DatePart {
    Month,
    Day,
}

/// Integer month or day-of-month of the `birthday` column, in the dialect of `backend`.
fn birthday_part(backend: DatabaseBackend, part: DatePart) -> SimpleExpr {
    let sql = match (backend, part) {
        (DatabaseBackend::Sqlite, DatePart::Month) => {
            r#"CAST(strftime('%m', "birthday") AS INTEGER)"#
        }
        (DatabaseBackend::Sqlite, DatePart::Day) => {
            r#"CAST(strftime('%d', "birthday") AS INTEGER)"#
        }
        (DatabaseBackend::Postgres, DatePart::Month) => {
            r#"CAST(EXTRACT(MONTH FROM "birthday") AS INTEGER)"#
        }
        (DatabaseBackend::Postgres, DatePart::Day) => {
            r#"CAST(EXTRACT(DAY FROM "birthday") AS INTEGER)"#
        }
        (DatabaseBackend::MySql, DatePart::Month) => "MONTH(`birthday`)",
        (DatabaseBackend::MySql, DatePart::Day) => "DAYOFMONTH(`birthday`)",
    };
    Expr::cust(sql)
}

/// `LOWER(col) LIKE LOWER(pattern)`, so both sides are folded by the same
/// database function.
fn case_insensitive_like(col: Column, pattern: &str) -> SimpleExpr {
    Expr::cust_with_exprs(
        format!("? LIKE ? ESCAPE '{LIKE_ESCAPE}'"),
        [
            SimpleExpr::from(Func::lower(Expr::col(col))),
            SimpleExpr::from(Func::lower(Expr::val(pattern.to_owned()))),
        ],
    )
}

/// Needs no quoting in any supported dialect, unlike a backslash in MySQL.
const LIKE_ESCAPE: char = '!';

/// Escape LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::QueryTrait;

    fn render(backend: DatabaseBackend, cond: impl Into<Condition>) -> String {
        ContactEntity::find()
            .filter(cond.into())
            .build(backend)
            .to_string()
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off!"), "50!%!_off!!");
        assert_eq!(escape_like("back\\slash"), "back\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn search_lowercases_column_and_pattern_in_sql() {
        let sql = render(
            DatabaseBackend::Sqlite,
            Condition::all().add(case_insensitive_like(Column::FirstName, "%Ölga%")),
        );

        assert!(sql.contains(r#"LOWER("first_name") LIKE LOWER('%Ölga%')"#), "{sql}");
        assert!(sql.contains("ESCAPE '!'"), "{sql}");
    }

    #[test]
    fn same_month_window_renders_between() {
        let window = BirthdayWindow::SameMonth {
            month: 6,
            from_day: 10,
            to_day: 15,
        };
        let sql = render(
            DatabaseBackend::Sqlite,
            birthday_condition(DatabaseBackend::Sqlite, window),
        );

        assert!(sql.contains(r#"CAST(strftime('%m', "birthday") AS INTEGER)"#), "{sql}");
        assert!(sql.contains(r#"CAST(strftime('%d', "birthday") AS INTEGER)"#), "{sql}");
        assert!(sql.contains(") = 6"), "{sql}");
        assert!(sql.contains(") BETWEEN 10 AND 15"), "{sql}");
    }

    #[test]
    fn month_boundary_window_renders_or_of_two_ranges() {
        let window = BirthdayWindow::MonthBoundary {
            start_month: 12,
            start_day: 28,
            end_month: 1,
            end_day: 4,
        };
        let sql = render(
            DatabaseBackend::Postgres,
            birthday_condition(DatabaseBackend::Postgres, window),
        );

        assert!(sql.contains(r#"CAST(EXTRACT(MONTH FROM "birthday") AS INTEGER)"#), "{sql}");
        assert!(sql.contains(r#"CAST(EXTRACT(DAY FROM "birthday") AS INTEGER)"#), "{sql}");
        assert!(sql.contains(") = 12"), "{sql}");
        assert!(sql.contains(") >= 28"), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.contains(") = 1"), "{sql}");
        assert!(sql.contains(") <= 4"), "{sql}");
    }
}
