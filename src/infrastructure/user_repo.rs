use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::auth::UserRecord;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::schema::users;

use super::models::{NewUserRow, UserRow};

pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(|u| UserRecord {
            id: u.id,
            name: u.name,
            email: u.email,
            password_hash: u.password,
        }))
    }

    fn ensure(&self, name: &str, email: &str, password_hash: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(users::table)
            .values(&NewUserRow {
                name,
                email,
                password: password_hash,
            })
            .on_conflict(users::email)
            .do_nothing()
            .execute(&mut conn)?;
        Ok(())
    }
}
