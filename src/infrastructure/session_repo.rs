use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::auth::{Session, SessionUser};
use crate::domain::errors::DomainError;
use crate::domain::ports::SessionStore;
use crate::schema::{sessions, users};

use super::models::{NewSessionRow, UserRow};

pub struct DieselSessionStore {
    pool: DbPool,
}

impl DieselSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_session(id: Uuid, user: UserRow) -> Session {
    Session {
        id,
        user: SessionUser {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }
}

impl SessionStore for DieselSessionStore {
    fn create(&self, user_id: Uuid) -> Result<Session, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let id = Uuid::new_v4();
            diesel::insert_into(sessions::table)
                .values(&NewSessionRow { id, user_id })
                .execute(conn)?;

            let user = users::table
                .find(user_id)
                .select(UserRow::as_select())
                .first(conn)?;

            Ok(to_session(id, user))
        })
    }

    fn find(&self, id: Uuid) -> Result<Option<Session>, DomainError> {
        let mut conn = self.pool.get()?;

        let found = sessions::table
            .inner_join(users::table)
            .filter(sessions::id.eq(id))
            .select((sessions::id, UserRow::as_select()))
            .first::<(Uuid, UserRow)>(&mut conn)
            .optional()?;

        Ok(found.map(|(id, user)| to_session(id, user)))
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::delete(sessions::table.find(id)).execute(&mut conn)?;
        Ok(())
    }
}
