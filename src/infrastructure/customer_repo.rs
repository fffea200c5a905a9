use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::invoice::CustomerView;
use crate::domain::ports::CustomerRepository;
use crate::schema::customers;

use super::models::CustomerRow;

pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn list(&self) -> Result<Vec<CustomerView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = customers::table
            .select(CustomerRow::as_select())
            .order(customers::name.asc())
            .load(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|c| CustomerView {
                id: c.id.to_string(),
                name: c.name,
            })
            .collect())
    }
}
