//! [`Client`]-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{client, Client},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Client>, client::Curp>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Client>, client::Curp>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let curp: client::Curp = by.into_inner();

        const SQL: &str = "\
            SELECT curp, name \
            FROM clients \
            WHERE curp = $1::VARCHAR \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&curp])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Client {
                curp: row.get("curp"),
                name: row.get("name"),
            }))
    }
}
