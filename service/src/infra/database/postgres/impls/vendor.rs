//! [`Vendor`]-related [`Database`] implementations.

use common::operations::{By, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{vendor, Vendor},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Vendor>, vendor::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Vendor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Vendor>, vendor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: vendor::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, sold_lots \
            FROM vendors \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Vendor {
                id: row.get("id"),
                name: row.get("name"),
                sold_lots: row.get("sold_lots"),
            }))
    }
}

impl<C> Database<Update<By<vendor::SoldLots, vendor::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(by): Update<By<vendor::SoldLots, vendor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: vendor::Id = by.into_inner();

        const SQL: &str = "\
            UPDATE vendors \
            SET sold_lots = sold_lots + 1 \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
