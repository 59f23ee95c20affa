//! [`Lot`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{lot, Lot},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Lot>, lot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Lot>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lot>, lot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, number, status, section_id \
            FROM lots \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Lot {
                id: row.get("id"),
                number: u32::try_from(row.get::<_, i32>("number"))
                    .expect("`number` overflow"),
                status: row.get("status"),
                section_id: row.get("section_id"),
            }))
    }
}

impl<C> Database<Insert<Lot>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Lot>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(lot): Insert<Lot>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(lot)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Lot>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(lot): Update<Lot>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lot {
            id,
            number,
            status,
            section_id,
        } = lot;

        let number = i32::try_from(number).expect("`number` overflow");

        const SQL: &str = "\
            INSERT INTO lots (\
                id, number, status, section_id \
            ) VALUES (\
                $1::UUID, $2::INT4, $3::INT2, $4::UUID \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET number = EXCLUDED.number, \
                status = EXCLUDED.status, \
                section_id = EXCLUDED.section_id";
        self.exec(SQL, &[&id, &number, &status, &section_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Lot, lot::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Lot, lot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: lot::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO lots_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
