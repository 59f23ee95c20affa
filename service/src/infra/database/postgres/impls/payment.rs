//! [`PaymentEntry`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{installment, payment, PaymentEntry},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

fn payment_entry_from_row(row: &Row) -> PaymentEntry {
    PaymentEntry {
        id: row.get("id"),
        installment_id: row.get("installment_id"),
        given: common::Money {
            amount: row.get("given"),
            currency: row.get("currency"),
        },
        sale_total: common::Money {
            amount: row.get("sale_total"),
            currency: row.get("currency"),
        },
        given_at: row.get("given_at"),
    }
}

impl<C> Database<Select<By<Option<PaymentEntry>, payment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<PaymentEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<PaymentEntry>, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: payment::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, installment_id, given, sale_total, currency, given_at \
            FROM payment_entries \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| payment_entry_from_row(&row)))
    }
}

impl<C> Database<Insert<PaymentEntry>> for Postgres<C>
where
    C: Connection,
    Self:
        Database<Update<PaymentEntry>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(entry): Insert<PaymentEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(entry)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<PaymentEntry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(entry): Update<PaymentEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        let PaymentEntry {
            id,
            installment_id,
            given,
            sale_total,
            given_at,
        } = entry;

        const SQL: &str = "\
            INSERT INTO payment_entries (\
                id, installment_id, \
                given, sale_total, currency, \
                given_at \
            ) VALUES (\
                $1::UUID, $2::UUID, \
                $3::NUMERIC, $4::NUMERIC, $5::INT2, \
                $6::DATE \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET installment_id = EXCLUDED.installment_id, \
                given = EXCLUDED.given, \
                sale_total = EXCLUDED.sale_total, \
                currency = EXCLUDED.currency, \
                given_at = EXCLUDED.given_at";
        self.exec(
            SQL,
            &[
                &id,
                &installment_id,
                &given.amount,
                &sale_total.amount,
                &given.currency,
                &given_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<PaymentEntry, payment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<PaymentEntry, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: payment::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM payment_entries \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<PaymentEntry, installment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<PaymentEntry, installment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let installment_id: installment::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM payment_entries \
            WHERE installment_id = $1::UUID";
        self.exec(SQL, &[&installment_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
