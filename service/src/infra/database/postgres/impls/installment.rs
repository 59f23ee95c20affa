//! [`Installment`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{installment, sale, Installment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

fn installment_from_row(row: &Row) -> Installment {
    let currency = row.get("currency");
    Installment {
        id: row.get("id"),
        sale_id: row.get("sale_id"),
        number: u16::try_from(row.get::<_, i32>("number"))
            .expect("`number` overflow"),
        expected: common::Money {
            amount: row.get("expected"),
            currency,
        },
        expected_at: row.get("expected_at"),
        remaining: common::Money {
            amount: row.get("remaining"),
            currency,
        },
        is_fulfilled: row.get("is_fulfilled"),
    }
}

impl<C> Database<Select<By<Option<Installment>, installment::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Installment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Installment>, installment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: installment::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, sale_id, number, \
                   expected, currency, expected_at, \
                   remaining, is_fulfilled \
            FROM installments \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| installment_from_row(&row)))
    }
}

impl<C> Database<Insert<Installment>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Installment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(installment): Insert<Installment>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(installment))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Vec<Installment>>> for Postgres<C>
where
    C: Connection,
    Self: Database<Insert<Installment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(installments): Insert<Vec<Installment>>,
    ) -> Result<Self::Ok, Self::Err> {
        for installment in installments {
            self.execute(Insert(installment))
                .await
                .map_err(tracerr::wrap!())?;
        }
        Ok(())
    }
}

impl<C> Database<Update<Installment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(installment): Update<Installment>,
    ) -> Result<Self::Ok, Self::Err> {
        let Installment {
            id,
            sale_id,
            number,
            expected,
            expected_at,
            remaining,
            is_fulfilled,
        } = installment;

        let number = i32::from(number);

        const SQL: &str = "\
            INSERT INTO installments (\
                id, sale_id, number, \
                expected, currency, expected_at, \
                remaining, is_fulfilled \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::INT4, \
                $4::NUMERIC, $5::INT2, $6::DATE, \
                $7::NUMERIC, $8::BOOL \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET sale_id = EXCLUDED.sale_id, \
                number = EXCLUDED.number, \
                expected = EXCLUDED.expected, \
                currency = EXCLUDED.currency, \
                expected_at = EXCLUDED.expected_at, \
                remaining = EXCLUDED.remaining, \
                is_fulfilled = EXCLUDED.is_fulfilled";
        self.exec(
            SQL,
            &[
                &id,
                &sale_id,
                &number,
                &expected.amount,
                &expected.currency,
                &expected_at,
                &remaining.amount,
                &is_fulfilled,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Installment, installment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Installment, installment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: installment::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM installments \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Installment, installment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Installment, installment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: installment::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO installments_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<
            By<read::installment::list::Page, read::installment::list::Selector>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::installment::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::installment::list::Page, read::installment::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::installment::list::Selector { arguments, filter } =
            by.into_inner();
        // Avoid subtle change for SQL.
        let sale_id: sale::Id = filter;

        let limit = i64::try_from(arguments.limit()).expect("`limit` overflow");
        let offset =
            i64::try_from(arguments.offset()).expect("`offset` overflow");

        const SQL: &str = "\
            SELECT id, sale_id, number, \
                   expected, currency, expected_at, \
                   remaining, is_fulfilled \
            FROM installments \
            WHERE sale_id = $1::UUID \
            ORDER BY number ASC \
            LIMIT $2::INT8 OFFSET $3::INT8";
        let items = self
            .query(SQL, &[&sale_id, &limit, &offset])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(installment_from_row)
            .collect::<Vec<_>>();

        const COUNT_SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM installments \
            WHERE sale_id = $1::UUID";
        let total = self
            .query_opt(COUNT_SQL, &[&sale_id])
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists")
            .get::<_, i64>(0);

        Ok(read::installment::list::Page::new(items, total.into()))
    }
}

impl<C> Database<Select<By<Vec<read::installment::Due>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::installment::Due>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::installment::Due>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT installments.id AS installment_id, \
                   installments.expected_at, \
                   clients.name AS client_name, \
                   clients.curp AS client_curp \
            FROM installments \
            JOIN sales ON sales.id = installments.sale_id \
            JOIN clients ON clients.curp = sales.client_curp \
            WHERE sales.status = $1::INT2 \
            ORDER BY installments.expected_at ASC";
        Ok(self
            .query(SQL, &[&sale::Status::InProgress])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::installment::Due {
                installment_id: row.get("installment_id"),
                expected_at: row.get("expected_at"),
                client_name: row.get("client_name"),
                client_curp: row.get("client_curp"),
            })
            .collect())
    }
}
