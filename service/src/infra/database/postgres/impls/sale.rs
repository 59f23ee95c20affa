//! [`Sale`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{lot, sale, Sale},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

fn sale_from_row(row: &Row) -> Sale {
    Sale {
        id: row.get("id"),
        lot_id: row.get("lot_id"),
        vendor_id: row.get("vendor_id"),
        client_curp: row.get("client_curp"),
        payment_kind: row.get("payment_kind"),
        price: common::Money {
            amount: row.get("price"),
            currency: row.get("currency"),
        },
        installment_count: sale::InstallmentCount::new(
            u16::try_from(row.get::<_, i32>("installment_count"))
                .expect("`installment_count` overflow"),
        )
        .expect("`installment_count` is positive"),
        status: row.get("status"),
        sold_at: row.get("sold_at"),
    }
}

impl<C> Database<Select<By<Option<Sale>, sale::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Sale>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Sale>, sale::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: sale::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, lot_id, vendor_id, client_curp, \
                   payment_kind, price, currency, installment_count, \
                   status, sold_at \
            FROM sales \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| sale_from_row(&row)))
    }
}

impl<C> Database<Select<By<Option<read::sale::Active<Sale>>, lot::Id>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Sale>, sale::Id>>,
        Ok = Option<Sale>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<read::sale::Active<Sale>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::sale::Active<Sale>>, lot::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let lot_id: lot::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM sales \
            WHERE lot_id = $1::UUID \
              AND status <> $2::INT2 \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[&lot_id, &sale::Status::Cancelled])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        self.execute(Select(By::new(row.get::<_, sale::Id>("id"))))
            .await
            .map_err(tracerr::wrap!())
            .map(|sale| sale.map(read::sale::Active))
    }
}

impl<C> Database<Insert<Sale>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Sale>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(sale): Insert<Sale>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(sale)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Sale>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(sale): Update<Sale>,
    ) -> Result<Self::Ok, Self::Err> {
        let Sale {
            id,
            lot_id,
            vendor_id,
            client_curp,
            payment_kind,
            price,
            installment_count,
            status,
            sold_at,
        } = sale;

        let installment_count = i32::from(installment_count.get());

        const SQL: &str = "\
            INSERT INTO sales (\
                id, lot_id, vendor_id, client_curp, \
                payment_kind, price, currency, installment_count, \
                status, sold_at \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::VARCHAR, \
                $5::INT2, $6::NUMERIC, $7::INT2, $8::INT4, \
                $9::INT2, $10::DATE \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET lot_id = EXCLUDED.lot_id, \
                vendor_id = EXCLUDED.vendor_id, \
                client_curp = EXCLUDED.client_curp, \
                payment_kind = EXCLUDED.payment_kind, \
                price = EXCLUDED.price, \
                currency = EXCLUDED.currency, \
                installment_count = EXCLUDED.installment_count, \
                status = EXCLUDED.status, \
                sold_at = EXCLUDED.sold_at";
        self.exec(
            SQL,
            &[
                &id,
                &lot_id,
                &vendor_id,
                &client_curp,
                &payment_kind,
                &price.amount,
                &price.currency,
                &installment_count,
                &status,
                &sold_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C>
    Database<Select<By<read::sale::list::Page, read::sale::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::sale::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::sale::list::Page, read::sale::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::sale::list::Selector {
            arguments,
            filter: read::sale::list::Filter { status },
        } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).expect("`limit` overflow");
        let offset =
            i64::try_from(arguments.offset()).expect("`offset` overflow");

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset];

        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let sql = format!(
            "SELECT id, lot_id, vendor_id, client_curp, \
                    payment_kind, price, currency, installment_count, \
                    status, sold_at \
             FROM sales \
             WHERE true \
                   {status_filtering} \
             ORDER BY sold_at DESC, \
                      id DESC \
             LIMIT $1::INT8 OFFSET $2::INT8",
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::INT2"))
                }),
        );
        let items = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(sale_from_row)
            .collect::<Vec<_>>();

        let mut ps: Vec<&(dyn ToSql + Sync)> = Vec::new();

        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let sql = format!(
            "SELECT COUNT(*)::INT8 \
             FROM sales \
             WHERE true \
                   {status_filtering}",
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::INT2"))
                }),
        );
        let total = self
            .query_opt(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists")
            .get::<_, i64>(0);

        Ok(read::sale::list::Page::new(items, total.into()))
    }
}
