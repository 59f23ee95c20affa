//! [`Notification`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    unit,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{installment, notification, Notification},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

fn notification_from_row(row: &Row) -> Notification {
    Notification {
        id: row.get("id"),
        installment_id: row.get("installment_id"),
        title: row.get("title"),
        description: row.get("description"),
        event_at: row.get("event_at"),
        is_read: row.get("is_read"),
    }
}

impl<C> Database<Select<By<Option<Notification>, notification::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Notification>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Notification>, notification::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: notification::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, installment_id, title, description, \
                   event_at, is_read \
            FROM notifications \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| notification_from_row(&row)))
    }
}

impl<C> Database<Select<By<Option<Notification>, installment::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Notification>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Notification>, installment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let installment_id: installment::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, installment_id, title, description, \
                   event_at, is_read \
            FROM notifications \
            WHERE installment_id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&installment_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| notification_from_row(&row)))
    }
}

impl<C> Database<Insert<Notification>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Update<Notification>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(notification): Insert<Notification>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(notification))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Notification>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(notification): Update<Notification>,
    ) -> Result<Self::Ok, Self::Err> {
        let Notification {
            id,
            installment_id,
            title,
            description,
            event_at,
            is_read,
        } = notification;

        const SQL: &str = "\
            INSERT INTO notifications (\
                id, installment_id, title, description, \
                event_at, is_read \
            ) VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, $4::TEXT, \
                $5::DATE, $6::BOOL \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET installment_id = EXCLUDED.installment_id, \
                title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                event_at = EXCLUDED.event_at, \
                is_read = EXCLUDED.is_read";
        self.exec(
            SQL,
            &[&id, &installment_id, &title, &description, &event_at, &is_read],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<By<Notification, unit::All>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(_): Update<By<Notification, unit::All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE notifications \
            SET is_read = TRUE \
            WHERE NOT is_read";
        self.exec(SQL, &[]).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Delete<By<Notification, notification::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Notification, notification::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: notification::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM notifications \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Notification, installment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Notification, installment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let installment_id: installment::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM notifications \
            WHERE installment_id = $1::UUID";
        self.exec(SQL, &[&installment_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Notification, unit::All>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = u64;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(_): Delete<By<Notification, unit::All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            DELETE FROM notifications";
        self.exec(SQL, &[]).await.map_err(tracerr::wrap!())
    }
}

impl<C>
    Database<
        Select<
            By<
                read::notification::list::Page,
                read::notification::list::Selector,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::notification::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::notification::list::Page,
                read::notification::list::Selector,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::notification::list::Selector {
            arguments,
            filter:
                read::notification::list::Filter {
                    unread_only,
                    oldest_first,
                },
        } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).expect("`limit` overflow");
        let offset =
            i64::try_from(arguments.offset()).expect("`offset` overflow");

        let unread_filtering = if unread_only { "AND NOT is_read " } else { "" };
        let order = if oldest_first { "ASC" } else { "DESC" };

        let sql = format!(
            "SELECT id, installment_id, title, description, \
                    event_at, is_read \
             FROM notifications \
             WHERE true \
                   {unread_filtering}\
             ORDER BY event_at {order}, \
                      id {order} \
             LIMIT $1::INT8 OFFSET $2::INT8",
        );
        let items = self
            .query(&sql, &[&limit, &offset])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(notification_from_row)
            .collect::<Vec<_>>();

        let sql = format!(
            "SELECT COUNT(*)::INT8 \
             FROM notifications \
             WHERE true \
                   {unread_filtering}",
        );
        let total = self
            .query_opt(&sql, &[])
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists")
            .get::<_, i64>(0);

        Ok(read::notification::list::Page::new(items, total.into()))
    }
}
