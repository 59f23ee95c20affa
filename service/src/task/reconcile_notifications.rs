//! [`ReconcileNotifications`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{By, Insert, Perform, Select, Start, Update},
    Date,
};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{installment, notification, Notification},
    infra::{database, Database},
    read, Service,
};
#[cfg(doc)]
use crate::domain::{Installment, Sale};

use super::Task;

/// Configuration for [`ReconcileNotifications`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between [`Notification`] reconciliations.
    pub interval: time::Duration,
}

/// [`Task`] reconciling payment [`Notification`]s with the [`Installment`]s
/// of active [`Sale`]s.
///
/// For every [`Installment`] due within the next 5 days, a [`Notification`]
/// is created once and refreshed on the following days, including the due
/// day itself and the day after it has been missed.
#[derive(Clone, Copy, Debug)]
pub struct ReconcileNotifications<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<ReconcileNotifications<Self>, Config>>> for Service<Db>
where
    ReconcileNotifications<Service<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<ReconcileNotifications<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = ReconcileNotifications {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            // Awaiting the run here keeps them from overlapping.
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::ReconcileNotifications` failed: {e}");
            });
        }
    }
}

impl<Db> Task<Perform<()>> for ReconcileNotifications<Service<Db>>
where
    Db: Database<
            Select<By<Vec<read::installment::Due>, ()>>,
            Ok = Vec<read::installment::Due>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Notification>, installment::Id>>,
            Ok = Option<Notification>,
            Err = Traced<database::Error>,
        > + Database<Insert<Notification>, Err = Traced<database::Error>>
        + Database<Update<Notification>, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let today = Date::today();

        let dues = self
            .service
            .database()
            .execute(Select(By::<Vec<read::installment::Due>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!())?;

        for due in dues {
            // A single failed item shouldn't fail the whole run.
            _ = self.reconcile(&due, today).await.map_err(|e| {
                log::warn!(
                    "failed to reconcile `Notification` of \
                     `Installment(id: {})`: {e}",
                    due.installment_id,
                );
            });
        }

        Ok(())
    }
}

impl<Db> ReconcileNotifications<Service<Db>>
where
    Db: Database<
            Select<By<Option<Notification>, installment::Id>>,
            Ok = Option<Notification>,
            Err = Traced<database::Error>,
        > + Database<Insert<Notification>, Err = Traced<database::Error>>
        + Database<Update<Notification>, Err = Traced<database::Error>>,
{
    /// Reconciles the [`Notification`] of a single [`Installment`].
    async fn reconcile(
        &self,
        due: &read::installment::Due,
        today: Date,
    ) -> Result<(), Traced<database::Error>> {
        let days_left = due.expected_at - today.coerce();
        let buyer = due.buyer();

        let existing = self
            .service
            .database()
            .execute(Select(By::<Option<Notification>, _>::new(
                due.installment_id,
            )))
            .await
            .map_err(tracerr::wrap!())?;

        if let Some(mut notification) = existing {
            if let Some(description) = message(days_left, true, &buyer) {
                notification.description = description.into();
                notification.event_at = today.coerce();
                notification.is_read = false;
                self.service
                    .database()
                    .execute(Update(notification))
                    .await
                    .map_err(tracerr::wrap!())
                    .map(drop)?;
            }
        } else if let Some(description) = message(days_left, false, &buyer) {
            let notification = Notification {
                id: notification::Id::new(),
                installment_id: due.installment_id,
                title: notification::Title::payment_due(),
                description: description.into(),
                event_at: today.coerce(),
                is_read: false,
            };
            self.service
                .database()
                .execute(Insert(notification))
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        Ok(())
    }
}

/// Error of [`ReconcileNotifications`] execution.
pub type ExecutionError = Traced<database::Error>;

/// Returns the [`Notification`] text for an [`Installment`] due in
/// `days_left` days, or [`None`] if no [`Notification`] is warranted.
///
/// A [`Notification`] is created 5 to 1 days ahead of the due date, and an
/// existing one is refreshed daily up to one day past it.
fn message(days_left: i64, exists: bool, buyer: &str) -> Option<String> {
    if exists {
        match days_left {
            1..=4 => Some(format!(
                "Faltan {days_left} para que el comprador {buyer} \
                 realice su pago.",
            )),
            0 => Some(format!(
                "El pago del comprador {buyer} debe realizarse el día de hoy.",
            )),
            -1 => Some(format!(
                "La fecha de pago del comprador {buyer} se venció.",
            )),
            _ => None,
        }
    } else {
        (1..=5).contains(&days_left).then(|| {
            format!(
                "Faltan {days_left} para que el comprador {buyer} \
                 realice su pago",
            )
        })
    }
}

#[cfg(test)]
mod spec {
    use super::message;

    const BUYER: &str = "Carlos Gomez - GOMC950113HDFRRL09";

    #[test]
    fn creates_ahead_of_due_date_only() {
        for days_left in 1..=5 {
            let msg = message(days_left, false, BUYER).unwrap();

            assert_eq!(
                msg,
                format!(
                    "Faltan {days_left} para que el comprador {BUYER} \
                     realice su pago",
                ),
            );
        }

        assert_eq!(message(6, false, BUYER), None);
        assert_eq!(message(0, false, BUYER), None);
        assert_eq!(message(-1, false, BUYER), None);
        assert_eq!(message(-10, false, BUYER), None);
    }

    #[test]
    fn refreshes_countdown_until_due_date() {
        for days_left in 1..=4 {
            let msg = message(days_left, true, BUYER).unwrap();

            assert_eq!(
                msg,
                format!(
                    "Faltan {days_left} para que el comprador {BUYER} \
                     realice su pago.",
                ),
            );
        }

        assert_eq!(message(5, true, BUYER), None);
    }

    #[test]
    fn announces_due_day() {
        assert_eq!(
            message(0, true, BUYER).unwrap(),
            format!(
                "El pago del comprador {BUYER} debe realizarse el día de hoy.",
            ),
        );
    }

    #[test]
    fn announces_missed_payment_once() {
        assert_eq!(
            message(-1, true, BUYER).unwrap(),
            format!("La fecha de pago del comprador {BUYER} se venció."),
        );

        assert_eq!(message(-2, true, BUYER), None);
    }
}
