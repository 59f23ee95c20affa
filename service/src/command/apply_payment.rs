//! [`Command`] for applying a payment to an [`Installment`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Money,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{installment, payment, Installment, PaymentEntry},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::Sale;

use super::Command;

/// [`Command`] for applying a payment to an [`Installment`].
///
/// Only the part of the `given` amount covering the remaining debt is
/// absorbed, and any excess over it is discarded. The full `given` amount
/// is still recorded in the [`PaymentEntry`].
#[derive(Clone, Debug)]
pub struct ApplyPayment {
    /// ID of the [`Installment`] to pay towards.
    pub installment_id: installment::Id,

    /// [`Money`] amount tendered by the client.
    pub given: Money,

    /// Total price of the [`Sale`] at the moment of the payment, recorded
    /// for audit.
    pub sale_total: Money,

    /// [`Date`] when the payment was made.
    ///
    /// [`Date`]: common::Date
    pub given_at: payment::EntryDate,
}

impl<Db> Command<ApplyPayment> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Installment>, installment::Id>>,
            Ok = Option<Installment>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Select<By<Option<Installment>, installment::Id>>,
            Ok = Option<Installment>,
            Err = Traced<database::Error>,
        > + Database<Insert<PaymentEntry>, Err = Traced<database::Error>>
        + Database<Update<Installment>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Installment, installment::Id>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = PaymentEntry;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ApplyPayment) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ApplyPayment {
            installment_id,
            given,
            sale_total,
            given_at,
        } = cmd;

        if given.amount <= Decimal::ZERO {
            return Err(tracerr::new!(E::NonPositiveAmount(given)));
        }

        let entry =
            PaymentEntry::new(installment_id, given, sale_total, given_at)
                .ok_or(E::WrongCurrency(sale_total))
                .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Select(By::<Option<Installment>, _>::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InstallmentNotExists(installment_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent payments towards the same `Installment`.
        tx.execute(Lock(By::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut installment = tx
            .execute(Select(By::<Option<Installment>, _>::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InstallmentNotExists(installment_id))
            .map_err(tracerr::wrap!())?;

        installment
            .apply(given)
            .ok_or(E::WrongCurrency(given))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        tx.execute(Update(installment))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Insert(entry.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(entry)
    }
}

/// Error of [`ApplyPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Installment`] with the provided ID does not exist.
    #[display("`Installment(id: {_0})` does not exist")]
    InstallmentNotExists(#[error(not(source))] installment::Id),

    /// Provided amount is not positive.
    #[display("amount `{_0}` is not positive")]
    NonPositiveAmount(#[error(not(source))] Money),

    /// Provided amount is in a different currency than the rest of the
    /// payment.
    #[display("amount `{_0}` is in a wrong currency")]
    WrongCurrency(#[error(not(source))] Money),
}
