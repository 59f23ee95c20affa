//! [`Command`] for correcting a [`PaymentEntry`].

use common::{
    operations::{By, Select, Update},
    Money,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{payment, PaymentEntry},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::{Installment, Sale};

use super::Command;

/// [`Command`] for correcting a misentered [`PaymentEntry`].
///
/// Only the recorded fields are corrected. The [`Installment`] the
/// [`PaymentEntry`] was made towards keeps its debt untouched, so correcting
/// the `given` amount doesn't re-apply the payment.
#[derive(Clone, Copy, Debug)]
pub struct UpdatePaymentEntry {
    /// ID of the [`PaymentEntry`] to correct.
    pub id: payment::Id,

    /// Corrected [`Money`] amount tendered by the client.
    pub given: Money,

    /// Corrected total price of the [`Sale`] at the moment of the payment.
    pub sale_total: Money,

    /// Corrected [`Date`] when the payment was made.
    ///
    /// [`Date`]: common::Date
    pub given_at: payment::EntryDate,
}

impl<Db> Command<UpdatePaymentEntry> for Service<Db>
where
    Db: Database<
            Select<By<Option<PaymentEntry>, payment::Id>>,
            Ok = Option<PaymentEntry>,
            Err = Traced<database::Error>,
        > + Database<Update<PaymentEntry>, Err = Traced<database::Error>>,
{
    type Ok = PaymentEntry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePaymentEntry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePaymentEntry {
            id,
            given,
            sale_total,
            given_at,
        } = cmd;

        if given.amount <= Decimal::ZERO {
            return Err(tracerr::new!(E::NonPositiveAmount(given)));
        }
        if given.currency != sale_total.currency {
            return Err(tracerr::new!(E::WrongCurrency(sale_total)));
        }

        let mut entry = self
            .database()
            .execute(Select(By::<Option<PaymentEntry>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentEntryNotExists(id))
            .map_err(tracerr::wrap!())?;

        entry.given = given;
        entry.sale_total = sale_total;
        entry.given_at = given_at;
        self.database()
            .execute(Update(entry.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(entry)
    }
}

/// Error of [`UpdatePaymentEntry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Provided amount is not positive.
    #[display("amount `{_0}` is not positive")]
    NonPositiveAmount(#[error(not(source))] Money),

    /// [`PaymentEntry`] with the provided ID does not exist.
    #[display("`PaymentEntry(id: {_0})` does not exist")]
    PaymentEntryNotExists(#[error(not(source))] payment::Id),

    /// Provided amount is in a different currency than the rest of the
    /// payment.
    #[display("amount `{_0}` is in a wrong currency")]
    WrongCurrency(#[error(not(source))] Money),
}
