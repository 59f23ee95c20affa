//! [`Command`] for deleting a [`PaymentEntry`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{payment, PaymentEntry},
    infra::{database, Database},
    Service,
};
#[cfg(doc)]
use crate::domain::Installment;

use super::Command;

/// [`Command`] for deleting a misentered [`PaymentEntry`].
///
/// The [`Installment`] the [`PaymentEntry`] was made towards keeps its debt
/// untouched.
#[derive(Clone, Copy, Debug)]
pub struct DeletePaymentEntry {
    /// ID of the [`PaymentEntry`] to delete.
    pub id: payment::Id,
}

impl<Db> Command<DeletePaymentEntry> for Service<Db>
where
    Db: Database<
            Select<By<Option<PaymentEntry>, payment::Id>>,
            Ok = Option<PaymentEntry>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<PaymentEntry, payment::Id>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeletePaymentEntry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePaymentEntry { id } = cmd;

        self.database()
            .execute(Select(By::<Option<PaymentEntry>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentEntryNotExists(id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Delete(By::<PaymentEntry, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(())
    }
}

/// Error of [`DeletePaymentEntry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`PaymentEntry`] with the provided ID does not exist.
    #[display("`PaymentEntry(id: {_0})` does not exist")]
    PaymentEntryNotExists(#[error(not(source))] payment::Id),
}
