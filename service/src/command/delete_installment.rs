//! [`Command`] for deleting an [`Installment`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{installment, Installment, Notification, PaymentEntry},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Installment`] along with its
/// [`PaymentEntry`]s and [`Notification`]s.
#[derive(Clone, Copy, Debug)]
pub struct DeleteInstallment {
    /// ID of the [`Installment`] to delete.
    pub installment_id: installment::Id,
}

impl<Db> Command<DeleteInstallment> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Installment>, installment::Id>>,
            Ok = Option<Installment>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Delete<By<Notification, installment::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<PaymentEntry, installment::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Installment, installment::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Installment, installment::Id>>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteInstallment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteInstallment { installment_id } = cmd;

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

        // Avoid concurrent actions upon the same `Installment`.
        tx.execute(Lock(By::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Delete(By::<Notification, _>::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Delete(By::<PaymentEntry, _>::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Delete(By::<Installment, _>::new(installment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(())
    }
}

/// Error of [`DeleteInstallment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Installment`] with the provided ID does not exist.
    #[display("`Installment(id: {_0})` does not exist")]
    InstallmentNotExists(#[error(not(source))] installment::Id),
}
