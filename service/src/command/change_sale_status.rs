//! [`Command`] for changing the [`Status`] of a [`Sale`].
//!
//! [`Status`]: sale::Status

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{lot, sale, Lot, Sale},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for changing the [`Status`] of a [`Sale`], keeping the
/// [`Status`] of its [`Lot`] in step.
///
/// [`Status`]: sale::Status
#[derive(Clone, Copy, Debug)]
pub struct ChangeSaleStatus {
    /// ID of the [`Sale`] to change the [`Status`] of.
    ///
    /// [`Status`]: sale::Status
    pub sale_id: sale::Id,

    /// New [`Status`] of the [`Sale`].
    ///
    /// [`Status`]: sale::Status
    pub status: sale::Status,
}

impl<Db> Command<ChangeSaleStatus> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Sale>, sale::Id>>,
            Ok = Option<Sale>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Select<By<Option<Sale>, sale::Id>>,
            Ok = Option<Sale>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Lot>, lot::Id>>,
            Ok = Option<Lot>,
            Err = Traced<database::Error>,
        > + Database<Update<Lot>, Err = Traced<database::Error>>
        + Database<Update<Sale>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>:
        Database<Lock<By<Lot, lot::Id>>, Err = Traced<database::Error>>,
{
    type Ok = Sale;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ChangeSaleStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ChangeSaleStatus { sale_id, status } = cmd;

        let sale = self
            .database()
            .execute(Select(By::<Option<Sale>, _>::new(sale_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SaleNotExists(sale_id))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Lot`.
        tx.execute(Lock(By::new(sale.lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut sale = tx
            .execute(Select(By::<Option<Sale>, _>::new(sale_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SaleNotExists(sale_id))
            .map_err(tracerr::wrap!())?;

        let mut lot = tx
            .execute(Select(By::<Option<Lot>, _>::new(sale.lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LotNotExists(sale.lot_id))
            .map_err(tracerr::wrap!())?;

        lot.status = status.lot_status();
        tx.execute(Update(lot))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        sale.status = status;
        tx.execute(Update(sale.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(sale)
    }
}

/// Error of [`ChangeSaleStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Lot`] of the [`Sale`] does not exist.
    #[display("`Lot(id: {_0})` does not exist")]
    LotNotExists(#[error(not(source))] lot::Id),

    /// [`Sale`] with the provided ID does not exist.
    #[display("`Sale(id: {_0})` does not exist")]
    SaleNotExists(#[error(not(source))] sale::Id),
}
