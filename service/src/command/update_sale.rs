//! [`Command`] for updating a [`Sale`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Money,
};
use derive_more::{Display, Error, From};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{client, lot, sale, vendor, Client, Lot, Sale, Vendor},
    infra::{database, Database},
    read::sale::Active,
    Service,
};
#[cfg(doc)]
use crate::domain::Installment;

use super::Command;

/// [`Command`] for correcting a misentered [`Sale`].
///
/// The existing [`Installment`] plan of the [`Sale`] is kept as is, so
/// correcting the price or the [`InstallmentCount`] doesn't regenerate it.
///
/// [`InstallmentCount`]: sale::InstallmentCount
#[derive(Clone, Debug)]
pub struct UpdateSale {
    /// ID of the [`Sale`] to update.
    pub id: sale::Id,

    /// ID of the [`Lot`] being sold.
    pub lot_id: lot::Id,

    /// ID of the [`Vendor`] who closed the [`Sale`].
    pub vendor_id: vendor::Id,

    /// [`Curp`] of the [`Client`] buying the [`Lot`].
    ///
    /// [`Curp`]: client::Curp
    pub client_curp: client::Curp,

    /// [`PaymentKind`] of the [`Sale`].
    ///
    /// [`PaymentKind`]: sale::PaymentKind
    pub payment_kind: sale::PaymentKind,

    /// Total price of the [`Lot`] being sold.
    pub price: Money,

    /// Number of [`Installment`]s the [`Sale`] is paid off in.
    pub installment_count: sale::InstallmentCount,

    /// [`Status`] of the [`Sale`].
    ///
    /// [`Status`]: sale::Status
    pub status: sale::Status,

    /// [`Date`] when the [`Sale`] was concluded.
    ///
    /// [`Date`]: common::Date
    pub sold_at: sale::ConclusionDate,
}

impl<Db> Command<UpdateSale> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Sale>, sale::Id>>,
            Ok = Option<Sale>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Lot>, lot::Id>>,
            Ok = Option<Lot>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Vendor>, vendor::Id>>,
            Ok = Option<Vendor>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Client>, client::Curp>>,
            Ok = Option<Client>,
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
        > + Database<
            Select<By<Option<Active<Sale>>, lot::Id>>,
            Ok = Option<Active<Sale>>,
            Err = Traced<database::Error>,
        > + Database<Update<Sale>, Err = Traced<database::Error>>
        + Database<Update<Lot>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>:
        Database<Lock<By<Lot, lot::Id>>, Err = Traced<database::Error>>,
{
    type Ok = Sale;
    type Err = Traced<ExecutionError>;

    #[expect(clippy::too_many_lines, reason = "still readable")]
    async fn execute(&self, cmd: UpdateSale) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateSale {
            id,
            lot_id,
            vendor_id,
            client_curp,
            payment_kind,
            price,
            installment_count,
            status,
            sold_at,
        } = cmd;

        if price.amount <= Decimal::ZERO {
            return Err(tracerr::new!(E::NonPositivePrice(price)));
        }

        let old_lot_id = self
            .database()
            .execute(Select(By::<Option<Sale>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SaleNotExists(id))
            .map_err(tracerr::wrap!())?
            .lot_id;

        self.database()
            .execute(Select(By::<Option<Lot>, _>::new(lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LotNotExists(lot_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let vendor = self
            .database()
            .execute(Select(By::<Option<Vendor>, _>::new(vendor_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::VendorNotExists(vendor_id))
            .map_err(tracerr::wrap!())?;

        let client = self
            .database()
            .execute(Select(By::<Option<Client>, _>::new(client_curp.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ClientNotExists(client_curp.clone()))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the involved `Lot`s.
        tx.execute(Lock(By::new(old_lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        if lot_id != old_lot_id {
            tx.execute(Lock(By::new(lot_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        let sale = tx
            .execute(Select(By::<Option<Sale>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SaleNotExists(id))
            .map_err(tracerr::wrap!())?;

        let mut lot = tx
            .execute(Select(By::<Option<Lot>, _>::new(lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LotNotExists(lot_id))
            .map_err(tracerr::wrap!())?;
        if lot_id != sale.lot_id && lot.status != lot::Status::Available {
            return Err(tracerr::new!(E::LotUnavailable(lot_id)));
        }

        let active_sale = tx
            .execute(Select(By::<Option<Active<Sale>>, _>::new(lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if active_sale.is_some_and(|active| active.0.id != id) {
            return Err(tracerr::new!(E::LotAlreadyOnSale(lot_id)));
        }

        let updated = Sale {
            id,
            lot_id,
            vendor_id: vendor.id,
            client_curp: client.curp,
            payment_kind,
            price,
            installment_count,
            status,
            sold_at,
        };
        tx.execute(Update(updated.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        lot.status = status.lot_status();
        tx.execute(Update(lot))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if lot_id != sale.lot_id {
            let old_lot = tx
                .execute(Select(By::<Option<Lot>, _>::new(sale.lot_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if let Some(mut old_lot) = old_lot {
                old_lot.status = lot::Status::Available;
                tx.execute(Update(old_lot))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
            }
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(updated)
    }
}

/// Error of [`UpdateSale`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Client`] with the provided [`Curp`] does not exist.
    ///
    /// [`Curp`]: client::Curp
    #[display("`Client(curp: {_0})` does not exist")]
    ClientNotExists(#[error(not(source))] client::Curp),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Lot`] with the provided ID already has an active [`Sale`].
    #[display("`Lot(id: {_0})` already has an active `Sale`")]
    LotAlreadyOnSale(#[error(not(source))] lot::Id),

    /// [`Lot`] with the provided ID does not exist.
    #[display("`Lot(id: {_0})` does not exist")]
    LotNotExists(#[error(not(source))] lot::Id),

    /// [`Lot`] with the provided ID is not available for the [`Sale`].
    #[display("`Lot(id: {_0})` is not available for the `Sale`")]
    LotUnavailable(#[error(not(source))] lot::Id),

    /// Provided price is not a positive amount.
    #[display("price `{_0}` is not positive")]
    NonPositivePrice(#[error(not(source))] Money),

    /// [`Sale`] with the provided ID does not exist.
    #[display("`Sale(id: {_0})` does not exist")]
    SaleNotExists(#[error(not(source))] sale::Id),

    /// [`Vendor`] with the provided ID does not exist.
    #[display("`Vendor(id: {_0})` does not exist")]
    VendorNotExists(#[error(not(source))] vendor::Id),
}
