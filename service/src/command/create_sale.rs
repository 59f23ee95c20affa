//! [`Command`] for concluding a new [`Sale`].

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
    domain::{
        client, lot, sale, vendor, Client, Installment, Lot, Sale, Vendor,
    },
    infra::{database, Database},
    read::sale::Active,
    Service,
};

use super::Command;

/// [`Command`] for concluding a new [`Sale`] of a [`Lot`].
#[derive(Clone, Debug)]
pub struct CreateSale {
    /// ID of the [`Lot`] being sold.
    pub lot_id: lot::Id,

    /// ID of the [`Vendor`] closing the [`Sale`].
    pub vendor_id: vendor::Id,

    /// [`Curp`] of the [`Client`] buying the [`Lot`].
    ///
    /// [`Curp`]: client::Curp
    pub client_curp: client::Curp,

    /// [`PaymentKind`] of the new [`Sale`].
    ///
    /// [`PaymentKind`]: sale::PaymentKind
    pub payment_kind: sale::PaymentKind,

    /// Total price of the [`Lot`] being sold.
    pub price: Money,

    /// Number of [`Installment`]s the new [`Sale`] is paid off in.
    pub installment_count: sale::InstallmentCount,

    /// Initial [`Status`] of the new [`Sale`].
    ///
    /// A [`Sale`] starting as [`Status::InProgress`] gets an [`Installment`]
    /// plan generated for it, while a [`Sale`] concluded as
    /// [`Status::Completed`] right away owns none.
    ///
    /// [`Status`]: sale::Status
    /// [`Status::Completed`]: sale::Status::Completed
    /// [`Status::InProgress`]: sale::Status::InProgress
    pub status: sale::Status,

    /// [`Date`] when the new [`Sale`] is concluded.
    ///
    /// [`Date`]: common::Date
    pub sold_at: sale::ConclusionDate,
}

impl<Db> Command<CreateSale> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
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
            Select<By<Option<Lot>, lot::Id>>,
            Ok = Option<Lot>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Active<Sale>>, lot::Id>>,
            Ok = Option<Active<Sale>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Sale>, Err = Traced<database::Error>>
        + Database<Insert<Vec<Installment>>, Err = Traced<database::Error>>
        + Database<Update<Lot>, Err = Traced<database::Error>>
        + Database<
            Update<By<vendor::SoldLots, vendor::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
    Transacted<Db>:
        Database<Lock<By<Lot, lot::Id>>, Err = Traced<database::Error>>,
{
    type Ok = Sale;
    type Err = Traced<ExecutionError>;

    #[expect(clippy::too_many_lines, reason = "still readable")]
    async fn execute(&self, cmd: CreateSale) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateSale {
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

        // Avoid concurrent actions upon the same `Lot`.
        tx.execute(Lock(By::new(lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut lot = tx
            .execute(Select(By::<Option<Lot>, _>::new(lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::LotNotExists(lot_id))
            .map_err(tracerr::wrap!())?;
        if lot.status != lot::Status::Available {
            return Err(tracerr::new!(E::LotUnavailable(lot_id)));
        }

        let active_sale = tx
            .execute(Select(By::<Option<Active<Sale>>, _>::new(lot_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if active_sale.is_some() {
            return Err(tracerr::new!(E::LotAlreadyOnSale(lot_id)));
        }

        let sale = Sale {
            id: sale::Id::new(),
            lot_id,
            vendor_id: vendor.id,
            client_curp: client.curp,
            payment_kind,
            price,
            installment_count,
            status,
            sold_at,
        };
        tx.execute(Insert(sale.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if status == sale::Status::InProgress {
            let plan = Installment::plan(&sale);
            if !plan.is_empty() {
                tx.execute(Insert(plan))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
            }
        }

        lot.status = status.lot_status();
        tx.execute(Update(lot))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Update(By::<vendor::SoldLots, _>::new(vendor.id)))
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

/// Error of [`CreateSale`] [`Command`] execution.
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

    /// [`Lot`] with the provided ID is not available for a new [`Sale`].
    #[display("`Lot(id: {_0})` is not available for a new `Sale`")]
    LotUnavailable(#[error(not(source))] lot::Id),

    /// Provided price is not a positive amount.
    #[display("price `{_0}` is not positive")]
    NonPositivePrice(#[error(not(source))] Money),

    /// [`Vendor`] with the provided ID does not exist.
    #[display("`Vendor(id: {_0})` does not exist")]
    VendorNotExists(#[error(not(source))] vendor::Id),
}
