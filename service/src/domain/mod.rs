//! Domain definitions.

pub mod client;
pub mod installment;
pub mod lot;
pub mod notification;
pub mod payment;
pub mod sale;
pub mod vendor;

pub use self::{
    client::Client, installment::Installment, lot::Lot,
    notification::Notification, payment::PaymentEntry, sale::Sale,
    vendor::Vendor,
};
