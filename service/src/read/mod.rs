//! Read entities definitions.

pub mod installment;
pub mod notification;
pub mod sale;
