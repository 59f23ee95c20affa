//! [`Command`] definition.

pub mod apply_payment;
pub mod change_sale_status;
pub mod create_sale;
pub mod delete_all_notifications;
pub mod delete_installment;
pub mod delete_notification;
pub mod delete_payment_entry;
pub mod mark_all_notifications_read;
pub mod mark_notification_read;
pub mod update_payment_entry;
pub mod update_sale;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    apply_payment::ApplyPayment, change_sale_status::ChangeSaleStatus,
    create_sale::CreateSale,
    delete_all_notifications::DeleteAllNotifications,
    delete_installment::DeleteInstallment,
    delete_notification::DeleteNotification,
    delete_payment_entry::DeletePaymentEntry,
    mark_all_notifications_read::MarkAllNotificationsRead,
    mark_notification_read::MarkNotificationRead,
    update_payment_entry::UpdatePaymentEntry, update_sale::UpdateSale,
};
