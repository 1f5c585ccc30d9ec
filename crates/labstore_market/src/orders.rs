//! The order desk.

use crate::error::{MarketError, MarketResult};
use crate::model::{Order, OrderStatus};
use chrono::Utc;
use labstore_core::{Collection, Store};
use tracing::debug;

/// Orders from placement through results delivery.
///
/// Owns the `"orders"` collection, which starts empty. Status moves
/// forward through the scheduling flow; cancellation is allowed from any
/// non-terminal state, and nothing is editable once the order is terminal.
pub struct OrderDesk {
    orders: Collection<Order>,
}

impl OrderDesk {
    /// Opens the order desk over the given store.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection key is invalid or already claimed.
    pub fn open(store: &Store) -> MarketResult<Self> {
        Ok(Self {
            orders: store.collection("orders", Vec::new())?,
        })
    }

    /// Returns all orders in placement order.
    #[must_use]
    pub fn list(&self) -> Vec<Order> {
        self.orders.list()
    }

    /// Returns the order with the given id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<Order> {
        self.orders.get(id)
    }

    /// Returns a patient's orders.
    #[must_use]
    pub fn for_patient(&self, patient_id: &str) -> Vec<Order> {
        self.orders.filter(|o| o.patient_id == patient_id)
    }

    /// Returns the orders assigned to a laboratory, by display name.
    #[must_use]
    pub fn for_laboratory(&self, lab_name: &str) -> Vec<Order> {
        self.orders
            .filter(|o| o.assigned_laboratory.as_deref() == Some(lab_name))
    }

    /// Returns the orders in a given status.
    #[must_use]
    pub fn with_status(&self, status: OrderStatus) -> Vec<Order> {
        self.orders.filter(|o| o.status == status)
    }

    /// Places an order.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate id or failed write.
    pub fn place(&self, order: Order) -> MarketResult<()> {
        debug!(order = %order.id, patient = %order.patient_id, "order placed");
        Ok(self.orders.insert(order)?)
    }

    /// Guards a transition on a non-terminal order.
    fn edit_open_order(
        &self,
        id: &str,
        action: &str,
        edit: impl FnOnce(&mut Order),
    ) -> MarketResult<bool> {
        if let Some(order) = self.orders.get(id) {
            if order.status.is_terminal() {
                return Err(MarketError::InvalidOrderState {
                    order_id: id.to_string(),
                    action: action.to_string(),
                    status: order.status.to_string(),
                });
            }
        }
        Ok(self.orders.update_with(id, edit)?)
    }

    /// Schedules the sampling date and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is terminal or the write fails.
    pub fn schedule(&self, id: &str, date: &str, time: &str) -> MarketResult<bool> {
        self.edit_open_order(id, "scheduled", |order| {
            order.scheduled_date = Some(date.to_string());
            order.scheduled_time = Some(time.to_string());
            order.status = OrderStatus::Scheduled;
        })
    }

    /// Records the laboratory's confirmation of the appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is terminal or the write fails.
    pub fn confirm(&self, id: &str, lab_name: &str) -> MarketResult<bool> {
        self.edit_open_order(id, "confirmed", |order| {
            order.assigned_laboratory = Some(lab_name.to_string());
            order.confirmed_by_lab = Some(true);
            order.confirmed_at = Some(Utc::now());
            order.status = OrderStatus::Confirmed;
        })
    }

    /// Assigns the nurse sent for home sampling, by display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is terminal or the write fails.
    pub fn assign_nurse(&self, id: &str, nurse_name: &str) -> MarketResult<bool> {
        self.edit_open_order(id, "assigned", |order| {
            order.assigned_nurse = Some(nurse_name.to_string());
        })
    }

    /// Marks samples taken and analysis running.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is terminal or the write fails.
    pub fn start_processing(&self, id: &str) -> MarketResult<bool> {
        self.edit_open_order(id, "processed", |order| {
            order.status = OrderStatus::InProgress;
        })
    }

    /// Records payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is terminal or the write fails.
    pub fn mark_paid(&self, id: &str) -> MarketResult<bool> {
        self.edit_open_order(id, "paid", |order| order.paid = true)
    }

    /// Attaches the results document and completes the order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is terminal or the write fails.
    pub fn attach_results(&self, id: &str, results_url: &str) -> MarketResult<bool> {
        self.edit_open_order(id, "completed", |order| {
            order.results_url = Some(results_url.to_string());
            order.status = OrderStatus::Completed;
        })
    }

    /// Cancels the order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is already terminal or the write
    /// fails.
    pub fn cancel(&self, id: &str) -> MarketResult<bool> {
        self.edit_open_order(id, "cancelled", |order| {
            order.status = OrderStatus::Cancelled;
        })
    }
}
