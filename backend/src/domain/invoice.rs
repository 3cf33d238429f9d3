//! Invoice line-item calculation and draft handling.

use chrono::{NaiveDate, Utc};
use log::info;
use shared::{
    CreateInvoiceRequest, Invoice, InvoiceItem, InvoiceLinePayload, InvoiceListFilter, InvoiceStatus, InvoiceSummary,
};

use crate::config::DashboardConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvoiceValidationError {
    #[error("Please select a student")]
    MissingStudent,
    #[error("Invoice must have at least one item")]
    NoItems,
    #[error("Item {0} has no description")]
    EmptyDescription(u64),
    #[error("Item {0} must have a positive quantity")]
    NonPositiveQuantity(u64),
    #[error("Item {0} has a negative or invalid rate")]
    InvalidRate(u64),
    #[error("Item {0} not found")]
    ItemNotFound(u64),
    #[error("Due date cannot be before the issue date")]
    DueBeforeIssue,
}

/// Applies the rate multiplier and tax rate from the dashboard config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceCalculator {
    pub tax_rate: f64,
    pub rate_multiplier: f64,
}

impl Default for InvoiceCalculator {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl InvoiceCalculator {
    pub fn new(tax_rate: f64, rate_multiplier: f64) -> Self {
        Self { tax_rate, rate_multiplier }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.tax_rate, config.rate_multiplier)
    }

    pub fn line_amount(&self, quantity: u32, rate: f64) -> f64 {
        f64::from(quantity) * rate * self.rate_multiplier
    }

    pub fn subtotal(&self, items: &[InvoiceItem]) -> f64 {
        items.iter().map(|item| item.amount).sum()
    }

    pub fn tax(&self, subtotal: f64) -> f64 {
        subtotal * self.tax_rate
    }

    pub fn total(&self, subtotal: f64) -> f64 {
        subtotal + self.tax(subtotal)
    }
}

/// Search and totals for the invoice list
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceLedger {
    calculator: InvoiceCalculator,
}

impl InvoiceLedger {
    pub fn new(calculator: InvoiceCalculator) -> Self {
        Self { calculator }
    }

    /// Invoices matching the search term and status, in list order
    pub fn filter<'a>(&self, invoices: &'a [Invoice], filter: &InvoiceListFilter) -> Vec<&'a Invoice> {
        let needle = filter
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());

        invoices
            .iter()
            .filter(|invoice| match &needle {
                Some(needle) => {
                    invoice.student_name.to_lowercase().contains(needle)
                        || invoice.id.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|invoice| filter.status.map_or(true, |status| invoice.status == status))
            .collect()
    }

    /// Display amount of one invoice, after the rate multiplier
    pub fn display_amount(&self, invoice: &Invoice) -> f64 {
        invoice.amount * self.calculator.rate_multiplier
    }

    /// Totals over every invoice, whatever the current filter
    pub fn summary(&self, invoices: &[Invoice]) -> InvoiceSummary {
        invoices.iter().fold(InvoiceSummary::default(), |mut summary, invoice| {
            let amount = self.display_amount(invoice);
            summary.total += amount;
            match invoice.status {
                InvoiceStatus::Paid => summary.paid += amount,
                InvoiceStatus::Pending => summary.pending += amount,
                InvoiceStatus::Overdue => summary.overdue += amount,
            }
            summary
        })
    }
}

/// A single field change from the line-item editor
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceItemUpdate {
    Description(String),
    Quantity(u32),
    Rate(f64),
}

/// An invoice being edited before it is sent to the API
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    calculator: InvoiceCalculator,
    pub student_id: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
    items: Vec<InvoiceItem>,
    last_item_id: u64,
}

impl InvoiceDraft {
    pub fn new(calculator: InvoiceCalculator, issue_date: NaiveDate) -> Self {
        Self {
            calculator,
            student_id: None,
            issue_date,
            due_date: None,
            notes: String::new(),
            items: Vec::new(),
            last_item_id: 0,
        }
    }

    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    /// Add a line and return its id
    pub fn add_item(&mut self, description: &str, quantity: u32, rate: f64) -> u64 {
        let id = self.next_item_id();
        self.items.push(InvoiceItem {
            id,
            description: description.to_string(),
            quantity,
            rate,
            amount: self.calculator.line_amount(quantity, rate),
        });
        id
    }

    /// Returns true if an item was removed
    pub fn remove_item(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Change one field of an item; quantity and rate changes recompute the amount
    pub fn update_item(&mut self, id: u64, update: InvoiceItemUpdate) -> Result<&InvoiceItem, InvoiceValidationError> {
        let calculator = self.calculator;
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(InvoiceValidationError::ItemNotFound(id))?;

        match update {
            InvoiceItemUpdate::Description(description) => item.description = description,
            InvoiceItemUpdate::Quantity(quantity) => {
                item.quantity = quantity;
                item.amount = calculator.line_amount(item.quantity, item.rate);
            }
            InvoiceItemUpdate::Rate(rate) => {
                item.rate = rate;
                item.amount = calculator.line_amount(item.quantity, item.rate);
            }
        }

        Ok(item)
    }

    pub fn subtotal(&self) -> f64 {
        self.calculator.subtotal(&self.items)
    }

    pub fn tax(&self) -> f64 {
        self.calculator.tax(self.subtotal())
    }

    pub fn total(&self) -> f64 {
        self.calculator.total(self.subtotal())
    }

    /// Validate the draft and build the create-invoice payload
    pub fn to_request(&self) -> Result<CreateInvoiceRequest, InvoiceValidationError> {
        let member_id = self
            .student_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(InvoiceValidationError::MissingStudent)?;

        if self.items.is_empty() {
            return Err(InvoiceValidationError::NoItems);
        }
        for item in &self.items {
            if item.description.trim().is_empty() {
                return Err(InvoiceValidationError::EmptyDescription(item.id));
            }
            if item.quantity == 0 {
                return Err(InvoiceValidationError::NonPositiveQuantity(item.id));
            }
            if !item.rate.is_finite() || item.rate < 0.0 {
                return Err(InvoiceValidationError::InvalidRate(item.id));
            }
        }
        if matches!(self.due_date, Some(due) if due < self.issue_date) {
            return Err(InvoiceValidationError::DueBeforeIssue);
        }

        let request = CreateInvoiceRequest {
            issue_date: self.issue_date,
            due_date: self.due_date,
            member_id: member_id.to_string(),
            notes: self.notes.clone(),
            items: self
                .items
                .iter()
                .map(|item| InvoiceLinePayload {
                    description: item.description.clone(),
                    qty: item.quantity,
                    rate: item.rate,
                    amount: item.amount,
                })
                .collect(),
            subtotal: self.subtotal(),
            tax: self.tax(),
            total: self.total(),
        };

        info!(
            "Prepared invoice for member {} with {} items, total {:.2}",
            request.member_id,
            request.items.len(),
            request.total
        );
        Ok(request)
    }

    /// Epoch millis, bumped past the previous id so ids stay unique within the draft
    fn next_item_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last_item_id = now.max(self.last_item_id + 1);
        self.last_item_id
    }
}
