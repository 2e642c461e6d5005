//! In-Memory Port Implementations
//!
//! Fake implementations of the billing ports backed by plain collections.
//! Service and HTTP tests run the full computation chain over these without
//! a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{BillingSettings, ClientId, ProjectId};
use domain_billing::{
    invoice_due, BillingContext, BillingLevel, Invoice, InvoiceNumbering, InvoiceStore,
    InvoicingService, PortError, ProjectDirectory, ReadyToInvoice,
};

/// In-memory `ProjectDirectory` seeded with billing contexts
///
/// When built with an invoice store the ready-to-invoice listing consults
/// it for the latest sent date, mirroring what the database adapter joins.
#[derive(Default)]
pub struct InMemoryProjectDirectory {
    contexts: Mutex<HashMap<ProjectId, BillingContext>>,
    invoices: Option<Arc<InMemoryInvoiceStore>>,
}

impl InMemoryProjectDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory whose ready listing reads sent dates from `store`
    pub fn with_invoices(store: Arc<InMemoryInvoiceStore>) -> Self {
        Self {
            contexts: Mutex::new(HashMap::new()),
            invoices: Some(store),
        }
    }

    /// Seeds a billing context, keyed by its project id
    pub fn insert(&self, context: BillingContext) {
        self.contexts
            .lock()
            .unwrap()
            .insert(context.project.id, context);
    }
}

#[async_trait]
impl ProjectDirectory for InMemoryProjectDirectory {
    async fn billing_context(&self, id: ProjectId) -> Result<BillingContext, PortError> {
        self.contexts
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Project", id))
    }

    async fn ready_to_invoice(&self, today: NaiveDate) -> Result<Vec<ReadyToInvoice>, PortError> {
        let contexts = self.contexts.lock().unwrap();
        let mut ready = Vec::new();

        for context in contexts.values() {
            if !context.project.is_active() {
                continue;
            }
            let Some(details) = context.client.billing_details.as_ref() else {
                continue;
            };
            let last_sent = self
                .invoices
                .as_ref()
                .and_then(|store| store.last_sent_date(context.project.id));

            if invoice_due(last_sent, details.billing_day, today) {
                ready.push(ReadyToInvoice {
                    project_id: context.project.id,
                    project_name: context.project.name.clone(),
                    client_id: context.client.id,
                    client_name: context.client.name.clone(),
                    billing_day: details.billing_day,
                    last_sent_on: last_sent,
                });
            }
        }

        ready.sort_by(|a, b| a.project_name.cmp(&b.project_name));
        Ok(ready)
    }
}

/// In-memory `InvoiceStore`
#[derive(Default)]
pub struct InMemoryInvoiceStore {
    invoices: Mutex<Vec<Invoice>>,
}

impl InMemoryInvoiceStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded invoices, in insertion order
    pub fn all(&self) -> Vec<Invoice> {
        self.invoices.lock().unwrap().clone()
    }

    /// The latest sent date for a project, if any invoice went out
    pub fn last_sent_date(&self, project_id: ProjectId) -> Option<NaiveDate> {
        self.invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|invoice| invoice.project_id == project_id)
            .filter_map(|invoice| invoice.sent_on)
            .max()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn last_sent(&self, project_id: ProjectId) -> Result<Option<Invoice>, PortError> {
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|invoice| invoice.project_id == project_id && invoice.sent_on.is_some())
            .max_by_key(|invoice| invoice.sent_on)
            .cloned())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<Invoice>, PortError> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .lock()
            .unwrap()
            .iter()
            .filter(|invoice| invoice.project_id == project_id)
            .cloned()
            .collect();
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invoices)
    }

    async fn record(&self, invoice: &Invoice) -> Result<(), PortError> {
        self.invoices.lock().unwrap().push(invoice.clone());
        Ok(())
    }
}

/// Numbering fake that counts recorded invoices the way the real scheme does
///
/// The sequence is the number of invoices already in the store for the
/// project (or client, at client-level invoicing) plus one, so a preview
/// and the record that follows it agree on the number.
pub struct CountingNumbering {
    store: Arc<InMemoryInvoiceStore>,
    prefix: String,
}

impl CountingNumbering {
    pub fn new(store: Arc<InMemoryInvoiceStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl InvoiceNumbering for CountingNumbering {
    async fn next_number(
        &self,
        client_id: ClientId,
        project_id: ProjectId,
        _reference_date: NaiveDate,
        level: BillingLevel,
    ) -> Result<String, PortError> {
        let existing = self
            .store
            .all()
            .iter()
            .filter(|invoice| match level {
                BillingLevel::Project => invoice.project_id == project_id,
                BillingLevel::Client => invoice.client_id == client_id,
            })
            .count();
        Ok(format!("{}/{:04}", self.prefix, existing + 1))
    }
}

/// Wires an `InvoicingService` over fresh in-memory ports
///
/// Returns the service together with the directory (to seed contexts) and
/// the store (to inspect recorded invoices).
pub fn in_memory_service(
    settings: BillingSettings,
) -> (
    InvoicingService,
    Arc<InMemoryProjectDirectory>,
    Arc<InMemoryInvoiceStore>,
) {
    let invoices = Arc::new(InMemoryInvoiceStore::new());
    let directory = Arc::new(InMemoryProjectDirectory::with_invoices(invoices.clone()));
    let numbering = Arc::new(CountingNumbering::new(invoices.clone(), "SP"));
    let service = InvoicingService::new(directory.clone(), invoices.clone(), numbering, settings);
    (service, directory, invoices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{TestBillingContextBuilder, TestClientBuilder};
    use core_kernel::{Currency, DateRange, Money};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice_for(project_id: ProjectId, client_id: ClientId, sent_on: Option<NaiveDate>) -> Invoice {
        let period = DateRange::new(date(2024, 4, 1), date(2024, 4, 30)).unwrap();
        let amount = Money::new(dec!(1000), Currency::INR);
        let mut invoice = Invoice::new(
            project_id,
            client_id,
            "SP/0001",
            period,
            amount,
            Money::zero(Currency::INR),
            Money::zero(Currency::INR),
            amount,
        );
        if let Some(on) = sent_on {
            invoice.mark_sent(on).unwrap();
        }
        invoice
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found() {
        let directory = InMemoryProjectDirectory::new();
        let err = directory.billing_context(ProjectId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_last_sent_picks_latest_sent_invoice() {
        let store = InMemoryInvoiceStore::new();
        let project_id = ProjectId::new();
        let client_id = ClientId::new();

        store
            .record(&invoice_for(project_id, client_id, Some(date(2024, 3, 1))))
            .await
            .unwrap();
        store
            .record(&invoice_for(project_id, client_id, Some(date(2024, 5, 1))))
            .await
            .unwrap();
        store
            .record(&invoice_for(project_id, client_id, None))
            .await
            .unwrap();

        let last = store.last_sent(project_id).await.unwrap().unwrap();
        assert_eq!(last.sent_on, Some(date(2024, 5, 1)));
        assert_eq!(store.last_sent_date(project_id), Some(date(2024, 5, 1)));
    }

    #[tokio::test]
    async fn test_counting_numbering_follows_the_store() {
        let store = Arc::new(InMemoryInvoiceStore::new());
        let numbering = CountingNumbering::new(store.clone(), "SP");
        let project_id = ProjectId::new();
        let client_id = ClientId::new();

        let first = numbering
            .next_number(client_id, project_id, date(2024, 5, 1), BillingLevel::Project)
            .await
            .unwrap();
        assert_eq!(first, "SP/0001");

        store
            .record(&invoice_for(project_id, client_id, None))
            .await
            .unwrap();
        let second = numbering
            .next_number(client_id, project_id, date(2024, 5, 1), BillingLevel::Project)
            .await
            .unwrap();
        assert_eq!(second, "SP/0002");
    }

    #[tokio::test]
    async fn test_ready_listing_applies_the_due_check() {
        let store = Arc::new(InMemoryInvoiceStore::new());
        let directory = InMemoryProjectDirectory::with_invoices(store.clone());

        let client = TestClientBuilder::new().with_billing_day(10).build();
        let context = TestBillingContextBuilder::new().with_client(client).build();
        let project_id = context.project.id;
        let client_id = context.client.id;
        directory.insert(context);

        // Billing day not reached yet
        let ready = directory.ready_to_invoice(date(2024, 5, 5)).await.unwrap();
        assert!(ready.is_empty());

        // Reached, nothing sent this month
        let ready = directory.ready_to_invoice(date(2024, 5, 15)).await.unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].project_id, project_id);

        // Already invoiced this month
        store
            .record(&invoice_for(project_id, client_id, Some(date(2024, 5, 12))))
            .await
            .unwrap();
        let ready = directory.ready_to_invoice(date(2024, 5, 15)).await.unwrap();
        assert!(ready.is_empty());
    }
}
