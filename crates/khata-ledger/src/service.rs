//! # Transaction Ledger Service
//!
//! All mutations to product stock, customer/vendor registries, and
//! sale/purchase records, plus derived profit/loss and udhar bookkeeping.
//!
//! ## Transaction Contract
//! Every sale/purchase runs inside one SQLite transaction. An error on any
//! line (unknown product, insufficient stock) aborts the whole operation:
//! no stock decrement, header, link, or profit row from that request
//! survives. The receipt is dispatched only after the commit, fire and
//! forget.

use std::sync::Arc;

use tracing::{debug, info};

use khata_core::costing::{line_profit, weighted_average_cost};
use khata_core::receipt::{format_receipt, BillStatus, ReceiptKind, ReceiptLine};
use khata_core::validation::{
    validate_new_product, validate_product_update, validate_purchase_request,
    validate_sale_request,
};
use khata_core::{
    Money, NewProduct, Product, ProductUpdate, ProfitLossEntry, PurchaseConfirmation,
    PurchaseRecord, PurchaseRequest, SaleConfirmation, SaleRecord, SaleRequest, UdharPurchase,
    UdharSale, ValidationError, Vendor,
};
use khata_db::{Database, DbError};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::notify::ReceiptNotifier;

/// The transaction ledger service.
///
/// Cheap to clone; the database pool and notifier are shared handles.
#[derive(Clone)]
pub struct LedgerService {
    db: Database,
    config: LedgerConfig,
    notifier: Arc<dyn ReceiptNotifier>,
}

impl LedgerService {
    /// Creates a new ledger service.
    pub fn new(db: Database, config: LedgerConfig, notifier: Arc<dyn ReceiptNotifier>) -> Self {
        LedgerService {
            db,
            config,
            notifier,
        }
    }

    /// Picks the receipt destination: the request's phone number, or the
    /// configured fallback when absent or blank.
    fn resolve_phone(&self, phone_no: &Option<String>) -> String {
        phone_no
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_phone.clone())
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Records a sale: resolves the customer, checks and decrements stock,
    /// books profit/loss per line, tracks udhar when unpaid, and sends the
    /// bill.
    ///
    /// Lines with quantity <= 0 are silently skipped. A line naming an
    /// unregistered product fails with [`LedgerError::ProductNotFound`];
    /// a line exceeding on-hand stock fails with
    /// [`LedgerError::InsufficientStock`]. Either aborts the whole sale.
    pub async fn record_sale(&self, request: SaleRequest) -> LedgerResult<SaleConfirmation> {
        validate_sale_request(&request)?;

        let phone = self.resolve_phone(&request.phone_no);
        let products = self.db.products();
        let parties = self.db.parties();
        let sales = self.db.sales();

        let mut tx = self.db.begin().await?;

        let customer = parties
            .get_or_create_customer_tx(&mut tx, &request.customer_name, &phone)
            .await?;

        // Header first, with zero totals, so line rows have an id to reference.
        let sales_id = sales
            .insert_header_tx(&mut tx, customer.cust_id, request.transaction_date)
            .await?;

        let mut total_amount = Money::zero();
        let mut total_quantity = 0i64;
        let mut bill_lines: Vec<ReceiptLine> = Vec::new();

        for line in &request.lines {
            if line.quantity <= 0 {
                debug!(product = %line.product_name, quantity = line.quantity, "Skipping non-positive sale line");
                continue;
            }

            let product = products
                .get_by_name_tx(&mut tx, &line.product_name)
                .await?
                .ok_or_else(|| LedgerError::ProductNotFound(line.product_name.clone()))?;

            if product.quantity < line.quantity {
                return Err(LedgerError::InsufficientStock {
                    product: line.product_name.clone(),
                    available: product.quantity,
                    requested: line.quantity,
                });
            }

            products
                .decrement_stock_tx(&mut tx, product.product_id, line.quantity)
                .await?;
            sales
                .link_product_tx(&mut tx, sales_id, product.product_id)
                .await?;

            total_amount += line.rate.multiply_quantity(line.quantity);
            total_quantity += line.quantity;

            let outcome = line_profit(line.rate, product.price_purchase(), line.quantity);
            sales
                .insert_profit_loss_tx(&mut tx, sales_id, outcome)
                .await?;

            bill_lines.push(ReceiptLine {
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                rate: line.rate,
            });
        }

        sales
            .set_totals_tx(&mut tx, sales_id, total_amount, total_quantity)
            .await?;

        let status = if request.bill_paid {
            BillStatus::Paid
        } else {
            let due = request
                .payment_due_date
                .ok_or(ValidationError::DueDateMissing)?;
            sales
                .insert_udhar_tx(&mut tx, sales_id, request.transaction_date, due)
                .await?;
            BillStatus::DueBy(due)
        };

        tx.commit().await.map_err(DbError::from)?;

        let bill = format_receipt(
            ReceiptKind::Sale,
            &request.customer_name,
            request.transaction_date,
            &bill_lines,
            total_amount,
            status,
        );
        self.notifier.send_receipt(&phone, &bill);

        info!(
            sale_id = sales_id,
            total = %total_amount,
            quantity = total_quantity,
            "Sale recorded"
        );

        Ok(SaleConfirmation { sale_id: sales_id })
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    /// Records a purchase: resolves the vendor, creates unknown products,
    /// reweights purchase prices for known ones, tracks udhar when unpaid,
    /// and sends the bill.
    pub async fn record_purchase(
        &self,
        request: PurchaseRequest,
    ) -> LedgerResult<PurchaseConfirmation> {
        validate_purchase_request(&request)?;

        let phone = self.resolve_phone(&request.phone_no);
        let products = self.db.products();
        let parties = self.db.parties();
        let purchases = self.db.purchases();

        let mut tx = self.db.begin().await?;

        let vendor = parties
            .get_or_create_vendor_tx(&mut tx, &request.vendor_name, &phone)
            .await?;

        let purch_id = purchases
            .insert_header_tx(&mut tx, vendor.vend_id, request.transaction_date)
            .await?;

        let mut total_amount = Money::zero();
        let mut total_quantity = 0i64;
        let mut bill_lines: Vec<ReceiptLine> = Vec::new();

        for line in &request.lines {
            let product = match products.get_by_name_tx(&mut tx, &line.product_name).await? {
                None => {
                    // First stock of a product the shop has never carried.
                    products
                        .insert_tx(
                            &mut tx,
                            &NewProduct {
                                product_name: line.product_name.clone(),
                                price_purchase: line.price_purchase,
                                price_sale: line.price_sale,
                                quantity: line.quantity,
                            },
                        )
                        .await?
                }
                Some(existing) => {
                    let blended = weighted_average_cost(
                        existing.price_purchase(),
                        existing.quantity,
                        line.price_purchase,
                        line.quantity,
                    );
                    let combined = existing.quantity + line.quantity;
                    products
                        .apply_restock_tx(
                            &mut tx,
                            existing.product_id,
                            blended,
                            line.price_sale,
                            combined,
                        )
                        .await?;
                    existing
                }
            };

            purchases
                .link_product_tx(&mut tx, purch_id, product.product_id)
                .await?;

            total_amount += line.price_purchase.multiply_quantity(line.quantity);
            total_quantity += line.quantity;

            bill_lines.push(ReceiptLine {
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                rate: line.price_purchase,
            });
        }

        purchases
            .set_totals_tx(&mut tx, purch_id, total_amount, total_quantity)
            .await?;

        let status = if request.bill_paid {
            BillStatus::Paid
        } else {
            let due = request
                .payment_due_date
                .ok_or(ValidationError::DueDateMissing)?;
            purchases
                .insert_udhar_tx(&mut tx, purch_id, request.transaction_date, due)
                .await?;
            BillStatus::DueBy(due)
        };

        tx.commit().await.map_err(DbError::from)?;

        let bill = format_receipt(
            ReceiptKind::Purchase,
            &request.vendor_name,
            request.transaction_date,
            &bill_lines,
            total_amount,
            status,
        );
        self.notifier.send_receipt(&phone, &bill);

        info!(
            purchase_id = purch_id,
            total = %total_amount,
            quantity = total_quantity,
            "Purchase recorded"
        );

        Ok(PurchaseConfirmation {
            purchase_id: purch_id,
        })
    }

    // =========================================================================
    // Administrative CRUD
    // =========================================================================

    /// Registers a product directly, without going through a purchase.
    pub async fn create_product(&self, new: NewProduct) -> LedgerResult<Product> {
        validate_new_product(&new)?;
        Ok(self.db.products().insert(&new).await?)
    }

    /// Lists all products.
    pub async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        Ok(self.db.products().list().await?)
    }

    /// Gets a product by id.
    pub async fn get_product(&self, product_id: i64) -> LedgerResult<Option<Product>> {
        Ok(self.db.products().get(product_id).await?)
    }

    /// Gets a product by name.
    pub async fn get_product_by_name(&self, name: &str) -> LedgerResult<Option<Product>> {
        Ok(self.db.products().get_by_name(name).await?)
    }

    /// Applies a partial update: only supplied fields change, everything
    /// else keeps its current value. Returns `None` when the id is unknown.
    pub async fn update_product(
        &self,
        product_id: i64,
        update: ProductUpdate,
    ) -> LedgerResult<Option<Product>> {
        validate_product_update(&update)?;

        let repo = self.db.products();
        let Some(mut product) = repo.get(product_id).await? else {
            return Ok(None);
        };

        if let Some(name) = update.product_name {
            product.product_name = name;
        }
        if let Some(price) = update.price_purchase {
            product.price_purchase_paisa = price.paisa();
        }
        if let Some(price) = update.price_sale {
            product.price_sale_paisa = price.paisa();
        }
        if let Some(quantity) = update.quantity {
            product.quantity = quantity;
        }

        repo.update(&product).await?;
        Ok(Some(product))
    }

    /// Deletes a product by id. Returns the deleted product, or `None`
    /// (not an error) when the id is unknown.
    pub async fn delete_product(&self, product_id: i64) -> LedgerResult<Option<Product>> {
        Ok(self.db.products().delete(product_id).await?)
    }

    /// Lists all sale headers.
    pub async fn list_sales(&self) -> LedgerResult<Vec<SaleRecord>> {
        Ok(self.db.sales().list().await?)
    }

    /// Gets a sale header by id.
    pub async fn get_sale(&self, sale_id: i64) -> LedgerResult<Option<SaleRecord>> {
        Ok(self.db.sales().get(sale_id).await?)
    }

    /// Profit/loss rows booked for a sale, in line order.
    pub async fn sale_profit_entries(&self, sale_id: i64) -> LedgerResult<Vec<ProfitLossEntry>> {
        Ok(self.db.sales().profit_entries(sale_id).await?)
    }

    /// The outstanding receivable for a sale, when it was unpaid.
    pub async fn sale_udhar(&self, sale_id: i64) -> LedgerResult<Option<UdharSale>> {
        Ok(self.db.sales().get_udhar(sale_id).await?)
    }

    /// Ids of the products on a sale, in line order.
    pub async fn sale_product_ids(&self, sale_id: i64) -> LedgerResult<Vec<i64>> {
        Ok(self.db.sales().linked_product_ids(sale_id).await?)
    }

    /// Lists all purchase headers.
    pub async fn list_purchases(&self) -> LedgerResult<Vec<PurchaseRecord>> {
        Ok(self.db.purchases().list().await?)
    }

    /// Gets a purchase header by id.
    pub async fn get_purchase(&self, purchase_id: i64) -> LedgerResult<Option<PurchaseRecord>> {
        Ok(self.db.purchases().get(purchase_id).await?)
    }

    /// The outstanding payable for a purchase, when it was unpaid.
    pub async fn purchase_udhar(&self, purchase_id: i64) -> LedgerResult<Option<UdharPurchase>> {
        Ok(self.db.purchases().get_udhar(purchase_id).await?)
    }

    /// Ids of the products on a purchase, in line order.
    pub async fn purchase_product_ids(&self, purchase_id: i64) -> LedgerResult<Vec<i64>> {
        Ok(self.db.purchases().linked_product_ids(purchase_id).await?)
    }

    /// Lists all vendors.
    pub async fn list_vendors(&self) -> LedgerResult<Vec<Vendor>> {
        Ok(self.db.parties().list_vendors().await?)
    }

    /// Gets a vendor by id.
    pub async fn get_vendor(&self, vendor_id: i64) -> LedgerResult<Option<Vendor>> {
        Ok(self.db.parties().get_vendor(vendor_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ReceiptNotifier;
    use chrono::NaiveDate;
    use khata_core::{PurchaseLine, SaleLine};
    use khata_db::DbConfig;
    use std::sync::Mutex;

    /// Captures dispatched receipts for assertions.
    #[derive(Debug, Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl ReceiptNotifier for RecordingNotifier {
        fn send_receipt(&self, phone: &str, body: &str) {
            self.sent
                .lock()
                .unwrap()
                .push((phone.to_string(), body.to_string()));
        }
    }

    async fn service() -> (LedgerService, Arc<RecordingNotifier>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let service = LedgerService::new(db, LedgerConfig::default(), notifier.clone());
        (service, notifier)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn milk_product() -> NewProduct {
        NewProduct {
            product_name: "Milk".into(),
            price_purchase: Money::from_paisa(3000),
            price_sale: Money::from_paisa(5000),
            quantity: 10,
        }
    }

    fn paid_sale(lines: Vec<SaleLine>) -> SaleRequest {
        SaleRequest {
            customer_name: "Asif".into(),
            phone_no: Some("03001234567".into()),
            transaction_date: date("2026-08-29"),
            bill_paid: true,
            payment_due_date: None,
            lines,
        }
    }

    fn restock_purchase(lines: Vec<PurchaseLine>) -> PurchaseRequest {
        PurchaseRequest {
            vendor_name: "Mehta Traders".into(),
            phone_no: Some("03007654321".into()),
            transaction_date: date("2026-08-01"),
            bill_paid: true,
            payment_due_date: None,
            lines,
        }
    }

    // -------------------------------------------------------------------------
    // Sales
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn sale_decrements_stock_and_books_totals() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let confirmation = service
            .record_sale(paid_sale(vec![SaleLine {
                product_name: "Milk".into(),
                quantity: 3,
                rate: Money::from_paisa(5000),
            }]))
            .await
            .unwrap();

        let product = service.get_product_by_name("Milk").await.unwrap().unwrap();
        assert_eq!(product.quantity, 7);

        let sale = service
            .get_sale(confirmation.sale_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sale.total_amount(), Money::from_paisa(15000));
        assert_eq!(sale.total_quantity, 3);
    }

    #[tokio::test]
    async fn sale_books_profit_per_line() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        // Purchased at 30.00, sold 3 at 50.00: profit (50-30)*3 = 60.00
        let confirmation = service
            .record_sale(paid_sale(vec![SaleLine {
                product_name: "Milk".into(),
                quantity: 3,
                rate: Money::from_paisa(5000),
            }]))
            .await
            .unwrap();

        let entries = service
            .sale_profit_entries(confirmation.sale_id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_profit);
        assert_eq!(entries[0].amount(), Money::from_paisa(6000));
    }

    #[tokio::test]
    async fn sale_books_loss_when_sold_below_cost() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let confirmation = service
            .record_sale(paid_sale(vec![SaleLine {
                product_name: "Milk".into(),
                quantity: 2,
                rate: Money::from_paisa(2500),
            }]))
            .await
            .unwrap();

        let entries = service
            .sale_profit_entries(confirmation.sale_id)
            .await
            .unwrap();
        assert!(!entries[0].is_profit);
        assert_eq!(entries[0].amount_paisa, 1000);
    }

    #[tokio::test]
    async fn sale_skips_non_positive_lines() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let confirmation = service
            .record_sale(paid_sale(vec![
                SaleLine {
                    product_name: "Milk".into(),
                    quantity: 0,
                    rate: Money::from_paisa(5000),
                },
                SaleLine {
                    // Never registered, but the zero line above must not
                    // fail either: both are skipped before lookup.
                    product_name: "Ghost".into(),
                    quantity: -2,
                    rate: Money::from_paisa(100),
                },
                SaleLine {
                    product_name: "Milk".into(),
                    quantity: 2,
                    rate: Money::from_paisa(5000),
                },
            ]))
            .await
            .unwrap();

        let sale = service
            .get_sale(confirmation.sale_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sale.total_quantity, 2);
        assert_eq!(sale.total_amount_paisa, 10000);

        let entries = service
            .sale_profit_entries(confirmation.sale_id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);

        // Only the accepted line got a link row.
        let product = service.get_product_by_name("Milk").await.unwrap().unwrap();
        let linked = service
            .sale_product_ids(confirmation.sale_id)
            .await
            .unwrap();
        assert_eq!(linked, vec![product.product_id]);
    }

    #[tokio::test]
    async fn sale_of_unknown_product_fails_with_not_found() {
        let (service, notifier) = service().await;

        let err = service
            .record_sale(paid_sale(vec![SaleLine {
                product_name: "Ghost".into(),
                quantity: 1,
                rate: Money::from_paisa(100),
            }]))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::ProductNotFound(ref name) if name == "Ghost"));
        // Aborted: no header committed, no receipt sent.
        assert!(service.list_sales().await.unwrap().is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn insufficient_stock_aborts_whole_sale() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let err = service
            .record_sale(paid_sale(vec![
                SaleLine {
                    product_name: "Milk".into(),
                    quantity: 4,
                    rate: Money::from_paisa(5000),
                },
                SaleLine {
                    product_name: "Milk".into(),
                    quantity: 100,
                    rate: Money::from_paisa(5000),
                },
            ]))
            .await
            .unwrap_err();

        match err {
            LedgerError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                assert_eq!(product, "Milk");
                // First line already decremented inside the transaction.
                assert_eq!(available, 6);
                assert_eq!(requested, 100);
            }
            other => panic!("unexpected error: {other}"),
        }

        // Rollback restored the first line's decrement too.
        let product = service.get_product_by_name("Milk").await.unwrap().unwrap();
        assert_eq!(product.quantity, 10);
        assert!(service.list_sales().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unpaid_sale_creates_exactly_one_udhar_row() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let mut request = paid_sale(vec![SaleLine {
            product_name: "Milk".into(),
            quantity: 1,
            rate: Money::from_paisa(5000),
        }]);
        request.bill_paid = false;
        request.payment_due_date = Some(date("2026-09-15"));

        let confirmation = service.record_sale(request).await.unwrap();

        let udhar = service
            .sale_udhar(confirmation.sale_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(udhar.date_of_entry, date("2026-08-29"));
        assert_eq!(udhar.date_of_payment, date("2026-09-15"));
    }

    #[tokio::test]
    async fn paid_sale_creates_no_udhar_row() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let confirmation = service
            .record_sale(paid_sale(vec![SaleLine {
                product_name: "Milk".into(),
                quantity: 1,
                rate: Money::from_paisa(5000),
            }]))
            .await
            .unwrap();

        assert!(service
            .sale_udhar(confirmation.sale_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unpaid_sale_without_due_date_is_rejected() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let mut request = paid_sale(vec![]);
        request.bill_paid = false;

        let err = service.record_sale(request).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::DueDateMissing)
        ));
    }

    #[tokio::test]
    async fn repeat_sales_reuse_the_customer_row() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let line = || {
            vec![SaleLine {
                product_name: "Milk".into(),
                quantity: 1,
                rate: Money::from_paisa(5000),
            }]
        };
        let first = service.record_sale(paid_sale(line())).await.unwrap();

        // Same phone, different spelling of the name: still the same customer.
        let mut second_request = paid_sale(line());
        second_request.customer_name = "Asif Bhai".into();
        let second = service.record_sale(second_request).await.unwrap();

        let sales = service.list_sales().await.unwrap();
        let first_sale = sales.iter().find(|s| s.sales_id == first.sale_id).unwrap();
        let second_sale = sales.iter().find(|s| s.sales_id == second.sale_id).unwrap();
        assert_eq!(first_sale.cust_id, second_sale.cust_id);
    }

    // -------------------------------------------------------------------------
    // Purchases
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn purchase_creates_unknown_product() {
        let (service, _) = service().await;

        // Selling before any purchase fails...
        let err = service
            .record_sale(paid_sale(vec![SaleLine {
                product_name: "Sugar".into(),
                quantity: 1,
                rate: Money::from_paisa(10000),
            }]))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ProductNotFound(_)));

        // ...purchasing the same name succeeds and registers it.
        service
            .record_purchase(restock_purchase(vec![PurchaseLine {
                product_name: "Sugar".into(),
                price_purchase: Money::from_paisa(8500),
                price_sale: Money::from_paisa(10000),
                quantity: 20,
            }]))
            .await
            .unwrap();

        let product = service.get_product_by_name("Sugar").await.unwrap().unwrap();
        assert_eq!(product.price_purchase_paisa, 8500);
        assert_eq!(product.price_sale_paisa, 10000);
        assert_eq!(product.quantity, 20);
    }

    #[tokio::test]
    async fn restock_reweights_purchase_price() {
        let (service, _) = service().await;
        // 10 on hand at 30.00
        service.create_product(milk_product()).await.unwrap();

        // Restock 5 at 36.00: blended (3000*10 + 3600*5)/15 = 3200
        service
            .record_purchase(restock_purchase(vec![PurchaseLine {
                product_name: "Milk".into(),
                price_purchase: Money::from_paisa(3600),
                price_sale: Money::from_paisa(5500),
                quantity: 5,
            }]))
            .await
            .unwrap();

        let product = service.get_product_by_name("Milk").await.unwrap().unwrap();
        assert_eq!(product.price_purchase_paisa, 3200);
        // Sale price is always overwritten, never averaged.
        assert_eq!(product.price_sale_paisa, 5500);
        assert_eq!(product.quantity, 15);
    }

    #[tokio::test]
    async fn zero_quantity_restock_keeps_price_on_empty_shelf() {
        let (service, _) = service().await;
        let mut empty = milk_product();
        empty.quantity = 0;
        service.create_product(empty).await.unwrap();

        service
            .record_purchase(restock_purchase(vec![PurchaseLine {
                product_name: "Milk".into(),
                price_purchase: Money::from_paisa(9999),
                price_sale: Money::from_paisa(5500),
                quantity: 0,
            }]))
            .await
            .unwrap();

        let product = service.get_product_by_name("Milk").await.unwrap().unwrap();
        // Combined quantity is zero: purchase price untouched.
        assert_eq!(product.price_purchase_paisa, 3000);
        assert_eq!(product.price_sale_paisa, 5500);
        assert_eq!(product.quantity, 0);
    }

    #[tokio::test]
    async fn purchase_totals_and_udhar() {
        let (service, _) = service().await;

        let mut request = restock_purchase(vec![
            PurchaseLine {
                product_name: "Sugar".into(),
                price_purchase: Money::from_paisa(8500),
                price_sale: Money::from_paisa(10000),
                quantity: 20,
            },
            PurchaseLine {
                product_name: "Salt".into(),
                price_purchase: Money::from_paisa(2500),
                price_sale: Money::from_paisa(4000),
                quantity: 10,
            },
        ]);
        request.bill_paid = false;
        request.payment_due_date = Some(date("2026-09-15"));

        let confirmation = service.record_purchase(request).await.unwrap();

        let purchase = service
            .get_purchase(confirmation.purchase_id)
            .await
            .unwrap()
            .unwrap();
        // 20*85.00 + 10*25.00 = 1950.00
        assert_eq!(purchase.total_amount(), Money::from_paisa(195000));
        assert_eq!(purchase.total_quantity, 30);

        let udhar = service
            .purchase_udhar(confirmation.purchase_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(udhar.date_of_payment, date("2026-09-15"));

        let linked = service
            .purchase_product_ids(confirmation.purchase_id)
            .await
            .unwrap();
        assert_eq!(linked.len(), 2);
    }

    #[tokio::test]
    async fn repeat_purchases_reuse_the_vendor_row() {
        let (service, _) = service().await;

        let line = || {
            vec![PurchaseLine {
                product_name: "Sugar".into(),
                price_purchase: Money::from_paisa(8500),
                price_sale: Money::from_paisa(10000),
                quantity: 1,
            }]
        };
        service.record_purchase(restock_purchase(line())).await.unwrap();
        service.record_purchase(restock_purchase(line())).await.unwrap();

        assert_eq!(service.list_vendors().await.unwrap().len(), 1);
    }

    // -------------------------------------------------------------------------
    // Receipts
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn sale_receipt_matches_wire_format() {
        let (service, notifier) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let mut request = paid_sale(vec![SaleLine {
            product_name: "Milk".into(),
            quantity: 3,
            rate: Money::from_paisa(5000),
        }]);
        request.bill_paid = false;
        request.payment_due_date = Some(date("2026-09-15"));
        service.record_sale(request).await.unwrap();

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "03001234567");
        assert_eq!(
            sent[0].1,
            "Bill for Asif\n\
             Date: 2026-08-29\n\
             ----------------------\n\
             Milk: 3 x 50.00 = 150.00\n\
             ----------------------\n\
             Total: 150.00\n\
             Status: DUE by 2026-09-15"
        );
    }

    #[tokio::test]
    async fn missing_phone_falls_back_to_configured_default() {
        let (service, notifier) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let mut request = paid_sale(vec![SaleLine {
            product_name: "Milk".into(),
            quantity: 1,
            rate: Money::from_paisa(5000),
        }]);
        request.phone_no = None;
        service.record_sale(request).await.unwrap();

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent[0].0, "9728084306");
        assert!(sent[0].1.ends_with("Status: PAID"));
    }

    #[tokio::test]
    async fn purchase_receipt_uses_purchase_bill_heading() {
        let (service, notifier) = service().await;

        service
            .record_purchase(restock_purchase(vec![PurchaseLine {
                product_name: "Sugar".into(),
                price_purchase: Money::from_paisa(8500),
                price_sale: Money::from_paisa(10000),
                quantity: 20,
            }]))
            .await
            .unwrap();

        let sent = notifier.sent.lock().unwrap();
        assert!(sent[0].1.starts_with("Purchase Bill for Mehta Traders\n"));
        assert!(sent[0].1.contains("Sugar: 20 x 85.00 = 1700.00"));
    }

    // -------------------------------------------------------------------------
    // Administrative CRUD
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn partial_update_touches_only_supplied_fields() {
        let (service, _) = service().await;
        let product = service.create_product(milk_product()).await.unwrap();

        let updated = service
            .update_product(
                product.product_id,
                ProductUpdate {
                    price_sale: Some(Money::from_paisa(5500)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.price_sale_paisa, 5500);
        // Untouched fields keep their values.
        assert_eq!(updated.product_name, "Milk");
        assert_eq!(updated.price_purchase_paisa, 3000);
        assert_eq!(updated.quantity, 10);
    }

    #[tokio::test]
    async fn empty_update_is_rejected_before_any_mutation() {
        let (service, _) = service().await;
        let product = service.create_product(milk_product()).await.unwrap();

        let err = service
            .update_product(product.product_id, ProductUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::EmptyUpdate)
        ));
    }

    #[tokio::test]
    async fn update_of_unknown_product_returns_none() {
        let (service, _) = service().await;

        let result = service
            .update_product(
                999,
                ProductUpdate {
                    quantity: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_returns_row_and_missing_id_is_not_an_error() {
        let (service, _) = service().await;
        let product = service.create_product(milk_product()).await.unwrap();

        let deleted = service
            .delete_product(product.product_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deleted.product_name, "Milk");
        assert!(service.list_products().await.unwrap().is_empty());

        // Deleting again reports "not found" via None, never an error.
        assert!(service
            .delete_product(product.product_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn duplicate_product_name_is_a_unique_violation() {
        let (service, _) = service().await;
        service.create_product(milk_product()).await.unwrap();

        let err = service.create_product(milk_product()).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Db(DbError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn vendor_lookups() {
        let (service, _) = service().await;
        service
            .record_purchase(restock_purchase(vec![PurchaseLine {
                product_name: "Sugar".into(),
                price_purchase: Money::from_paisa(8500),
                price_sale: Money::from_paisa(10000),
                quantity: 1,
            }]))
            .await
            .unwrap();

        let vendors = service.list_vendors().await.unwrap();
        assert_eq!(vendors.len(), 1);

        let vendor = service
            .get_vendor(vendors[0].vend_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(vendor.vendor_name, "Mehta Traders");
        assert!(service.get_vendor(999).await.unwrap().is_none());
    }
}
