use chrono::NaiveDate;

use crate::domain::checkout::{CheckoutLine, CheckoutLineRequest, CheckoutSummary};
use crate::domain::errors::CatalogError;
use crate::domain::ports::{Catalog, DiscountResolver};
use crate::domain::promotion::PromotionalDate;

pub struct CheckoutService<C, D> {
    catalog: C,
    discounts: D,
    promotional_date: PromotionalDate,
}

impl<C: Catalog, D: DiscountResolver> CheckoutService<C, D> {
    pub fn new(catalog: C, discounts: D, promotional_date: PromotionalDate) -> Self {
        Self {
            catalog,
            discounts,
            promotional_date,
        }
    }

    /// Prices `lines` in request order and returns the aggregate.
    ///
    /// Unknown products, gift products and non-positive quantities are
    /// skipped without touching the totals; the call itself never fails.
    /// When `today` is the promotional date and at least one line was
    /// priced, the first gift product of the catalog is appended for free.
    pub async fn process_request(
        &self,
        lines: &[CheckoutLineRequest],
        today: NaiveDate,
    ) -> CheckoutSummary {
        let mut summary = CheckoutSummary::new();

        for line in lines {
            let product = match self.catalog.find(line.product_id) {
                Ok(product) => product,
                Err(e) => {
                    log::info!("Skipping checkout line: {}", e);
                    continue;
                }
            };

            if product.is_gift {
                log::info!(
                    "Product with id={} is a gift and therefore cannot be checked out",
                    product.id
                );
                continue;
            }

            if line.quantity < 1 {
                log::info!(
                    "Product with id={} requested with invalid quantity={}",
                    product.id,
                    line.quantity
                );
                continue;
            }

            let discount = self.discounts.get_discount(product.id).await;
            summary.add_line(CheckoutLine::priced(&product, line.quantity, discount));
        }

        if !summary.is_empty() && self.promotional_date.matches(today) {
            log::info!("Promotional date, adding gift product to checkout");
            self.add_gift(&mut summary);
        }

        summary
    }

    fn add_gift(&self, summary: &mut CheckoutSummary) {
        match self.catalog.find_gift() {
            Ok(gift) => {
                summary.add_gift_line(&gift);
                log::info!("Gift product={} added to checkout", gift.id);
            }
            Err(CatalogError::NoGiftAvailable) => {
                log::warn!("No gift product available in catalog");
            }
            Err(e) => {
                log::warn!("Failed to obtain a gift product: {}", e);
            }
        }
    }
}
