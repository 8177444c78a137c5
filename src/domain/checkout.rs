use super::product::Product;

/// Discount fractions are resolved to this many parts before applying them.
const FRACTION_SCALE: i128 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutLineRequest {
    pub product_id: i32,
    pub quantity: i32,
}

/// A priced line of a checkout. Built only through [`CheckoutLine::priced`] or
/// [`CheckoutLine::gift`], so a gift line always carries zero amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    product_id: i32,
    quantity: i32,
    unit_amount: i64,
    total_amount: i64,
    discount: i64,
    is_gift: bool,
}

impl CheckoutLine {
    /// Prices `quantity` units of `product`, taking `floor(total * fraction)`
    /// off as discount.
    ///
    /// The fraction is first rounded to millionths, so a wire value such as
    /// `0.7f32` (`0.69999998...`) discounts exactly 70% instead of one unit less.
    pub fn priced(product: &Product, quantity: i32, fraction: f32) -> Self {
        let total_amount = product.amount * i64::from(quantity);
        let parts = (f64::from(fraction) * FRACTION_SCALE as f64).round() as i128;
        let discount = (i128::from(total_amount) * parts).div_euclid(FRACTION_SCALE) as i64;
        Self {
            product_id: product.id,
            quantity,
            unit_amount: product.amount,
            total_amount,
            discount,
            is_gift: false,
        }
    }

    /// One free unit of `product`, whatever its catalog price.
    pub fn gift(product: &Product) -> Self {
        Self {
            product_id: product.id,
            quantity: 1,
            unit_amount: 0,
            total_amount: 0,
            discount: 0,
            is_gift: true,
        }
    }

    pub fn product_id(&self) -> i32 {
        self.product_id
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_amount(&self) -> i64 {
        self.unit_amount
    }

    pub fn total_amount(&self) -> i64 {
        self.total_amount
    }

    pub fn discount(&self) -> i64 {
        self.discount
    }

    pub fn is_gift(&self) -> bool {
        self.is_gift
    }
}

/// Aggregate result of one checkout.
///
/// `total_amount` and `total_discount` always equal the sums over `lines`:
/// [`CheckoutSummary::add_line`] is the only way to change any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSummary {
    total_amount: i64,
    total_discount: i64,
    lines: Vec<CheckoutLine>,
}

impl CheckoutSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, line: CheckoutLine) {
        self.total_amount += line.total_amount;
        self.total_discount += line.discount;
        self.lines.push(line);
    }

    pub fn add_gift_line(&mut self, product: &Product) {
        self.add_line(CheckoutLine::gift(product));
    }

    pub fn total_amount(&self) -> i64 {
        self.total_amount
    }

    pub fn total_discount(&self) -> i64 {
        self.total_discount
    }

    pub fn total_amount_with_discount(&self) -> i64 {
        self.total_amount - self.total_discount
    }

    pub fn lines(&self) -> &[CheckoutLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
