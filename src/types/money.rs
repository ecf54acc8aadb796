use rust_decimal::Decimal;
use tracing::error;

/// Adds `value` into `total`, leaving `total` untouched on overflow.
pub fn accumulate(total: &mut Decimal, value: Decimal) {
    if let Some(new_total) = total.checked_add(value) {
        *total = new_total;
    } else {
        error!("Decimal accumulation error: Overflow adding {value} to {total}")
    }
}

/// Null-as-zero summation over nullable amounts.
pub fn sum_or_zero<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    values.into_iter()
        .flatten()
        .fold(Decimal::ZERO, |mut total, value| {
            accumulate(&mut total, value);
            total
        })
}

/// Checked multiplication; an overflowing product is logged and dropped.
pub fn checked_product(value: Decimal, factor: Decimal) -> Option<Decimal> {
    let product = value.checked_mul(factor);

    if product.is_none() {
        error!("Decimal multiplication error: Overflow multiplying {value} by {factor}");
    }

    product
}

pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Division with an explicit zero-denominator fallback of zero.
pub fn safe_divide(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    numerator.checked_div(denominator).unwrap_or_else(|| {
        error!("Decimal division error: Overflow dividing {numerator} by {denominator}");
        Decimal::ZERO
    })
}
