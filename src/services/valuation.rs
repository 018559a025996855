use chrono::{DateTime, Utc};

use crate::models::{Investment, InvestmentMetrics, PortfolioStats};

const MS_PER_DAY: i64 = 86_400_000;

/// Derives the display metrics for one investment. Pure: identical inputs and
/// the same `as_of` yield bit-identical output, so callers inject the clock.
pub fn derive_metrics(
    buy_price: f64,
    quantity: f64,
    current_price: Option<f64>,
    buy_date: DateTime<Utc>,
    as_of: DateTime<Utc>,
) -> InvestmentMetrics {
    let invested_value = buy_price * quantity;

    // An unpriced investment reports 0 for both fields. A set price of 0.0 is
    // a real price and takes this branch.
    let (current_value, profit_loss) = match current_price {
        Some(price) => {
            let current_value = price * quantity;
            (current_value, current_value - invested_value)
        }
        None => (0.0, 0.0),
    };

    // Whole days, rounded up; absolute difference so a future buy date never
    // goes negative.
    let elapsed_ms = (as_of - buy_date).num_milliseconds().abs();
    // Ceiling division; `elapsed_ms` is non-negative so this matches div_ceil
    // exactly (signed `i64::div_ceil` is still unstable).
    let time_held_days = (elapsed_ms + MS_PER_DAY - 1) / MS_PER_DAY;

    InvestmentMetrics {
        invested_value,
        current_value,
        profit_loss,
        time_held_days,
    }
}

/// Folds per-investment values into portfolio totals. Unpriced investments
/// contribute 0 to the current total.
pub fn aggregate(investments: &[Investment]) -> PortfolioStats {
    let mut total_invested = 0.0;
    let mut total_current = 0.0;

    for investment in investments {
        total_invested += investment.buy_price * investment.quantity;
        if let Some(price) = investment.current_price {
            total_current += price * investment.quantity;
        }
    }

    PortfolioStats {
        total_invested,
        total_current,
        overall_profit_loss: total_current - total_invested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvestmentType;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn investment(quantity: f64, buy_price: f64, current_price: Option<f64>) -> Investment {
        Investment::new(
            Uuid::new_v4(),
            "test".to_string(),
            InvestmentType::Stock,
            quantity,
            buy_price,
            current_price,
            date(2023, 1, 1),
        )
    }

    #[test]
    fn invested_value_is_exact_including_zero_buy_price() {
        let as_of = date(2023, 6, 1);
        let metrics = derive_metrics(150.5, 10.0, None, date(2023, 1, 1), as_of);
        assert_eq!(metrics.invested_value, 1505.0);

        let metrics = derive_metrics(0.0, 10.0, None, date(2023, 1, 1), as_of);
        assert_eq!(metrics.invested_value, 0.0);
    }

    #[test]
    fn unpriced_investment_reports_zero_value_and_zero_profit() {
        let metrics = derive_metrics(150.5, 10.0, None, date(2023, 1, 1), date(2023, 6, 1));
        assert_eq!(metrics.current_value, 0.0);
        assert_eq!(metrics.profit_loss, 0.0);
    }

    #[test]
    fn priced_investment_reports_value_and_difference() {
        let metrics = derive_metrics(100.0, 2.0, Some(120.0), date(2023, 1, 1), date(2023, 6, 1));
        assert_eq!(metrics.invested_value, 200.0);
        assert_eq!(metrics.current_value, 240.0);
        assert_eq!(metrics.profit_loss, 40.0);
    }

    #[test]
    fn zero_current_price_is_present_not_absent() {
        let metrics = derive_metrics(100.0, 2.0, Some(0.0), date(2023, 1, 1), date(2023, 6, 1));
        assert_eq!(metrics.current_value, 0.0);
        assert_eq!(metrics.profit_loss, -200.0);
    }

    #[test]
    fn profit_loss_may_be_negative() {
        let metrics = derive_metrics(100.0, 2.0, Some(80.0), date(2023, 1, 1), date(2023, 6, 1));
        assert_eq!(metrics.profit_loss, -40.0);
    }

    #[test]
    fn time_held_counts_whole_days() {
        let buy = date(2023, 1, 1);
        let metrics = derive_metrics(1.0, 1.0, None, buy, date(2023, 1, 11));
        assert_eq!(metrics.time_held_days, 10);
    }

    #[test]
    fn time_held_rounds_any_fraction_up() {
        let buy = date(2023, 1, 1);
        let as_of = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 1).unwrap();
        let metrics = derive_metrics(1.0, 1.0, None, buy, as_of);
        assert_eq!(metrics.time_held_days, 1);

        let as_of = Utc.with_ymd_and_hms(2023, 1, 2, 12, 0, 0).unwrap();
        let metrics = derive_metrics(1.0, 1.0, None, buy, as_of);
        assert_eq!(metrics.time_held_days, 2);
    }

    #[test]
    fn time_held_is_zero_only_for_identical_instants() {
        let buy = date(2023, 1, 1);
        let metrics = derive_metrics(1.0, 1.0, None, buy, buy);
        assert_eq!(metrics.time_held_days, 0);
    }

    #[test]
    fn time_held_is_symmetric_for_future_buy_dates() {
        let earlier = date(2023, 1, 1);
        let later = date(2023, 1, 11);
        let forward = derive_metrics(1.0, 1.0, None, earlier, later);
        let backward = derive_metrics(1.0, 1.0, None, later, earlier);
        assert_eq!(forward.time_held_days, backward.time_held_days);
        assert_eq!(forward.time_held_days, 10);
    }

    #[test]
    fn derive_metrics_is_deterministic() {
        let buy = date(2023, 1, 1);
        let as_of = date(2023, 6, 1);
        let first = derive_metrics(150.5, 10.0, Some(162.25), buy, as_of);
        let second = derive_metrics(150.5, 10.0, Some(162.25), buy, as_of);
        assert_eq!(first, second);
    }

    #[test]
    fn aggregate_of_nothing_is_all_zeros() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_invested, 0.0);
        assert_eq!(stats.total_current, 0.0);
        assert_eq!(stats.overall_profit_loss, 0.0);
    }

    #[test]
    fn aggregate_sums_and_unpriced_items_contribute_nothing() {
        let investments = vec![
            investment(2.0, 100.0, Some(120.0)),
            investment(10.0, 150.5, None),
            investment(1.0, 50.0, Some(0.0)),
        ];
        let stats = aggregate(&investments);
        assert_eq!(stats.total_invested, 200.0 + 1505.0 + 50.0);
        assert_eq!(stats.total_current, 240.0);
        assert_eq!(stats.overall_profit_loss, 240.0 - 1755.0);
    }

    #[test]
    fn aggregate_is_order_independent() {
        let a = investment(2.0, 100.0, Some(120.0));
        let b = investment(10.0, 150.5, None);
        let c = investment(3.0, 33.33, Some(41.2));

        let forward = aggregate(&[a.clone(), b.clone(), c.clone()]);
        let shuffled = aggregate(&[c, a, b]);

        assert!((forward.total_invested - shuffled.total_invested).abs() < 1e-9);
        assert!((forward.total_current - shuffled.total_current).abs() < 1e-9);
        assert!((forward.overall_profit_loss - shuffled.overall_profit_loss).abs() < 1e-9);
    }

    #[test]
    fn aggregate_matches_per_item_metrics() {
        let investments = vec![
            investment(2.0, 100.0, Some(120.0)),
            investment(10.0, 150.5, None),
        ];
        let as_of = date(2023, 6, 1);
        let summed: (f64, f64) = investments
            .iter()
            .map(|inv| {
                let m = derive_metrics(inv.buy_price, inv.quantity, inv.current_price, inv.buy_date, as_of);
                (m.invested_value, m.current_value)
            })
            .fold((0.0, 0.0), |acc, (i, c)| (acc.0 + i, acc.1 + c));

        let stats = aggregate(&investments);
        assert_eq!(stats.total_invested, summed.0);
        assert_eq!(stats.total_current, summed.1);
    }
}
