// Import milestone ladder
use crate::consts::RESERVE_MILESTONES;
// Import error handling
use crate::err::CurveError;
// Import label formatting
use crate::libraries::format_milestone_label;
// Import math utilities
use crate::math::Decimal;
// Import curve model
use crate::models::curve::ExponentialCurve;
// Import shared percent helper
use super::get_buy_quote::percent_change;
// Import Anchor lang prelude
use anchor_lang::prelude::*;

/// Where the curve will be once the reserve reaches a milestone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneProjection {
    /// Reserve value of the milestone in whole USD
    pub reserve_target: u64,
    /// Compact label such as `$10K`
    pub label: String,
    /// Circulating supply at the milestone
    pub supply: Decimal,
    /// Spot price at the milestone
    pub price: Decimal,
    /// Price gain over the current price, in percent
    pub gain_pct: Decimal,
    /// Value of the projected holding at the milestone price
    pub holding_value: Decimal,
    /// `holding_value` minus what the holding is worth today, in USD
    pub gain: Decimal,
}

// Handler function projecting a holding over the upcoming reserve milestones
//
// # Arguments
// * `curve` - The bonding curve to project on
// * `holding` - Tokens held, in whole tokens
// * `current_reserve` - Reserve value today, in USD
// * `current_price` - Spot price today
// * `limit` - Maximum number of milestones to return
pub fn handle(
    curve: &ExponentialCurve,
    holding: Decimal,
    current_reserve: Decimal,
    current_price: Decimal,
    limit: usize,
) -> Result<Vec<MilestoneProjection>> {
    require!(!current_price.is_zero(), CurveError::InvalidAmount);

    let projections = RESERVE_MILESTONES
        .iter()
        .filter(|milestone| Decimal::from_u64(**milestone) > current_reserve)
        .take(limit)
        .map(|milestone| project(curve, *milestone, holding, current_price))
        .collect::<Result<Vec<_>>>()?;

    msg!(
        "Projected {} milestones above reserve {}",
        projections.len(),
        current_reserve
    );

    Ok(projections)
}

/// First milestone above `current_reserve`, priced for a single token.
/// `None` once every milestone has been passed.
pub fn next_milestone(
    curve: &ExponentialCurve,
    current_reserve: Decimal,
    current_price: Decimal,
) -> Result<Option<MilestoneProjection>> {
    let mut next = handle(curve, Decimal::one(), current_reserve, current_price, 1)?;
    Ok(next.pop())
}

fn project(
    curve: &ExponentialCurve,
    milestone: u64,
    holding: Decimal,
    current_price: Decimal,
) -> Result<MilestoneProjection> {
    let supply = curve.supply_at_reserve_value(Decimal::from_u64(milestone))?;
    let price = curve.spot_price(supply)?;
    let gain_pct = percent_change(price.saturating_sub(current_price), current_price)?;
    let holding_value = price
        .checked_mul(holding)
        .ok_or_else(|| error!(CurveError::DomainOverflow))?;
    let current_value = current_price
        .checked_mul(holding)
        .ok_or_else(|| error!(CurveError::DomainOverflow))?;

    Ok(MilestoneProjection {
        reserve_target: milestone,
        label: format_milestone_label(milestone),
        supply,
        price,
        gain_pct,
        holding_value,
        gain: holding_value.saturating_sub(current_value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_next_milestone_from_empty_curve() {
        // ARRANGE: nothing minted yet
        let curve = ExponentialCurve::default();
        let price = curve.spot_price(Decimal::zero()).unwrap();

        // ACT
        let next = next_milestone(&curve, Decimal::zero(), price)
            .unwrap()
            .expect("a milestone should be ahead");

        // ASSERT: $100 reserve puts the price at c * 100 + 0.01
        assert_eq!(next.reserve_target, 100);
        assert_eq!(next.label, "$100");
        assert!((next.price.to_f64() - 0.0100877175).abs() < 1e-9);
        assert!((next.gain_pct.to_f64() - 0.877175).abs() < 1e-4);
        assert_eq!(next.holding_value, next.price);
        assert_eq!(next.gain, next.price.checked_sub(price).unwrap());
    }

    #[test]
    fn test_projection_skips_passed_milestones() {
        let curve = ExponentialCurve::default();
        let reserve = dec("2500");
        let supply = curve.supply_at_reserve_value(reserve).unwrap();
        let price = curve.spot_price(supply).unwrap();

        let projections = handle(&curve, Decimal::from_u64(1_000), reserve, price, 3).unwrap();

        let labels: Vec<&str> = projections.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["$10K", "$100K", "$1M"]);

        // Each milestone is worth more than the one before
        for pair in projections.windows(2) {
            assert!(pair[0].holding_value < pair[1].holding_value);
            assert!(pair[0].gain_pct < pair[1].gain_pct);
        }
        assert_eq!(
            projections[0].holding_value,
            projections[0].price.checked_mul(Decimal::from_u64(1_000)).unwrap()
        );
    }

    #[test]
    fn test_gain_is_value_over_current_holding() {
        // ARRANGE: 2,500 tokens held at a $2,500 reserve
        let curve = ExponentialCurve::default();
        let reserve = dec("2500");
        let price = curve
            .spot_price(curve.supply_at_reserve_value(reserve).unwrap())
            .unwrap();
        let holding = Decimal::from_u64(2_500);

        // ACT
        let projections = handle(&curve, holding, reserve, price, 2).unwrap();

        // ASSERT: gain = value at milestone - value today
        let current_value = price.checked_mul(holding).unwrap();
        for projection in projections.iter() {
            assert_eq!(
                projection.gain,
                projection.holding_value.checked_sub(current_value).unwrap(),
                "Gain at {} should be measured from today's value",
                projection.label
            );
        }
    }

    #[test]
    fn test_gain_never_goes_negative() {
        // A current price above the milestone price saturates at zero
        let curve = ExponentialCurve::default();

        let projections = handle(&curve, Decimal::one(), Decimal::zero(), dec("1"), 1).unwrap();

        assert_eq!(projections[0].gain, Decimal::zero());
        assert_eq!(projections[0].gain_pct, Decimal::zero());
    }

    #[test]
    fn test_no_milestone_left() {
        let curve = ExponentialCurve::default();

        let next = next_milestone(&curve, dec("10000000"), dec("8.78")).unwrap();

        assert_eq!(next, None);
    }

    #[test]
    #[should_panic(expected = "InvalidAmount")]
    fn test_zero_price_rejected() {
        let curve = ExponentialCurve::default();
        handle(&curve, Decimal::one(), Decimal::zero(), Decimal::zero(), 3).unwrap();
    }
}
