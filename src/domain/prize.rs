//! Prize engine: pure pari-mutuel computations.
//!
//! Given the wagers of one event and the fee policy, computes
//! per-outcome totals, the net prize pool, hypothetical return
//! estimates, and the proportional distribution to the winners.
//!
//! All internal arithmetic runs at full `f64` precision; rounding to
//! cents happens only on externally exposed values, so rounding error
//! does not compound across many wagers. The pool is closed: the sum
//! of all payouts for the winning outcome equals the net prize pool up
//! to rounding tolerance.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::money::round_cents;
use super::{PlatformFee, Wager};

/// One winner's slice of the prize pool.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PrizeShare {
    /// Bettor display name, denormalized at wager placement.
    pub bettor_name: String,
    /// Amount the bettor staked on the winning outcome.
    pub staked: f64,
    /// Gross return: the bettor's proportional share of the net pool.
    pub payout: f64,
    /// `payout - staked`; negative when the fee exceeds the upside.
    pub profit: f64,
}

/// Sums staked amounts per outcome. Outcomes with no wagers map to 0.
#[must_use]
pub fn totals_by_outcome(wagers: &[Wager], outcomes: &[String]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> =
        outcomes.iter().map(|o| (o.clone(), 0.0)).collect();
    for wager in wagers {
        if let Some(total) = totals.get_mut(&wager.outcome) {
            *total += wager.amount.as_float();
        }
    }
    totals
}

/// Sum of all staked amounts across every outcome.
#[must_use]
pub fn gross_total(wagers: &[Wager]) -> f64 {
    wagers.iter().map(|w| w.amount.as_float()).sum()
}

/// The fee-discounted pool available for distribution.
#[must_use]
pub fn net_prize_pool(wagers: &[Wager], fee: &PlatformFee) -> f64 {
    fee.net_amount(gross_total(wagers))
}

/// Estimates the return of a hypothetical stake on `outcome`.
///
/// Simulates adding `hypothetical_amount` to the outcome's total and
/// to the gross pool, then returns the stake's proportional share of
/// the enlarged net pool, rounded to cents. Returns 0 when the
/// resulting outcome total is 0 (division-by-zero guard).
#[must_use]
pub fn estimate_return(
    wagers: &[Wager],
    fee: &PlatformFee,
    outcome: &str,
    hypothetical_amount: f64,
) -> f64 {
    let outcome_total: f64 = wagers
        .iter()
        .filter(|w| w.outcome == outcome)
        .map(|w| w.amount.as_float())
        .sum::<f64>()
        + hypothetical_amount;
    if outcome_total == 0.0 {
        return 0.0;
    }
    let net_pool = fee.net_amount(gross_total(wagers) + hypothetical_amount);
    round_cents(hypothetical_amount / outcome_total * net_pool)
}

/// Distributes the net prize pool among wagers on the winning outcome.
///
/// Each winning wager receives `(staked / total staked on winner) *
/// net pool`. Returns an empty list when nobody backed the winner: the
/// fee-discounted pool is then distributed to no one and the platform
/// retains it (accepted business behavior). Payout and profit are
/// rounded to cents; order follows the input wager order.
#[must_use]
pub fn distribute(wagers: &[Wager], fee: &PlatformFee, winning_outcome: &str) -> Vec<PrizeShare> {
    let winner_total: f64 = wagers
        .iter()
        .filter(|w| w.outcome == winning_outcome)
        .map(|w| w.amount.as_float())
        .sum();
    if winner_total == 0.0 {
        return Vec::new();
    }

    let net_pool = net_prize_pool(wagers, fee);
    wagers
        .iter()
        .filter(|w| w.outcome == winning_outcome)
        .map(|w| {
            let staked = w.amount.as_float();
            let payout = round_cents(staked / winner_total * net_pool);
            PrizeShare {
                bettor_name: w.bettor_name.clone(),
                staked,
                payout,
                profit: round_cents(payout - staked),
            }
        })
        .collect()
}

/// Durable summary of one resolved event.
///
/// Computed once at resolution time and recorded as the history row;
/// the authoritative record of where the money went.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Settlement {
    /// Winning outcome.
    pub winner: String,
    /// Sum of all stakes across every outcome.
    pub gross_total: f64,
    /// Amount retained by the platform.
    pub fee_amount: f64,
    /// Pool distributed to the winners.
    pub net_pool: f64,
    /// Per-winner shares, in wager placement order.
    pub shares: Vec<PrizeShare>,
}

impl Settlement {
    /// Computes the full settlement for a resolved wager set.
    ///
    /// Monetary aggregates are rounded to cents here, at the exposure
    /// boundary.
    #[must_use]
    pub fn compute(wagers: &[Wager], fee: &PlatformFee, winner: &str) -> Self {
        let gross = gross_total(wagers);
        Self {
            winner: winner.to_string(),
            gross_total: round_cents(gross),
            fee_amount: round_cents(fee.fee_amount(gross)),
            net_pool: round_cents(fee.net_amount(gross)),
            shares: distribute(wagers, fee, winner),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventId;
    use crate::domain::wager::tests::make_wager;

    fn fee_5pct() -> PlatformFee {
        PlatformFee::default()
    }

    fn two_sided_pool(event_id: EventId) -> Vec<Wager> {
        vec![
            make_wager(event_id, "Ana", "A", 100.0),
            make_wager(event_id, "Beto", "A", 200.0),
            make_wager(event_id, "Caio", "B", 150.0),
        ]
    }

    #[test]
    fn totals_include_empty_outcomes() {
        let event_id = EventId::new();
        let wagers = two_sided_pool(event_id);
        let outcomes = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let totals = totals_by_outcome(&wagers, &outcomes);
        assert_eq!(totals.get("A").copied(), Some(300.0));
        assert_eq!(totals.get("B").copied(), Some(150.0));
        assert_eq!(totals.get("C").copied(), Some(0.0));
    }

    #[test]
    fn documented_scenario_450_pool() {
        // gross=450, net=427.5; winner A splits 142.5 / 285.0
        let event_id = EventId::new();
        let wagers = two_sided_pool(event_id);
        let fee = fee_5pct();

        assert!((gross_total(&wagers) - 450.0).abs() < 1e-9);
        assert!((net_prize_pool(&wagers, &fee) - 427.5).abs() < 1e-9);

        let shares = distribute(&wagers, &fee, "A");
        assert_eq!(shares.len(), 2);
        let Some(first) = shares.first() else {
            panic!("two shares expected");
        };
        let Some(second) = shares.get(1) else {
            panic!("two shares expected");
        };
        assert!((first.payout - 142.5).abs() < 1e-9);
        assert!((first.profit - 42.5).abs() < 1e-9);
        assert!((second.payout - 285.0).abs() < 1e-9);
        assert!((second.profit - 85.0).abs() < 1e-9);
    }

    #[test]
    fn sole_wager_loses_the_fee() {
        // A single wager backing the sole stake nets 95 and loses 5.
        let event_id = EventId::new();
        let wagers = vec![make_wager(event_id, "Ana", "A", 100.0)];
        let shares = distribute(&wagers, &fee_5pct(), "A");
        assert_eq!(shares.len(), 1);
        let Some(share) = shares.first() else {
            panic!("one share expected");
        };
        assert!((share.payout - 95.0).abs() < 1e-9);
        assert!((share.profit + 5.0).abs() < 1e-9);
    }

    #[test]
    fn no_stake_on_winner_distributes_nothing() {
        let event_id = EventId::new();
        let wagers = vec![make_wager(event_id, "Ana", "A", 100.0)];
        assert!(distribute(&wagers, &fee_5pct(), "B").is_empty());
        assert!(distribute(&[], &fee_5pct(), "A").is_empty());
    }

    #[test]
    fn payouts_conserve_the_net_pool() {
        // Many uneven wagers; accumulated rounding stays within
        // 0.01 per winner.
        let event_id = EventId::new();
        let mut wagers = Vec::new();
        for i in 0..40 {
            let amount = 1.0 + f64::from(i) * 3.37;
            let outcome = if i % 3 == 0 { "A" } else { "B" };
            wagers.push(make_wager(event_id, &format!("bettor-{i}"), outcome, amount));
        }
        let fee = fee_5pct();
        let shares = distribute(&wagers, &fee, "A");
        assert!(!shares.is_empty());

        let paid: f64 = shares.iter().map(|s| s.payout).sum();
        let tolerance = 0.01 * shares.len() as f64;
        assert!(
            (paid - net_prize_pool(&wagers, &fee)).abs() <= tolerance,
            "payouts must sum to the net pool within rounding tolerance"
        );
    }

    #[test]
    fn bigger_stake_never_pays_less() {
        let event_id = EventId::new();
        let base = vec![
            make_wager(event_id, "Ana", "A", 50.0),
            make_wager(event_id, "Caio", "B", 150.0),
        ];
        let fee = fee_5pct();
        let mut last_payout = 0.0;
        for amount in [50.0, 75.0, 100.0, 500.0] {
            let mut wagers = base.clone();
            wagers.push(make_wager(event_id, "Davi", "A", amount));
            let shares = distribute(&wagers, &fee, "A");
            let Some(davi) = shares.iter().find(|s| s.bettor_name == "Davi") else {
                panic!("Davi backed the winner");
            };
            assert!(davi.payout >= last_payout, "payout must not decrease");
            last_payout = davi.payout;
        }
    }

    #[test]
    fn estimate_matches_actual_distribution() {
        let event_id = EventId::new();
        let wagers = vec![
            make_wager(event_id, "Ana", "A", 100.0),
            make_wager(event_id, "Caio", "B", 150.0),
        ];
        let fee = fee_5pct();

        let estimated = estimate_return(&wagers, &fee, "A", 200.0);

        let mut with_stake = wagers.clone();
        with_stake.push(make_wager(event_id, "Davi", "A", 200.0));
        let shares = distribute(&with_stake, &fee, "A");
        let Some(davi) = shares.iter().find(|s| s.bettor_name == "Davi") else {
            panic!("Davi backed the winner");
        };
        assert!((estimated - davi.payout).abs() <= 0.01);
    }

    #[test]
    fn estimate_guards_zero_total() {
        assert!((estimate_return(&[], &fee_5pct(), "A", 0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn settlement_summary_partitions_the_gross() {
        let event_id = EventId::new();
        let wagers = two_sided_pool(event_id);
        let settlement = Settlement::compute(&wagers, &fee_5pct(), "A");
        assert_eq!(settlement.winner, "A");
        assert!((settlement.gross_total - 450.0).abs() < 1e-9);
        assert!((settlement.fee_amount - 22.5).abs() < 1e-9);
        assert!((settlement.net_pool - 427.5).abs() < 1e-9);
        assert!(
            (settlement.fee_amount + settlement.net_pool - settlement.gross_total).abs() < 0.01
        );
        assert_eq!(settlement.shares.len(), 2);
    }
}
