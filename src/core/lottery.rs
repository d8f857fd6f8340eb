//! Lottery - spend currency on tickets for a chance at a multiple of the price.

use crate::{
    config::economy::{LotteryConfig, Prize},
    core::record::PlayerRecord,
    errors::{Error, Result},
};
use rand::Rng;

/// How many tickets landed on one prize tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeTally {
    /// Index into `LotteryConfig::prizes`
    pub prize: usize,
    /// Tickets that won this tier
    pub count: u32,
}

/// Result of a ticket purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryOutcome {
    /// Record after paying and collecting winnings
    pub record: PlayerRecord,
    /// Tickets bought
    pub tickets: u32,
    /// Total ticket cost
    pub cost: i64,
    /// Total winnings
    pub winnings: i64,
    /// Per-tier results, most frequent first
    pub tallies: Vec<PrizeTally>,
}

impl LotteryOutcome {
    /// Winnings minus cost.
    #[must_use]
    pub const fn net_change(&self) -> i64 {
        self.winnings - self.cost
    }
}

/// Picks the tier whose cumulative probability window contains `roll` (0-100).
///
/// Falls back to the last tier when the table sums to less than `roll`.
#[must_use]
pub fn draw_prize(prizes: &[Prize], roll: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, tier) in prizes.iter().enumerate() {
        cumulative += tier.probability;
        if roll < cumulative {
            return index;
        }
    }
    prizes.len().saturating_sub(1)
}

/// Buys `count` tickets for the player.
///
/// # Errors
/// - `Error::InvalidTicketCount` if `count` is not in `1..=max_tickets`
/// - `Error::InsufficientFunds` if the balance cannot cover the tickets
///
/// The record is unchanged on error.
pub fn buy_tickets<R: Rng + ?Sized>(
    record: &PlayerRecord,
    count: i64,
    config: &LotteryConfig,
    rng: &mut R,
) -> Result<LotteryOutcome> {
    let tickets = u32::try_from(count)
        .ok()
        .filter(|n| (1..=config.max_tickets).contains(n))
        .ok_or(Error::InvalidTicketCount {
            count,
            max: config.max_tickets,
        })?;

    let cost = config.ticket_price.saturating_mul(i64::from(tickets));
    if record.balance < cost {
        return Err(Error::InsufficientFunds {
            current: record.balance,
            required: cost,
        });
    }

    let mut tallies: Vec<PrizeTally> = Vec::new();
    let mut winnings: i64 = 0;
    for _ in 0..tickets {
        let prize = draw_prize(&config.prizes, rng.gen_range(0.0..100.0));
        winnings = winnings.saturating_add(
            config
                .ticket_price
                .saturating_mul(config.prizes[prize].multiplier),
        );
        match tallies.iter_mut().find(|t| t.prize == prize) {
            Some(tally) => tally.count += 1,
            None => tallies.push(PrizeTally { prize, count: 1 }),
        }
    }
    tallies.sort_by(|a, b| b.count.cmp(&a.count));

    let mut updated = *record;
    updated.balance = updated.balance - cost + winnings;

    Ok(LotteryOutcome {
        record: updated,
        tickets,
        cost,
        winnings,
        tallies,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::record;
    use rand::{SeedableRng, rngs::StdRng};

    fn tier(probability: f64, multiplier: i64) -> Prize {
        Prize {
            name: format!("x{multiplier}"),
            emoji: "🎫".to_string(),
            probability,
            multiplier,
        }
    }

    #[test]
    fn test_draw_prize_uses_cumulative_windows() {
        let prizes = vec![tier(1.0, 100), tier(9.0, 10), tier(90.0, 0)];
        assert_eq!(draw_prize(&prizes, 0.5), 0);
        assert_eq!(draw_prize(&prizes, 1.0), 1);
        assert_eq!(draw_prize(&prizes, 9.99), 1);
        assert_eq!(draw_prize(&prizes, 10.0), 2);
        assert_eq!(draw_prize(&prizes, 99.9), 2);
    }

    #[test]
    fn test_draw_prize_falls_back_to_last_tier() {
        let prizes = vec![tier(5.0, 3), tier(5.0, 0)];
        assert_eq!(draw_prize(&prizes, 50.0), 1);
    }

    #[test]
    fn test_buy_tickets_balances_cost_and_winnings() {
        let config = LotteryConfig::default();
        let player = record(10_000, 3, 0, 1);
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = buy_tickets(&player, 50, &config, &mut rng).unwrap();

        assert_eq!(outcome.tickets, 50);
        assert_eq!(outcome.cost, 5_000);
        assert_eq!(outcome.record.balance, 10_000 + outcome.net_change());
        assert!(outcome.record.balance >= 5_000);
        assert_eq!(outcome.tallies.iter().map(|t| t.count).sum::<u32>(), 50);
        assert!(outcome.tallies.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(outcome.record.work_count, 3);
    }

    #[test]
    fn test_guaranteed_prize_table() {
        let config = LotteryConfig {
            ticket_price: 100,
            max_tickets: 10,
            prizes: vec![tier(100.0, 2)],
        };
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = buy_tickets(&record(300, 0, 0, 0), 3, &config, &mut rng).unwrap();
        assert_eq!(outcome.winnings, 600);
        assert_eq!(outcome.record.balance, 600);
        assert_eq!(outcome.tallies, vec![PrizeTally { prize: 0, count: 3 }]);
    }

    #[test]
    fn test_insufficient_funds() {
        let config = LotteryConfig::default();
        let player = record(99, 0, 0, 0);
        let mut rng = StdRng::seed_from_u64(1);

        let result = buy_tickets(&player, 1, &config, &mut rng);
        assert!(matches!(
            result,
            Err(Error::InsufficientFunds {
                current: 99,
                required: 100
            })
        ));
    }

    #[test]
    fn test_ticket_count_bounds() {
        let config = LotteryConfig::default();
        let player = record(1_000_000, 0, 0, 0);
        let mut rng = StdRng::seed_from_u64(1);

        for bad in [0, -5, 1001] {
            assert!(matches!(
                buy_tickets(&player, bad, &config, &mut rng),
                Err(Error::InvalidTicketCount { .. })
            ));
        }
        assert!(buy_tickets(&player, 1000, &config, &mut rng).is_ok());
    }
}
