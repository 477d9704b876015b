//! Property tests for signed-sum balance derivation.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use maison_shared::types::{TransactionId, WalletAddress};

use super::balance::completed_balance;
use super::types::{NewTransaction, Transaction};

/// Strategy for positive entry magnitudes (two decimal places).
fn magnitude_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a list of (is_credit, magnitude) events on one account.
fn events_strategy(max_len: usize) -> impl Strategy<Value = Vec<(bool, Decimal)>> {
    prop::collection::vec((any::<bool>(), magnitude_strategy()), 0..=max_len)
}

fn record_event(address: &WalletAddress, is_credit: bool, amount: Decimal) -> Transaction {
    let new = if is_credit {
        NewTransaction::deposit(address.clone(), amount)
    } else {
        NewTransaction::withdrawal(address.clone(), amount)
    };
    Transaction::from_new(new, TransactionId::new(), Utc::now())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The derived balance equals the signed sum of the generating events.
    #[test]
    fn prop_balance_equals_signed_sum(events in events_strategy(30)) {
        let address = WalletAddress::new("PROP");
        let entries: Vec<Transaction> = events
            .iter()
            .map(|(is_credit, amount)| record_event(&address, *is_credit, *amount))
            .collect();

        let expected: Decimal = events
            .iter()
            .map(|(is_credit, amount)| if *is_credit { *amount } else { -*amount })
            .sum();

        prop_assert_eq!(completed_balance(&entries, &address), expected);
    }

    /// Entries on other addresses never affect the derivation.
    #[test]
    fn prop_foreign_entries_are_ignored(
        own in events_strategy(15),
        foreign in events_strategy(15),
    ) {
        let address = WalletAddress::new("OWN");
        let other = WalletAddress::new("OTHER");

        let mut entries: Vec<Transaction> = own
            .iter()
            .map(|(is_credit, amount)| record_event(&address, *is_credit, *amount))
            .collect();
        entries.extend(
            foreign
                .iter()
                .map(|(is_credit, amount)| record_event(&other, *is_credit, *amount)),
        );

        let own_only: Vec<Transaction> = own
            .iter()
            .map(|(is_credit, amount)| record_event(&address, *is_credit, *amount))
            .collect();

        prop_assert_eq!(
            completed_balance(&entries, &address),
            completed_balance(&own_only, &address)
        );
    }

    /// Derivation is order-independent: shuffling entries preserves the sum.
    #[test]
    fn prop_balance_is_order_independent(events in events_strategy(20)) {
        let address = WalletAddress::new("PROP");
        let entries: Vec<Transaction> = events
            .iter()
            .map(|(is_credit, amount)| record_event(&address, *is_credit, *amount))
            .collect();

        let mut reversed = entries.clone();
        reversed.reverse();

        prop_assert_eq!(
            completed_balance(&entries, &address),
            completed_balance(&reversed, &address)
        );
    }
}
