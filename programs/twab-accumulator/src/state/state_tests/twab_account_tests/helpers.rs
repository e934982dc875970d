use crate::components::ring_store::RingBuffer;
use crate::error::DecreaseContext;
use crate::state::record::Record;
use crate::state::twab_account::TwabAccount;
use crate::utils::constants::LAYOUT_VERSION;
use anchor_lang::prelude::Pubkey;
use bytemuck::Zeroable;
use proptest::prelude::*;

macro_rules! assert_history_invariants {
    ($account:expr) => {{
        let account_ref = &$account;
        let history = &account_ref.history;
        assert!(
            history.cardinality <= $crate::utils::constants::MAX_CARDINALITY_U16,
            "cardinality cannot exceed ring capacity"
        );
        assert!(
            history.next_index < $crate::utils::constants::MAX_CARDINALITY_U16,
            "cursor must stay within ring bounds"
        );
        if history.cardinality < $crate::utils::constants::MAX_CARDINALITY_U16 {
            assert_eq!(
                history.next_index, history.cardinality,
                "cursor tracks cardinality until the ring saturates"
            );
        }

        let records =
            $crate::state::state_tests::twab_account_tests::helpers::collect_records(account_ref);
        for pair in records.windows(2) {
            assert!(
                pair[0].timestamp < pair[1].timestamp,
                "timestamps must be strictly increasing oldest to newest"
            );
            assert!(
                pair[0].cumulative.get() <= pair[1].cumulative.get(),
                "cumulative must never decrease"
            );
            let elapsed = pair[1].timestamp - pair[0].timestamp;
            assert_eq!(
                pair[1].cumulative.get(),
                pair[0].cumulative.get()
                    + ethnum::U256::from(pair[0].balance) * ethnum::U256::from(elapsed),
                "each record integrates its predecessor's balance"
            );
        }
        if let Some(newest) = records.last() {
            assert_eq!(
                newest.balance, account_ref.balance,
                "header balance mirrors the newest record"
            );
        }
    }};
}

pub(crate) use assert_history_invariants;

/// Zeroed accumulator as `initialize_accumulator` leaves it.
pub(crate) fn empty_account() -> TwabAccount {
    let mut account = TwabAccount::zeroed();
    account.subject = Pubkey::new_unique();
    account.ledger = Pubkey::new_unique();
    account.created_at = 1_700_000_000;
    account.version = LAYOUT_VERSION;
    account.bump = 254;
    account
}

/// Oldest-to-newest copy of the account's history.
pub(crate) fn collect_records(account: &TwabAccount) -> Vec<Record> {
    account.history.iter().collect()
}

/// A ledger event as replayed by tests.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Event {
    Increase(u128),
    Decrease(u128),
}

/// Applies `event` at `timestamp`, clamping decreases to the available
/// balance so generated sequences never fail.
pub(crate) fn apply(account: &mut TwabAccount, event: Event, timestamp: u64) {
    match event {
        Event::Increase(amount) => {
            account.increase_balance(amount, timestamp).unwrap();
        }
        Event::Decrease(amount) => {
            let amount = amount.min(account.balance);
            account
                .decrease_balance(amount, timestamp, DecreaseContext::Transfer)
                .unwrap();
        }
    }
}

/// Brute-force balance at `t`: the latest event at or before `t` wins.
pub(crate) fn model_balance_at(steps: &[(u64, u128)], t: u64) -> u128 {
    steps
        .iter()
        .take_while(|(timestamp, _)| *timestamp <= t)
        .last()
        .map(|(_, balance)| *balance)
        .unwrap_or(0)
}

/// Brute-force integral over `[start, end)` by summing per-second balances.
pub(crate) fn model_integral(steps: &[(u64, u128)], start: u64, end: u64) -> u128 {
    (start..end).map(|t| model_balance_at(steps, t)).sum()
}

pub(crate) fn proptest_event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        (1u128..1_000_000).prop_map(Event::Increase),
        (1u128..1_000_000).prop_map(Event::Decrease),
    ]
}
