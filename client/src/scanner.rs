//! Bulk reading of program accounts.
//!
//! `getProgramAccounts` returns everything the program owns, in any state.
//! Accounts that fail to decode are skipped and reported rather than
//! aborting the scan.

use anchor_lang::error::Error;
use credcalls::error::ErrorCode;
use credcalls::states::{
    decode_account, identify_account, AccountKind, IdCounter, PlatformState, TradeCall,
    TradeCallStatus, UserVault,
};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Known discriminator but the body does not decode, or too short to
    /// carry a discriminator at all.
    Corrupt,
    /// Discriminator of no account type this program defines.
    Foreign,
}

#[derive(Debug, PartialEq)]
pub struct SkippedAccount {
    pub address: Pubkey,
    pub reason: SkipReason,
    /// Hex of the first bytes, for diagnostics.
    pub prefix: String,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub calls: Vec<(Pubkey, TradeCall)>,
    pub vaults: usize,
    pub singletons: usize,
    pub skipped: Vec<SkippedAccount>,
}

impl ScanReport {
    pub fn corrupt_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.reason == SkipReason::Corrupt)
            .count()
    }

    pub fn foreign_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| s.reason == SkipReason::Foreign)
            .count()
    }
}

fn skip_reason(err: &Error) -> SkipReason {
    if *err == Error::from(ErrorCode::TypeMismatch) {
        SkipReason::Foreign
    } else {
        SkipReason::Corrupt
    }
}

/// Classifies and decodes raw accounts. Trade calls are returned sorted by
/// ID; other program accounts are only counted.
pub fn scan_accounts<I>(accounts: I) -> ScanReport
where
    I: IntoIterator<Item = (Pubkey, Vec<u8>)>,
{
    let mut report = ScanReport::default();
    for (address, data) in accounts {
        let decoded = identify_account(&data).and_then(|kind| match kind {
            AccountKind::TradeCall => {
                let call = decode_account::<TradeCall>(&data)?;
                report.calls.push((address, call));
                Ok(())
            }
            AccountKind::UserVault => {
                decode_account::<UserVault>(&data)?;
                report.vaults += 1;
                Ok(())
            }
            AccountKind::PlatformState => {
                decode_account::<PlatformState>(&data)?;
                report.singletons += 1;
                Ok(())
            }
            AccountKind::IdCounter => {
                decode_account::<IdCounter>(&data)?;
                report.singletons += 1;
                Ok(())
            }
        });

        if let Err(err) = decoded {
            report.skipped.push(SkippedAccount {
                address,
                reason: skip_reason(&err),
                prefix: hex::encode(&data[..data.len().min(8)]),
            });
        }
    }
    report.calls.sort_by_key(|(_, call)| call.id);
    report
}

/// What a given user can still do with a trade call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimStatus {
    NotAFollower,
    /// The call has not been resolved yet.
    AwaitingResolution,
    /// Failed call; the user may claim this many lamports.
    Claimable(u64),
    /// Successful call; the follow fee reservation may be released.
    ReservationReleasable,
    /// Share claimed or reservation released.
    Settled,
}

pub fn claim_status(call: &TradeCall, user: &Pubkey) -> ClaimStatus {
    if !call.is_follower(user) {
        return ClaimStatus::NotAFollower;
    }
    if call.has_claimed(user) {
        return ClaimStatus::Settled;
    }
    match call.status {
        TradeCallStatus::Active => ClaimStatus::AwaitingResolution,
        TradeCallStatus::Successful => ClaimStatus::ReservationReleasable,
        TradeCallStatus::Failed if call.is_distributed => {
            ClaimStatus::Claimable(call.payout_per_follower)
        }
        TradeCallStatus::Failed => ClaimStatus::AwaitingResolution,
    }
}

/// One row of `list-calls` output.
#[derive(Debug, Serialize)]
pub struct CallRow {
    pub address: String,
    pub id: u64,
    pub token_address: String,
    pub caller: String,
    pub staked_amount: u64,
    pub timestamp: i64,
    pub status: String,
    pub followers: usize,
    pub settled_followers: usize,
    pub payout_per_follower: u64,
    pub caller_payout: u64,
}

pub fn status_label(status: TradeCallStatus) -> &'static str {
    match status {
        TradeCallStatus::Active => "active",
        TradeCallStatus::Successful => "successful",
        TradeCallStatus::Failed => "failed",
    }
}

impl CallRow {
    pub fn new(address: &Pubkey, call: &TradeCall) -> Self {
        Self {
            address: address.to_string(),
            id: call.id,
            token_address: call.token_address.to_string(),
            caller: call.caller.to_string(),
            staked_amount: call.staked_amount,
            timestamp: call.timestamp,
            status: status_label(call.status).to_string(),
            followers: call.followers.len(),
            settled_followers: call.claimed_followers.len(),
            payout_per_follower: call.payout_per_follower,
            caller_payout: call.caller_payout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credcalls::states::encode_account;
    use credcalls::FOLLOW_FEE_LAMPORTS;
    use rand::Rng;

    fn call_with(id: u64, followers: usize) -> TradeCall {
        let mut call = TradeCall::new(
            id,
            Pubkey::new_unique(),
            900,
            Pubkey::new_unique(),
            1_700_000_000,
        );
        call.followers = (0..followers).map(|_| Pubkey::new_unique()).collect();
        call
    }

    #[test]
    fn test_scan_classifies_and_skips() {
        let c2 = call_with(2, 1);
        let c1 = call_with(1, 0);
        let mut truncated = encode_account(&call_with(3, 2)).unwrap();
        truncated.truncate(40);

        let accounts = vec![
            (Pubkey::new_unique(), encode_account(&c2).unwrap()),
            (Pubkey::new_unique(), vec![0xAB; 64]),
            (Pubkey::new_unique(), encode_account(&c1).unwrap()),
            (Pubkey::new_unique(), truncated),
            (Pubkey::new_unique(), vec![1, 2, 3]),
            (
                Pubkey::new_unique(),
                encode_account(&UserVault::new(Pubkey::new_unique())).unwrap(),
            ),
            (Pubkey::new_unique(), encode_account(&IdCounter { value: 2 }).unwrap()),
            (
                Pubkey::new_unique(),
                encode_account(&PlatformState {
                    admin: Pubkey::new_unique(),
                })
                .unwrap(),
            ),
        ];

        let report = scan_accounts(accounts);
        assert_eq!(report.calls.len(), 2);
        assert_eq!(report.calls[0].1, c1);
        assert_eq!(report.calls[1].1, c2);
        assert_eq!(report.vaults, 1);
        assert_eq!(report.singletons, 2);
        assert_eq!(report.foreign_count(), 1);
        assert_eq!(report.corrupt_count(), 2);
        assert_eq!(report.skipped[0].prefix, "abababababababab");
    }

    #[test]
    fn test_scan_survives_random_garbage() {
        let mut rng = rand::rng();
        let mut accounts = Vec::new();
        for _ in 0..200 {
            let len = rng.random_range(0..128);
            let data: Vec<u8> = (0..len).map(|_| rng.random()).collect();
            accounts.push((Pubkey::new_unique(), data));
        }
        accounts.push((Pubkey::new_unique(), encode_account(&call_with(7, 3)).unwrap()));

        let report = scan_accounts(accounts);
        assert!(report.calls.iter().any(|(_, c)| c.id == 7));
        assert_eq!(
            report.calls.len() + report.vaults + report.singletons + report.skipped.len(),
            201
        );
    }

    #[test]
    fn test_claim_status_lifecycle() {
        let mut call = call_with(1, 3);
        let follower = call.followers[0];
        let stranger = Pubkey::new_unique();

        assert_eq!(claim_status(&call, &stranger), ClaimStatus::NotAFollower);
        assert_eq!(claim_status(&call, &follower), ClaimStatus::AwaitingResolution);

        call.resolve_failure().unwrap();
        assert_eq!(claim_status(&call, &follower), ClaimStatus::Claimable(300));

        let mut vault = UserVault {
            user: follower,
            deposited_amount: FOLLOW_FEE_LAMPORTS,
            reserved_fee: FOLLOW_FEE_LAMPORTS,
        };
        let paid = call
            .record_claim(follower, &mut vault, FOLLOW_FEE_LAMPORTS)
            .unwrap();
        assert_eq!(paid, 300);
        assert_eq!(vault.reserved_fee, 0);
        assert_eq!(claim_status(&call, &follower), ClaimStatus::Settled);
        assert_eq!(claim_status(&call, &call.followers[1]), ClaimStatus::Claimable(300));
        assert_eq!(claim_status(&call, &stranger), ClaimStatus::NotAFollower);
    }

    #[test]
    fn test_claim_status_after_success() {
        let mut call = call_with(4, 2);
        let follower = call.followers[1];
        call.resolve_success().unwrap();
        assert_eq!(
            claim_status(&call, &follower),
            ClaimStatus::ReservationReleasable
        );

        let mut vault = UserVault {
            user: follower,
            deposited_amount: FOLLOW_FEE_LAMPORTS,
            reserved_fee: FOLLOW_FEE_LAMPORTS,
        };
        call.record_release(follower, &mut vault, FOLLOW_FEE_LAMPORTS)
            .unwrap();
        assert_eq!(claim_status(&call, &follower), ClaimStatus::Settled);
    }

    #[test]
    fn test_call_row_json() {
        let call = call_with(5, 2);
        let address = Pubkey::new_unique();
        let value = serde_json::to_value(CallRow::new(&address, &call)).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["status"], "active");
        assert_eq!(value["followers"], 2);
        assert_eq!(value["address"], address.to_string());
    }
}
