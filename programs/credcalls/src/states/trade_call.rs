use crate::error::ErrorCode;
use crate::states::UserVault;
use crate::MAX_FOLLOWERS;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// TradeCall Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive trade call accounts,
/// combined with the call ID as 8 little-endian bytes.
pub const TRADE_CALL_SEED: &str = "trade_call";

/// Lifecycle of a trade call. Serialized as a single byte.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TradeCallStatus {
    #[default]
    Active,
    Successful,
    Failed,
}

/// A caller's staked claim about a token, plus everyone following it.
///
/// Transition methods validate every precondition before writing, so a
/// failed call leaves the record exactly as it was.
///
/// Once `status` leaves `Active` the record is terminal: only
/// `claimed_followers` may still grow.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct TradeCall {
    /// Sequential ID assigned from the `IdCounter`.
    pub id: u64,

    /// Token the call is about.
    pub token_address: Pubkey,

    /// Lamports staked by the caller and held by this account.
    pub staked_amount: u64,

    /// Key that created (and staked on) the call.
    pub caller: Pubkey,

    /// Creation time, Unix seconds.
    pub timestamp: i64,

    /// Followers in the order they joined. Order grants nothing: payouts are
    /// an equal split.
    pub followers: Vec<Pubkey>,

    pub status: TradeCallStatus,

    /// Set when resolution has fixed the payout math.
    pub is_distributed: bool,

    /// Equal share of the stake each follower may claim after a failure.
    pub payout_per_follower: u64,

    /// Followers that have settled: claimed their share on a failed call,
    /// or released their reservation on a successful one.
    pub claimed_followers: Vec<Pubkey>,

    /// Lamports returned to the caller's vault on success; zero on failure.
    pub caller_payout: u64,
}

impl TradeCall {
    /// Fixed serialized size of the account, sized for `MAX_FOLLOWERS`.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 8: id
    /// - 32 * 2: token_address, caller
    /// - 8 * 2: staked_amount, timestamp
    /// - 4 + 32 * MAX_FOLLOWERS: followers
    /// - 1 + 1: status, is_distributed
    /// - 8: payout_per_follower
    /// - 4 + 32 * MAX_FOLLOWERS: claimed_followers
    /// - 8: caller_payout
    pub const LEN: usize = 8
        + 8
        + 32 * 2
        + 8 * 2
        + (4 + 32 * MAX_FOLLOWERS)
        + 1
        + 1
        + 8
        + (4 + 32 * MAX_FOLLOWERS)
        + 8;

    pub fn new(
        id: u64,
        token_address: Pubkey,
        staked_amount: u64,
        caller: Pubkey,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            token_address,
            staked_amount,
            caller,
            timestamp,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TradeCallStatus::Active
    }

    pub fn is_follower(&self, key: &Pubkey) -> bool {
        self.followers.contains(key)
    }

    pub fn has_claimed(&self, key: &Pubkey) -> bool {
        self.claimed_followers.contains(key)
    }

    /// Adds `follower` and reserves `fee` in their vault.
    ///
    /// Checks run in a fixed order: status, self-follow, duplicate, capacity,
    /// then the vault. Self-follow is rejected whatever the vault holds.
    pub fn follow(&mut self, follower: Pubkey, vault: &mut UserVault, fee: u64) -> Result<()> {
        require!(self.is_active(), ErrorCode::TradeCallNotActive);
        require_keys_neq!(follower, self.caller, ErrorCode::CannotFollowOwnTrade);
        require!(!self.is_follower(&follower), ErrorCode::AlreadyFollowing);
        require!(self.followers.len() < MAX_FOLLOWERS, ErrorCode::TradeCallFull);

        vault.reserve_fee(fee)?;
        self.followers.push(follower);
        Ok(())
    }

    /// Lamports a successful resolution would return to the caller.
    pub fn success_payout(&self) -> Result<u64> {
        require!(self.is_active(), ErrorCode::TradeCallAlreadyResolved);
        Ok(self.staked_amount)
    }

    /// Marks the call successful. Returns the lamports owed to the caller.
    pub fn resolve_success(&mut self) -> Result<u64> {
        let caller_payout = self.success_payout()?;

        self.status = TradeCallStatus::Successful;
        self.caller_payout = caller_payout;
        self.is_distributed = true;
        Ok(caller_payout)
    }

    /// Marks the call failed and fixes the equal split of the stake.
    ///
    /// The split is a floor division; the remainder is never paid to anyone
    /// and stays in the account for good.
    pub fn resolve_failure(&mut self) -> Result<u64> {
        require!(self.is_active(), ErrorCode::TradeCallAlreadyResolved);
        require!(!self.followers.is_empty(), ErrorCode::NoFollowers);

        let payout_per_follower = self
            .staked_amount
            .checked_div(self.followers.len() as u64)
            .ok_or(ErrorCode::ArithmeticError)?;

        self.status = TradeCallStatus::Failed;
        self.payout_per_follower = payout_per_follower;
        self.caller_payout = 0;
        self.is_distributed = true;
        Ok(payout_per_follower)
    }

    /// Share `follower` could claim right now, without recording anything.
    pub fn claimable_share(&self, follower: &Pubkey) -> Result<u64> {
        require!(
            self.status == TradeCallStatus::Failed && self.is_distributed,
            ErrorCode::FundsNotDistributed
        );
        require!(self.is_follower(follower), ErrorCode::NotAFollower);
        require!(!self.has_claimed(follower), ErrorCode::AlreadyClaimed);
        Ok(self.payout_per_follower)
    }

    /// Records a failed-call claim and releases the follower's reservation.
    /// Returns the payout the caller of this method must transfer.
    pub fn record_claim(
        &mut self,
        follower: Pubkey,
        vault: &mut UserVault,
        fee: u64,
    ) -> Result<u64> {
        let payout = self.claimable_share(&follower)?;

        vault.release_fee(fee)?;
        self.claimed_followers.push(follower);
        Ok(payout)
    }

    /// Settles a follow on a successful call by releasing the reservation.
    pub fn record_release(
        &mut self,
        follower: Pubkey,
        vault: &mut UserVault,
        fee: u64,
    ) -> Result<()> {
        require!(
            self.status == TradeCallStatus::Successful,
            ErrorCode::FundsNotDistributed
        );
        require!(self.is_follower(&follower), ErrorCode::NotAFollower);
        require!(!self.has_claimed(&follower), ErrorCode::AlreadyClaimed);

        vault.release_fee(fee)?;
        self.claimed_followers.push(follower);
        Ok(())
    }

    /// Lamports claimable across all followers after a failure.
    pub fn total_claimable(&self) -> Result<u64> {
        Ok(self
            .payout_per_follower
            .checked_mul(self.followers.len() as u64)
            .ok_or(ErrorCode::ArithmeticError)?)
    }

    /// Part of the stake left over by the floor division.
    pub fn undistributed_remainder(&self) -> Result<u64> {
        if self.status != TradeCallStatus::Failed {
            return Ok(0);
        }
        Ok(self
            .staked_amount
            .checked_sub(self.total_claimable()?)
            .ok_or(ErrorCode::ArithmeticError)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FOLLOW_FEE_LAMPORTS;
    use proptest::prelude::*;
    use quickcheck::quickcheck;

    const FEE: u64 = FOLLOW_FEE_LAMPORTS;

    fn funded_vault(user: Pubkey) -> UserVault {
        UserVault {
            user,
            deposited_amount: FEE * 10,
            reserved_fee: 0,
        }
    }

    fn call_with_stake(stake: u64) -> TradeCall {
        TradeCall::new(1, Pubkey::new_unique(), stake, Pubkey::new_unique(), 1_700_000_000)
    }

    /// Adds `n` fresh followers and returns them with their vaults.
    fn add_followers(call: &mut TradeCall, n: usize) -> Vec<(Pubkey, UserVault)> {
        (0..n)
            .map(|_| {
                let follower = Pubkey::new_unique();
                let mut vault = funded_vault(follower);
                call.follow(follower, &mut vault, FEE).unwrap();
                (follower, vault)
            })
            .collect()
    }

    #[test]
    fn test_trade_call_size() {
        assert_eq!(TradeCall::LEN, 3322);
    }

    #[test]
    fn test_new_call_starts_active_and_empty() {
        let call = call_with_stake(500);
        assert_eq!(call.status, TradeCallStatus::Active);
        assert!(call.followers.is_empty());
        assert!(call.claimed_followers.is_empty());
        assert!(!call.is_distributed);
        assert_eq!(call.payout_per_follower, 0);
        assert_eq!(call.caller_payout, 0);
    }

    #[test]
    fn test_follow_reserves_fee_and_appends() {
        let mut call = call_with_stake(500);
        let follower = Pubkey::new_unique();
        let mut vault = funded_vault(follower);

        call.follow(follower, &mut vault, FEE).unwrap();

        assert_eq!(call.followers, vec![follower]);
        assert_eq!(vault.reserved_fee, FEE);
        assert_eq!(vault.deposited_amount, FEE * 10);
    }

    #[test]
    fn test_self_follow_rejected_regardless_of_vault() {
        let mut call = call_with_stake(500);
        let caller = call.caller;

        let mut empty = UserVault::new(caller);
        assert_eq!(
            call.follow(caller, &mut empty, FEE).unwrap_err(),
            ErrorCode::CannotFollowOwnTrade.into()
        );

        let mut rich = funded_vault(caller);
        assert_eq!(
            call.follow(caller, &mut rich, FEE).unwrap_err(),
            ErrorCode::CannotFollowOwnTrade.into()
        );
        assert_eq!(rich.reserved_fee, 0);
        assert!(call.followers.is_empty());
    }

    #[test]
    fn test_double_follow_rejected() {
        let mut call = call_with_stake(500);
        let follower = Pubkey::new_unique();
        let mut vault = funded_vault(follower);

        call.follow(follower, &mut vault, FEE).unwrap();
        assert_eq!(
            call.follow(follower, &mut vault, FEE).unwrap_err(),
            ErrorCode::AlreadyFollowing.into()
        );
        assert_eq!(call.followers.len(), 1);
        assert_eq!(vault.reserved_fee, FEE);
    }

    #[test]
    fn test_follow_with_empty_vault_is_no_deposit() {
        let mut call = call_with_stake(500);
        let follower = Pubkey::new_unique();
        let mut vault = UserVault::new(follower);

        assert_eq!(
            call.follow(follower, &mut vault, FEE).unwrap_err(),
            ErrorCode::NoDeposit.into()
        );
        assert!(call.followers.is_empty());
    }

    #[test]
    fn test_follow_capacity_is_enforced() {
        let mut call = call_with_stake(500);
        add_followers(&mut call, MAX_FOLLOWERS);

        let late = Pubkey::new_unique();
        let mut vault = funded_vault(late);
        assert_eq!(
            call.follow(late, &mut vault, FEE).unwrap_err(),
            ErrorCode::TradeCallFull.into()
        );
        assert_eq!(vault.reserved_fee, 0);
    }

    #[test]
    fn test_create_then_succeed() {
        let mut call = call_with_stake(1_000_000_000);
        let mut caller_vault = UserVault::new(call.caller);

        let payout = call.resolve_success().unwrap();
        caller_vault.credit(payout).unwrap();

        assert_eq!(call.status, TradeCallStatus::Successful);
        assert_eq!(call.caller_payout, 1_000_000_000);
        assert!(call.is_distributed);
        assert_eq!(caller_vault.deposited_amount, 1_000_000_000);
    }

    #[test]
    fn test_three_followers_fail_and_claim() {
        let mut call = call_with_stake(900);
        let mut followers = add_followers(&mut call, 3);

        assert_eq!(call.resolve_failure().unwrap(), 300);
        assert_eq!(call.payout_per_follower, 300);
        assert_eq!(call.caller_payout, 0);

        let mut paid = 0;
        for (follower, vault) in followers.iter_mut() {
            paid += call.record_claim(*follower, vault, FEE).unwrap();
            assert_eq!(vault.reserved_fee, 0);
        }
        assert_eq!(paid, 900);

        let stranger = Pubkey::new_unique();
        let mut stranger_vault = funded_vault(stranger);
        assert_eq!(
            call.record_claim(stranger, &mut stranger_vault, FEE).unwrap_err(),
            ErrorCode::NotAFollower.into()
        );
    }

    #[test]
    fn test_double_claim_rejected() {
        let mut call = call_with_stake(1_000);
        let mut followers = add_followers(&mut call, 2);
        call.resolve_failure().unwrap();

        let (follower, vault) = &mut followers[0];
        call.record_claim(*follower, vault, FEE).unwrap();
        assert_eq!(
            call.record_claim(*follower, vault, FEE).unwrap_err(),
            ErrorCode::AlreadyClaimed.into()
        );
        assert_eq!(call.claimed_followers.len(), 1);
    }

    #[test]
    fn test_claim_before_failure_is_not_distributed() {
        let mut call = call_with_stake(1_000);
        let mut followers = add_followers(&mut call, 1);
        let (follower, vault) = &mut followers[0];

        assert_eq!(
            call.record_claim(*follower, vault, FEE).unwrap_err(),
            ErrorCode::FundsNotDistributed.into()
        );

        call.resolve_success().unwrap();
        assert_eq!(
            call.claimable_share(follower).unwrap_err(),
            ErrorCode::FundsNotDistributed.into()
        );
    }

    #[test]
    fn test_remainder_is_never_paid() {
        let mut call = call_with_stake(1_000);
        let mut followers = add_followers(&mut call, 3);

        assert_eq!(call.resolve_failure().unwrap(), 333);
        assert_eq!(call.undistributed_remainder().unwrap(), 1);

        let paid: u64 = followers
            .iter_mut()
            .map(|(f, v)| call.record_claim(*f, v, FEE).unwrap())
            .sum();
        assert_eq!(paid, 999);
        assert_eq!(call.staked_amount - paid, 1);
    }

    #[test]
    fn test_zero_followers_failure_is_rejected() {
        let mut call = call_with_stake(1_000);
        assert_eq!(
            call.resolve_failure().unwrap_err(),
            ErrorCode::NoFollowers.into()
        );
        assert_eq!(call.status, TradeCallStatus::Active);
        assert!(!call.is_distributed);
    }

    #[test]
    fn test_terminal_call_is_immutable() {
        let mut call = call_with_stake(1_000);
        add_followers(&mut call, 2);
        call.resolve_failure().unwrap();
        let snapshot = call.clone();

        assert_eq!(
            call.resolve_success().unwrap_err(),
            ErrorCode::TradeCallAlreadyResolved.into()
        );
        assert_eq!(
            call.resolve_failure().unwrap_err(),
            ErrorCode::TradeCallAlreadyResolved.into()
        );
        let late = Pubkey::new_unique();
        let mut vault = funded_vault(late);
        assert_eq!(
            call.follow(late, &mut vault, FEE).unwrap_err(),
            ErrorCode::TradeCallNotActive.into()
        );
        assert_eq!(call, snapshot);
    }

    #[test]
    fn test_release_after_success() {
        let mut call = call_with_stake(1_000);
        let mut followers = add_followers(&mut call, 2);

        let (follower, vault) = &mut followers[0];
        assert_eq!(
            call.record_release(*follower, vault, FEE).unwrap_err(),
            ErrorCode::FundsNotDistributed.into()
        );

        call.resolve_success().unwrap();
        call.record_release(*follower, vault, FEE).unwrap();
        assert_eq!(vault.reserved_fee, 0);
        assert_eq!(vault.available().unwrap(), FEE * 10);
        assert_eq!(
            call.record_release(*follower, vault, FEE).unwrap_err(),
            ErrorCode::AlreadyClaimed.into()
        );
        assert_eq!(call.claimed_followers, vec![*follower]);
    }

    proptest! {
        #[test]
        fn prop_claims_never_exceed_stake(stake in 1u64..=u64::MAX, n in 1usize..=MAX_FOLLOWERS) {
            let mut call = call_with_stake(stake);
            let mut followers = add_followers(&mut call, n);
            let payout = call.resolve_failure().unwrap();

            prop_assert_eq!(payout, stake / n as u64);

            let mut paid: u128 = 0;
            for (follower, vault) in followers.iter_mut() {
                paid += call.record_claim(*follower, vault, FEE).unwrap() as u128;
                prop_assert!(call.record_claim(*follower, vault, FEE).is_err());
            }
            prop_assert_eq!(paid, payout as u128 * n as u128);
            prop_assert!(paid <= stake as u128);
            prop_assert_eq!(
                stake as u128 - paid,
                call.undistributed_remainder().unwrap() as u128
            );
        }

        #[test]
        fn prop_claimed_is_subset_of_followers(n in 1usize..=10, claims in proptest::collection::vec(0usize..20, 0..40)) {
            let mut call = call_with_stake(10_000);
            let mut followers = add_followers(&mut call, n);
            call.resolve_failure().unwrap();

            for idx in claims {
                if let Some((follower, vault)) = followers.get_mut(idx) {
                    let _ = call.record_claim(*follower, vault, FEE);
                } else {
                    let stranger = Pubkey::new_unique();
                    let mut vault = funded_vault(stranger);
                    prop_assert!(call.record_claim(stranger, &mut vault, FEE).is_err());
                }
            }

            for claimed in call.claimed_followers.iter() {
                prop_assert!(call.is_follower(claimed));
                prop_assert_eq!(call.claimed_followers.iter().filter(|k| *k == claimed).count(), 1);
            }
        }
    }

    quickcheck! {
        fn qc_payout_is_floor_division(stake: u64, n: u8) -> bool {
            let n = (n as usize % MAX_FOLLOWERS) + 1;
            let mut call = call_with_stake(stake);
            add_followers(&mut call, n);
            let payout = call.resolve_failure().unwrap();
            payout == stake / n as u64
                && payout.checked_mul(n as u64).map_or(false, |total| total <= stake)
        }
    }
}
