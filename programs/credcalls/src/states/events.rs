use crate::states::TradeCallStatus;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track call and vault state
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the platform singleton is created.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PlatformInitialized {
    /// Key allowed to resolve trade calls.
    pub admin: Pubkey,
}

/// Emitted once when the ID counter is created.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct IdCounterInitialized {
    pub id_counter: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct UserVaultCreated {
    pub user: Pubkey,
    pub user_vault: Pubkey,
}

/// Emitted after lamports move from a user's wallet into their vault.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct VaultDeposited {
    pub user: Pubkey,
    /// Lamports deposited.
    pub amount: u64,
    /// Vault deposit after the transfer.
    pub deposited_amount: u64,
}

/// Emitted after lamports move from a vault back to its owner.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct VaultWithdrawn {
    pub user: Pubkey,
    /// Lamports withdrawn.
    pub amount: u64,
    /// Vault deposit after the transfer.
    pub deposited_amount: u64,
}

/// Emitted when a caller stakes on a new trade call.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct TradeCallCreated {
    pub id: u64,
    pub trade_call: Pubkey,
    pub caller: Pubkey,
    pub token_address: Pubkey,
    /// Stake in lamports.
    pub staked_amount: u64,
    pub timestamp: i64,
}

/// Emitted when a follower joins a call and has the follow fee reserved.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct TradeCallFollowed {
    pub id: u64,
    pub follower: Pubkey,
    pub reserved_fee: u64,
    /// Follower count including this follower.
    pub follower_count: u32,
}

/// Emitted on either terminal transition.
///
/// On success `caller_payout` is the stake returned to the caller's vault;
/// on failure it is zero and `payout_per_follower` holds each claimable share.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct TradeCallResolved {
    pub id: u64,
    pub status: TradeCallStatus,
    pub caller_payout: u64,
    pub payout_per_follower: u64,
    /// Stake left over by the equal split, never paid out.
    pub undistributed_remainder: u64,
}

/// Emitted when a follower claims their share of a failed call.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct FollowerShareClaimed {
    pub id: u64,
    pub follower: Pubkey,
    /// Lamports paid to the follower.
    pub amount: u64,
}

/// Emitted when a follower's reservation on a successful call is released.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct FollowerReservationReleased {
    pub id: u64,
    pub follower: Pubkey,
    pub released_fee: u64,
}
