use anchor_lang::prelude::*;

#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

declare_id!("DeTE4KgCH6uZnu7XxcsR62z4ke7Z4LTRxMFZZPd488GY");

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "credcalls",
    project_url: "https://github.com/credcalls/credcalls",
    contacts: "email:security@credcalls.xyz",
    policy: "https://github.com/credcalls/credcalls/blob/main/SECURITY.md",
    source_code: "https://github.com/credcalls/credcalls"
}

/// Lamports reserved in a follower's vault for every call they follow.
pub const FOLLOW_FEE_LAMPORTS: u64 = 10_000_000;

/// Upper bound on `followers` (and `claimed_followers`) per trade call.
/// Trade call accounts are allocated for exactly this many entries.
pub const MAX_FOLLOWERS: usize = 50;

pub mod error;
pub mod instructions;
pub mod states;
pub mod utils;

use instructions::*;

#[program]
pub mod credcalls {

    use super::*;

    pub fn initialize_platform(ctx: Context<InitializePlatform>, admin: Pubkey) -> Result<()> {
        instructions::initialize_platform(ctx, admin)
    }

    pub fn initialize_id_counter(ctx: Context<InitializeIdCounter>) -> Result<()> {
        instructions::initialize_id_counter(ctx)
    }

    pub fn create_user_vault(ctx: Context<CreateUserVault>) -> Result<()> {
        instructions::create_user_vault(ctx)
    }

    pub fn deposit_to_vault(ctx: Context<DepositToVault>, amount: u64) -> Result<()> {
        instructions::deposit_to_vault(ctx, amount)
    }

    pub fn withdraw_from_vault(ctx: Context<WithdrawFromVault>, amount: u64) -> Result<()> {
        instructions::withdraw_from_vault(ctx, amount)
    }

    pub fn create_trade_call(
        ctx: Context<CreateTradeCall>,
        token_address: Pubkey,
        stake_amount: u64,
    ) -> Result<()> {
        instructions::create_trade_call(ctx, token_address, stake_amount)
    }

    pub fn follow_trade(ctx: Context<FollowTrade>) -> Result<()> {
        instructions::follow_trade(ctx)
    }

    pub fn resolve_trade_call_success(ctx: Context<ResolveTradeCallSuccess>) -> Result<()> {
        instructions::resolve_trade_call_success(ctx)
    }

    pub fn resolve_trade_call_failure_all(ctx: Context<ResolveTradeCallFailureAll>) -> Result<()> {
        instructions::resolve_trade_call_failure_all(ctx)
    }

    pub fn claim_follower_share(ctx: Context<ClaimFollowerShare>) -> Result<()> {
        instructions::claim_follower_share(ctx)
    }

    pub fn release_follower_reservation(ctx: Context<ReleaseFollowerReservation>) -> Result<()> {
        instructions::release_follower_reservation(ctx)
    }
}
