use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::prepare_program_transfer;
use anchor_lang::prelude::*;

/// Accounts context for `resolve_trade_call_success`.
///
/// Security model:
/// - Only `platform_state.admin` may resolve.
/// - The caller's vault is derived from `trade_call.caller`, so the stake can
///   only go back to the key that posted it.
#[derive(Accounts)]
pub struct ResolveTradeCallSuccess<'info> {
    #[account(
        mut,
        constraint = platform_state.is_admin(&admin.key()) @ ErrorCode::NotAuthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        seeds = [PLATFORM_SEED.as_bytes()],
        bump,
    )]
    pub platform_state: Account<'info, PlatformState>,

    #[account(
        mut,
        seeds = [
            TRADE_CALL_SEED.as_bytes(),
            trade_call.id.to_le_bytes().as_ref()
        ],
        bump,
    )]
    pub trade_call: Account<'info, TradeCall>,

    /// Receives the full stake.
    #[account(
        mut,
        seeds = [
            USER_VAULT_SEED.as_bytes(),
            trade_call.caller.as_ref()
        ],
        bump,
        constraint = caller_vault.user == trade_call.caller @ ErrorCode::SignerMismatch,
    )]
    pub caller_vault: Account<'info, UserVault>,

    pub system_program: Program<'info, System>,
}

/// Resolves an active call as successful.
///
/// The whole stake moves from the call account into the caller's vault and is
/// credited to `deposited_amount`. Followers settle their own reservations
/// afterwards with `release_follower_reservation`.
pub fn resolve_trade_call_success(ctx: Context<ResolveTradeCallSuccess>) -> Result<()> {
    let trade_call_info = ctx.accounts.trade_call.to_account_info();
    let caller_vault_info = ctx.accounts.caller_vault.to_account_info();

    // --- Validate everything before any write ---
    let payout = ctx.accounts.trade_call.success_payout()?;
    let mut staged_vault = UserVault::clone(&ctx.accounts.caller_vault);
    staged_vault.credit(payout)?;
    let transfer = prepare_program_transfer(&trade_call_info, &caller_vault_info, payout)?;

    // --- Apply ---
    ctx.accounts.trade_call.resolve_success()?;
    ctx.accounts.caller_vault.set_inner(staged_vault);
    transfer.commit()?;

    let trade_call = &ctx.accounts.trade_call;
    msg!(
        "Trade call #{} resolved as successful; {} lamports returned to caller",
        trade_call.id,
        payout
    );
    emit!(TradeCallResolved {
        id: trade_call.id,
        status: trade_call.status,
        caller_payout: trade_call.caller_payout,
        payout_per_follower: trade_call.payout_per_follower,
        undistributed_remainder: 0,
    });
    Ok(())
}
