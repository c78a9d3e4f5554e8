use crate::error::ErrorCode;
use crate::states::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ResolveTradeCallFailureAll<'info> {
    #[account(
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

    pub system_program: Program<'info, System>,
}

/// Resolves an active call as failed and fixes each follower's share.
///
/// No lamports move here: the stake stays in the call account and every
/// follower pulls `payout_per_follower` with `claim_follower_share`, so this
/// instruction never has to touch an unbounded number of accounts. The floor
/// division remainder is never paid out.
///
/// A call nobody followed cannot fail (`NoFollowers`); it stays active.
pub fn resolve_trade_call_failure_all(ctx: Context<ResolveTradeCallFailureAll>) -> Result<()> {
    let trade_call = &mut ctx.accounts.trade_call;
    let payout_per_follower = trade_call.resolve_failure()?;
    let undistributed_remainder = trade_call.undistributed_remainder()?;

    msg!(
        "Trade call #{} resolved as failed; {} followers get {} lamports each ({} undistributed)",
        trade_call.id,
        trade_call.followers.len(),
        payout_per_follower,
        undistributed_remainder
    );
    emit!(TradeCallResolved {
        id: trade_call.id,
        status: trade_call.status,
        caller_payout: trade_call.caller_payout,
        payout_per_follower,
        undistributed_remainder,
    });
    Ok(())
}
