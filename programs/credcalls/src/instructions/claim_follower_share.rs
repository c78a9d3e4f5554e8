use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::prepare_program_transfer;
use crate::FOLLOW_FEE_LAMPORTS;
use anchor_lang::prelude::*;

/// Accounts context for `claim_follower_share`.
///
/// Funds movement:
/// - `payout_per_follower` lamports move from the call account to the
///   follower's wallet.
/// - The follow fee reserved in the follower's vault is released.
#[derive(Accounts)]
pub struct ClaimFollowerShare<'info> {
    #[account(mut)]
    pub follower: Signer<'info>,

    #[account(
        mut,
        seeds = [
            TRADE_CALL_SEED.as_bytes(),
            trade_call.id.to_le_bytes().as_ref()
        ],
        bump,
    )]
    pub trade_call: Account<'info, TradeCall>,

    #[account(
        mut,
        seeds = [
            USER_VAULT_SEED.as_bytes(),
            follower.key().as_ref()
        ],
        bump,
        constraint = user_vault.user == follower.key() @ ErrorCode::SignerMismatch,
    )]
    pub user_vault: Account<'info, UserVault>,

    pub system_program: Program<'info, System>,
}

/// Pays a follower their equal share of a failed call, once.
pub fn claim_follower_share(ctx: Context<ClaimFollowerShare>) -> Result<()> {
    let follower = ctx.accounts.follower.key();
    let trade_call_info = ctx.accounts.trade_call.to_account_info();
    let follower_info = ctx.accounts.follower.to_account_info();

    // --- Validate everything before any write ---
    let mut staged_call = TradeCall::clone(&ctx.accounts.trade_call);
    let mut staged_vault = UserVault::clone(&ctx.accounts.user_vault);
    let payout = staged_call.record_claim(follower, &mut staged_vault, FOLLOW_FEE_LAMPORTS)?;
    let transfer = prepare_program_transfer(&trade_call_info, &follower_info, payout)?;

    // --- Apply ---
    ctx.accounts.trade_call.set_inner(staged_call);
    ctx.accounts.user_vault.set_inner(staged_vault);
    transfer.commit()?;

    let id = ctx.accounts.trade_call.id;
    msg!("{} claimed {} lamports from trade call #{}", follower, payout, id);
    emit!(FollowerShareClaimed {
        id,
        follower,
        amount: payout,
    });
    Ok(())
}
