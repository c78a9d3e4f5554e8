use crate::error::ErrorCode;
use crate::states::*;
use crate::FOLLOW_FEE_LAMPORTS;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct FollowTrade<'info> {
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

    /// Follower's vault; the follow fee is reserved here.
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

/// Joins an active call and reserves `FOLLOW_FEE_LAMPORTS` in the follower's
/// vault. No lamports move.
pub fn follow_trade(ctx: Context<FollowTrade>) -> Result<()> {
    let follower = ctx.accounts.follower.key();
    let trade_call = &mut ctx.accounts.trade_call;
    let user_vault = &mut ctx.accounts.user_vault;

    trade_call.follow(follower, user_vault, FOLLOW_FEE_LAMPORTS)?;
    msg!(
        "{} follows trade call #{} ({} followers)",
        follower,
        trade_call.id,
        trade_call.followers.len()
    );

    emit!(TradeCallFollowed {
        id: trade_call.id,
        follower,
        reserved_fee: FOLLOW_FEE_LAMPORTS,
        follower_count: trade_call.followers.len() as u32,
    });
    Ok(())
}
