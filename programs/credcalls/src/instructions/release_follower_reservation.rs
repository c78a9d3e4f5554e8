use crate::error::ErrorCode;
use crate::states::*;
use crate::FOLLOW_FEE_LAMPORTS;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ReleaseFollowerReservation<'info> {
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
}

/// Settles a follow on a successful call: the fee reserved at follow time is
/// released and the follower is recorded in `claimed_followers`.
pub fn release_follower_reservation(ctx: Context<ReleaseFollowerReservation>) -> Result<()> {
    let follower = ctx.accounts.follower.key();
    let trade_call = &mut ctx.accounts.trade_call;
    let user_vault = &mut ctx.accounts.user_vault;

    trade_call.record_release(follower, user_vault, FOLLOW_FEE_LAMPORTS)?;
    msg!(
        "Released {} reserved lamports for {} on trade call #{}",
        FOLLOW_FEE_LAMPORTS,
        follower,
        trade_call.id
    );

    emit!(FollowerReservationReleased {
        id: trade_call.id,
        follower,
        released_fee: FOLLOW_FEE_LAMPORTS,
    });
    Ok(())
}
