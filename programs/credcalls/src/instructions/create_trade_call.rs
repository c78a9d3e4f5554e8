use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::transfer_from_user;
use anchor_lang::prelude::*;

/// Accounts context for `create_trade_call`.
///
/// The new call's PDA is derived from the ID it will receive
/// (`id_counter.value`), so the counter must be declared before it.
#[derive(Accounts)]
pub struct CreateTradeCall<'info> {
    /// Caller publishing the call; pays rent and the stake.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Global ID counter, advanced once per call.
    #[account(
        mut,
        seeds = [ID_COUNTER_SEED.as_bytes()],
        bump,
    )]
    pub id_counter: Account<'info, IdCounter>,

    /// Caller's vault. Required up front because a successful resolution
    /// returns the stake into it.
    #[account(
        seeds = [
            USER_VAULT_SEED.as_bytes(),
            authority.key().as_ref()
        ],
        bump,
        constraint = caller_vault.user == authority.key() @ ErrorCode::SignerMismatch,
    )]
    pub caller_vault: Account<'info, UserVault>,

    /// New trade call PDA (`TRADE_CALL_SEED + id_le_bytes`), sized for
    /// `MAX_FOLLOWERS`.
    #[account(
        init,
        seeds = [
            TRADE_CALL_SEED.as_bytes(),
            id_counter.value.to_le_bytes().as_ref()
        ],
        bump,
        payer = authority,
        space = TradeCall::LEN
    )]
    pub trade_call: Account<'info, TradeCall>,

    pub system_program: Program<'info, System>,
}

/// Publishes a new call and moves `stake_amount` lamports into its account.
///
/// Steps:
/// 1. Reject a zero stake.
/// 2. Take the counter's current value as this call's ID and advance it.
/// 3. Transfer the stake from the caller to the call account.
/// 4. Write the call as `Active` with empty follower sets.
pub fn create_trade_call(
    ctx: Context<CreateTradeCall>,
    token_address: Pubkey,
    stake_amount: u64,
) -> Result<()> {
    require!(stake_amount > 0, ErrorCode::InvalidAmount);

    let id = ctx.accounts.id_counter.advance()?;
    let caller = ctx.accounts.authority.key();
    let timestamp = Clock::get()?.unix_timestamp;

    transfer_from_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.trade_call.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        stake_amount,
    )?;

    ctx.accounts.trade_call.set_inner(TradeCall::new(
        id,
        token_address,
        stake_amount,
        caller,
        timestamp,
    ));
    msg!(
        "Trade call #{} created by {} on {} with stake {}",
        id,
        caller,
        token_address,
        stake_amount
    );

    emit!(TradeCallCreated {
        id,
        trade_call: ctx.accounts.trade_call.key(),
        caller,
        token_address,
        staked_amount: stake_amount,
        timestamp,
    });
    Ok(())
}
