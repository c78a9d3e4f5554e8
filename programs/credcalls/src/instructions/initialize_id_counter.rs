use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{create_pda_account, store_account};
use anchor_lang::prelude::*;

/// Accounts context for `initialize_id_counter`.
///
/// Requires the platform to exist; only its admin may create the counter.
#[derive(Accounts)]
pub struct InitializeIdCounter<'info> {
    /// Platform admin; pays rent for the counter.
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

    /// ID counter singleton PDA (created here).
    ///
    /// CHECK: PDA derivation enforced via seeds; must be unallocated.
    #[account(
        mut,
        seeds = [ID_COUNTER_SEED.as_bytes()],
        bump,
    )]
    pub id_counter: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_id_counter(ctx: Context<InitializeIdCounter>) -> Result<()> {
    let bump = ctx.bumps.id_counter;
    let seeds: &[&[u8]] = &[ID_COUNTER_SEED.as_bytes(), &[bump]];
    create_pda_account(
        ctx.accounts.admin.to_account_info(),
        ctx.accounts.id_counter.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        IdCounter::LEN,
        seeds,
        ErrorCode::AlreadyInitialized,
    )?;
    store_account(
        &ctx.accounts.id_counter.to_account_info(),
        &IdCounter::default(),
    )?;
    msg!("ID counter initialized");

    emit!(IdCounterInitialized {
        id_counter: ctx.accounts.id_counter.key(),
    });
    Ok(())
}
