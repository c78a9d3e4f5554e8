use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{create_pda_account, store_account};
use anchor_lang::prelude::*;

/// Accounts context for `initialize_platform`.
///
/// The platform PDA is created by the handler rather than with `init` so that
/// a second attempt fails with `AlreadyInitialized`.
#[derive(Accounts)]
pub struct InitializePlatform<'info> {
    /// Platform singleton PDA (created here).
    ///
    /// CHECK: PDA derivation enforced via seeds; must be unallocated.
    #[account(
        mut,
        seeds = [PLATFORM_SEED.as_bytes()],
        bump,
    )]
    pub platform_state: UncheckedAccount<'info>,

    /// Pays rent for the platform account.
    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Creates the platform singleton and fixes its resolution authority.
pub fn initialize_platform(ctx: Context<InitializePlatform>, admin: Pubkey) -> Result<()> {
    require_keys_neq!(admin, Pubkey::default(), ErrorCode::NotAuthorized);

    let bump = ctx.bumps.platform_state;
    let seeds: &[&[u8]] = &[PLATFORM_SEED.as_bytes(), &[bump]];
    create_pda_account(
        ctx.accounts.payer.to_account_info(),
        ctx.accounts.platform_state.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        PlatformState::LEN,
        seeds,
        ErrorCode::AlreadyInitialized,
    )?;
    store_account(
        &ctx.accounts.platform_state.to_account_info(),
        &PlatformState { admin },
    )?;
    msg!("Platform initialized with admin: {}", admin);

    emit!(PlatformInitialized { admin });
    Ok(())
}
