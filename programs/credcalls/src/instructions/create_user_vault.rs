use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{create_pda_account, store_account};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct CreateUserVault<'info> {
    /// Vault owner; pays rent.
    #[account(mut)]
    pub user: Signer<'info>,

    /// Per-user vault PDA (`USER_VAULT_SEED + user`), created here.
    ///
    /// CHECK: PDA derivation enforced via seeds; must be unallocated.
    #[account(
        mut,
        seeds = [
            USER_VAULT_SEED.as_bytes(),
            user.key().as_ref()
        ],
        bump,
    )]
    pub user_vault: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Creates an empty vault for the signer; fails with `AlreadyExists` if the
/// signer already has one.
pub fn create_user_vault(ctx: Context<CreateUserVault>) -> Result<()> {
    let user = ctx.accounts.user.key();
    let bump = ctx.bumps.user_vault;
    let seeds: &[&[u8]] = &[USER_VAULT_SEED.as_bytes(), user.as_ref(), &[bump]];
    create_pda_account(
        ctx.accounts.user.to_account_info(),
        ctx.accounts.user_vault.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        UserVault::LEN,
        seeds,
        ErrorCode::AlreadyExists,
    )?;
    store_account(&ctx.accounts.user_vault.to_account_info(), &UserVault::new(user))?;
    msg!("User vault created for: {}", user);

    emit!(UserVaultCreated {
        user,
        user_vault: ctx.accounts.user_vault.key(),
    });
    Ok(())
}
