use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::transfer_from_user;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct DepositToVault<'info> {
    /// Vault owner funding the deposit.
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [
            USER_VAULT_SEED.as_bytes(),
            user.key().as_ref()
        ],
        bump,
        has_one = user @ ErrorCode::SignerMismatch,
    )]
    pub user_vault: Account<'info, UserVault>,

    pub system_program: Program<'info, System>,
}

/// Moves `amount` lamports from the signer into their vault.
pub fn deposit_to_vault(ctx: Context<DepositToVault>, amount: u64) -> Result<()> {
    let mut staged = UserVault::clone(&ctx.accounts.user_vault);
    staged.deposit(amount)?;

    transfer_from_user(
        ctx.accounts.user.to_account_info(),
        ctx.accounts.user_vault.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        amount,
    )?;
    ctx.accounts.user_vault.set_inner(staged);

    let user_vault = &ctx.accounts.user_vault;
    msg!(
        "Deposited {} lamports; vault holds {}",
        amount,
        user_vault.deposited_amount
    );
    emit!(VaultDeposited {
        user: user_vault.user,
        amount,
        deposited_amount: user_vault.deposited_amount,
    });
    Ok(())
}
