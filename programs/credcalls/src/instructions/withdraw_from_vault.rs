use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::prepare_program_transfer;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct WithdrawFromVault<'info> {
    /// Vault owner receiving the lamports.
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

/// Returns unreserved collateral to the vault owner.
///
/// Only `deposited_amount - reserved_fee` is withdrawable; the vault itself
/// always keeps its rent-exempt minimum.
pub fn withdraw_from_vault(ctx: Context<WithdrawFromVault>, amount: u64) -> Result<()> {
    let vault_info = ctx.accounts.user_vault.to_account_info();
    let user_info = ctx.accounts.user.to_account_info();

    let mut staged = UserVault::clone(&ctx.accounts.user_vault);
    staged.withdraw(amount)?;
    let transfer = prepare_program_transfer(&vault_info, &user_info, amount)?;

    ctx.accounts.user_vault.set_inner(staged);
    transfer.commit()?;

    let user_vault = &ctx.accounts.user_vault;
    msg!(
        "Withdrew {} lamports; vault holds {}",
        amount,
        user_vault.deposited_amount
    );
    emit!(VaultWithdrawn {
        user: user_vault.user,
        amount,
        deposited_amount: user_vault.deposited_amount,
    });
    Ok(())
}
