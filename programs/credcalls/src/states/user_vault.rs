use crate::error::ErrorCode;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// UserVault Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each user's vault.
pub const USER_VAULT_SEED: &str = "user_vault";

/// Custodial collateral account for a single user.
///
/// Derived from `USER_VAULT_SEED + user_pubkey`. The account's lamports are
/// its rent-exempt minimum plus `deposited_amount`.
///
/// `reserved_fee` is the part of the deposit earmarked by open follows. It is
/// never larger than `deposited_amount`; every method below checks all of its
/// preconditions before writing a field.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct UserVault {
    /// Owner of the vault.
    pub user: Pubkey,

    /// Collateral held for the owner, in lamports.
    pub deposited_amount: u64,

    /// Portion of `deposited_amount` reserved by active follows.
    pub reserved_fee: u64,
}

impl UserVault {
    /// Fixed serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 32: user pubkey
    /// - 8 * 2: two `u64` fields
    pub const LEN: usize = 8 + 32 + 8 * 2;

    pub fn new(user: Pubkey) -> Self {
        Self {
            user,
            deposited_amount: 0,
            reserved_fee: 0,
        }
    }

    /// Deposit not earmarked by any follow.
    pub fn available(&self) -> Result<u64> {
        Ok(self
            .deposited_amount
            .checked_sub(self.reserved_fee)
            .ok_or(ErrorCode::ArithmeticError)?)
    }

    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        self.deposited_amount = self
            .deposited_amount
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticError)?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, ErrorCode::InvalidAmount);
        require!(self.available()? >= amount, ErrorCode::InsufficientWithdraw);
        self.deposited_amount = self
            .deposited_amount
            .checked_sub(amount)
            .ok_or(ErrorCode::ArithmeticError)?;
        Ok(())
    }

    /// Earmarks `fee` of the unreserved deposit.
    pub fn reserve_fee(&mut self, fee: u64) -> Result<()> {
        require!(self.deposited_amount > 0, ErrorCode::NoDeposit);
        require!(self.available()? >= fee, ErrorCode::InsufficientDeposit);
        self.reserved_fee = self
            .reserved_fee
            .checked_add(fee)
            .ok_or(ErrorCode::ArithmeticError)?;
        Ok(())
    }

    /// Drops a reservation; the deposit itself is untouched and becomes
    /// withdrawable again.
    pub fn release_fee(&mut self, fee: u64) -> Result<()> {
        self.reserved_fee = self
            .reserved_fee
            .checked_sub(fee)
            .ok_or(ErrorCode::ArithmeticError)?;
        Ok(())
    }

    /// Credits a payout that has already been moved into the vault account.
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.deposited_amount = self
            .deposited_amount
            .checked_add(amount)
            .ok_or(ErrorCode::ArithmeticError)?;
        Ok(())
    }
}
