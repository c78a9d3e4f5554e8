use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

/// Moves lamports from a system-owned signer into any account.
pub fn transfer_from_user<'info>(
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    system_program::transfer(
        CpiContext::new(system_program, Transfer { from, to }),
        amount,
    )
}

/// A checked, not yet applied, lamport move out of a program-owned account.
///
/// Handlers prepare the move alongside their other validations and commit it
/// only once every check of the instruction has passed.
#[must_use]
pub struct LamportTransfer<'a, 'info> {
    from: &'a AccountInfo<'info>,
    to: &'a AccountInfo<'info>,
    from_balance: u64,
    to_balance: u64,
}

impl<'a, 'info> LamportTransfer<'a, 'info> {
    pub fn commit(self) -> Result<()> {
        **self.from.try_borrow_mut_lamports()? = self.from_balance;
        **self.to.try_borrow_mut_lamports()? = self.to_balance;
        Ok(())
    }
}

/// Checks that `amount` can leave `from` (owned by this program) without
/// dropping it below its rent-exempt minimum. Vaults and trade calls are
/// never closed.
pub fn prepare_program_transfer<'a, 'info>(
    from: &'a AccountInfo<'info>,
    to: &'a AccountInfo<'info>,
    amount: u64,
) -> Result<LamportTransfer<'a, 'info>> {
    require_keys_eq!(*from.owner, crate::ID, ErrorCode::TypeMismatch);

    let rent_floor = Rent::get()?.minimum_balance(from.data_len());
    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(ErrorCode::InsufficientFunds)?;
    require_gte!(from_balance, rent_floor, ErrorCode::InsufficientFunds);

    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(ErrorCode::ArithmeticError)?;

    Ok(LamportTransfer {
        from,
        to,
        from_balance,
        to_balance,
    })
}
