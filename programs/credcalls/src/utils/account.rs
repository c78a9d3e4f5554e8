use crate::error::ErrorCode;
use crate::states::write_account;
use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

/// Creates a program-owned, rent-exempt account at a PDA.
///
/// Fails with `already_exists` when the address is no longer a bare system
/// account (it holds data or has been assigned an owner), so one-time accounts report a precise error instead of the system
/// program's generic "account in use". Lamports sent to the address ahead of
/// time are kept and topped up to the rent-exempt minimum.
pub fn create_pda_account<'info>(
    payer: AccountInfo<'info>,
    target: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    space: usize,
    signer_seeds: &[&[u8]],
    already_exists: ErrorCode,
) -> Result<()> {
    if *target.owner != system_program.key() || !target.data_is_empty() {
        return Err(already_exists.into());
    }

    let rent_lamports = Rent::get()?.minimum_balance(space);
    let current_lamports = target.lamports();

    if current_lamports == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program,
                CreateAccount {
                    from: payer,
                    to: target,
                },
                &[signer_seeds],
            ),
            rent_lamports,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = rent_lamports.saturating_sub(current_lamports);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer {
                    from: payer,
                    to: target.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: target.clone(),
            },
            &[signer_seeds],
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program,
            Assign {
                account_to_assign: target,
            },
            &[signer_seeds],
        ),
        &crate::ID,
    )
}

/// Writes a freshly built account (discriminator included) into `target`.
pub fn store_account<T: AccountSerialize>(target: &AccountInfo, account: &T) -> Result<()> {
    require_keys_eq!(*target.owner, crate::ID, ErrorCode::TypeMismatch);
    let mut data = target.try_borrow_mut_data()?;
    write_account(&mut data, account)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs `create_pda_account` against a target with the given owner and
    /// data; every case here is rejected before any CPI or sysvar access.
    fn try_create(target_owner: Pubkey, mut target_data: Vec<u8>) -> Result<()> {
        let system_id = System::id();
        let loader_id = Pubkey::new_unique();
        let payer_key = Pubkey::new_unique();
        let target_key = Pubkey::new_unique();
        let mut payer_lamports = 1_000_000_000u64;
        let mut target_lamports = 0u64;
        let mut system_lamports = 1u64;
        let mut payer_data: Vec<u8> = Vec::new();
        let mut system_data: Vec<u8> = Vec::new();

        let payer = AccountInfo::new(
            &payer_key,
            true,
            true,
            &mut payer_lamports,
            &mut payer_data,
            &system_id,
            false,
            0,
        );
        let target = AccountInfo::new(
            &target_key,
            false,
            true,
            &mut target_lamports,
            &mut target_data,
            &target_owner,
            false,
            0,
        );
        let system_program = AccountInfo::new(
            &system_id,
            false,
            false,
            &mut system_lamports,
            &mut system_data,
            &loader_id,
            true,
            0,
        );

        create_pda_account(
            payer,
            target,
            system_program,
            16,
            &[b"id_counter".as_ref()],
            ErrorCode::AlreadyInitialized,
        )
    }

    #[test]
    fn test_program_owned_target_is_already_initialized() {
        assert_eq!(
            try_create(crate::ID, vec![0u8; 16]).unwrap_err(),
            ErrorCode::AlreadyInitialized.into()
        );
        assert_eq!(
            try_create(crate::ID, Vec::new()).unwrap_err(),
            ErrorCode::AlreadyInitialized.into()
        );
    }

    #[test]
    fn test_foreign_owned_target_is_already_initialized() {
        assert_eq!(
            try_create(Pubkey::new_unique(), Vec::new()).unwrap_err(),
            ErrorCode::AlreadyInitialized.into()
        );
    }

    #[test]
    fn test_system_owned_target_with_data_is_already_initialized() {
        assert_eq!(
            try_create(System::id(), vec![1u8; 4]).unwrap_err(),
            ErrorCode::AlreadyInitialized.into()
        );
    }
}
