use anchor_lang::{AccountDeserialize, Discriminator};
use anyhow::{format_err, Result};
use credcalls::states::{
    decode_account, ID_COUNTER_SEED, PLATFORM_SEED, TRADE_CALL_SEED, USER_VAULT_SEED,
};
use solana_sdk::{account::Account, pubkey::Pubkey};

/// Decodes a fetched account, failing with the program's own error message
/// when the data is truncated or belongs to another account type.
pub fn deserialize_anchor_account<T: AccountDeserialize + Discriminator>(
    account: &Account,
) -> Result<T> {
    decode_account::<T>(&account.data).map_err(|e| format_err!("{}", e))
}

pub fn get_platform_address(program_id: &Pubkey) -> Pubkey {
    let (platform_state, _bump) =
        Pubkey::find_program_address(&[PLATFORM_SEED.as_bytes()], program_id);
    platform_state
}

pub fn get_id_counter_address(program_id: &Pubkey) -> Pubkey {
    let (id_counter, _bump) =
        Pubkey::find_program_address(&[ID_COUNTER_SEED.as_bytes()], program_id);
    id_counter
}

pub fn get_user_vault_address(user: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (user_vault, _bump) =
        Pubkey::find_program_address(&[USER_VAULT_SEED.as_bytes(), user.as_ref()], program_id);
    user_vault
}

pub fn get_trade_call_address(id: u64, program_id: &Pubkey) -> Pubkey {
    let (trade_call, _bump) = Pubkey::find_program_address(
        &[TRADE_CALL_SEED.as_bytes(), &id.to_le_bytes()],
        program_id,
    );
    trade_call
}
