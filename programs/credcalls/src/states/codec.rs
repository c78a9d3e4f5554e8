//! Binary account codec.
//!
//! Every account is an 8-byte discriminator followed by its fields in
//! declaration order: little-endian fixed-width integers, raw 32-byte keys,
//! one-byte enums and bools, and vectors as a `u32` length followed by the
//! elements. Decoding never panics; a short buffer reports `CorruptAccount`
//! and a foreign discriminator reports `TypeMismatch`, so bulk readers can
//! skip bad accounts.

use crate::error::ErrorCode;
use crate::states::{IdCounter, PlatformState, TradeCall, UserVault};
use anchor_lang::prelude::*;
use anchor_lang::Discriminator;

pub const DISCRIMINATOR_LEN: usize = 8;

/// Account types owned by this program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountKind {
    PlatformState,
    IdCounter,
    UserVault,
    TradeCall,
}

/// Classifies raw account data by its discriminator.
pub fn identify_account(data: &[u8]) -> Result<AccountKind> {
    let discriminator = data
        .get(..DISCRIMINATOR_LEN)
        .ok_or(ErrorCode::CorruptAccount)?;

    if discriminator == PlatformState::DISCRIMINATOR {
        Ok(AccountKind::PlatformState)
    } else if discriminator == IdCounter::DISCRIMINATOR {
        Ok(AccountKind::IdCounter)
    } else if discriminator == UserVault::DISCRIMINATOR {
        Ok(AccountKind::UserVault)
    } else if discriminator == TradeCall::DISCRIMINATOR {
        Ok(AccountKind::TradeCall)
    } else {
        err!(ErrorCode::TypeMismatch)
    }
}

/// Decodes `data` as `T`, checking the discriminator first.
///
/// Bytes after the last field are ignored; accounts are allocated for their
/// maximum size.
pub fn decode_account<T: AccountDeserialize + Discriminator>(data: &[u8]) -> Result<T> {
    let discriminator = data
        .get(..DISCRIMINATOR_LEN)
        .ok_or(ErrorCode::CorruptAccount)?;
    require!(discriminator == T::DISCRIMINATOR, ErrorCode::TypeMismatch);

    let mut cursor: &[u8] = data;
    T::try_deserialize_unchecked(&mut cursor).map_err(|_| error!(ErrorCode::CorruptAccount))
}

/// Encodes `account` with its discriminator prefix.
pub fn encode_account<T: AccountSerialize>(account: &T) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    account.try_serialize(&mut data)?;
    Ok(data)
}

/// Serializes `account` into the start of `target`, which must be large
/// enough to hold it.
pub fn write_account<T: AccountSerialize>(target: &mut [u8], account: &T) -> Result<()> {
    let encoded = encode_account(account)?;
    let dst = target
        .get_mut(..encoded.len())
        .ok_or(ErrorCode::CorruptAccount)?;
    dst.copy_from_slice(&encoded);
    Ok(())
}
