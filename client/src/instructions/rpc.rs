use anyhow::Result;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcSendTransactionConfig},
};
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};

pub fn send_txn(client: &RpcClient, txn: &Transaction, wait_confirm: bool) -> Result<Signature> {
    Ok(client.send_and_confirm_transaction_with_spinner_and_config(
        txn,
        if wait_confirm {
            CommitmentConfig::confirmed()
        } else {
            CommitmentConfig::processed()
        },
        RpcSendTransactionConfig {
            skip_preflight: true,
            ..RpcSendTransactionConfig::default()
        },
    )?)
}

/// Fetches a single account, `None` if it does not exist.
pub fn fetch_account(client: &RpcClient, address: &Pubkey) -> Result<Option<Account>> {
    Ok(client
        .get_account_with_commitment(address, CommitmentConfig::confirmed())?
        .value)
}

/// Fetches every account owned by `program_id`, undecoded.
pub fn fetch_program_accounts(
    client: &RpcClient,
    program_id: &Pubkey,
) -> Result<Vec<(Pubkey, Account)>> {
    Ok(client.get_program_accounts_with_config(
        program_id,
        RpcProgramAccountsConfig {
            filters: None,
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(CommitmentConfig::confirmed()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        },
    )?)
}
