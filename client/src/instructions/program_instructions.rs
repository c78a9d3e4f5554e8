use anchor_client::{Client, Cluster, Program};
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Keypair, system_program};

use credcalls::accounts as credcalls_accounts;
use credcalls::instruction as credcalls_instructions;
use std::rc::Rc;

use crate::instructions::utils::get_id_counter_address;
use crate::instructions::utils::get_platform_address;
use crate::instructions::utils::get_trade_call_address;
use crate::instructions::utils::get_user_vault_address;

use super::super::{read_keypair_file, ClientConfig};

/// Anchor program handle whose payer is the keypair at `keypair_path`.
fn program_for(config: &ClientConfig, keypair_path: &str) -> Result<Program<Rc<Keypair>>> {
    let signer = read_keypair_file(keypair_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    let client = Client::new(url, Rc::new(signer));
    Ok(client.program(config.credcalls_program)?)
}

pub fn initialize_platform_instr(config: &ClientConfig, admin: Pubkey) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::InitializePlatform {
            platform_state: get_platform_address(&program.id()),
            payer: program.payer(),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::InitializePlatform { admin })
        .instructions()?;
    Ok(instructions)
}

/// Signed by the platform admin.
pub fn initialize_id_counter_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::InitializeIdCounter {
            admin: program.payer(),
            platform_state: get_platform_address(&program.id()),
            id_counter: get_id_counter_address(&program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::InitializeIdCounter {})
        .instructions()?;
    Ok(instructions)
}

pub fn create_user_vault_instr(config: &ClientConfig) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::CreateUserVault {
            user: program.payer(),
            user_vault: get_user_vault_address(&program.payer(), &program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::CreateUserVault {})
        .instructions()?;
    Ok(instructions)
}

pub fn deposit_to_vault_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::DepositToVault {
            user: program.payer(),
            user_vault: get_user_vault_address(&program.payer(), &program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::DepositToVault { amount })
        .instructions()?;
    Ok(instructions)
}

pub fn withdraw_from_vault_instr(config: &ClientConfig, amount: u64) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::WithdrawFromVault {
            user: program.payer(),
            user_vault: get_user_vault_address(&program.payer(), &program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::WithdrawFromVault { amount })
        .instructions()?;
    Ok(instructions)
}

/// `next_id` must be the counter's current value; the trade call address is
/// derived from it.
pub fn create_trade_call_instr(
    config: &ClientConfig,
    next_id: u64,
    token_address: Pubkey,
    stake_amount: u64,
) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::CreateTradeCall {
            authority: program.payer(),
            id_counter: get_id_counter_address(&program.id()),
            caller_vault: get_user_vault_address(&program.payer(), &program.id()),
            trade_call: get_trade_call_address(next_id, &program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::CreateTradeCall {
            token_address,
            stake_amount,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn follow_trade_instr(config: &ClientConfig, id: u64) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::FollowTrade {
            follower: program.payer(),
            trade_call: get_trade_call_address(id, &program.id()),
            user_vault: get_user_vault_address(&program.payer(), &program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::FollowTrade {})
        .instructions()?;
    Ok(instructions)
}

/// Signed by the platform admin. `caller` is the trade call's creator.
pub fn resolve_trade_call_success_instr(
    config: &ClientConfig,
    id: u64,
    caller: Pubkey,
) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::ResolveTradeCallSuccess {
            admin: program.payer(),
            platform_state: get_platform_address(&program.id()),
            trade_call: get_trade_call_address(id, &program.id()),
            caller_vault: get_user_vault_address(&caller, &program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::ResolveTradeCallSuccess {})
        .instructions()?;
    Ok(instructions)
}

/// Signed by the platform admin.
pub fn resolve_trade_call_failure_all_instr(
    config: &ClientConfig,
    id: u64,
) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.admin_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::ResolveTradeCallFailureAll {
            admin: program.payer(),
            platform_state: get_platform_address(&program.id()),
            trade_call: get_trade_call_address(id, &program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::ResolveTradeCallFailureAll {})
        .instructions()?;
    Ok(instructions)
}

pub fn claim_follower_share_instr(config: &ClientConfig, id: u64) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::ClaimFollowerShare {
            follower: program.payer(),
            trade_call: get_trade_call_address(id, &program.id()),
            user_vault: get_user_vault_address(&program.payer(), &program.id()),
            system_program: system_program::id(),
        })
        .args(credcalls_instructions::ClaimFollowerShare {})
        .instructions()?;
    Ok(instructions)
}

pub fn release_follower_reservation_instr(
    config: &ClientConfig,
    id: u64,
) -> Result<Vec<Instruction>> {
    let program = program_for(config, &config.payer_path)?;

    let instructions = program
        .request()
        .accounts(credcalls_accounts::ReleaseFollowerReservation {
            follower: program.payer(),
            trade_call: get_trade_call_address(id, &program.id()),
            user_vault: get_user_vault_address(&program.payer(), &program.id()),
        })
        .args(credcalls_instructions::ReleaseFollowerReservation {})
        .instructions()?;
    Ok(instructions)
}
