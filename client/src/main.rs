use anyhow::{format_err, Result};
use clap::Parser;
use colorful::{Color, Colorful};
use configparser::ini::Ini;
use credcalls::states::{IdCounter, TradeCall, TradeCallStatus, UserVault};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::str::FromStr;

mod instructions;
mod scanner;
use instructions::program_instructions::*;
use instructions::rpc::*;
use instructions::utils::*;
use scanner::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    admin_path: String,
    credcalls_program: Pubkey,
}

fn required(config: &Ini, key: &str) -> Result<String> {
    let value = config
        .get("Global", key)
        .ok_or_else(|| format_err!("{} is missing from [Global]", key))?;
    if value.is_empty() {
        return Err(format_err!("{} must not be empty", key));
    }
    Ok(value)
}

fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|e| format_err!("failed to load {}: {}", client_config, e))?;

    let http_url = required(&config, "http_url")?;
    let ws_url = required(&config, "ws_url")?;
    let payer_path = required(&config, "payer_path")?;
    let admin_path = required(&config, "admin_path")?;
    let credcalls_program_str = required(&config, "credcalls_program")?;
    let credcalls_program = Pubkey::from_str(&credcalls_program_str)
        .map_err(|e| format_err!("invalid credcalls_program: {}", e))?;

    Ok(ClientConfig {
        http_url,
        ws_url,
        payer_path,
        admin_path,
        credcalls_program,
    })
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: CredcallsCommands,
}

#[derive(Debug, Parser)]
pub enum CredcallsCommands {
    InitializePlatform {
        #[arg(long)]
        admin: Pubkey,
    },
    InitializeIdCounter {},
    CreateUserVault {},
    Deposit {
        #[arg(long)]
        amount: u64,
    },
    Withdraw {
        #[arg(long)]
        amount: u64,
    },
    CreateTradeCall {
        #[arg(long)]
        token_address: Pubkey,
        #[arg(long)]
        stake_amount: u64,
    },
    FollowTrade {
        #[arg(long)]
        id: u64,
    },
    ResolveSuccess {
        #[arg(long)]
        id: u64,
    },
    ResolveFailure {
        #[arg(long)]
        id: u64,
    },
    ClaimShare {
        #[arg(long)]
        id: u64,
    },
    ReleaseReservation {
        #[arg(long)]
        id: u64,
    },
    ShowCall {
        #[arg(long)]
        id: u64,
    },
    ShowVault {
        #[arg(long)]
        user: Option<Pubkey>,
    },
    ListCalls {
        #[arg(long)]
        json: bool,
    },
    ClaimStatus {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        user: Option<Pubkey>,
    },
}

fn submit(rpc_client: &RpcClient, instructions: &[Instruction], signers: &[&Keypair]) -> Result<()> {
    let fee_payer = signers
        .first()
        .ok_or_else(|| format_err!("no signer for transaction"))?;
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn = Transaction::new_signed_with_payer(
        instructions,
        Some(&fee_payer.pubkey()),
        signers,
        recent_hash,
    );
    let signature = send_txn(rpc_client, &txn, true)?;
    println!("{}", signature);
    Ok(())
}

fn load_trade_call(rpc_client: &RpcClient, program_id: &Pubkey, id: u64) -> Result<TradeCall> {
    let address = get_trade_call_address(id, program_id);
    let account = fetch_account(rpc_client, &address)?
        .ok_or_else(|| format_err!("trade call #{} not found at {}", id, address))?;
    deserialize_anchor_account::<TradeCall>(&account)
}

fn colored_status(status: TradeCallStatus) -> String {
    let label = status_label(status);
    match status {
        TradeCallStatus::Active => label.color(Color::Yellow).to_string(),
        TradeCallStatus::Successful => label.color(Color::Green).to_string(),
        TradeCallStatus::Failed => label.color(Color::Red).to_string(),
    }
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let config = load_cfg(client_config)?;
    let payer = read_keypair_file(&config.payer_path)?;
    let rpc_client = RpcClient::new(config.http_url.to_string());
    let program_id = config.credcalls_program;

    let opts = Opts::parse();
    match opts.command {
        CredcallsCommands::InitializePlatform { admin } => {
            let ixs = initialize_platform_instr(&config, admin)?;
            submit(&rpc_client, &ixs, &[&payer])?;
        }
        CredcallsCommands::InitializeIdCounter {} => {
            let admin = read_keypair_file(&config.admin_path)?;
            let ixs = initialize_id_counter_instr(&config)?;
            submit(&rpc_client, &ixs, &[&admin])?;
        }
        CredcallsCommands::CreateUserVault {} => {
            let ixs = create_user_vault_instr(&config)?;
            submit(&rpc_client, &ixs, &[&payer])?;
        }
        CredcallsCommands::Deposit { amount } => {
            let ixs = deposit_to_vault_instr(&config, amount)?;
            submit(&rpc_client, &ixs, &[&payer])?;
        }
        CredcallsCommands::Withdraw { amount } => {
            let ixs = withdraw_from_vault_instr(&config, amount)?;
            submit(&rpc_client, &ixs, &[&payer])?;
        }
        CredcallsCommands::CreateTradeCall {
            token_address,
            stake_amount,
        } => {
            let counter_address = get_id_counter_address(&program_id);
            let counter_account = fetch_account(&rpc_client, &counter_address)?
                .ok_or_else(|| format_err!("id counter is not initialized"))?;
            let counter = deserialize_anchor_account::<IdCounter>(&counter_account)?;
            let next_id = counter.value;

            let ixs = create_trade_call_instr(&config, next_id, token_address, stake_amount)?;
            submit(&rpc_client, &ixs, &[&payer])?;
            println!(
                "trade call #{} at {}",
                next_id,
                get_trade_call_address(next_id, &program_id)
            );
        }
        CredcallsCommands::FollowTrade { id } => {
            let ixs = follow_trade_instr(&config, id)?;
            submit(&rpc_client, &ixs, &[&payer])?;
        }
        CredcallsCommands::ResolveSuccess { id } => {
            let admin = read_keypair_file(&config.admin_path)?;
            let call = load_trade_call(&rpc_client, &program_id, id)?;
            let ixs = resolve_trade_call_success_instr(&config, id, call.caller)?;
            submit(&rpc_client, &ixs, &[&admin])?;
        }
        CredcallsCommands::ResolveFailure { id } => {
            let admin = read_keypair_file(&config.admin_path)?;
            let ixs = resolve_trade_call_failure_all_instr(&config, id)?;
            submit(&rpc_client, &ixs, &[&admin])?;
        }
        CredcallsCommands::ClaimShare { id } => {
            let ixs = claim_follower_share_instr(&config, id)?;
            submit(&rpc_client, &ixs, &[&payer])?;
        }
        CredcallsCommands::ReleaseReservation { id } => {
            let ixs = release_follower_reservation_instr(&config, id)?;
            submit(&rpc_client, &ixs, &[&payer])?;
        }
        CredcallsCommands::ShowCall { id } => {
            let call = load_trade_call(&rpc_client, &program_id, id)?;
            println!("{:#?}", call);
            println!("status: {}", colored_status(call.status));
        }
        CredcallsCommands::ShowVault { user } => {
            let user = user.unwrap_or_else(|| payer.pubkey());
            let address = get_user_vault_address(&user, &program_id);
            let account = fetch_account(&rpc_client, &address)?
                .ok_or_else(|| format_err!("no vault for {} at {}", user, address))?;
            let vault = deserialize_anchor_account::<UserVault>(&account)?;
            println!("{:#?}", vault);
            let available = vault
                .available()
                .map_err(|e| format_err!("corrupt vault {}: {}", address, e))?;
            println!("available: {}", available);
        }
        CredcallsCommands::ListCalls { json } => {
            let accounts = fetch_program_accounts(&rpc_client, &program_id)?;
            let report = scan_accounts(
                accounts
                    .into_iter()
                    .map(|(address, account)| (address, account.data)),
            );
            if json {
                let rows: Vec<CallRow> = report
                    .calls
                    .iter()
                    .map(|(address, call)| CallRow::new(address, call))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for (address, call) in &report.calls {
                    println!(
                        "#{:<6} {} {:>12} {:>3} followers  {}  {}",
                        call.id,
                        address,
                        call.staked_amount,
                        call.followers.len(),
                        colored_status(call.status),
                        call.token_address
                    );
                }
                println!(
                    "{} calls, {} vaults, {} skipped ({} corrupt, {} foreign)",
                    report.calls.len(),
                    report.vaults,
                    report.skipped.len(),
                    report.corrupt_count(),
                    report.foreign_count()
                );
            }
            for skipped in &report.skipped {
                eprintln!(
                    "skipped {} ({:?}, prefix {})",
                    skipped.address, skipped.reason, skipped.prefix
                );
            }
        }
        CredcallsCommands::ClaimStatus { id, user } => {
            let user = user.unwrap_or_else(|| payer.pubkey());
            let call = load_trade_call(&rpc_client, &program_id, id)?;
            println!("{:?}", claim_status(&call, &user));
        }
    }
    Ok(())
}
