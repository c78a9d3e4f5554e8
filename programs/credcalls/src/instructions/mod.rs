pub mod initialize_platform;
pub use initialize_platform::*;

pub mod initialize_id_counter;
pub use initialize_id_counter::*;

pub mod create_user_vault;
pub use create_user_vault::*;

pub mod deposit_to_vault;
pub use deposit_to_vault::*;

pub mod withdraw_from_vault;
pub use withdraw_from_vault::*;

pub mod create_trade_call;
pub use create_trade_call::*;

pub mod follow_trade;
pub use follow_trade::*;

pub mod resolve_trade_call_success;
pub use resolve_trade_call_success::*;

pub mod resolve_trade_call_failure_all;
pub use resolve_trade_call_failure_all::*;

pub mod claim_follower_share;
pub use claim_follower_share::*;

pub mod release_follower_reservation;
pub use release_follower_reservation::*;
