pub mod codec;
pub use codec::*;

pub mod events;
pub use events::*;

pub mod platform_state;
pub use platform_state::*;

pub mod id_counter;
pub use id_counter::*;

pub mod user_vault;
pub use user_vault::*;

pub mod trade_call;
pub use trade_call::*;
