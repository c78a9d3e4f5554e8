use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Platform State Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the platform singleton.
pub const PLATFORM_SEED: &str = "platform";

/// Deployment-wide singleton naming the resolution authority.
///
/// Created once by `initialize_platform`; the admin is fixed from then on.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct PlatformState {
    /// Sole key permitted to resolve trade calls.
    pub admin: Pubkey,
}

impl PlatformState {
    /// Fixed serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 32: admin pubkey
    pub const LEN: usize = 8 + 32;

    pub fn is_admin(&self, key: &Pubkey) -> bool {
        self.admin == *key
    }
}
