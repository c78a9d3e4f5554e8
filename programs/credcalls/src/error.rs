use anchor_lang::prelude::*;

/// Custom error codes, numbered from 6000 in declaration order.
///
/// The first thirteen variants keep the codes already published to clients;
/// new variants are only ever appended.
#[error_code]
pub enum ErrorCode {
    #[msg("Already following this trade call")]
    AlreadyFollowing,

    #[msg("Cannot follow your own trade call")]
    CannotFollowOwnTrade,

    #[msg("No deposit found in user vault")]
    NoDeposit,

    #[msg("Insufficient deposit to reserve fee")]
    InsufficientDeposit,

    #[msg("Trade call already resolved")]
    TradeCallAlreadyResolved,

    #[msg("Trade call is not active")]
    TradeCallNotActive,

    #[msg("Insufficient funds in trade call")]
    InsufficientFunds,

    #[msg("No followers to distribute funds to")]
    NoFollowers,

    #[msg("Not authorized")]
    NotAuthorized,

    #[msg("Not a follower")]
    NotAFollower,

    #[msg("Already claimed")]
    AlreadyClaimed,

    #[msg("Funds not distributed")]
    FundsNotDistributed,

    #[msg("Insufficient deposit to withdraw")]
    InsufficientWithdraw,

    #[msg("Account is already initialized")]
    AlreadyInitialized,

    #[msg("Account already exists")]
    AlreadyExists,

    #[msg("Arithmetic overflow or underflow")]
    ArithmeticError,

    #[msg("Account data is truncated or malformed")]
    CorruptAccount,

    #[msg("Account discriminator does not match the expected type")]
    TypeMismatch,

    #[msg("Trade call has reached its follower capacity")]
    TradeCallFull,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Signer does not own this account")]
    SignerMismatch,
}
