use anchor_lang::prelude::*;

#[error_code]
pub enum TokenIssuerError {
    #[msg("Signer is not the authority for this mint")]
    Unauthorized,

    #[msg("Invalid transfer fee config - basis points must be at most 10000")]
    InvalidFeeConfig,

    #[msg("Invalid amount - must be greater than 0")]
    InvalidAmount,

    #[msg("Mint account already initialized")]
    AlreadyInitialized,

    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Insufficient token balance for transfer")]
    InsufficientFunds,

    #[msg("Token account does not belong to this mint")]
    InvalidMint,
}
