use anchor_lang::prelude::*;

/// Emitted once the mint and its transfer fee extension exist
#[event]
pub struct MintInitialized {
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub decimals: u8,
    pub transfer_fee_basis_points: u16,
    pub maximum_fee: u64,
}

#[event]
pub struct TokensMinted {
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub supply: u64,
}

/// `fee` is withheld in the destination account until harvested
#[event]
pub struct TokensTransferred {
    pub mint: Pubkey,
    pub sender: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub fee: u64,
}

#[event]
pub struct WithheldFeesWithdrawn {
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub total_fees_withdrawn: u64,
}
