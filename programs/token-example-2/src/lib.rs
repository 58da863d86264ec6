use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod fee;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("2DZByGxr4wvH2zYEJREnGSoy4hvoC3FpFNvswpXC7WjX");

#[program]
pub mod token_example_2 {
    use super::*;

    /// Create a Token-2022 mint (9 decimals) with a transfer fee extension.
    /// The creator becomes mint authority, fee config authority and
    /// withdraw-withheld authority.
    pub fn initialize(ctx: Context<Initialize>, fee_bps: u16, max_fee: u64) -> Result<()> {
        instructions::initialize::handler(ctx, fee_bps, max_fee)
    }

    /// Mint new supply to the recipient's associated token account
    pub fn mint(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        instructions::mint::handler(ctx, amount)
    }

    /// Transfer tokens, withholding the mint's transfer fee
    pub fn transfer(ctx: Context<TransferTokens>, amount: u64) -> Result<()> {
        instructions::transfer::handler(ctx, amount)
    }

    /// Harvest withheld fees from the token accounts passed as remaining
    /// accounts and withdraw everything held by the mint to the creator
    pub fn withdraw<'info>(ctx: Context<'_, '_, '_, 'info, WithdrawFees<'info>>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }
}
