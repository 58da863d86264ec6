use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{self, Mint, MintTo, Token2022, TokenAccount};
use crate::errors::*;
use crate::events::*;
use crate::state::*;

#[derive(Accounts)]
pub struct MintTokens<'info> {
    /// Must hold the mint authority, pays for the recipient account if missing
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        mint::token_program = token_program,
        constraint = mint.mint_authority.contains(&creator.key()) @ TokenIssuerError::Unauthorized,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [IssuerState::SEED, mint.key().as_ref()],
        bump = issuer_state.bump,
        has_one = mint,
    )]
    pub issuer_state: Account<'info, IssuerState>,

    /// CHECK: Any wallet may receive newly minted tokens
    pub recipient: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = recipient,
        associated_token::token_program = token_program,
    )]
    pub recipient_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Mint `amount` new tokens to the recipient's associated token account.
///
/// Supply and the recipient balance are both bumped by a single `MintTo`,
/// no transfer fee applies to minting.
pub fn handler(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
    let (supply, balance) = checked_issue(
        ctx.accounts.mint.supply,
        ctx.accounts.recipient_token_account.amount,
        amount,
    )?;

    msg!("Minting {} tokens", amount);
    msg!("Mint: {}", ctx.accounts.mint.key());
    msg!("Recipient: {}", ctx.accounts.recipient.key());

    token_interface::mint_to(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.recipient_token_account.to_account_info(),
                authority: ctx.accounts.creator.to_account_info(),
            },
        ),
        amount,
    )?;

    let state = &mut ctx.accounts.issuer_state;
    state.record_mint(amount)?;

    emit!(TokensMinted {
        mint: state.mint,
        recipient: ctx.accounts.recipient.key(),
        amount,
        supply,
    });

    msg!("✓ Minted {} tokens", amount);
    msg!("Supply: {}", supply);
    msg!("Recipient balance: {}", balance);
    msg!("Mints issued: {}", state.mint_count);

    Ok(())
}
