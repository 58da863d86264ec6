use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{
    transfer_checked_with_fee, Mint, Token2022, TokenAccount, TransferCheckedWithFee,
};
use crate::errors::*;
use crate::events::*;
use crate::fee::transfer_fee_for;
use crate::state::*;

#[derive(Accounts)]
pub struct TransferTokens<'info> {
    #[account(mut)]
    pub sender: Signer<'info>,

    /// CHECK: Any wallet may receive tokens
    pub recipient: UncheckedAccount<'info>,

    #[account(mint::token_program = token_program)]
    pub mint: InterfaceAccount<'info, Mint>,

    /// Only mints created by this program can move through here
    #[account(
        seeds = [IssuerState::SEED, mint.key().as_ref()],
        bump = issuer_state.bump,
        has_one = mint,
    )]
    pub issuer_state: Account<'info, IssuerState>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = sender,
        associated_token::token_program = token_program,
    )]
    pub sender_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = sender,
        associated_token::mint = mint,
        associated_token::authority = recipient,
        associated_token::token_program = token_program,
    )]
    pub recipient_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Transfer tokens, letting Token-2022 withhold the configured fee in the
/// recipient's account.
pub fn handler(ctx: Context<TransferTokens>, amount: u64) -> Result<()> {
    require!(amount > 0, TokenIssuerError::InvalidAmount);
    require!(
        ctx.accounts.sender_token_account.amount >= amount,
        TokenIssuerError::InsufficientFunds
    );

    let mint_info = ctx.accounts.mint.to_account_info();
    let fee = {
        let mint_data = mint_info.try_borrow_data()?;
        transfer_fee_for(&mint_data, Clock::get()?.epoch, amount)?
    };

    msg!("Transferring {} tokens (fee {})", amount, fee);
    msg!("From: {}", ctx.accounts.sender.key());
    msg!("To: {}", ctx.accounts.recipient.key());

    transfer_checked_with_fee(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferCheckedWithFee {
                token_program_id: ctx.accounts.token_program.to_account_info(),
                source: ctx.accounts.sender_token_account.to_account_info(),
                mint: mint_info,
                destination: ctx.accounts.recipient_token_account.to_account_info(),
                authority: ctx.accounts.sender.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.mint.decimals,
        fee,
    )?;

    emit!(TokensTransferred {
        mint: ctx.accounts.mint.key(),
        sender: ctx.accounts.sender.key(),
        recipient: ctx.accounts.recipient.key(),
        amount,
        fee,
    });

    msg!("✓ Transferred {} tokens, {} withheld as fee", amount.saturating_sub(fee), fee);

    Ok(())
}
