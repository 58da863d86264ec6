use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_2022::spl_token_2022::{
    extension::StateWithExtensions, state::Account as TokenAccountState,
};
use anchor_spl::token_interface::{
    harvest_withheld_tokens_to_mint, withdraw_withheld_tokens_from_mint,
    HarvestWithheldTokensToMint, Mint, Token2022, TokenAccount, WithdrawWithheldTokensFromMint,
};
use crate::errors::*;
use crate::events::*;
use crate::fee::withheld_on_mint;
use crate::state::*;

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    /// Creator is the withdraw-withheld authority set at initialization
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        mint::token_program = token_program,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [IssuerState::SEED, mint.key().as_ref()],
        bump = issuer_state.bump,
        has_one = mint,
        has_one = creator @ TokenIssuerError::Unauthorized,
    )]
    pub issuer_state: Account<'info, IssuerState>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = creator,
        associated_token::token_program = token_program,
    )]
    pub creator_token_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Collect withheld transfer fees into the creator's token account.
///
/// remaining_accounts: token accounts of this mint holding withheld fees.
/// They are harvested into the mint first, then the mint is drained.
pub fn handler<'info>(ctx: Context<'_, '_, '_, 'info, WithdrawFees<'info>>) -> Result<()> {
    let mint_key = ctx.accounts.mint.key();
    let token_program_key = ctx.accounts.token_program.key();

    msg!("Withdrawing withheld fees for mint {}", mint_key);

    if !ctx.remaining_accounts.is_empty() {
        for source in ctx.remaining_accounts.iter() {
            require_keys_eq!(*source.owner, token_program_key, TokenIssuerError::InvalidMint);
            require!(source.is_writable, TokenIssuerError::InvalidMint);

            let data = source.try_borrow_data()?;
            let account = StateWithExtensions::<TokenAccountState>::unpack(&data)?;
            require_keys_eq!(account.base.mint, mint_key, TokenIssuerError::InvalidMint);
        }

        harvest_withheld_tokens_to_mint(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                HarvestWithheldTokensToMint {
                    token_program_id: ctx.accounts.token_program.to_account_info(),
                    mint: ctx.accounts.mint.to_account_info(),
                },
            ),
            ctx.remaining_accounts.to_vec(),
        )?;

        msg!("✓ Harvested {} token accounts", ctx.remaining_accounts.len());
    }

    let withheld = {
        let mint_info = ctx.accounts.mint.to_account_info();
        let mint_data = mint_info.try_borrow_data()?;
        withheld_on_mint(&mint_data)?
    };

    if withheld == 0 {
        msg!("No withheld fees to withdraw");
        return Ok(());
    }

    withdraw_withheld_tokens_from_mint(CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        WithdrawWithheldTokensFromMint {
            token_program_id: ctx.accounts.token_program.to_account_info(),
            mint: ctx.accounts.mint.to_account_info(),
            destination: ctx.accounts.creator_token_account.to_account_info(),
            authority: ctx.accounts.creator.to_account_info(),
        },
    ))?;

    let state = &mut ctx.accounts.issuer_state;
    state.record_withdrawal(withheld)?;

    emit!(WithheldFeesWithdrawn {
        mint: mint_key,
        destination: ctx.accounts.creator_token_account.key(),
        amount: withheld,
        total_fees_withdrawn: state.total_fees_withdrawn,
    });

    msg!("✓ Withdrew {} in fees", withheld);
    msg!("Total fees withdrawn: {}", state.total_fees_withdrawn);

    Ok(())
}
