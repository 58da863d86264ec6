use anchor_lang::prelude::*;
use anchor_lang::system_program::{
    allocate, assign, create_account, transfer, Allocate, Assign, CreateAccount, Transfer,
};
use anchor_spl::token_2022::spl_token_2022::{extension::ExtensionType, state::Mint as MintState};
use anchor_spl::token_interface::{
    initialize_mint2, transfer_fee_initialize, InitializeMint2, Token2022, TransferFeeInitialize,
};
use crate::errors::*;
use crate::events::*;
use crate::state::*;

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Creator becomes mint authority and pays for both accounts
    #[account(mut)]
    pub creator: Signer<'info>,

    /// New Token-2022 mint keypair, must still be an empty system account.
    /// It may already hold lamports if someone funded the address upfront.
    #[account(
        mut,
        constraint = mint.data_is_empty() @ TokenIssuerError::AlreadyInitialized,
        constraint = mint.owner == &System::id() @ TokenIssuerError::AlreadyInitialized,
    )]
    pub mint: Signer<'info>,

    /// Existing record is loaded, not created, so a repeat call fails on the
    /// mint checks with `AlreadyInitialized`
    #[account(
        init_if_needed,
        payer = creator,
        space = 8 + IssuerState::INIT_SPACE,
        seeds = [IssuerState::SEED, mint.key().as_ref()],
        bump
    )]
    pub issuer_state: Account<'info, IssuerState>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

/// Create the mint with a transfer fee extension
///
/// Order matters for Token-2022: the account is allocated with room for the
/// extension, the extension is initialized, and only then the base mint.
pub fn handler(ctx: Context<Initialize>, fee_bps: u16, max_fee: u64) -> Result<()> {
    require!(
        !ctx.accounts.issuer_state.is_initialized(),
        TokenIssuerError::AlreadyInitialized
    );
    IssuerState::validate_fee_config(fee_bps)?;

    let creator = ctx.accounts.creator.key();
    let mint = ctx.accounts.mint.key();

    msg!("Initializing mint {}", mint);
    msg!("Creator: {}", creator);
    msg!("Transfer fee: {} bps, max {}", fee_bps, max_fee);

    let mint_space =
        ExtensionType::try_calculate_account_len::<MintState>(&[ExtensionType::TransferFeeConfig])?;
    let lamports = Rent::get()?.minimum_balance(mint_space);

    let funded = ctx.accounts.mint.lamports();
    if funded == 0 {
        create_account(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                CreateAccount {
                    from: ctx.accounts.creator.to_account_info(),
                    to: ctx.accounts.mint.to_account_info(),
                },
            ),
            lamports,
            mint_space as u64,
            &ctx.accounts.token_program.key(),
        )?;
    } else {
        // create_account refuses funded addresses, claim it piecewise
        msg!("Mint address pre-funded with {} lamports", funded);

        let top_up = lamports.saturating_sub(funded);
        if top_up > 0 {
            transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.creator.to_account_info(),
                        to: ctx.accounts.mint.to_account_info(),
                    },
                ),
                top_up,
            )?;
        }

        allocate(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Allocate {
                    account_to_allocate: ctx.accounts.mint.to_account_info(),
                },
            ),
            mint_space as u64,
        )?;

        assign(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Assign {
                    account_to_assign: ctx.accounts.mint.to_account_info(),
                },
            ),
            &ctx.accounts.token_program.key(),
        )?;
    }

    transfer_fee_initialize(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            TransferFeeInitialize {
                token_program_id: ctx.accounts.token_program.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
            },
        ),
        Some(&creator),
        Some(&creator),
        fee_bps,
        max_fee,
    )?;

    initialize_mint2(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            InitializeMint2 {
                mint: ctx.accounts.mint.to_account_info(),
            },
        ),
        IssuerState::DECIMALS,
        &creator,
        None,
    )?;

    let state = &mut ctx.accounts.issuer_state;
    state.creator = creator;
    state.mint = mint;
    state.transfer_fee_basis_points = fee_bps;
    state.maximum_fee = max_fee;
    state.total_minted = 0;
    state.mint_count = 0;
    state.total_fees_withdrawn = 0;
    state.created_at = Clock::get()?.unix_timestamp;
    state.bump = ctx.bumps.issuer_state;

    emit!(MintInitialized {
        mint,
        creator,
        decimals: IssuerState::DECIMALS,
        transfer_fee_basis_points: fee_bps,
        maximum_fee: max_fee,
    });

    msg!("✓ Mint initialized ({} decimals)", IssuerState::DECIMALS);

    Ok(())
}
