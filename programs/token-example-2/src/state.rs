use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address_with_program_id;

use crate::errors::*;

/// Per-mint issuer record, seeds: ["issuer", mint]
#[account]
#[derive(InitSpace)]
pub struct IssuerState {
    pub creator: Pubkey,                 // Mint authority and withdraw-withheld authority
    pub mint: Pubkey,
    pub transfer_fee_basis_points: u16,  // Fee schedule attached at initialization
    pub maximum_fee: u64,
    pub total_minted: u64,
    pub mint_count: u64,
    pub total_fees_withdrawn: u64,
    pub created_at: i64,
    pub bump: u8,
}

impl IssuerState {
    pub const SEED: &'static [u8] = b"issuer";

    /// Every mint created by this program uses 9 decimals
    pub const DECIMALS: u8 = 9;

    /// 100% expressed in basis points
    pub const MAX_FEE_BASIS_POINTS: u16 = 10_000;

    pub fn validate_fee_config(transfer_fee_basis_points: u16) -> Result<()> {
        require!(
            transfer_fee_basis_points <= Self::MAX_FEE_BASIS_POINTS,
            TokenIssuerError::InvalidFeeConfig
        );
        Ok(())
    }

    /// Set once `initialize` has filled the record
    pub fn is_initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }

    pub fn record_mint(&mut self, amount: u64) -> Result<()> {
        let total_minted = self
            .total_minted
            .checked_add(amount)
            .ok_or(TokenIssuerError::Overflow)?;
        let mint_count = self
            .mint_count
            .checked_add(1)
            .ok_or(TokenIssuerError::Overflow)?;

        self.total_minted = total_minted;
        self.mint_count = mint_count;
        Ok(())
    }

    pub fn record_withdrawal(&mut self, amount: u64) -> Result<()> {
        self.total_fees_withdrawn = self
            .total_fees_withdrawn
            .checked_add(amount)
            .ok_or(TokenIssuerError::Overflow)?;
        Ok(())
    }
}

/// Supply and recipient balance after issuing `amount` new tokens.
///
/// Both counters must move together, so either both checked additions
/// succeed or the whole mint is rejected.
pub fn checked_issue(supply: u64, balance: u64, amount: u64) -> Result<(u64, u64)> {
    require!(amount > 0, TokenIssuerError::InvalidAmount);

    let new_supply = supply
        .checked_add(amount)
        .ok_or(TokenIssuerError::Overflow)?;
    let new_balance = balance
        .checked_add(amount)
        .ok_or(TokenIssuerError::Overflow)?;

    Ok((new_supply, new_balance))
}

/// Associated token account of `owner` for `mint` under the Token-2022 program
pub fn recipient_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(owner, mint, &anchor_spl::token_2022::ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_spl::associated_token;

    fn issuer() -> IssuerState {
        IssuerState {
            creator: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            transfer_fee_basis_points: 500,
            maximum_fee: 1_000_000,
            total_minted: 0,
            mint_count: 0,
            total_fees_withdrawn: 0,
            created_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_fee_config_bounds() {
        assert!(IssuerState::validate_fee_config(0).is_ok());
        assert!(IssuerState::validate_fee_config(500).is_ok());
        assert!(IssuerState::validate_fee_config(10_000).is_ok());

        assert_eq!(
            IssuerState::validate_fee_config(10_001).unwrap_err(),
            TokenIssuerError::InvalidFeeConfig.into()
        );
        assert_eq!(
            IssuerState::validate_fee_config(u16::MAX).unwrap_err(),
            TokenIssuerError::InvalidFeeConfig.into()
        );
    }

    #[test]
    fn test_checked_issue() {
        assert_eq!(checked_issue(0, 0, 100_000).unwrap(), (100_000, 100_000));

        // Supply spans every holder, the recipient only holds part of it
        assert_eq!(checked_issue(250, 50, 25).unwrap(), (275, 75));
    }

    #[test]
    fn test_checked_issue_rejects_zero() {
        assert_eq!(
            checked_issue(10, 10, 0).unwrap_err(),
            TokenIssuerError::InvalidAmount.into()
        );
    }

    #[test]
    fn test_checked_issue_overflow() {
        assert_eq!(
            checked_issue(u64::MAX, 0, 1).unwrap_err(),
            TokenIssuerError::Overflow.into()
        );
        assert_eq!(checked_issue(u64::MAX - 1, 0, 1).unwrap(), (u64::MAX, 1));
    }

    #[test]
    fn test_record_mint_is_additive() {
        let mut state = issuer();
        state.record_mint(100_000).unwrap();
        state.record_mint(50).unwrap();

        assert_eq!(state.total_minted, 100_050);
        assert_eq!(state.mint_count, 2);
    }

    #[test]
    fn test_record_mint_overflow_leaves_state() {
        let mut state = issuer();
        state.total_minted = u64::MAX;

        assert_eq!(
            state.record_mint(1).unwrap_err(),
            TokenIssuerError::Overflow.into()
        );
        assert_eq!(state.total_minted, u64::MAX);
        assert_eq!(state.mint_count, 0);
    }

    #[test]
    fn test_record_mint_count_overflow_leaves_state() {
        let mut state = issuer();
        state.total_minted = 10;
        state.mint_count = u64::MAX;

        assert_eq!(
            state.record_mint(1).unwrap_err(),
            TokenIssuerError::Overflow.into()
        );
        assert_eq!(state.total_minted, 10);
        assert_eq!(state.mint_count, u64::MAX);
    }

    #[test]
    fn test_is_initialized() {
        let mut state = issuer();
        assert!(state.is_initialized());

        state.mint = Pubkey::default();
        assert!(!state.is_initialized());
    }

    #[test]
    fn test_record_withdrawal() {
        let mut state = issuer();
        state.record_withdrawal(5_000).unwrap();
        state.record_withdrawal(0).unwrap();
        assert_eq!(state.total_fees_withdrawn, 5_000);

        state.total_fees_withdrawn = u64::MAX;
        assert!(state.record_withdrawal(1).is_err());
    }

    #[test]
    fn test_issuer_state_space() {
        // 2 pubkeys + u16 + 4 * u64 + i64 + bump
        assert_eq!(IssuerState::INIT_SPACE, 32 + 32 + 2 + 8 * 4 + 8 + 1);
    }

    #[test]
    fn test_recipient_token_address_derivation() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let (expected, _) = Pubkey::find_program_address(
            &[
                owner.as_ref(),
                anchor_spl::token_2022::ID.as_ref(),
                mint.as_ref(),
            ],
            &associated_token::ID,
        );

        assert_eq!(recipient_token_address(&owner, &mint), expected);
        assert_ne!(
            recipient_token_address(&owner, &mint),
            recipient_token_address(&mint, &owner)
        );
    }
}
