//! Reads the Token-2022 transfer fee extension straight from mint data.
//!
//! Fee math (basis points, rounding, cap) stays with the extension itself.

use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::{
    extension::{transfer_fee::TransferFeeConfig, BaseStateWithExtensions, StateWithExtensions},
    state::Mint as MintState,
};
use crate::errors::*;

/// Fee Token-2022 will withhold when `amount` is transferred during `epoch`
pub fn transfer_fee_for(mint_data: &[u8], epoch: u64, amount: u64) -> Result<u64> {
    let mint = StateWithExtensions::<MintState>::unpack(mint_data)?;
    let fee_config = mint.get_extension::<TransferFeeConfig>()?;

    let fee = fee_config
        .calculate_epoch_fee(epoch, amount)
        .ok_or(TokenIssuerError::Overflow)?;
    Ok(fee)
}

/// Fees already harvested into the mint and waiting for withdrawal
pub fn withheld_on_mint(mint_data: &[u8]) -> Result<u64> {
    let mint = StateWithExtensions::<MintState>::unpack(mint_data)?;
    let fee_config = mint.get_extension::<TransferFeeConfig>()?;
    Ok(u64::from(fee_config.withheld_amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::solana_program::program_option::COption;
    use anchor_spl::token_2022::spl_token_2022::extension::{
        BaseStateWithExtensionsMut, ExtensionType, StateWithExtensionsMut,
    };

    fn mint_data(fee_bps: u16, max_fee: u64, withheld: u64) -> Vec<u8> {
        let space = ExtensionType::try_calculate_account_len::<MintState>(&[
            ExtensionType::TransferFeeConfig,
        ])
        .unwrap();
        let mut data = vec![0u8; space];

        let mut state = StateWithExtensionsMut::<MintState>::unpack_uninitialized(&mut data).unwrap();
        let fee_config = state.init_extension::<TransferFeeConfig>(true).unwrap();
        fee_config.newer_transfer_fee.transfer_fee_basis_points = fee_bps.into();
        fee_config.newer_transfer_fee.maximum_fee = max_fee.into();
        fee_config.older_transfer_fee = fee_config.newer_transfer_fee;
        fee_config.withheld_amount = withheld.into();

        state.base = MintState {
            mint_authority: COption::Some(Pubkey::new_unique()),
            supply: 0,
            decimals: 9,
            is_initialized: true,
            freeze_authority: COption::None,
        };
        state.pack_base();
        state.init_account_type().unwrap();

        data
    }

    #[test]
    fn test_fee_follows_basis_points() {
        let data = mint_data(500, 1_000_000, 0);

        // 5% of 100_000
        assert_eq!(transfer_fee_for(&data, 0, 100_000).unwrap(), 5_000);
        assert_eq!(transfer_fee_for(&data, 0, 0).unwrap(), 0);
    }

    #[test]
    fn test_fee_capped_by_maximum() {
        let data = mint_data(500, 1_000_000, 0);

        assert_eq!(transfer_fee_for(&data, 0, 100_000_000).unwrap(), 1_000_000);
        assert_eq!(transfer_fee_for(&data, 0, u64::MAX).unwrap(), 1_000_000);
    }

    #[test]
    fn test_zero_fee_schedule() {
        let data = mint_data(0, 1_000_000, 0);
        assert_eq!(transfer_fee_for(&data, 0, 100_000).unwrap(), 0);
    }

    #[test]
    fn test_withheld_on_mint() {
        assert_eq!(withheld_on_mint(&mint_data(500, 1_000_000, 0)).unwrap(), 0);
        assert_eq!(withheld_on_mint(&mint_data(500, 1_000_000, 7_500)).unwrap(), 7_500);
    }

    #[test]
    fn test_rejects_mint_without_extension() {
        let space = ExtensionType::try_calculate_account_len::<MintState>(&[]).unwrap();
        let mut data = vec![0u8; space];
        let mut state = StateWithExtensionsMut::<MintState>::unpack_uninitialized(&mut data).unwrap();
        state.base = MintState {
            mint_authority: COption::None,
            supply: 0,
            decimals: 9,
            is_initialized: true,
            freeze_authority: COption::None,
        };
        state.pack_base();

        assert!(transfer_fee_for(&data, 0, 100).is_err());
        assert!(withheld_on_mint(&data).is_err());
    }
}
