use crate::utils::parse_ether_value;
use alloy_primitives::U256;
use clap::Parser;
use ethctl_common::ens::TxOverrides;
use eyre::Result;

#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Transaction options")]
pub struct TransactionOpts {
    /// Gas limit for the transaction. Estimated by the node when not set.
    #[arg(long, env = "ETH_GAS_LIMIT")]
    pub gas_limit: Option<u64>,

    /// Gas price for the transaction, either specified in wei, or as a string with a unit type.
    ///
    /// Examples: 1ether, 10gwei, 0.01ether
    #[arg(
        long,
        env = "ETH_GAS_PRICE",
        value_parser = parse_ether_value,
        value_name = "PRICE"
    )]
    pub gas_price: Option<U256>,

    /// Nonce for the transaction.
    #[arg(long)]
    pub nonce: Option<u64>,
}

impl TransactionOpts {
    /// The options to apply on top of what the node suggests.
    pub fn overrides(&self) -> Result<TxOverrides> {
        let gas_price = self
            .gas_price
            .map(|price| {
                u128::try_from(price)
                    .map_err(|_| eyre::eyre!("gas price {price} does not fit in 128 bits"))
            })
            .transpose()?;
        Ok(TxOverrides { gas_limit: self.gas_limit, gas_price, nonce: self.nonce })
    }
}
