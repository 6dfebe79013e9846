use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, B256, Bytes};
use alloy_provider::{Provider, ProviderBuilder as AlloyProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use ethctl_common::{
    ens::{
        EnsClient, EnsRegistry, EnsWrite, MultiaddrResolver, SentTransaction, TxOpts, TxOverrides,
    },
    provider::{EthProvider, ProviderBuilder},
};
use ethctl_config::Config;
use ethctl_wallets::WalletOpts;
use eyre::Result;
use std::{path::PathBuf, sync::OnceLock};

/// [`EnsClient`] talking to a JSON-RPC node.
///
/// The owner's key is unlocked by [`EnsClient::tx_opts`] and reused by [`EnsClient::submit`], so a
/// client sends at most one transaction.
pub struct RpcEnsClient {
    provider: EthProvider,
    registry: Address,
    chain_id: Option<u64>,
    keystore: Option<PathBuf>,
    wallet: WalletOpts,
    signer: OnceLock<PrivateKeySigner>,
}

impl RpcEnsClient {
    /// Connects to the endpoint of `config`.
    pub fn new(config: &Config, registry: Address, wallet: WalletOpts) -> Result<Self> {
        let provider = ProviderBuilder::new(config.get_rpc_url_or_localhost_http())
            .timeout(config.rpc_timeout())
            .build()?;
        Ok(Self::with_provider(provider, config, registry, wallet))
    }

    pub fn with_provider(
        provider: EthProvider,
        config: &Config,
        registry: Address,
        wallet: WalletOpts,
    ) -> Self {
        Self {
            provider,
            registry,
            chain_id: config.chain_id,
            keystore: config.keystore_path(),
            wallet,
            signer: OnceLock::new(),
        }
    }

    /// The unsigned transaction carrying `write`. The gas limit is left out unless overridden.
    pub fn request(&self, opts: &TxOpts, write: &EnsWrite) -> TransactionRequest {
        let tx = TransactionRequest::default()
            .with_from(opts.from)
            .with_to(write.target(self.registry))
            .with_input(write.calldata())
            .with_chain_id(opts.chain_id)
            .with_nonce(opts.nonce)
            .with_gas_price(opts.gas_price);
        match opts.gas_limit {
            Some(gas_limit) => tx.with_gas_limit(gas_limit),
            None => tx,
        }
    }
}

#[async_trait]
impl EnsClient for RpcEnsClient {
    async fn owner(&self, node: B256) -> Result<Address> {
        let registry = EnsRegistry::new(self.registry, self.provider.clone());
        Ok(registry.owner(node).call().await?)
    }

    async fn resolver(&self, node: B256) -> Result<Address> {
        let registry = EnsRegistry::new(self.registry, self.provider.clone());
        Ok(registry.resolver(node).call().await?)
    }

    async fn multiaddr(&self, resolver: Address, node: B256) -> Result<Bytes> {
        let resolver = MultiaddrResolver::new(resolver, self.provider.clone());
        Ok(resolver.multiaddr(node).call().await?)
    }

    async fn tx_opts(&self, from: Address, overrides: &TxOverrides) -> Result<TxOpts> {
        let signer = self.wallet.signer_for(from, self.keystore.clone())?;
        if let Err(signer) = self.signer.set(signer) {
            eyre::bail!("cannot unlock {}: a key is already unlocked", signer.address());
        }

        let chain_id = match self.chain_id {
            Some(chain_id) => chain_id,
            None => self.provider.get_chain_id().await?,
        };
        let nonce = match overrides.nonce {
            Some(nonce) => nonce,
            None => self.provider.get_transaction_count(from).await?,
        };
        let gas_price = match overrides.gas_price {
            Some(gas_price) => gas_price,
            None => self.provider.get_gas_price().await?,
        };
        trace!(%from, chain_id, nonce, gas_price, "generated transaction options");

        Ok(TxOpts { from, chain_id, nonce, gas_limit: overrides.gas_limit, gas_price })
    }

    async fn submit(&self, opts: TxOpts, write: EnsWrite) -> Result<SentTransaction> {
        let signer = self
            .signer
            .get()
            .cloned()
            .ok_or_else(|| eyre::eyre!("no key unlocked for {}", opts.from))?;

        let mut tx = self.request(&opts, &write);
        let gas_limit = match opts.gas_limit {
            Some(gas_limit) => gas_limit,
            None => self.provider.estimate_gas(tx.clone()).await?,
        };
        tx.set_gas_limit(gas_limit);
        debug!(method = write.method(), gas_limit, "sending transaction");

        let provider = AlloyProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_provider(self.provider.clone());
        let pending = provider.send_transaction(tx).await?;

        Ok(SentTransaction {
            hash: *pending.tx_hash(),
            gas_limit,
            gas_price: opts.gas_price,
            chain_id: opts.chain_id,
        })
    }
}
