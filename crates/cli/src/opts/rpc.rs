use clap::Parser;
use ethctl_config::{
    Config,
    figment::{
        self, Metadata, Profile,
        value::{Dict, Map},
    },
};

/// Options of the JSON-RPC endpoint.
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "RPC options")]
pub struct RpcOpts {
    /// The RPC endpoint.
    #[arg(short = 'r', long = "rpc-url", env = "ETH_RPC_URL", value_name = "URL", global = true)]
    pub url: Option<String>,

    /// The chain ID. Queried from the node when not set.
    #[arg(long, env = "ETHCTL_CHAIN_ID", value_name = "CHAIN_ID", global = true)]
    pub chain_id: Option<u64>,

    /// Timeout for the RPC request in seconds.
    #[arg(long, env = "ETH_RPC_TIMEOUT", value_name = "SECS", global = true)]
    pub rpc_timeout: Option<u64>,
}

impl figment::Provider for RpcOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("RpcOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Config::selected_profile(), self.dict())]))
    }
}

impl RpcOpts {
    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if let Some(url) = &self.url {
            dict.insert("eth_rpc_url".into(), url.clone().into());
        }
        if let Some(chain_id) = self.chain_id {
            dict.insert("chain_id".into(), chain_id.into());
        }
        if let Some(rpc_timeout) = self.rpc_timeout {
            dict.insert("rpc_timeout".into(), rpc_timeout.into());
        }
        dict
    }
}
