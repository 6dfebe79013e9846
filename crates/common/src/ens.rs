//! ENS contract bindings and the [`EnsClient`] interface the commands are written against.

use crate::errors::EnsError;
use alloy_primitives::{Address, B256, Bytes, TxHash};
use alloy_sol_types::{SolCall, sol};
use async_trait::async_trait;
use eyre::Result;
use multiaddr::Multiaddr;
use std::str::FromStr;

pub use alloy_ens::{ENS_ADDRESS, namehash};

sol! {
    /// ENS Registry contract.
    #[sol(rpc)]
    contract EnsRegistry {
        function owner(bytes32 node) external view returns (address);
        function resolver(bytes32 node) external view returns (address);
        function setOwner(bytes32 node, address owner) external;
        function setResolver(bytes32 node, address resolver) external;
    }

    /// ENS resolver holding multiaddr records.
    #[sol(rpc)]
    contract MultiaddrResolver {
        function multiaddr(bytes32 node) external view returns (bytes memory);
        function setMultiaddr(bytes32 node, bytes calldata multiaddr) external;
    }
}

/// Transaction options given on the command line. Missing values are filled from the node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxOverrides {
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u128>,
    pub nonce: Option<u64>,
}

/// Options of a single transaction, sent from the domain owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOpts {
    pub from: Address,
    pub chain_id: u64,
    pub nonce: u64,
    /// Estimated at submission when not overridden.
    pub gas_limit: Option<u64>,
    pub gas_price: u128,
}

/// The one contract write a command performs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnsWrite {
    /// Registry `setOwner(node, owner)`.
    SetOwner { node: B256, owner: Address },
    /// Registry `setResolver(node, resolver)`. The zero resolver clears the record.
    SetResolver { node: B256, resolver: Address },
    /// Resolver `setMultiaddr(node, multiaddr)`. Empty bytes clear the record.
    SetMultiaddr { resolver: Address, node: B256, multiaddr: Bytes },
}

impl EnsWrite {
    /// The contract receiving the call.
    pub fn target(&self, registry: Address) -> Address {
        match self {
            Self::SetOwner { .. } | Self::SetResolver { .. } => registry,
            Self::SetMultiaddr { resolver, .. } => *resolver,
        }
    }

    /// ABI-encoded call data.
    pub fn calldata(&self) -> Bytes {
        let data = match self.clone() {
            Self::SetOwner { node, owner } => {
                EnsRegistry::setOwnerCall { node, owner }.abi_encode()
            }
            Self::SetResolver { node, resolver } => {
                EnsRegistry::setResolverCall { node, resolver }.abi_encode()
            }
            Self::SetMultiaddr { node, multiaddr, .. } => {
                MultiaddrResolver::setMultiaddrCall { node, multiaddr }.abi_encode()
            }
        };
        data.into()
    }

    /// Name of the contract method.
    pub fn method(&self) -> &'static str {
        match self {
            Self::SetOwner { .. } => "setOwner",
            Self::SetResolver { .. } => "setResolver",
            Self::SetMultiaddr { .. } => "setMultiaddr",
        }
    }
}

/// A submitted, not yet mined, transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentTransaction {
    pub hash: TxHash,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub chain_id: u64,
}

/// Access to the ENS contracts of a chain.
#[async_trait]
pub trait EnsClient: Send + Sync {
    /// Registry owner of `node`; zero when unregistered.
    async fn owner(&self, node: B256) -> Result<Address>;

    /// Registry resolver of `node`; zero when none is set.
    async fn resolver(&self, node: B256) -> Result<Address>;

    /// Raw multiaddr record of `node` held by `resolver`.
    async fn multiaddr(&self, resolver: Address, node: B256) -> Result<Bytes>;

    /// Unlocks the key of `from` and completes the options for a transaction it sends.
    async fn tx_opts(&self, from: Address, overrides: &TxOverrides) -> Result<TxOpts>;

    /// Signs and broadcasts `write`. Does not wait for the receipt.
    async fn submit(&self, opts: TxOpts, write: EnsWrite) -> Result<SentTransaction>;
}

/// Trims `domain`, rejecting a missing or blank one.
pub fn normalize_domain(domain: Option<&str>) -> Result<String, EnsError> {
    match domain.map(str::trim) {
        Some(domain) if !domain.is_empty() => Ok(domain.to_string()),
        _ => Err(EnsError::MissingDomain),
    }
}

/// Parses the textual form of a multiaddr. The empty multiaddr is rejected.
pub fn parse_multiaddr(value: &str) -> Result<Multiaddr, EnsError> {
    let invalid = |source| EnsError::InvalidMultiaddr { value: value.to_string(), source };
    let ma = Multiaddr::from_str(value.trim()).map_err(invalid)?;
    if ma.is_empty() {
        return Err(invalid(multiaddr::Error::InvalidMultiaddr));
    }
    Ok(ma)
}

/// Decodes a multiaddr record as stored on chain.
pub fn decode_multiaddr(bytes: &Bytes) -> Result<Multiaddr> {
    Ok(Multiaddr::try_from(bytes.to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, hex};

    #[test]
    fn namehash_vectors() {
        assert_eq!(namehash(""), B256::ZERO);
        assert_eq!(
            namehash("eth"),
            b256!("0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth"),
            b256!("0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
    }

    #[test]
    fn selectors() {
        assert_eq!(EnsRegistry::ownerCall::SELECTOR, hex!("02571be3"));
        assert_eq!(EnsRegistry::resolverCall::SELECTOR, hex!("0178b8bf"));
        assert_eq!(EnsRegistry::setOwnerCall::SELECTOR, hex!("5b0fc9c3"));
        assert_eq!(EnsRegistry::setResolverCall::SELECTOR, hex!("1896f70a"));
        assert_eq!(MultiaddrResolver::multiaddrCall::SELECTOR, hex!("4cb7724c"));
        assert_eq!(MultiaddrResolver::setMultiaddrCall::SELECTOR, hex!("9775ac97"));
    }

    #[test]
    fn clear_resolver_calldata() {
        let node = namehash("enstest.eth");
        let write = EnsWrite::SetResolver { node, resolver: Address::ZERO };
        let registry = address!("0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e");
        assert_eq!(write.target(registry), registry);
        assert_eq!(write.method(), "setResolver");

        let data = write.calldata();
        assert_eq!(data.len(), 4 + 32 * 2);
        assert_eq!(data[..4], hex!("1896f70a"));
        assert_eq!(data[4..36], node[..]);
        assert!(data[36..].iter().all(|b| *b == 0));
    }

    #[test]
    fn multiaddr_calldata() {
        let resolver = address!("0x4976fb03C32e5B8cfe2b6cCB31c09Ba78EBaBa41");
        let node = namehash("enstest.eth");
        let ma = parse_multiaddr("/ip4/1.2.3.4").unwrap();
        let write = EnsWrite::SetMultiaddr { resolver, node, multiaddr: ma.to_vec().into() };
        assert_eq!(write.target(ENS_ADDRESS), resolver);

        let data = write.calldata();
        // selector, node, offset, length, one padded word
        assert_eq!(data.len(), 4 + 32 * 4);
        assert_eq!(data[..4], hex!("9775ac97"));
        assert_eq!(data[67], 0x40);
        assert_eq!(data[99], 5);
        assert_eq!(data[100..105], [4, 1, 2, 3, 4]);
    }

    #[test]
    fn parses_and_decodes_multiaddr() {
        let ma = parse_multiaddr(" /ip4/1.2.3.4/tcp/30303 ").unwrap();
        let bytes = Bytes::from(ma.to_vec());
        assert_eq!(decode_multiaddr(&bytes).unwrap().to_string(), "/ip4/1.2.3.4/tcp/30303");
    }

    #[test]
    fn rejects_bad_multiaddr() {
        let err = parse_multiaddr("not-a-multiaddr").unwrap_err();
        assert_eq!(err.to_string(), "invalid multiaddr not-a-multiaddr");
        assert!(parse_multiaddr("").is_err());
        assert!(decode_multiaddr(&Bytes::from_static(&[0xff, 0xff])).is_err());
    }

    #[test]
    fn domain_is_trimmed() {
        assert_eq!(normalize_domain(Some(" enstest.eth ")).unwrap(), "enstest.eth");
        assert!(matches!(normalize_domain(Some("  ")), Err(EnsError::MissingDomain)));
        assert!(matches!(normalize_domain(None), Err(EnsError::MissingDomain)));
    }
}
