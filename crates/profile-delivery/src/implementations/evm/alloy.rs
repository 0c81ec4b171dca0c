//! Alloy-based EVM chain clients.
//!
//! [`AlloyReadClient`] simulates contract calls with `eth_call` and turns
//! revert responses into [`ChainError::Reverted`]. [`AlloyWriteClient`]
//! signs and sends simulated requests through a wallet-enabled provider.

use crate::abi::decode_revert_name;
use crate::{ChainError, ContractRevert, DeliveryError, ReadClient, WriteClient};
use alloy_dyn_abi::JsonAbiExt;
use alloy_json_abi::JsonAbi;
use alloy_network::EthereumWallet;
use alloy_primitives::{Address, Bytes};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::TransportError;
use async_trait::async_trait;
use profile_types::{ContractCall, SecretString, SimulatedRequest, TransactionHash};
use std::sync::Arc;

/// JSON-RPC error code geth and anvil use for execution reverts.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Converts a transport error into a [`ChainError`] cause chain.
///
/// An error response is a revert when it carries revert data, whatever its
/// code and message; nodes differ on both (geth and anvil use code 3,
/// hardhat uses -32603). Responses without data still count as reverts
/// when they use code 3 or say "execution reverted". The error name is
/// decoded against `abi`. Everything else is a [`ChainError::Network`].
fn classify_rpc_error(abi: &JsonAbi, error: TransportError, context: String) -> ChainError {
	let cause = match error.as_error_resp() {
		Some(payload) => {
			let data = payload.as_revert_data().or_else(|| {
				let raw = payload.data.as_ref()?;
				let value: serde_json::Value = serde_json::from_str(raw.get()).ok()?;
				let encoded = match &value {
					serde_json::Value::String(s) => s.as_str(),
					serde_json::Value::Object(inner) => inner.get("data")?.as_str()?,
					_ => return None,
				};
				encoded.parse::<Bytes>().ok()
			});

			if data.is_some()
				|| payload.code == EXECUTION_REVERTED_CODE
				|| payload.message.contains("execution reverted")
			{
				let error_name = data
					.as_ref()
					.and_then(|data| decode_revert_name(abi, data));
				ChainError::Reverted(ContractRevert { error_name, data })
			} else {
				ChainError::Network(error.to_string())
			}
		},
		None => ChainError::Network(error.to_string()),
	};
	cause.context(context)
}

/// Read client that simulates calls through an HTTP provider.
pub struct AlloyReadClient {
	provider: DynProvider,
	abi: Arc<JsonAbi>,
}

impl AlloyReadClient {
	/// Creates a read client for the given RPC endpoint and contract ABI.
	pub fn new(rpc_url: &str, abi: Arc<JsonAbi>) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL: {}", e)))?;

		let provider = ProviderBuilder::new().connect_http(url).erased();

		Ok(Self { provider, abi })
	}

	/// ABI-encodes `call` against the loaded ABI.
	///
	/// Overloaded functions are resolved by argument count.
	fn encode_call(&self, call: &ContractCall) -> Result<Bytes, ChainError> {
		let functions = self.abi.function(&call.function_name).ok_or_else(|| {
			ChainError::Encoding(format!("Function {} not found in ABI", call.function_name))
		})?;

		let function = functions
			.iter()
			.find(|f| f.inputs.len() == call.args.len())
			.ok_or_else(|| {
				ChainError::Encoding(format!(
					"No overload of {} takes {} arguments",
					call.function_name,
					call.args.len()
				))
			})?;

		function
			.abi_encode_input(&call.args)
			.map(Bytes::from)
			.map_err(|e| ChainError::Encoding(format!("Failed to encode {}: {}", function.name, e)))
	}
}

#[async_trait]
impl ReadClient for AlloyReadClient {
	async fn simulate_contract(&self, call: &ContractCall) -> Result<SimulatedRequest, ChainError> {
		let input = self.encode_call(call)?;

		tracing::debug!(
			function = %call.function_name,
			from = %call.account,
			to = %call.address,
			data_len = input.len(),
			"Simulating contract call"
		);

		let request = TransactionRequest::default()
			.from(call.account)
			.to(call.address)
			.input(input.clone().into());

		self.provider.call(request).await.map_err(|e| {
			tracing::debug!(function = %call.function_name, error = %e, "Simulation failed");
			classify_rpc_error(
				&self.abi,
				e,
				format!("Simulation of {} failed", call.function_name),
			)
		})?;

		Ok(SimulatedRequest {
			from: call.account,
			to: call.address,
			function_name: call.function_name.clone(),
			input,
		})
	}
}

/// Write client that signs with a local private key.
pub struct AlloyWriteClient {
	provider: DynProvider,
	signer_address: Address,
	abi: Arc<JsonAbi>,
}

impl AlloyWriteClient {
	/// Creates a write client for the given RPC endpoint and signer.
	pub fn new(
		rpc_url: &str,
		chain_id: u64,
		signer: PrivateKeySigner,
		abi: Arc<JsonAbi>,
	) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL: {}", e)))?;

		let signer = signer.with_chain_id(Some(chain_id));
		let signer_address = signer.address();
		let wallet = EthereumWallet::from(signer);

		let provider = ProviderBuilder::new()
			.wallet(wallet)
			.connect_http(url)
			.erased();

		Ok(Self {
			provider,
			signer_address,
			abi,
		})
	}

	/// Address of the configured signer.
	pub fn signer_address(&self) -> Address {
		self.signer_address
	}
}

#[async_trait]
impl WriteClient for AlloyWriteClient {
	async fn get_addresses(&self) -> Result<Vec<Address>, ChainError> {
		Ok(vec![self.signer_address])
	}

	async fn write_contract(
		&self,
		request: SimulatedRequest,
	) -> Result<Option<TransactionHash>, ChainError> {
		tracing::debug!(
			function = %request.function_name,
			from = %request.from,
			to = %request.to,
			"Sending transaction"
		);

		let tx = TransactionRequest::default()
			.from(request.from)
			.to(request.to)
			.input(request.input.into());

		let pending = self.provider.send_transaction(tx).await.map_err(|e| {
			tracing::error!(function = %request.function_name, error = %e, "Transaction submission failed");
			classify_rpc_error(
				&self.abi,
				e,
				format!("Submission of {} failed", request.function_name),
			)
		})?;

		let hash = TransactionHash::from(*pending.tx_hash());
		tracing::info!(tx_hash = %hash, "Transaction submitted");

		Ok(Some(hash))
	}
}

/// Builds the read and write clients from connection settings.
///
/// Both clients share the same ABI so reverts seen during submission
/// decode the same way as reverts seen during simulation.
pub fn create_clients(
	rpc_url: &str,
	chain_id: u64,
	private_key: &SecretString,
	abi: JsonAbi,
) -> Result<(AlloyReadClient, AlloyWriteClient), DeliveryError> {
	let signer: PrivateKeySigner = private_key.with_exposed(|key| {
		key.parse()
			.map_err(|_| DeliveryError::InvalidSigner("Invalid private key format".to_string()))
	})?;

	let abi = Arc::new(abi);
	let read_client = AlloyReadClient::new(rpc_url, abi.clone())?;
	let write_client = AlloyWriteClient::new(rpc_url, chain_id, signer, abi)?;

	Ok((read_client, write_client))
}
