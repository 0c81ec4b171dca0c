//! Address format validation for profile contracts.
//!
//! A profile address must be the `0x` prefix followed by exactly 40
//! hexadecimal characters. Validation never touches the chain.

use crate::errors::AddressError;
use alloy_primitives::Address;

/// Number of hex characters in a 20-byte address.
const ADDRESS_HEX_LEN: usize = 40;

/// Returns true if `value` is `0x` followed by 40 hex characters.
pub fn is_valid_address(value: &str) -> bool {
	match value.strip_prefix("0x") {
		Some(digits) => {
			digits.len() == ADDRESS_HEX_LEN && digits.chars().all(|c| c.is_ascii_hexdigit())
		},
		None => false,
	}
}

/// Parses a profile contract address, rejecting anything that fails
/// [`is_valid_address`].
pub fn parse_profile_address(value: &str) -> Result<Address, AddressError> {
	if !is_valid_address(value) {
		return Err(AddressError::ProfileAddressInvalid);
	}
	value
		.parse::<Address>()
		.map_err(|_| AddressError::ProfileAddressInvalid)
}
