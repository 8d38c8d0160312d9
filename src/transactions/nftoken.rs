//! NFToken transaction views and token id assembly.

use super::decode_optional_amount;
use crate::error::AmountError;
use crate::types::Amount;
use crate::wire::WireAmount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NFTokenMint {
    #[serde(rename = "NFTokenTaxon")]
    pub nftoken_taxon: Option<u32>,
    #[serde(rename = "Issuer")]
    pub issuer: Option<String>,
    #[serde(rename = "TransferFee")]
    pub transfer_fee: Option<u32>,
    #[serde(rename = "URI")]
    pub uri: Option<String>,
}

impl NFTokenMint {
    /// The token URI, hex-decoded to text when possible.
    pub fn decoded_uri(&self) -> Option<String> {
        let raw = self.uri.as_deref()?;
        let bytes = hex::decode(raw).ok()?;
        String::from_utf8(bytes).ok()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NFTokenBurn {
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: Option<String>,
    #[serde(rename = "Owner")]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NFTokenCreateOffer {
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<WireAmount>,
    #[serde(rename = "Owner")]
    pub owner: Option<String>,
    #[serde(rename = "Destination")]
    pub destination: Option<String>,
    #[serde(rename = "Expiration")]
    pub expiration: Option<i64>,
}

impl NFTokenCreateOffer {
    pub fn amount(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.amount, native_asset)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NFTokenAcceptOffer {
    #[serde(rename = "NFTokenSellOffer")]
    pub nftoken_sell_offer: Option<String>,
    #[serde(rename = "NFTokenBuyOffer")]
    pub nftoken_buy_offer: Option<String>,
    #[serde(rename = "NFTokenBrokerFee")]
    pub nftoken_broker_fee: Option<WireAmount>,
}

impl NFTokenAcceptOffer {
    pub fn broker_fee(&self, native_asset: &str) -> Result<Option<Amount>, AmountError> {
        decode_optional_amount(&self.nftoken_broker_fee, native_asset)
    }

    /// Brokered mode matches a sell and a buy offer in one transaction.
    pub fn is_brokered(&self) -> bool {
        self.nftoken_sell_offer.is_some() && self.nftoken_buy_offer.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NFTokenCancelOffer {
    #[serde(rename = "NFTokenOffers", default)]
    pub nftoken_offers: Vec<String>,
}

/// Taxon scrambling constants fixed by the token id layout.
const TAXON_CIPHER_MUL: u32 = 384_160_001;
const TAXON_CIPHER_ADD: u32 = 2_459;

/// Assemble a 32-byte token id from its parts: flags and transfer fee as
/// big-endian u16, the 20-byte issuer account id, the scrambled taxon and
/// the mint sequence as big-endian u32.
pub fn compute_nftoken_id(
    flags: u16,
    transfer_fee: u16,
    issuer: &str,
    taxon: u32,
    sequence: u32,
) -> Option<String> {
    let account_id = decode_account_id(issuer)?;
    let scrambled = taxon ^ TAXON_CIPHER_MUL.wrapping_mul(sequence).wrapping_add(TAXON_CIPHER_ADD);
    let mut bytes = Vec::with_capacity(32);
    bytes.extend_from_slice(&flags.to_be_bytes());
    bytes.extend_from_slice(&transfer_fee.to_be_bytes());
    bytes.extend_from_slice(&account_id);
    bytes.extend_from_slice(&scrambled.to_be_bytes());
    bytes.extend_from_slice(&sequence.to_be_bytes());
    Some(hex::encode_upper(bytes))
}

/// Decode a classic address to its 20-byte account id through the
/// RIPPLE base58check alphabet.
fn decode_account_id(address: &str) -> Option<[u8; 20]> {
    let payload = bs58::decode(address)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .with_check(None)
        .into_vec()
        .ok()?;
    if payload.len() != 21 || payload[0] != 0 {
        return None;
    }
    payload[1..].try_into().ok()
}
