use crate::{
    error::{CounterpartKind, Result, SwapError},
    events::TransferEvent,
};
use num_bigint::BigUint;
use tracing::debug;

/// Total leaving the wallet in one token-originated transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentAmount {
    pub token: String,
    pub amount: BigUint,
}

/// Merge every wallet-originated `Transfer` into one logical sent amount.
///
/// Fee-on-transfer and burn-on-transfer tokens emit several legs through the
/// same contract; all legs are summed. Legs through different contracts are
/// rejected rather than added together.
pub fn aggregate_outbound(
    tx_hash: &str,
    wallet: &str,
    transfers: &[TransferEvent],
) -> Result<SentAmount> {
    let mut outbound = transfers.iter().filter(|t| t.from == wallet);

    let first = outbound
        .next()
        .ok_or_else(|| SwapError::MissingCounterpartEvent {
            tx_hash: tx_hash.to_string(),
            expected: CounterpartKind::OutboundTransfer,
        })?;

    let mut total = parse_amount(&first.amount, tx_hash)?;
    let mut legs = 1;

    for transfer in outbound {
        if transfer.token != first.token {
            return Err(SwapError::InconsistentTransferToken {
                tx_hash: tx_hash.to_string(),
                expected: first.token.clone(),
                found: transfer.token.clone(),
            });
        }
        total += parse_amount(&transfer.amount, tx_hash)?;
        legs += 1;
    }

    if legs > 1 {
        debug!(
            "tx {}: merged {} outbound legs of {} into {}",
            tx_hash, legs, first.token, total
        );
    }

    Ok(SentAmount {
        token: first.token.clone(),
        amount: total,
    })
}

/// Parse an unsigned base-10 integer amount of arbitrary width
pub fn parse_amount(value: &str, tx_hash: &str) -> Result<BigUint> {
    let invalid = || SwapError::InvalidAmount {
        tx_hash: tx_hash.to_string(),
        value: value.to_string(),
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(invalid)
}
