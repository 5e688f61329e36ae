use crate::events::TransactionEvents;
use std::fmt;

/// Which side of the wallet funded the swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOrigin {
    /// The wallet sent an ERC-20 token
    Token,
    /// The wallet sent native currency with the transaction
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// A `Mint` event marks liquidity provision
    LiquidityProvision,
    NoSwapEvent,
    /// Token-originated, but the wallet sent no `Transfer`
    NoOutboundTransfer,
    /// Native-originated, but no `Transfer` reached the wallet
    NoInboundTransfer,
    /// Token-originated, but neither an inbound `Transfer` nor a `Withdrawal` exists
    NoCounterpart,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ExclusionReason::LiquidityProvision => "liquidity provision (Mint event)",
            ExclusionReason::NoSwapEvent => "no Swap event",
            ExclusionReason::NoOutboundTransfer => "no Transfer from wallet",
            ExclusionReason::NoInboundTransfer => "no Transfer to wallet",
            ExclusionReason::NoCounterpart => "no inbound Transfer or Withdrawal",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Excluded(ExclusionReason),
    Eligible(SwapOrigin),
}

impl Classification {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Classification::Eligible(_))
    }
}

/// Decide whether a transaction is a swap made by `wallet` and how it was funded.
///
/// Rules apply in order: a `Mint` excludes, a missing `Swap` excludes, then
/// the native value picks the origin and the wallet's own transfer direction
/// has to confirm it. `wallet` must already be lower-cased.
pub fn classify(native_value: &str, events: &TransactionEvents, wallet: &str) -> Classification {
    if events.has_mint {
        return Classification::Excluded(ExclusionReason::LiquidityProvision);
    }
    if !events.has_swap {
        return Classification::Excluded(ExclusionReason::NoSwapEvent);
    }

    if is_zero_value(native_value) {
        if !events.has_outbound_from(wallet) {
            return Classification::Excluded(ExclusionReason::NoOutboundTransfer);
        }
        if !events.has_inbound_to(wallet) && events.withdrawal.is_none() {
            return Classification::Excluded(ExclusionReason::NoCounterpart);
        }
        Classification::Eligible(SwapOrigin::Token)
    } else if events.has_inbound_to(wallet) {
        Classification::Eligible(SwapOrigin::Native)
    } else {
        Classification::Excluded(ExclusionReason::NoInboundTransfer)
    }
}

/// True when a native value string is zero ("0", "000", or empty).
///
/// The string is taken verbatim, as amount parsing does, so padded values
/// are not zero.
pub fn is_zero_value(value: &str) -> bool {
    value.bytes().all(|b| b == b'0')
}
