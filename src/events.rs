//! Defines events emitted by the Lattice protocol components.

use scrypto::prelude::*;

/// Event emitted when a lender deposits quote tokens into a price bucket.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventAddQuoteToken {
    /// The index of the bucket receiving the deposit.
    pub index: i64,
    /// The price of the bucket receiving the deposit.
    pub price: Decimal,
    /// The amount of quote tokens deposited.
    pub amount: Decimal,
    /// The `NonFungibleLocalId` of the newly minted lender receipt.
    pub receipt_id: NonFungibleLocalId,
}

/// Event emitted when a lender withdraws un-lent quote tokens from a bucket.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventRemoveQuoteToken {
    /// The index of the bucket the withdrawal came from.
    pub index: i64,
    /// The amount of quote tokens withdrawn.
    pub amount: Decimal,
    /// The `NonFungibleLocalId` of the lender receipt used.
    pub receipt_id: NonFungibleLocalId,
}

/// Event emitted when a lender exchanges deposit claim for bucket collateral.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventClaimCollateral {
    /// The index of the bucket the collateral was claimed from.
    pub index: i64,
    /// The amount of collateral claimed.
    pub amount: Decimal,
    /// The `NonFungibleLocalId` of the lender receipt used.
    pub receipt_id: NonFungibleLocalId,
}

/// Event emitted when a new loan receipt is minted.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventNewLoan {
    /// The `NonFungibleLocalId` of the new loan receipt.
    pub loan_id: NonFungibleLocalId,
    /// The initial collateral posted against the loan.
    pub collateral_amount: Decimal,
}

/// Event emitted when collateral is added to an existing loan.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventAddCollateral {
    /// The `NonFungibleLocalId` of the loan topped up.
    pub loan_id: NonFungibleLocalId,
    /// The amount of collateral added.
    pub amount: Decimal,
}

/// Event emitted when collateral is removed from a loan.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventRemoveCollateral {
    /// The `NonFungibleLocalId` of the loan drawn from.
    pub loan_id: NonFungibleLocalId,
    /// The amount of collateral removed.
    pub amount: Decimal,
}

/// Event emitted when a loan draws debt from the pool.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventBorrow {
    /// The `NonFungibleLocalId` of the borrowing loan.
    pub loan_id: NonFungibleLocalId,
    /// The total amount borrowed in this call.
    pub amount: Decimal,
    /// The buckets drawn from, as (bucket index, amount drawn) pairs in draw order.
    pub draws: Vec<(i64, Decimal)>,
    /// The pool's lowest utilized price after the draw.
    pub lowest_utilized_price: Decimal,
}

/// Event emitted when a loan's debt is repaid, partially or in full.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventRepay {
    /// The `NonFungibleLocalId` of the repaid loan.
    pub loan_id: NonFungibleLocalId,
    /// The amount of debt retired.
    pub amount: Decimal,
    /// Whether the repayment closed the loan.
    pub closed: bool,
}

/// Event emitted when a bidder purchases part of a bucket's deposit claim.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventPurchaseBid {
    /// The index of the purchased bucket.
    pub index: i64,
    /// The price of the purchased bucket.
    pub price: Decimal,
    /// The quote-token amount purchased.
    pub amount: Decimal,
    /// The collateral tendered in exchange, valued at the bucket price.
    pub collateral_tendered: Decimal,
}

/// Event emitted for each bucket that receives reallocated debt during a bid purchase.
#[derive(ScryptoSbor, ScryptoEvent, Clone)]
pub struct EventReallocate {
    /// The index of the bucket the debt moved away from.
    pub from_index: i64,
    /// The index of the bucket the debt moved to.
    pub to_index: i64,
    /// The amount of debt shifted.
    pub amount: Decimal,
}
