//! # Lattice Pool shared structs
//! Structs used by the pool component, its receipts and its getters

use scrypto::prelude::*;

/// Data struct of a loan receipt, gained when posting collateral for the first time
#[derive(ScryptoSbor, NonFungibleData, Clone, Debug)]
pub struct LoanAccount {
    /// Image of the NFT
    #[mutable]
    pub key_image_url: Url,
    /// The current amount of collateral posted against this loan.
    #[mutable]
    pub collateral_posted: Decimal,
    /// The total quote-token debt currently owed by this loan.
    #[mutable]
    pub total_debt: Decimal,
    /// The buckets funding this loan. Always sums to `total_debt`.
    #[mutable]
    pub funding: Vec<FundingSlice>,
    /// The current status of the loan.
    #[mutable]
    pub status: LoanStatus,
}

/// A single bucket's share of a loan's funding.
#[derive(ScryptoSbor, Clone, Debug, PartialEq)]
pub struct FundingSlice {
    /// The index of the funding bucket.
    pub bucket_index: i64,
    /// The price of the funding bucket.
    pub price: Decimal,
    /// The amount of debt funded by this bucket.
    pub amount: Decimal,
}

/// Represents the possible states of a loan.
#[derive(ScryptoSbor, PartialEq, Clone, Debug)]
pub enum LoanStatus {
    /// Collateral has been posted, but nothing has been borrowed yet.
    Unfunded,
    /// The loan has outstanding debt.
    Active,
    /// A bid purchase has shifted part of this loan's funding to other buckets.
    PartiallyPurchased,
    /// The loan has been fully repaid and closed.
    Closed,
}

/// Data struct of a lender receipt, gained when depositing quote tokens into a bucket
#[derive(ScryptoSbor, NonFungibleData, Clone, Debug)]
pub struct LenderReceipt {
    /// The index of the bucket holding this deposit.
    pub bucket_index: i64,
    /// The price of the bucket holding this deposit.
    pub price: Decimal,
    /// The remaining claim of this receipt, denominated in quote tokens. After bid purchases
    /// part of the claim may only be redeemable as bucket collateral, at the bucket price.
    #[mutable]
    pub amount: Decimal,
}

/// An ephemeral bid to purchase part of a bucket's deposit claim. Consumed immediately by the
/// purchase walk, never persisted.
#[derive(Clone, Debug)]
pub struct PurchaseOrder {
    /// The quote-token amount being purchased.
    pub amount: Decimal,
    /// The index of the bucket being purchased from.
    pub bucket_index: i64,
    /// The collateral tendered in exchange, valued at the bucket price.
    pub collateral_tendered: Decimal,
}

/// A struct providing a summarized view of a single price bucket's state.
/// This is often used for returning information via getter methods.
#[derive(ScryptoSbor, Clone, Debug)]
pub struct BucketInfoReturn {
    /// The index of the bucket.
    pub index: i64,
    /// The price of the bucket.
    pub price: Decimal,
    /// The total quote tokens deposited in this bucket.
    pub quote_deposited: Decimal,
    /// The deposit currently lent out to loans from this bucket.
    pub debt_accumulated: Decimal,
    /// The collateral held by this bucket from bid purchases.
    pub collateral_encumbered: Decimal,
    /// The un-lent deposit available for borrowing or withdrawal.
    pub available: Decimal,
}

/// A struct providing a summarized view of the pool's state.
#[derive(ScryptoSbor, Clone, Debug)]
pub struct PoolInfoReturn {
    /// The resource address of the pool's quote token.
    pub quote_address: ResourceAddress,
    /// The resource address of the pool's collateral token.
    pub collateral_address: ResourceAddress,
    /// The total quote tokens deposited across all buckets.
    pub total_deposit: Decimal,
    /// The total debt outstanding across all buckets.
    pub total_debt: Decimal,
    /// The price of the cheapest bucket currently funding debt, if any.
    pub lowest_utilized_price: Option<Decimal>,
    /// The number of loan receipts ever minted by this pool.
    pub loan_count: u64,
}
