//! # Bucket Ledger
//!
//! The ordered set of price buckets backing a pool.
//!
//! Buckets are kept in an AVL tree keyed by price, so draw-downs can walk the lattice from the
//! highest-priced bucket down and repayments can walk it back up. Each bucket tracks the quote
//! tokens deposited into it, the share of that deposit currently lent out, the collateral it
//! holds from bid purchases, and the loans it funds.
//!
//! Every bucket upholds `debt_accumulated <= quote_deposited` at all times, and the ledger
//! upholds `total_debt == sum of debt_accumulated` across buckets. The walks that could break
//! these invariants (`draw_debt`, `purchase`) compute their full plan before mutating any
//! bucket, so a failing walk leaves the ledger untouched even before the transaction-level
//! rollback kicks in.

use crate::bucket_math;
use crate::shared_structs::{BucketInfoReturn, FundingSlice};
use scrypto::prelude::*;
use scrypto_avltree::AvlTree;

/// A single price bucket on the lattice.
#[derive(ScryptoSbor, Clone, Debug)]
pub struct PriceBucket {
    /// The index of this bucket on the price lattice.
    pub index: i64,
    /// The price of this bucket.
    pub price: Decimal,
    /// The total quote tokens deposited into this bucket.
    pub quote_deposited: Decimal,
    /// The share of the deposit currently lent out to loans.
    pub debt_accumulated: Decimal,
    /// The collateral held by this bucket from bid purchases, claimable by its depositors.
    pub collateral_encumbered: Decimal,
    /// The loan receipts with a funding slice at this bucket.
    pub loans: Vec<NonFungibleLocalId>,
}

impl PriceBucket {
    /// The un-lent deposit available for draw-downs or withdrawal.
    pub fn available(&self) -> Decimal {
        self.quote_deposited - self.debt_accumulated
    }
}

/// The ordered collection of price buckets of a pool.
#[derive(ScryptoSbor)]
pub struct BucketLedger {
    /// All live buckets, keyed by price.
    pub buckets: AvlTree<Decimal, PriceBucket>,
    /// The total quote tokens deposited across all buckets.
    pub total_deposit: Decimal,
    /// The total debt outstanding across all buckets.
    pub total_debt: Decimal,
}

impl BucketLedger {
    pub fn new() -> Self {
        Self {
            buckets: AvlTree::new(),
            total_deposit: Decimal::ZERO,
            total_debt: Decimal::ZERO,
        }
    }

    /// Deposits quote tokens into the bucket at `index`, creating it if absent.
    ///
    /// # Returns
    /// * `Decimal`: The price of the bucket deposited into.
    pub fn deposit(&mut self, index: i64, amount: Decimal) -> Decimal {
        assert!(amount > Decimal::ZERO, "Deposit must be positive.");

        let price = bucket_math::index_to_price(index);

        if self.buckets.get(&price).is_none() {
            self.buckets.insert(
                price,
                PriceBucket {
                    index,
                    price,
                    quote_deposited: Decimal::ZERO,
                    debt_accumulated: Decimal::ZERO,
                    collateral_encumbered: Decimal::ZERO,
                    loans: Vec::new(),
                },
            );
        }

        self.buckets.get_mut(&price).unwrap().quote_deposited += amount;
        self.total_deposit += amount;

        price
    }

    /// Withdraws un-lent quote tokens from the bucket at `index`.
    ///
    /// # Panics
    /// * If no bucket exists at `index`.
    /// * If `amount` exceeds the bucket's un-lent deposit.
    pub fn withdraw(&mut self, index: i64, amount: Decimal) {
        assert!(amount > Decimal::ZERO, "Withdrawal must be positive.");

        let price = bucket_math::index_to_price(index);
        let available = match self.buckets.get(&price) {
            Some(bucket) => bucket.available(),
            None => panic!("No bucket exists at this price."),
        };

        assert!(
            amount <= available,
            "Withdrawal exceeds the bucket's un-lent deposit."
        );

        self.buckets.get_mut(&price).unwrap().quote_deposited -= amount;
        self.total_deposit -= amount;

        self.prune_if_drained(index);
    }

    /// Draws `amount` of debt from the lattice, walking buckets from the highest price down to
    /// `start_index` and consuming each bucket's un-lent deposit along the way.
    ///
    /// The full draw plan is computed before any bucket is mutated, so the draw is
    /// all-or-nothing.
    ///
    /// # Returns
    /// * `Vec<(i64, Decimal)>`: The applied plan, as (bucket index, amount drawn) pairs in
    ///   draw order (highest price first).
    ///
    /// # Panics
    /// * If the walk reaches `start_index` unfilled and liquidity exists further down the
    ///   lattice (the draw is limited by price, not by liquidity).
    /// * If the walk reaches `start_index` unfilled and no liquidity exists below it either.
    pub fn draw_debt(&mut self, amount: Decimal, start_index: i64) -> Vec<(i64, Decimal)> {
        assert!(amount > Decimal::ZERO, "Borrowed amount must be positive.");

        let floor_price = bucket_math::index_to_price(start_index);
        let mut plan: Vec<(i64, Decimal)> = Vec::new();
        let mut remaining = amount;

        for (_, bucket, _) in self.buckets.range_back(floor_price..) {
            if remaining == Decimal::ZERO {
                break;
            }
            let available = bucket.available();
            if available > Decimal::ZERO {
                let drawn = available.min(remaining);
                plan.push((bucket.index, drawn));
                remaining -= drawn;
            }
        }

        if remaining > Decimal::ZERO {
            if self.has_liquidity_below(floor_price) {
                panic!("Loan cannot be funded at or above the price limit.");
            } else {
                panic!("Not enough liquidity to fund this loan.");
            }
        }

        for (index, drawn) in &plan {
            let price = bucket_math::index_to_price(*index);
            self.buckets.get_mut(&price).unwrap().debt_accumulated += *drawn;
        }
        self.total_debt += amount;

        plan
    }

    /// Retires `amount` of debt against the given funding allocation, lowest-priced buckets
    /// first, so the lowest utilized price can only rise on repayment.
    ///
    /// # Returns
    /// * `Vec<(i64, Decimal)>`: The applied plan, as (bucket index, amount repaid) pairs.
    ///
    /// # Panics
    /// * If `amount` exceeds the total of the funding allocation.
    pub fn repay(&mut self, funding: &[FundingSlice], amount: Decimal) -> Vec<(i64, Decimal)> {
        assert!(amount > Decimal::ZERO, "Repayment must be positive.");

        let mut slices: Vec<(Decimal, i64, Decimal)> = funding
            .iter()
            .map(|slice| (slice.price, slice.bucket_index, slice.amount))
            .collect();
        slices.sort_by(|a, b| a.0.cmp(&b.0));

        let mut plan: Vec<(i64, Decimal)> = Vec::new();
        let mut remaining = amount;
        for (_, index, funded) in slices {
            if remaining == Decimal::ZERO {
                break;
            }
            let repaid = funded.min(remaining);
            if repaid > Decimal::ZERO {
                plan.push((index, repaid));
                remaining -= repaid;
            }
        }

        assert!(
            remaining == Decimal::ZERO,
            "Repayment exceeds the loan's funded debt."
        );

        for (index, repaid) in &plan {
            let price = bucket_math::index_to_price(*index);
            self.buckets.get_mut(&price).unwrap().debt_accumulated -= *repaid;
        }
        self.total_debt -= amount;

        plan
    }

    /// Executes a bid purchase against the bucket at `index`: the bucket's deposit claim
    /// shrinks by `amount`, the tendered collateral is added to the bucket, and any debt no
    /// longer covered by the remaining deposit is reallocated to the next-best-priced buckets
    /// below with available deposit.
    ///
    /// The reallocation plan is computed before any bucket is mutated, so the purchase is
    /// all-or-nothing. Preserves `debt_accumulated <= quote_deposited` for every bucket.
    ///
    /// # Returns
    /// * `Vec<(i64, Decimal)>`: The reallocation plan, as (receiving bucket index, amount
    ///   shifted) pairs in price-descending order. Empty if the purchase was covered by the
    ///   bucket's un-lent deposit.
    ///
    /// # Panics
    /// * If no bucket exists at `index`.
    /// * If `amount` exceeds the bucket's deposit.
    /// * If the debt to shift cannot be fully placed in buckets below.
    pub fn purchase(
        &mut self,
        amount: Decimal,
        index: i64,
        collateral_tendered: Decimal,
    ) -> Vec<(i64, Decimal)> {
        assert!(amount > Decimal::ZERO, "Purchase amount must be positive.");

        let price = bucket_math::index_to_price(index);
        let (deposited, debt) = match self.buckets.get(&price) {
            Some(bucket) => (bucket.quote_deposited, bucket.debt_accumulated),
            None => panic!("No bucket exists at this price."),
        };

        assert!(amount <= deposited, "Purchase exceeds the bucket's deposit.");

        let unlent = deposited - debt;
        let to_shift = if amount > unlent {
            amount - unlent
        } else {
            Decimal::ZERO
        };

        let mut plan: Vec<(i64, Decimal)> = Vec::new();
        if to_shift > Decimal::ZERO {
            let mut remaining = to_shift;
            for (_, bucket, _) in self.buckets.range_back(Decimal::ZERO..price) {
                if remaining == Decimal::ZERO {
                    break;
                }
                let available = bucket.available();
                if available > Decimal::ZERO {
                    let shifted = available.min(remaining);
                    plan.push((bucket.index, shifted));
                    remaining -= shifted;
                }
            }
            assert!(
                remaining == Decimal::ZERO,
                "Unable to reallocate debt away from the purchased bucket."
            );
        }

        for (to_index, shifted) in &plan {
            let to_price = bucket_math::index_to_price(*to_index);
            self.buckets.get_mut(&to_price).unwrap().debt_accumulated += *shifted;
        }

        {
            let mut bucket = self.buckets.get_mut(&price).unwrap();
            bucket.quote_deposited -= amount;
            bucket.debt_accumulated -= to_shift;
            bucket.collateral_encumbered += collateral_tendered;
        }
        self.total_deposit -= amount;

        plan
    }

    /// Releases `collateral_amount` of the bucket's purchased collateral in exchange for
    /// deposit claim at the bucket price.
    ///
    /// # Returns
    /// * `Decimal`: The claim burned, i.e. `collateral_amount * price`.
    ///
    /// # Panics
    /// * If no bucket exists at `index`.
    /// * If `collateral_amount` exceeds the bucket's collateral.
    pub fn claim_collateral(&mut self, index: i64, collateral_amount: Decimal) -> Decimal {
        assert!(collateral_amount > Decimal::ZERO, "Claim must be positive.");

        let price = bucket_math::index_to_price(index);
        let encumbered = match self.buckets.get(&price) {
            Some(bucket) => bucket.collateral_encumbered,
            None => panic!("No bucket exists at this price."),
        };

        assert!(
            collateral_amount <= encumbered,
            "Claim exceeds the bucket's collateral."
        );

        self.buckets.get_mut(&price).unwrap().collateral_encumbered -= collateral_amount;
        self.prune_if_drained(index);

        collateral_amount * price
    }

    /// The price of the cheapest bucket currently funding debt, if any.
    pub fn lowest_utilized_price(&self) -> Option<Decimal> {
        for (price, bucket, _) in self.buckets.range(Decimal::ZERO..) {
            if bucket.debt_accumulated > Decimal::ZERO {
                return Some(price);
            }
        }
        None
    }

    /// A snapshot of the bucket at `index`, if it exists.
    pub fn bucket_at(&self, index: i64) -> Option<PriceBucket> {
        let price = bucket_math::index_to_price(index);
        self.buckets.get(&price).map(|bucket| (*bucket).clone())
    }

    /// The loan receipts with a funding slice at the bucket at `index`.
    pub fn loans_at(&self, index: i64) -> Vec<NonFungibleLocalId> {
        let price = bucket_math::index_to_price(index);
        match self.buckets.get(&price) {
            Some(bucket) => bucket.loans.clone(),
            None => Vec::new(),
        }
    }

    /// Records that `loan_id` is funded by the bucket at `index`.
    pub fn attach_loan(&mut self, index: i64, loan_id: NonFungibleLocalId) {
        let price = bucket_math::index_to_price(index);
        let mut bucket = self.buckets.get_mut(&price).unwrap();
        if !bucket.loans.contains(&loan_id) {
            bucket.loans.push(loan_id);
        }
    }

    /// Records that `loan_id` is no longer funded by the bucket at `index`.
    pub fn detach_loan(&mut self, index: i64, loan_id: &NonFungibleLocalId) {
        let price = bucket_math::index_to_price(index);
        if let Some(mut bucket) = self.buckets.get_mut(&price) {
            bucket.loans.retain(|id| id != loan_id);
        }
    }

    /// Removes the bucket at `index` once deposit, debt and collateral are all drained.
    pub fn prune_if_drained(&mut self, index: i64) {
        let price = bucket_math::index_to_price(index);
        let drained = match self.buckets.get(&price) {
            Some(bucket) => {
                bucket.quote_deposited == Decimal::ZERO
                    && bucket.debt_accumulated == Decimal::ZERO
                    && bucket.collateral_encumbered == Decimal::ZERO
                    && bucket.loans.is_empty()
            }
            None => false,
        };

        if drained {
            self.buckets.remove(&price);
        }
    }

    /// Snapshots of all live buckets, highest price first.
    pub fn infos(&self) -> Vec<BucketInfoReturn> {
        let mut infos: Vec<BucketInfoReturn> = Vec::new();
        for (price, bucket, _) in self.buckets.range_back(Decimal::ZERO..) {
            infos.push(BucketInfoReturn {
                index: bucket.index,
                price,
                quote_deposited: bucket.quote_deposited,
                debt_accumulated: bucket.debt_accumulated,
                collateral_encumbered: bucket.collateral_encumbered,
                available: bucket.available(),
            });
        }
        infos
    }

    /// Whether any bucket priced below `price` has un-lent deposit.
    fn has_liquidity_below(&self, price: Decimal) -> bool {
        for (_, bucket, _) in self.buckets.range(Decimal::ZERO..price) {
            if bucket.available() > Decimal::ZERO {
                return true;
            }
        }
        false
    }
}
