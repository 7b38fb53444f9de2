#![allow(deprecated)]

//! # The Lattice Pool Core Logic Blueprint
//!
//! This blueprint defines the core component of the Lattice protocol, responsible for managing
//! price buckets of lender deposits, collateral-backed loans, borrowing, repayment and bid
//! purchases with cross-bucket debt reallocation.
//!
//! ## Overview
//! A pool pairs one quote token with one collateral token. Users interact with it directly:
//! - **Lend:** Deposit quote tokens at a bucket price of your choosing (`add_quote_token`) and
//!   receive a lender receipt NFT. Un-lent deposit can be withdrawn again
//!   (`remove_quote_token`); collateral accumulated by the bucket through bid purchases can be
//!   claimed at the bucket price (`claim_collateral`).
//! - **Borrow:** Post collateral (`add_collateral`) to receive a loan receipt NFT, then draw
//!   debt (`borrow`). Draws consume bucket deposits from the highest price down and stop at the
//!   borrower's price limit. Debt is repaid with `repay`, cheapest funding first, and the loan
//!   closes once debt reaches zero. Excess collateral can be withdrawn (`remove_collateral`)
//!   while the loan stays sufficiently collateralized.
//! - **Purchase:** Anyone can buy part of a bucket's deposit claim by tendering collateral at
//!   the bucket price (`purchase_bid`). Debt the bucket can no longer cover shifts to the
//!   next-best-priced buckets below, and the funding allocations of affected loans are
//!   re-derived accordingly.
//!
//! ## Key Concepts
//! - **Price lattice:** The geometric grid of valid bucket prices (see `bucket_math`).
//! - **Bucket:** A price level holding deposited quote tokens, the debt lent from them, and any
//!   collateral acquired through bid purchases.
//! - **LUP (lowest utilized price):** The price of the cheapest bucket currently funding debt.
//!   It acts as the pool's internal marginal price: collateralization is checked as
//!   `collateral * LUP >= debt * minimum collateral ratio`, so no external price feed is
//!   needed.
//! - **Loan receipt / lender receipt:** NFTs identifying a borrower position and a deposit
//!   claim respectively. All position-moving methods require a proof of the relevant receipt.
//!
//! ## Failure model
//! Every method either completes in full or aborts the transaction; the ledger walks
//! additionally compute their complete plan before mutating anything, so no partial draw or
//! partial reallocation can ever be observed.

use crate::bucket_ledger::{BucketLedger, PriceBucket};
use crate::bucket_math;
use crate::events::*;
use crate::shared_structs::*;
use scrypto::prelude::*;
use scrypto_avltree::AvlTree;

#[blueprint]
#[types(Decimal, PriceBucket, LoanAccount, LenderReceipt, LoanStatus, FundingSlice, AvlTree<Decimal, PriceBucket>, NonFungibleLocalId, Vec<NonFungibleLocalId>)]
#[events(
    EventAddQuoteToken,
    EventRemoveQuoteToken,
    EventClaimCollateral,
    EventNewLoan,
    EventAddCollateral,
    EventRemoveCollateral,
    EventBorrow,
    EventRepay,
    EventPurchaseBid,
    EventReallocate,
)]
mod pool_component {
    enable_method_auth! {
        methods {
            set_stops => restrict_to: [OWNER];
            set_minimum_borrow => restrict_to: [OWNER];
            set_minimum_collateral_ratio => restrict_to: [OWNER];
            set_max_funding_slices => restrict_to: [OWNER];
            mint_controller_badge => restrict_to: [OWNER];
            add_quote_token => PUBLIC;
            remove_quote_token => PUBLIC;
            claim_collateral => PUBLIC;
            add_collateral => PUBLIC;
            remove_collateral => PUBLIC;
            borrow => PUBLIC;
            repay => PUBLIC;
            purchase_bid => PUBLIC;
            get_bucket_infos => PUBLIC;
            get_loan_info => PUBLIC;
            get_lender_receipt_info => PUBLIC;
            get_pool_info => PUBLIC;
            get_total_debt => PUBLIC;
            get_lowest_utilized_price => PUBLIC;
        }
    }
    struct LatticePool {
        /// The ordered set of price buckets, together with pool-wide deposit and debt totals.
        ledger: BucketLedger,
        /// Holds all quote tokens deposited by lenders and not currently lent out.
        quote_vault: Vault,
        /// Holds all collateral posted by borrowers and tendered by bidders.
        collateral_vault: Vault,
        /// The resource address of the pool's quote token.
        quote_address: ResourceAddress,
        /// The resource address of the pool's collateral token.
        collateral_address: ResourceAddress,
        /// The `ResourceManager` for the loan receipt NFTs (`LoanAccount` struct).
        loan_manager: ResourceManager,
        /// The `ResourceManager` for the lender receipt NFTs (`LenderReceipt` struct).
        lender_manager: ResourceManager,
        /// The `ResourceManager` for the controller badge fungible token, used for authorization.
        controller_badge_manager: ResourceManager,
        /// A counter to generate unique IDs for each new loan receipt.
        loan_counter: u64,
        /// A counter to generate unique IDs for each new lender receipt.
        lender_counter: u64,
        /// Stores various configurable parameters of the pool.
        parameters: PoolParameters,
    }

    impl LatticePool {
        /// Instantiates a `LatticePool` component for a quote / collateral token pair.
        ///
        /// # Arguments
        /// * `quote_address`: The `ResourceAddress` of the quote token lenders deposit and
        ///   borrowers draw.
        /// * `collateral_address`: The `ResourceAddress` of the collateral token backing loans.
        /// * `dapp_def_address`: The `GlobalAddress` of the DApp Definition account for metadata
        ///   linkage.
        ///
        /// # Returns
        /// A tuple containing:
        /// * `Global<LatticePool>`: A global reference to the newly instantiated pool.
        /// * `Bucket`: A bucket containing the initially minted controller badges (supply: 10).
        ///
        /// # Logic
        /// 1. **Initialize Parameters:** Sets default values for `PoolParameters`.
        /// 2. **Allocate Address:** Reserves a component address for the pool.
        /// 3. **Create Controller Badge:** A fungible resource (`latCTRL`) minted to supply 10,
        ///    required for the owner role and admin methods.
        /// 4. **Create Loan Receipt Manager:** The non-fungible resource manager for loans
        ///    (`latLOAN`). Mint/burn/update restricted to the component or holders of 0.75
        ///    controller badges.
        /// 5. **Create Lender Receipt Manager:** The non-fungible resource manager for deposits
        ///    (`latDEP`), with the same role setup.
        /// 6. **Instantiate State:** Empty ledger, empty vaults for both tokens, zeroed
        ///    counters.
        /// 7. **Globalize Component:** Owner role requires 0.75 controller badges; component
        ///    metadata is linked to the DApp definition.
        pub fn instantiate(
            quote_address: ResourceAddress,
            collateral_address: ResourceAddress,
            dapp_def_address: GlobalAddress,
        ) -> (Global<LatticePool>, Bucket) {
            assert!(
                quote_address != collateral_address,
                "Quote and collateral must be different resources."
            );

            let parameters = PoolParameters {
                minimum_borrow: Decimal::ONE,
                minimum_collateral_ratio: dec!("1.05"),
                max_funding_slices: 250,
                stop_deposits: false,
                stop_borrowing: false,
                stop_purchases: false,
            };

            let (address_reservation, component_address) =
                Runtime::allocate_component_address(LatticePool::blueprint_id());

            let controller_role: Bucket = ResourceBuilder::new_fungible(OwnerRole::Fixed(rule!(
                require(global_caller(component_address))
            )))
            .divisibility(DIVISIBILITY_MAXIMUM)
            .metadata(metadata! (
                init {
                    "name" => "controller badge lattice", locked;
                    "symbol" => "latCTRL", locked;
                }
            ))
            .mint_roles(mint_roles!(
                minter => rule!(require(global_caller(component_address)));
                minter_updater => rule!(deny_all);
            ))
            .mint_initial_supply(10)
            .into();

            let controller_badge_manager: ResourceManager = controller_role.resource_manager();

            let loan_manager: ResourceManager =
                ResourceBuilder::new_integer_non_fungible_with_registered_type::<LoanAccount>(OwnerRole::Fixed(rule!(
                    require_amount(dec!("0.75"), controller_role.resource_address())
                )))
                .metadata(metadata!(
                    init {
                        "name" => "Lattice Loan", locked;
                        "symbol" => "latLOAN", locked;
                        "description" => "A receipt for your Lattice Pool loan.", locked;
                        "info_url" => "https://lattice.ilikeitstable.com", updatable;
                        "icon_url" => Url::of("https://lattice.ilikeitstable.com/lattice-loan.png"), updatable;
                        "dapp_definitions" => vec![dapp_def_address], updatable;
                    }
                ))
                .non_fungible_data_update_roles(non_fungible_data_update_roles!(
                    non_fungible_data_updater => rule!(require(global_caller(component_address))
                        || require_amount(
                            dec!("0.75"),
                            controller_role.resource_address()
                        ));
                    non_fungible_data_updater_updater => rule!(require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                ))
                .mint_roles(mint_roles!(
                    minter => rule!(require(global_caller(component_address))
                    || require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                    minter_updater => rule!(require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                ))
                .burn_roles(burn_roles!(
                    burner => rule!(require(global_caller(component_address))
                    || require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                    burner_updater => rule!(require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                ))
                .create_with_no_initial_supply()
                .into();

            let lender_manager: ResourceManager =
                ResourceBuilder::new_integer_non_fungible_with_registered_type::<LenderReceipt>(OwnerRole::Fixed(rule!(
                    require_amount(dec!("0.75"), controller_role.resource_address())
                )))
                .metadata(metadata!(
                    init {
                        "name" => "Lattice Deposit", locked;
                        "symbol" => "latDEP", locked;
                        "description" => "A claim on quote tokens deposited into a Lattice Pool price bucket.", locked;
                        "info_url" => "https://lattice.ilikeitstable.com", updatable;
                        "icon_url" => Url::of("https://lattice.ilikeitstable.com/lattice-deposit.png"), updatable;
                        "dapp_definitions" => vec![dapp_def_address], updatable;
                    }
                ))
                .non_fungible_data_update_roles(non_fungible_data_update_roles!(
                    non_fungible_data_updater => rule!(require(global_caller(component_address))
                        || require_amount(
                            dec!("0.75"),
                            controller_role.resource_address()
                        ));
                    non_fungible_data_updater_updater => rule!(require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                ))
                .mint_roles(mint_roles!(
                    minter => rule!(require(global_caller(component_address))
                    || require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                    minter_updater => rule!(require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                ))
                .burn_roles(burn_roles!(
                    burner => rule!(require(global_caller(component_address))
                    || require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                    burner_updater => rule!(require_amount(
                        dec!("0.75"),
                        controller_role.resource_address()
                    ));
                ))
                .create_with_no_initial_supply()
                .into();

            let pool = Self {
                ledger: BucketLedger::new(),
                quote_vault: Vault::new(quote_address),
                collateral_vault: Vault::new(collateral_address),
                quote_address,
                collateral_address,
                loan_manager,
                lender_manager,
                controller_badge_manager,
                loan_counter: 0,
                lender_counter: 0,
                parameters,
            }
            .instantiate()
            .prepare_to_globalize(OwnerRole::Fixed(rule!(require_amount(
                dec!("0.75"),
                controller_role.resource_address()
            ))))
            .with_address(address_reservation)
            .metadata(metadata! {
                init {
                    "name" => "Lattice Pool Core Logic".to_string(), updatable;
                    "description" => "The core logic component for a Lattice lending pool".to_string(), updatable;
                    "info_url" => Url::of("https://lattice.ilikeitstable.com"), updatable;
                    "dapp_definition" => dapp_def_address, updatable;
                }
            })
            .globalize();

            (pool, controller_role)
        }

        /// Deposits quote tokens into the bucket at the given price, minting a lender receipt.
        ///
        /// The bucket is created lazily on the first deposit at its price.
        ///
        /// # Arguments
        /// * `deposit`: A `Bucket` containing the quote tokens to deposit.
        /// * `price`: The bucket price to deposit at. Must lie exactly on the price lattice.
        ///
        /// # Returns
        /// * `Bucket`: A bucket containing the newly minted lender receipt NFT
        ///   (`LenderReceipt` struct).
        ///
        /// # Panics
        /// * If `stop_deposits` parameter is true.
        /// * If `deposit` is not the pool's quote token, or is empty.
        /// * If `price` does not lie on the bucket lattice.
        pub fn add_quote_token(&mut self, deposit: Bucket, price: Decimal) -> Bucket {
            assert!(
                !self.parameters.stop_deposits,
                "Not allowed to deposit right now."
            );
            assert!(
                deposit.resource_address() == self.quote_address,
                "Invalid quote token deposit."
            );
            assert!(
                bucket_math::is_valid_price(price),
                "Price does not lie on the bucket lattice."
            );

            let amount = deposit.amount();
            let index = bucket_math::price_to_index(price);

            self.ledger.deposit(index, amount);
            self.quote_vault.put(deposit);

            self.lender_counter += 1;
            let receipt_id = NonFungibleLocalId::integer(self.lender_counter);
            let receipt: Bucket = self
                .lender_manager
                .mint_non_fungible(
                    &receipt_id,
                    LenderReceipt {
                        bucket_index: index,
                        price,
                        amount,
                    },
                )
                .into();

            Runtime::emit_event(EventAddQuoteToken {
                index,
                price,
                amount,
                receipt_id,
            });

            receipt
        }

        /// Withdraws un-lent quote tokens from a bucket against a lender receipt.
        ///
        /// Deposit that is currently lent out cannot leave the pool; it becomes withdrawable
        /// again as loans repay or as other deposits absorb the debt.
        ///
        /// # Arguments
        /// * `receipt_proof`: A `NonFungibleProof` of the lender receipt.
        /// * `amount`: The amount of quote tokens to withdraw.
        ///
        /// # Returns
        /// * `Bucket`: The withdrawn quote tokens.
        ///
        /// # Panics
        /// * If the proof is not a lender receipt of this pool.
        /// * If `amount` exceeds the receipt's remaining claim.
        /// * If `amount` exceeds the bucket's un-lent deposit.
        pub fn remove_quote_token(
            &mut self,
            receipt_proof: NonFungibleProof,
            amount: Decimal,
        ) -> Bucket {
            let receipt_proof = receipt_proof.check_with_message(
                self.lender_manager.address(),
                "Incorrect proof! Are you sure this deposit is yours?",
            );
            let receipt = receipt_proof.non_fungible::<LenderReceipt>();
            let receipt_id: NonFungibleLocalId = receipt.local_id().clone();
            let receipt_data = receipt.data();

            assert!(
                amount <= receipt_data.amount,
                "Withdrawal exceeds this receipt's claim."
            );

            self.ledger.withdraw(receipt_data.bucket_index, amount);

            self.lender_manager.update_non_fungible_data(
                &receipt_id,
                "amount",
                receipt_data.amount - amount,
            );

            Runtime::emit_event(EventRemoveQuoteToken {
                index: receipt_data.bucket_index,
                amount,
                receipt_id,
            });

            self.quote_vault.take(amount)
        }

        /// Exchanges part of a lender receipt's claim for collateral held by its bucket.
        ///
        /// Buckets accumulate collateral through bid purchases; depositors can take that
        /// collateral out at the bucket price, burning claim worth `amount * price`.
        ///
        /// # Arguments
        /// * `receipt_proof`: A `NonFungibleProof` of the lender receipt.
        /// * `collateral_amount`: The amount of collateral to claim.
        ///
        /// # Returns
        /// * `Bucket`: The claimed collateral.
        ///
        /// # Panics
        /// * If the proof is not a lender receipt of this pool.
        /// * If the burned claim would exceed the receipt's remaining claim.
        /// * If `collateral_amount` exceeds the bucket's collateral.
        pub fn claim_collateral(
            &mut self,
            receipt_proof: NonFungibleProof,
            collateral_amount: Decimal,
        ) -> Bucket {
            let receipt_proof = receipt_proof.check_with_message(
                self.lender_manager.address(),
                "Incorrect proof! Are you sure this deposit is yours?",
            );
            let receipt = receipt_proof.non_fungible::<LenderReceipt>();
            let receipt_id: NonFungibleLocalId = receipt.local_id().clone();
            let receipt_data = receipt.data();

            assert!(
                collateral_amount * receipt_data.price <= receipt_data.amount,
                "Claim exceeds this receipt's claim."
            );

            let burned = self
                .ledger
                .claim_collateral(receipt_data.bucket_index, collateral_amount);

            self.lender_manager.update_non_fungible_data(
                &receipt_id,
                "amount",
                receipt_data.amount - burned,
            );

            Runtime::emit_event(EventClaimCollateral {
                index: receipt_data.bucket_index,
                amount: collateral_amount,
                receipt_id,
            });

            self.collateral_vault
                .take_advanced(collateral_amount, WithdrawStrategy::Rounded(RoundingMode::ToZero))
        }

        /// Posts collateral, either opening a new loan or topping up an existing one.
        ///
        /// # Arguments
        /// * `collateral`: A `Bucket` containing the collateral tokens to post.
        /// * `loan`: An optional `NonFungibleProof` of an existing loan receipt. When absent, a
        ///   new loan receipt is minted with status `Unfunded`.
        ///
        /// # Returns
        /// * `Option<Bucket>`: The newly minted loan receipt NFT if a new loan was opened,
        ///   `None` on a top-up.
        ///
        /// # Panics
        /// * If `collateral` is not the pool's collateral token, or is empty.
        /// * If topping up a loan that has already been closed.
        pub fn add_collateral(
            &mut self,
            collateral: Bucket,
            loan: Option<NonFungibleProof>,
        ) -> Option<Bucket> {
            assert!(
                collateral.resource_address() == self.collateral_address,
                "Invalid collateral deposit."
            );
            let amount = collateral.amount();
            assert!(amount > Decimal::ZERO, "Collateral deposit must be positive.");

            match loan {
                Some(loan_proof) => {
                    let loan_proof = loan_proof.check_with_message(
                        self.loan_manager.address(),
                        "Incorrect proof! Are you sure this loan is yours?",
                    );
                    let receipt = loan_proof.non_fungible::<LoanAccount>();
                    let loan_id: NonFungibleLocalId = receipt.local_id().clone();
                    let loan_data = receipt.data();

                    assert!(loan_data.status != LoanStatus::Closed, "Loan already closed.");

                    self.loan_manager.update_non_fungible_data(
                        &loan_id,
                        "collateral_posted",
                        loan_data.collateral_posted + amount,
                    );
                    self.collateral_vault.put(collateral);

                    Runtime::emit_event(EventAddCollateral { loan_id, amount });

                    None
                }
                None => {
                    self.loan_counter += 1;
                    let loan_id = NonFungibleLocalId::integer(self.loan_counter);

                    let loan_receipt: Bucket = self
                        .loan_manager
                        .mint_non_fungible(
                            &loan_id,
                            LoanAccount {
                                key_image_url: Url::of(
                                    "https://lattice.ilikeitstable.com/lattice-loan.png",
                                ),
                                collateral_posted: amount,
                                total_debt: Decimal::ZERO,
                                funding: Vec::new(),
                                status: LoanStatus::Unfunded,
                            },
                        )
                        .into();

                    self.collateral_vault.put(collateral);

                    Runtime::emit_event(EventNewLoan {
                        loan_id,
                        collateral_amount: amount,
                    });

                    Some(loan_receipt)
                }
            }
        }

        /// Removes posted collateral from a loan.
        ///
        /// Only allowed while the remaining collateral keeps the loan at or above the minimum
        /// collateralization ratio, valued at the pool's lowest utilized price.
        ///
        /// # Arguments
        /// * `loan_proof`: A `NonFungibleProof` of the loan receipt.
        /// * `amount`: The amount of collateral to remove.
        ///
        /// # Returns
        /// * `Bucket`: The removed collateral.
        ///
        /// # Panics
        /// * If the proof is not a loan receipt of this pool.
        /// * If `amount` exceeds the posted collateral.
        /// * If the remaining collateral would leave the loan undercollateralized.
        pub fn remove_collateral(
            &mut self,
            loan_proof: NonFungibleProof,
            amount: Decimal,
        ) -> Bucket {
            let loan_proof = loan_proof.check_with_message(
                self.loan_manager.address(),
                "Incorrect proof! Are you sure this loan is yours?",
            );
            let receipt = loan_proof.non_fungible::<LoanAccount>();
            let loan_id: NonFungibleLocalId = receipt.local_id().clone();
            let loan_data = receipt.data();

            assert!(
                amount <= loan_data.collateral_posted,
                "Withdrawal exceeds posted collateral."
            );

            let remaining = loan_data.collateral_posted - amount;

            if loan_data.total_debt > Decimal::ZERO {
                let lup = self.ledger.lowest_utilized_price().unwrap();
                assert!(
                    remaining * lup
                        >= loan_data.total_debt * self.parameters.minimum_collateral_ratio,
                    "Collateral value too low."
                );
            }

            self.loan_manager
                .update_non_fungible_data(&loan_id, "collateral_posted", remaining);

            Runtime::emit_event(EventRemoveCollateral { loan_id, amount });

            self.collateral_vault
                .take_advanced(amount, WithdrawStrategy::Rounded(RoundingMode::ToZero))
        }

        /// Draws quote-token debt against a loan's collateral.
        ///
        /// The draw walks buckets from the highest price down, consuming each bucket's un-lent
        /// deposit, and never touches a bucket priced below `price_limit`.
        ///
        /// # Arguments
        /// * `loan_proof`: A `NonFungibleProof` of the loan receipt.
        /// * `amount`: The amount of quote tokens to borrow.
        /// * `price_limit`: The lowest bucket price the borrower accepts funding from.
        ///
        /// # Returns
        /// * `Bucket`: The borrowed quote tokens.
        ///
        /// # Panics
        /// * If `stop_borrowing` parameter is true.
        /// * If the loan has already been closed.
        /// * If `amount` is below the `minimum_borrow` parameter.
        /// * If the draw cannot be filled at or above `price_limit`, or the pool lacks
        ///   liquidity altogether.
        /// * If the resulting position violates the minimum collateralization ratio at the
        ///   pool's lowest utilized price ("Collateral value too low.").
        /// * If the funding would be spread across more than `max_funding_slices` buckets.
        ///
        /// # Logic
        /// 1. **Validate:** Checks the stop switch, the receipt proof, the loan status and the
        ///    minimum borrow amount.
        /// 2. **Draw:** Translates `price_limit` to the lowest admissible bucket index and lets
        ///    the ledger draw the amount bucket by bucket (all-or-nothing).
        /// 3. **Record Funding:** Merges the draws into the loan's funding vector and registers
        ///    the loan with each funding bucket.
        /// 4. **Check Collateralization:** `collateral * LUP >= new debt * minimum ratio`.
        /// 5. **Update Receipt & Emit:** Writes back funding, debt and `Active` status, emits
        ///    `EventBorrow`, pays out the borrowed quote tokens.
        pub fn borrow(
            &mut self,
            loan_proof: NonFungibleProof,
            amount: Decimal,
            price_limit: Decimal,
        ) -> Bucket {
            assert!(
                !self.parameters.stop_borrowing,
                "Not allowed to borrow right now."
            );

            let loan_proof = loan_proof.check_with_message(
                self.loan_manager.address(),
                "Incorrect proof! Are you sure this loan is yours?",
            );
            let receipt = loan_proof.non_fungible::<LoanAccount>();
            let loan_id: NonFungibleLocalId = receipt.local_id().clone();
            let loan_data = receipt.data();

            assert!(loan_data.status != LoanStatus::Closed, "Loan already closed.");
            assert!(
                amount >= self.parameters.minimum_borrow,
                "Borrowed amount is less than the minimum required amount."
            );

            let start_index = bucket_math::index_at_or_above(price_limit);
            let draws = self.ledger.draw_debt(amount, start_index);

            let mut funding = loan_data.funding.clone();
            for (index, drawn) in &draws {
                match funding.iter_mut().find(|slice| slice.bucket_index == *index) {
                    Some(slice) => slice.amount += *drawn,
                    None => funding.push(FundingSlice {
                        bucket_index: *index,
                        price: bucket_math::index_to_price(*index),
                        amount: *drawn,
                    }),
                }
                self.ledger.attach_loan(*index, loan_id.clone());
            }

            assert!(
                funding.len() <= self.parameters.max_funding_slices as usize,
                "Funding is spread across too many buckets."
            );

            let new_total_debt = loan_data.total_debt + amount;
            let lup = self.ledger.lowest_utilized_price().unwrap();

            assert!(
                loan_data.collateral_posted * lup
                    >= new_total_debt * self.parameters.minimum_collateral_ratio,
                "Collateral value too low."
            );

            self.loan_manager
                .update_non_fungible_data(&loan_id, "funding", funding);
            self.loan_manager
                .update_non_fungible_data(&loan_id, "total_debt", new_total_debt);
            self.loan_manager
                .update_non_fungible_data(&loan_id, "status", LoanStatus::Active);

            Runtime::emit_event(EventBorrow {
                loan_id,
                amount,
                draws: draws.clone(),
                lowest_utilized_price: lup,
            });

            self.quote_vault.take(amount)
        }

        /// Repays a loan's debt, cheapest funding first.
        ///
        /// Funding slices at the lowest-priced buckets are retired first, so the pool's lowest
        /// utilized price can only rise on repayment. Paying at least the outstanding debt
        /// closes the loan; posted collateral can then be withdrawn with `remove_collateral`.
        ///
        /// # Arguments
        /// * `loan_proof`: A `NonFungibleProof` of the loan receipt.
        /// * `payment`: A `Bucket` of quote tokens. Any excess over the outstanding debt is
        ///   returned.
        ///
        /// # Returns
        /// * `Bucket`: The remainder of `payment` after the repayment.
        ///
        /// # Panics
        /// * If the proof is not a loan receipt of this pool.
        /// * If `payment` is not the pool's quote token, or is empty.
        /// * If the loan has no outstanding debt.
        pub fn repay(&mut self, loan_proof: NonFungibleProof, mut payment: Bucket) -> Bucket {
            let loan_proof = loan_proof.check_with_message(
                self.loan_manager.address(),
                "Incorrect proof! Are you sure this loan is yours?",
            );
            let receipt = loan_proof.non_fungible::<LoanAccount>();
            let loan_id: NonFungibleLocalId = receipt.local_id().clone();
            let loan_data = receipt.data();

            assert!(
                payment.resource_address() == self.quote_address,
                "Invalid quote token payment."
            );
            assert!(
                loan_data.status == LoanStatus::Active
                    || loan_data.status == LoanStatus::PartiallyPurchased,
                "Loan is not active."
            );

            let to_repay = payment.amount().min(loan_data.total_debt);
            let plan = self.ledger.repay(&loan_data.funding, to_repay);

            let mut funding = loan_data.funding.clone();
            for (index, repaid) in &plan {
                if let Some(slice) = funding.iter_mut().find(|slice| slice.bucket_index == *index)
                {
                    slice.amount -= *repaid;
                }
            }

            let mut emptied: Vec<i64> = Vec::new();
            funding.retain(|slice| {
                if slice.amount == Decimal::ZERO {
                    emptied.push(slice.bucket_index);
                    false
                } else {
                    true
                }
            });
            for index in emptied {
                self.ledger.detach_loan(index, &loan_id);
            }

            let new_total_debt = loan_data.total_debt - to_repay;
            let closed = new_total_debt == Decimal::ZERO;

            self.loan_manager
                .update_non_fungible_data(&loan_id, "funding", funding);
            self.loan_manager
                .update_non_fungible_data(&loan_id, "total_debt", new_total_debt);
            if closed {
                self.loan_manager
                    .update_non_fungible_data(&loan_id, "status", LoanStatus::Closed);
            }

            self.quote_vault.put(payment.take(to_repay));

            Runtime::emit_event(EventRepay {
                loan_id,
                amount: to_repay,
                closed,
            });

            payment
        }

        /// Purchases part of a bucket's deposit claim by tendering collateral at the bucket
        /// price.
        ///
        /// The bidder receives `amount` quote tokens and leaves `amount / price` collateral
        /// with the bucket, where its depositors can claim it via `claim_collateral`. Debt the
        /// bucket can no longer cover out of its shrunken deposit is reallocated to the
        /// next-best-priced buckets below with available deposit, and the funding allocations
        /// of the affected loans are re-derived to match. The whole operation either completes
        /// in full or aborts with no state committed.
        ///
        /// # Arguments
        /// * `collateral`: A `Bucket` of collateral tokens to tender from. Only
        ///   `amount / price` is taken; the rest is returned.
        /// * `amount`: The quote-token amount to purchase.
        /// * `price`: The price of the bucket to purchase from. Must lie exactly on the price
        ///   lattice.
        ///
        /// # Returns
        /// * `(Bucket, Bucket)`: A tuple containing:
        ///     1. The purchased quote tokens.
        ///     2. The remainder of the tendered collateral.
        ///
        /// # Panics
        /// * If `stop_purchases` parameter is true.
        /// * If `collateral` is not the pool's collateral token.
        /// * If `price` does not lie on the bucket lattice, or no bucket exists there.
        /// * If `amount` exceeds the bucket's deposit.
        /// * If the tendered collateral does not cover `amount / price`.
        /// * If debt uncovered by the purchase cannot be fully reallocated to buckets below.
        ///
        /// # Logic
        /// 1. **Validate:** Checks the stop switch, the tendered resource, the lattice price
        ///    and the bucket's existence.
        /// 2. **Price the Bid:** Builds the ephemeral purchase order: `amount / price`
        ///    collateral buys `amount` of deposit claim.
        /// 3. **Ledger Purchase:** The ledger shrinks the bucket's deposit, stores the tendered
        ///    collateral and computes-then-applies the reallocation plan for any debt the
        ///    remaining deposit no longer covers.
        /// 4. **Re-derive Loans:** Funding slices of the loans funded by the purchased bucket
        ///    are moved onto the receiving buckets, and those loans are marked
        ///    `PartiallyPurchased`.
        /// 5. **Settle & Emit:** Collateral into the vault, quote tokens out, `EventPurchaseBid`
        ///    plus one `EventReallocate` per receiving bucket.
        pub fn purchase_bid(
            &mut self,
            mut collateral: Bucket,
            amount: Decimal,
            price: Decimal,
        ) -> (Bucket, Bucket) {
            assert!(
                !self.parameters.stop_purchases,
                "Not allowed to purchase right now."
            );
            assert!(
                collateral.resource_address() == self.collateral_address,
                "Invalid collateral tendered."
            );
            assert!(
                bucket_math::is_valid_price(price),
                "Price does not lie on the bucket lattice."
            );

            let index = bucket_math::price_to_index(price);
            assert!(
                self.ledger.bucket_at(index).is_some(),
                "No bucket exists at this price."
            );

            let order = PurchaseOrder {
                amount,
                bucket_index: index,
                collateral_tendered: amount / price,
            };

            assert!(
                collateral.amount() >= order.collateral_tendered,
                "Not enough collateral tendered for this purchase."
            );

            let source_loans = self.ledger.loans_at(order.bucket_index);
            let plan = self
                .ledger
                .purchase(order.amount, order.bucket_index, order.collateral_tendered);

            self.reallocate_loan_funding(order.bucket_index, &source_loans, &plan);

            self.collateral_vault
                .put(collateral.take(order.collateral_tendered));
            let quote_out = self.quote_vault.take(order.amount);

            Runtime::emit_event(EventPurchaseBid {
                index: order.bucket_index,
                price,
                amount: order.amount,
                collateral_tendered: order.collateral_tendered,
            });
            for (to_index, shifted) in &plan {
                Runtime::emit_event(EventReallocate {
                    from_index: order.bucket_index,
                    to_index: *to_index,
                    amount: *shifted,
                });
            }

            (quote_out, collateral)
        }

        /// Mints `amount` of controller badges.
        pub fn mint_controller_badge(&self, amount: Decimal) -> Bucket {
            self.controller_badge_manager.mint(amount)
        }

        /// Sets the stop switches for deposits, borrowing and purchases.
        pub fn set_stops(
            &mut self,
            stop_deposits: bool,
            stop_borrowing: bool,
            stop_purchases: bool,
        ) {
            self.parameters.stop_deposits = stop_deposits;
            self.parameters.stop_borrowing = stop_borrowing;
            self.parameters.stop_purchases = stop_purchases;
        }

        /// Sets the minimum amount a single `borrow` call must draw.
        pub fn set_minimum_borrow(&mut self, minimum_borrow: Decimal) {
            self.parameters.minimum_borrow = minimum_borrow;
        }

        /// Sets the minimum collateralization ratio enforced on borrows and collateral
        /// withdrawals.
        pub fn set_minimum_collateral_ratio(&mut self, ratio: Decimal) {
            assert!(
                ratio >= Decimal::ONE,
                "Minimum collateral ratio cannot be below one."
            );
            self.parameters.minimum_collateral_ratio = ratio;
        }

        /// Sets the maximum number of buckets a single loan's funding may be spread across.
        pub fn set_max_funding_slices(&mut self, max_funding_slices: u64) {
            self.parameters.max_funding_slices = max_funding_slices;
        }

        /// Snapshots of all live buckets, highest price first.
        pub fn get_bucket_infos(&self) -> Vec<BucketInfoReturn> {
            self.ledger.infos()
        }

        /// The `LoanAccount` data of a loan receipt.
        pub fn get_loan_info(&self, loan_id: NonFungibleLocalId) -> LoanAccount {
            self.loan_manager.get_non_fungible_data(&loan_id)
        }

        /// The `LenderReceipt` data of a lender receipt.
        pub fn get_lender_receipt_info(&self, receipt_id: NonFungibleLocalId) -> LenderReceipt {
            self.lender_manager.get_non_fungible_data(&receipt_id)
        }

        /// A summarized view of the pool's state.
        pub fn get_pool_info(&self) -> PoolInfoReturn {
            PoolInfoReturn {
                quote_address: self.quote_address,
                collateral_address: self.collateral_address,
                total_deposit: self.ledger.total_deposit,
                total_debt: self.ledger.total_debt,
                lowest_utilized_price: self.ledger.lowest_utilized_price(),
                loan_count: self.loan_counter,
            }
        }

        /// The total debt outstanding across all buckets.
        pub fn get_total_debt(&self) -> Decimal {
            self.ledger.total_debt
        }

        /// The price of the cheapest bucket currently funding debt, if any.
        pub fn get_lowest_utilized_price(&self) -> Option<Decimal> {
            self.ledger.lowest_utilized_price()
        }

        /// Moves funding slices of the loans funded by `from_index` onto the buckets of the
        /// reallocation plan, in order, and marks every touched loan `PartiallyPurchased`.
        ///
        /// The plan's total always equals the debt shifted away from `from_index`, which in
        /// turn equals the funding the listed loans hold there, so the walk always consumes
        /// the plan completely.
        fn reallocate_loan_funding(
            &mut self,
            from_index: i64,
            source_loans: &[NonFungibleLocalId],
            plan: &[(i64, Decimal)],
        ) {
            let mut targets: Vec<(i64, Decimal)> = plan.to_vec();
            let mut cursor: usize = 0;

            for loan_id in source_loans {
                if cursor >= targets.len() {
                    break;
                }

                let loan_data: LoanAccount = self.loan_manager.get_non_fungible_data(loan_id);
                let mut funding = loan_data.funding.clone();
                let position = match funding
                    .iter()
                    .position(|slice| slice.bucket_index == from_index)
                {
                    Some(position) => position,
                    None => continue,
                };

                let mut touched = false;
                while funding[position].amount > Decimal::ZERO && cursor < targets.len() {
                    let (to_index, needed) = targets[cursor];
                    let moved = funding[position].amount.min(needed);

                    funding[position].amount -= moved;
                    match funding.iter_mut().find(|slice| slice.bucket_index == to_index) {
                        Some(slice) => slice.amount += moved,
                        None => funding.push(FundingSlice {
                            bucket_index: to_index,
                            price: bucket_math::index_to_price(to_index),
                            amount: moved,
                        }),
                    }
                    self.ledger.attach_loan(to_index, loan_id.clone());

                    if moved == needed {
                        cursor += 1;
                    } else {
                        targets[cursor].1 = needed - moved;
                    }
                    touched = true;
                }

                if funding[position].amount == Decimal::ZERO {
                    funding.remove(position);
                    self.ledger.detach_loan(from_index, loan_id);
                }

                if touched {
                    self.loan_manager
                        .update_non_fungible_data(loan_id, "funding", funding);
                    self.loan_manager.update_non_fungible_data(
                        loan_id,
                        "status",
                        LoanStatus::PartiallyPurchased,
                    );
                }
            }

            assert!(
                cursor >= targets.len(),
                "Reallocation accounting mismatch."
            );
        }
    }
}

#[derive(ScryptoSbor)]
pub struct PoolParameters {
    pub minimum_borrow: Decimal,
    pub minimum_collateral_ratio: Decimal,
    pub max_funding_slices: u64,
    pub stop_deposits: bool,
    pub stop_borrowing: bool,
    pub stop_purchases: bool,
}
