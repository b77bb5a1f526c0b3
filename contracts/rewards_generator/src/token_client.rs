//! Client for the reward token this generator mints and pays out.
//!
//! Only the calls the generator issues are declared here; the full token
//! surface lives in the `reward_token` contract.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "RewardTokenClient")]
pub trait RewardTokenInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    /// Moves `amount` of the caller's (owner's) balance into `holder`'s
    /// locked balance.
    fn lock(env: Env, holder: Address, amount: i128);
    fn transfer_ownership(env: Env, new_owner: Address);
    fn balance(env: Env, id: Address) -> i128;
    fn total_supply(env: Env) -> i128;
    fn cap(env: Env) -> i128;
}
