// This file is auto-generated from the wallet registry.
// Do not modify this file manually.

mod com_tiduswallet;

use crate::WalletInfo;

pub static WALLETS: &[&WalletInfo] = &[&com_tiduswallet::WALLET];
