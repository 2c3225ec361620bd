// This file is auto-generated from the wallet registry.
// Do not modify this file manually.

use crate::{WalletApps, WalletInfo, WalletLinks};

pub static WALLET: WalletInfo = WalletInfo {
    id: "com.tiduswallet",
    name: "Tidus Wallet ",
    homepage: "https://tiduswallet.com/",
    image_id: "797bd108-d862-4d1b-d339-883de9a75000",
    app: WalletApps {
        browser: None,
        ios: None,
        android: Some(
            "https://play.google.com/store/apps/details?id=co.nycrypto.tiduswallet&hl=en&gl=US",
        ),
        mac: None,
        windows: None,
        linux: None,
        chrome: None,
        firefox: None,
        safari: None,
        edge: None,
        opera: None,
    },
    rdns: None,
    mobile: WalletLinks {
        native: Some("tiduswallet://walletconnect"),
        universal: None,
    },
    desktop: WalletLinks {
        native: None,
        universal: None,
    },
};
